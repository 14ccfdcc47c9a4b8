// File: src/editor.rs
// Purpose: Property editor state machine for the selected field
//
// closed -> editing -> (saved | cancelled) -> closed

use crate::canvas::{Field, FieldList};
use crate::error::{FormError, Result};
use crate::registry::{editable_properties, Property};
use crate::schema::{FieldOption, OptionPart};
use crate::value::FormValue;
use tracing::{debug, warn};

/// A single change to the working copy
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    Key(String),
    Label(String),
    Placeholder(String),
    Prefix(String),
    Suffix(String),
    DefaultValue(String),
    Disabled(bool),
    Required(bool),
}

impl PropertyEdit {
    pub fn property(&self) -> Property {
        match self {
            PropertyEdit::Key(_) => Property::Key,
            PropertyEdit::Label(_) => Property::Label,
            PropertyEdit::Placeholder(_) => Property::Placeholder,
            PropertyEdit::Prefix(_) => Property::Prefix,
            PropertyEdit::Suffix(_) => Property::Suffix,
            PropertyEdit::DefaultValue(_) => Property::DefaultValue,
            PropertyEdit::Disabled(_) => Property::Disabled,
            PropertyEdit::Required(_) => Property::Required,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorState {
    #[default]
    Closed,
    Editing { working: Field },
}

/// Edits a working copy of one field until it is saved or discarded
#[derive(Debug, Clone, Default)]
pub struct PropertyEditor {
    state: EditorState,
}

impl PropertyEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Editing { .. })
    }

    /// The working copy, if a field is open
    pub fn working_copy(&self) -> Option<&Field> {
        match &self.state {
            EditorState::Editing { working } => Some(working),
            EditorState::Closed => None,
        }
    }

    fn working_mut(&mut self) -> Option<&mut Field> {
        match &mut self.state {
            EditorState::Editing { working } => Some(working),
            EditorState::Closed => None,
        }
    }

    /// Start editing `field`. Any unsaved edits to a previous selection are dropped.
    pub fn open(&mut self, field: Field) {
        if let Some(previous) = self.working_copy() {
            if previous.id() != field.id() {
                debug!(previous = %previous.id(), "discarding unsaved edits");
            }
        }
        debug!(id = %field.id(), key = %field.key(), "editor opened");
        self.state = EditorState::Editing { working: field };
    }

    /// Properties shown for the open field; empty when closed
    pub fn properties(&self) -> &'static [Property] {
        self.working_copy()
            .map(|f| editable_properties(&f.schema.field_type))
            .unwrap_or(&[])
    }

    /// Apply an edit to the working copy. Returns false (and changes nothing)
    /// when the editor is closed or the property is not shown for this type.
    pub fn apply(&mut self, edit: PropertyEdit) -> bool {
        if !self.properties().contains(&edit.property()) {
            return false;
        }
        let Some(working) = self.working_mut() else {
            return false;
        };
        let schema = &mut working.schema;
        match edit {
            PropertyEdit::Key(key) => schema.key = key,
            PropertyEdit::Label(label) => schema.label = label,
            PropertyEdit::Placeholder(text) => schema.placeholder = Some(text),
            PropertyEdit::Prefix(text) => schema.prefix = Some(text),
            PropertyEdit::Suffix(text) => schema.suffix = Some(text),
            PropertyEdit::DefaultValue(text) => schema.default_value = Some(FormValue::String(text)),
            PropertyEdit::Disabled(flag) => schema.disabled = Some(flag),
            PropertyEdit::Required(flag) => schema.set_required(flag),
        }
        true
    }

    fn options_mut(&mut self) -> Option<&mut Vec<FieldOption>> {
        if !self.properties().contains(&Property::Options) {
            return None;
        }
        self.working_mut()
            .map(|w| w.schema.options.get_or_insert_with(Vec::new))
    }

    /// Append an empty `{label: "", value: ""}` option
    pub fn add_option(&mut self) -> bool {
        match self.options_mut() {
            Some(options) => {
                options.push(FieldOption::default());
                true
            }
            None => false,
        }
    }

    pub fn edit_option(&mut self, index: usize, part: OptionPart, text: impl Into<String>) -> bool {
        let Some(option) = self.options_mut().and_then(|o| o.get_mut(index)) else {
            warn!(index, "option index out of range, ignoring");
            return false;
        };
        match part {
            OptionPart::Label => option.label = text.into(),
            OptionPart::Value => option.value = text.into(),
        }
        true
    }

    pub fn remove_option(&mut self, index: usize) -> bool {
        match self.options_mut() {
            Some(options) if index < options.len() => {
                options.remove(index);
                true
            }
            _ => {
                warn!(index, "option index out of range, ignoring");
                false
            }
        }
    }

    /// Commit the working copy into `list` and close the editor.
    ///
    /// A key that was changed to empty, or to the key of another field, is
    /// rejected and the editor stays open. A working copy whose field has
    /// left the canvas commits to an unchanged list.
    pub fn save(&mut self, list: &FieldList) -> Result<FieldList> {
        let working = self.working_copy().ok_or(FormError::EditorClosed)?;

        if let Some(committed) = list.find(working.id()) {
            if committed.key() != working.key() {
                if working.key().is_empty() {
                    return Err(FormError::EmptyKey);
                }
                if list.key_in_use(working.key(), Some(working.id())) {
                    return Err(FormError::DuplicateKey(working.key().to_string()));
                }
            }
        }

        let working = working.clone();
        self.state = EditorState::Closed;
        Ok(list.update(working))
    }

    /// Close without committing
    pub fn cancel(&mut self) {
        if self.is_open() {
            debug!("editor cancelled");
        }
        self.state = EditorState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSchema, FieldType};
    use pretty_assertions::assert_eq;

    fn canvas() -> FieldList {
        let mut select = FieldSchema::new(FieldType::Select, "color", "Color");
        select.options = Some(vec![FieldOption::new("X", "x")]);
        FieldList::from_schemas(vec![
            FieldSchema::new(FieldType::TextField, "name", "Name"),
            select,
            FieldSchema::new(FieldType::Button, "submit", "Submit"),
            FieldSchema::new(FieldType::TextArea, "notes", "Notes"),
        ])
    }

    fn open_at(list: &FieldList, index: usize) -> PropertyEditor {
        let mut editor = PropertyEditor::new();
        editor.open(list.get(index).unwrap().clone());
        editor
    }

    #[test]
    fn test_starts_closed() {
        let editor = PropertyEditor::new();
        assert!(!editor.is_open());
        assert!(editor.properties().is_empty());
        assert_eq!(editor.state(), &EditorState::Closed);
    }

    #[test]
    fn test_edits_stay_on_working_copy_until_save() {
        let list = canvas();
        let mut editor = open_at(&list, 0);
        assert!(editor.apply(PropertyEdit::Label("Full name".into())));
        assert!(editor.apply(PropertyEdit::Placeholder("Jane Doe".into())));
        assert_eq!(list.get(0).unwrap().schema.label, "Name");

        let saved = editor.save(&list).unwrap();
        assert!(!editor.is_open());
        let field = &saved.get(0).unwrap().schema;
        assert_eq!(field.label, "Full name");
        assert_eq!(field.placeholder.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_cancel_discards() {
        let list = canvas();
        let mut editor = open_at(&list, 0);
        editor.apply(PropertyEdit::Label("Other".into()));
        editor.cancel();
        assert!(!editor.is_open());
        assert!(matches!(editor.save(&list), Err(FormError::EditorClosed)));
    }

    #[test]
    fn test_switching_selection_replaces_working_copy() {
        let list = canvas();
        let mut editor = open_at(&list, 0);
        editor.apply(PropertyEdit::Label("Unsaved".into()));
        editor.open(list.get(2).unwrap().clone());
        assert_eq!(editor.working_copy().unwrap().schema.label, "Submit");
        let saved = editor.save(&list).unwrap();
        assert_eq!(saved, list);
    }

    #[test]
    fn test_button_only_edits_label_and_disabled() {
        let list = canvas();
        let mut editor = open_at(&list, 2);
        assert!(!editor.apply(PropertyEdit::Key("other".into())));
        assert!(!editor.apply(PropertyEdit::Placeholder("x".into())));
        assert!(editor.apply(PropertyEdit::Disabled(true)));
        assert!(editor.apply(PropertyEdit::Label("Send".into())));
        let working = &editor.working_copy().unwrap().schema;
        assert_eq!(working.key, "submit");
        assert_eq!(working.disabled, Some(true));
    }

    #[test]
    fn test_types_without_properties_accept_nothing() {
        let list = canvas();
        let mut editor = open_at(&list, 3);
        assert!(editor.properties().is_empty());
        assert!(!editor.apply(PropertyEdit::Label("x".into())));
        assert!(!editor.add_option());
    }

    #[test]
    fn test_required_and_default_value() {
        let list = canvas();
        let mut editor = open_at(&list, 0);
        editor.apply(PropertyEdit::Required(true));
        editor.apply(PropertyEdit::DefaultValue("Ada".into()));
        let saved = editor.save(&list).unwrap();
        let field = &saved.get(0).unwrap().schema;
        assert!(field.is_required());
        assert_eq!(field.default_value, Some(FormValue::from("Ada")));
    }

    #[test]
    fn test_option_editing() {
        let list = canvas();
        let mut editor = open_at(&list, 1);
        assert!(editor.add_option());
        assert!(editor.edit_option(1, OptionPart::Label, "Y"));
        assert!(editor.edit_option(1, OptionPart::Value, "y"));
        let saved = editor.save(&list).unwrap();
        assert_eq!(
            saved.get(1).unwrap().schema.options,
            Some(vec![FieldOption::new("X", "x"), FieldOption::new("Y", "y")])
        );
    }

    #[test]
    fn test_option_removal_and_bad_indexes() {
        let list = canvas();
        let mut editor = open_at(&list, 1);
        assert!(!editor.edit_option(4, OptionPart::Label, "nope"));
        assert!(!editor.remove_option(4));
        assert!(editor.remove_option(0));
        assert_eq!(editor.working_copy().unwrap().schema.options, Some(vec![]));
    }

    #[test]
    fn test_options_only_for_choice_types() {
        let list = canvas();
        let mut editor = open_at(&list, 0);
        assert!(!editor.add_option());
        assert_eq!(editor.working_copy().unwrap().schema.options, None);
    }

    #[test]
    fn test_rename_to_existing_key_rejected() {
        let list = canvas();
        let mut editor = open_at(&list, 0);
        editor.apply(PropertyEdit::Key("color".into()));
        match editor.save(&list) {
            Err(FormError::DuplicateKey(key)) => assert_eq!(key, "color"),
            other => panic!("expected duplicate key error, got {:?}", other),
        }
        assert!(editor.is_open());
    }

    #[test]
    fn test_rename_to_empty_key_rejected() {
        let list = canvas();
        let mut editor = open_at(&list, 0);
        editor.apply(PropertyEdit::Key(String::new()));
        assert!(matches!(editor.save(&list), Err(FormError::EmptyKey)));
    }

    #[test]
    fn test_rename_to_fresh_key_accepted() {
        let list = canvas();
        let mut editor = open_at(&list, 0);
        editor.apply(PropertyEdit::Key("full_name".into()));
        let saved = editor.save(&list).unwrap();
        assert_eq!(saved.get(0).unwrap().key(), "full_name");
        assert_eq!(saved.get(0).unwrap().id(), list.get(0).unwrap().id());
    }

    #[test]
    fn test_save_after_field_removed_is_noop() {
        let list = canvas();
        let mut editor = open_at(&list, 0);
        editor.apply(PropertyEdit::Label("Gone".into()));
        let without = list.remove(0);
        assert_eq!(editor.save(&without).unwrap(), without);
    }
}
