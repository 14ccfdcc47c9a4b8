// File: src/builder.rs
// Purpose: Controller wiring palette drops, the canvas, the property editor and previews

use crate::canvas::{FieldId, FieldList};
use crate::config::BuilderConfig;
use crate::drag_drop::{unique_key, Clock, DragDropCoordinator, DragPayload, SystemClock};
use crate::editor::PropertyEditor;
use crate::error::Result;
use crate::renderer::FormRenderer;
use crate::schema::{DisplayMode, ExtraAttrs, FieldSchema, FormDocument, Theme};
use std::fs;
use tracing::{debug, info};

/// Owns the form under construction and the UI state around it
///
/// Every edit replaces the field list as a whole, so previews and the JSON
/// view taken after an edit always see one consistent version.
#[derive(Debug)]
pub struct FormBuilder<C: Clock = SystemClock> {
    fields: FieldList,
    editor: PropertyEditor,
    drag: DragDropCoordinator,
    title: Option<String>,
    display: Option<DisplayMode>,
    theme: Option<Theme>,
    extra: ExtraAttrs,
    clock: C,
}

impl FormBuilder<SystemClock> {
    pub fn new(initial: Vec<FieldSchema>) -> Self {
        Self::with_clock(initial, SystemClock)
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Builder preloaded with the four-field sample form
    pub fn sample() -> Self {
        Self::from_document(FormDocument::sample())
    }

    pub fn from_document(document: FormDocument) -> Self {
        let mut builder = Self::new(document.components);
        builder.title = document.title;
        builder.display = document.display;
        builder.theme = document.theme;
        builder.extra = document.extra;
        builder
    }

    /// Start from the configured initial form, or the sample form when none is set
    pub fn from_config(config: &BuilderConfig) -> Result<Self> {
        let mut builder = match &config.canvas.initial_form {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                let document = FormDocument::from_json(&content)?;
                info!(path = %path, fields = document.components.len(), "initial form loaded");
                Self::from_document(document)
            }
            None => Self::sample(),
        };
        if config.project.title.is_some() {
            builder.set_title(config.project.title.clone());
        }
        Ok(builder)
    }
}

impl<C: Clock> FormBuilder<C> {
    pub fn with_clock(initial: Vec<FieldSchema>, clock: C) -> Self {
        Self {
            fields: FieldList::from_schemas(initial),
            editor: PropertyEditor::new(),
            drag: DragDropCoordinator::new(),
            title: None,
            display: None,
            theme: None,
            extra: ExtraAttrs::new(),
            clock,
        }
    }

    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    pub fn editor(&self) -> &PropertyEditor {
        &self.editor
    }

    /// Working-copy edits go through here; nothing reaches the canvas until save
    pub fn editor_mut(&mut self) -> &mut PropertyEditor {
        &mut self.editor
    }

    pub fn drag(&self) -> &DragDropCoordinator {
        &self.drag
    }

    pub fn drag_mut(&mut self) -> &mut DragDropCoordinator {
        &mut self.drag
    }

    /// Append `schema` and open it in the property editor
    pub fn append(&mut self, schema: FieldSchema) -> FieldId {
        let (fields, added) = self.fields.append_field(schema);
        self.fields = fields;
        let id = added.id();
        self.editor.open(added);
        id
    }

    /// Materialize a dropped palette payload as a new field
    pub fn drop_payload(&mut self, payload: DragPayload) -> FieldId {
        let key = unique_key(&self.fields, &payload.field_type, self.clock.now_millis());
        debug!(key = %key, "synthesized key for dropped field");
        self.append(payload.into_schema(key))
    }

    /// Finish the current drag gesture; appends a field if it ended over the canvas
    pub fn release_drag(&mut self) -> Option<FieldId> {
        let payload = self.drag.release()?;
        Some(self.drop_payload(payload))
    }

    pub fn move_up(&mut self, index: usize) {
        self.fields = self.fields.move_up(index);
    }

    pub fn move_down(&mut self, index: usize) {
        self.fields = self.fields.move_down(index);
    }

    pub fn remove(&mut self, index: usize) {
        self.fields = self.fields.remove(index);
    }

    /// Open the field at `index` in the property editor
    pub fn select(&mut self, index: usize) -> bool {
        match self.fields.get(index).cloned() {
            Some(field) => {
                self.editor.open(field);
                true
            }
            None => false,
        }
    }

    /// The field currently open in the editor, as committed on the canvas
    pub fn selection(&self) -> Option<FieldId> {
        self.editor.working_copy().map(|f| f.id())
    }

    /// Commit the editor's working copy and close it
    pub fn save_editor(&mut self) -> Result<()> {
        self.fields = self.editor.save(&self.fields)?;
        Ok(())
    }

    pub fn cancel_editor(&mut self) {
        self.editor.cancel();
    }

    /// The current list wrapped with the form-level attributes it was loaded with
    pub fn document(&self) -> FormDocument {
        FormDocument {
            components: self.fields.to_schemas(),
            title: self.title.clone(),
            display: self.display,
            theme: self.theme,
            extra: self.extra.clone(),
        }
    }

    /// The JSON structure view: the component list, pretty-printed
    pub fn json_view(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.fields)?)
    }

    /// A fresh renderer over the current list
    pub fn preview(&self, read_only: bool) -> FormRenderer {
        FormRenderer::from_list(&self.fields, read_only)
    }

    /// The canvas shows each field in its own interactive renderer
    pub fn field_preview(&self, index: usize) -> Option<FormRenderer> {
        self.fields
            .get(index)
            .map(|f| FormRenderer::new(vec![f.schema.clone()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::PropertyEdit;
    use crate::schema::{FieldType, OptionPart};
    use pretty_assertions::assert_eq;

    fn fixed_clock() -> impl Fn() -> i64 {
        || 1738511824482
    }

    #[test]
    fn test_sample_builder() {
        let builder = FormBuilder::sample();
        assert_eq!(builder.fields().len(), 4);
        assert!(!builder.editor().is_open());
    }

    #[test]
    fn test_drag_and_drop_appends_and_opens_editor() {
        let mut builder = FormBuilder::with_clock(Vec::new(), fixed_clock());
        builder.drag_mut().begin_drag(&FieldType::Select);
        builder.drag_mut().hover(true);
        let id = builder.release_drag().unwrap();

        let field = builder.fields().get(0).unwrap();
        assert_eq!(field.id(), id);
        assert_eq!(field.key(), "select_1738511824482");
        assert_eq!(field.schema.label, "Select");
        assert_eq!(builder.selection(), Some(id));
    }

    #[test]
    fn test_drop_outside_canvas_changes_nothing() {
        let mut builder = FormBuilder::with_clock(Vec::new(), fixed_clock());
        builder.drag_mut().begin_drag(&FieldType::Email);
        assert_eq!(builder.release_drag(), None);
        assert!(builder.fields().is_empty());
        assert_eq!(builder.selection(), None);
    }

    #[test]
    fn test_same_millisecond_drops_get_distinct_keys() {
        let mut builder = FormBuilder::with_clock(Vec::new(), fixed_clock());
        let payload = DragPayload {
            field_type: FieldType::Number,
            label: "Number".into(),
        };
        builder.drop_payload(payload.clone());
        builder.drop_payload(payload);
        let keys: Vec<&str> = builder.fields().iter().map(|f| f.key()).collect();
        assert_eq!(keys, vec!["number_1738511824482", "number_1738511824483"]);
    }

    #[test]
    fn test_edit_save_reaches_preview_and_json() {
        let mut builder = FormBuilder::sample();
        assert!(builder.select(0));
        builder.editor_mut().apply(PropertyEdit::Label("Full name".into()));
        assert!(!builder.json_view().unwrap().contains("Full name"));

        builder.save_editor().unwrap();
        assert!(builder.json_view().unwrap().contains("Full name"));
        assert!(builder.preview(true).render().into_string().contains("Full name"));
        assert_eq!(builder.selection(), None);
    }

    #[test]
    fn test_rejected_save_keeps_canvas() {
        let mut builder = FormBuilder::sample();
        builder.select(1);
        builder
            .editor_mut()
            .apply(PropertyEdit::Key("textfield_1738511824482".into()));
        let before = builder.fields().clone();
        assert!(builder.save_editor().is_err());
        assert_eq!(builder.fields(), &before);
        assert!(builder.editor().is_open());
    }

    #[test]
    fn test_option_scenario_through_builder() {
        let mut builder = FormBuilder::sample();
        builder.select(2);
        builder.editor_mut().add_option();
        builder.editor_mut().edit_option(2, OptionPart::Label, "Other");
        builder.editor_mut().edit_option(2, OptionPart::Value, "other");
        builder.save_editor().unwrap();
        let options = builder.fields().get(2).unwrap().schema.choices().to_vec();
        assert_eq!(options.len(), 3);
        assert_eq!(options[2].value, "other");
    }

    #[test]
    fn test_reorder_and_remove() {
        let mut builder = FormBuilder::sample();
        builder.move_down(0);
        builder.move_up(3);
        builder.remove(0);
        let labels: Vec<&str> = builder
            .fields()
            .iter()
            .map(|f| f.schema.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Name", "Submit", "Gender"]);
    }

    #[test]
    fn test_field_preview_is_independent() {
        let builder = FormBuilder::sample();
        let mut canvas_preview = builder.field_preview(0).unwrap();
        let sidebar_preview = builder.preview(false);
        canvas_preview.set_value("textfield_1738511824482", "Ada");
        assert!(sidebar_preview.values().is_empty());
        assert!(builder.field_preview(9).is_none());
    }

    #[test]
    fn test_document_keeps_title() {
        let mut document = FormDocument::sample();
        document.title = Some("Survey".into());
        let builder = FormBuilder::from_document(document);
        assert_eq!(builder.title(), Some("Survey"));
        assert_eq!(builder.document().title.as_deref(), Some("Survey"));
    }

    #[test]
    fn test_document_keeps_form_level_attributes() {
        let document = FormDocument::from_json(
            r#"{"title":"T","display":"wizard","theme":"dark","components":[],"settings":{"x":1}}"#,
        )
        .unwrap();
        let builder = FormBuilder::from_document(document.clone());
        let out = builder.document();
        assert_eq!(out.display, Some(DisplayMode::Wizard));
        assert_eq!(out.theme, Some(Theme::Dark));
        assert_eq!(out, document);
    }

    #[test]
    fn test_from_config_defaults_to_sample() {
        let builder = FormBuilder::from_config(&BuilderConfig::default()).unwrap();
        assert_eq!(builder.fields().len(), 4);
    }
}
