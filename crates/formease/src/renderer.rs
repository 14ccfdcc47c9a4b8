// File: src/renderer.rs
// Purpose: Render a field list as an interactive (or read-only) Maud form

use crate::canvas::FieldList;
use crate::error::Result;
use crate::schema::{FieldSchema, FieldType};
use crate::value::FormValue;
use maud::{html, Markup};
use std::collections::BTreeMap;
use tracing::{debug, info, trace};

/// Current input values keyed by field key
pub type ValueMap = BTreeMap<String, FormValue>;

/// Renders one snapshot of a field list and owns the values typed into it
///
/// Each renderer has its own value map, seeded from the fields' default
/// values; input never touches the field list itself.
#[derive(Debug, Clone)]
pub struct FormRenderer {
    fields: Vec<FieldSchema>,
    values: ValueMap,
    read_only: bool,
}

impl FormRenderer {
    /// Interactive renderer over `fields`
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self::with_mode(fields, false)
    }

    /// Renderer whose controls refuse input
    pub fn read_only(fields: Vec<FieldSchema>) -> Self {
        Self::with_mode(fields, true)
    }

    pub fn from_list(list: &FieldList, read_only: bool) -> Self {
        Self::with_mode(list.to_schemas(), read_only)
    }

    fn with_mode(fields: Vec<FieldSchema>, read_only: bool) -> Self {
        let values = fields
            .iter()
            .filter_map(|f| f.default_value.clone().map(|v| (f.key.clone(), v)))
            .collect();
        Self {
            fields,
            values,
            read_only,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    /// `values[key] ?? defaultValue ?? ""`
    pub fn value_for(&self, field: &FieldSchema) -> FormValue {
        self.values
            .get(&field.key)
            .or(field.default_value.as_ref())
            .cloned()
            .unwrap_or_else(|| FormValue::String(String::new()))
    }

    /// Record user input for `key`.
    ///
    /// Refused (returns false) in read-only mode and for keys that no visible,
    /// enabled input control carries.
    pub fn set_value(&mut self, key: &str, value: impl Into<FormValue>) -> bool {
        if self.read_only {
            return false;
        }
        let accepts = self.fields.iter().any(|f| {
            f.key == key
                && !f.is_hidden()
                && !f.is_disabled()
                && f.field_type.is_known()
                && f.field_type != FieldType::Button
        });
        if !accepts {
            debug!(key, "input ignored, no editable control with this key");
            return false;
        }
        self.values.insert(key.to_string(), value.into());
        true
    }

    /// Serialize the value map for inspection. Required fields are not enforced.
    pub fn submit(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(&self.values)?;
        info!(fields = self.values.len(), "form submitted:\n{}", json);
        Ok(json)
    }

    /// Activate the control with `key`; only visible, enabled submit buttons do anything
    pub fn activate(&self, key: &str) -> Result<Option<String>> {
        let is_button = self
            .fields
            .iter()
            .any(|f| {
                f.key == key
                    && f.field_type == FieldType::Button
                    && !f.is_hidden()
                    && !f.is_disabled()
            });
        if is_button {
            self.submit().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn render(&self) -> Markup {
        html! {
            div.formease-form data-read-only=(flag(self.read_only)) {
                @for field in &self.fields {
                    (self.render_field(field))
                }
            }
        }
    }

    /// Markup for one field; empty for hidden fields and unknown types
    pub fn render_field(&self, field: &FieldSchema) -> Markup {
        if field.is_hidden() {
            return html! {};
        }

        let value = self.value_for(field);
        let disabled = field.is_disabled() || self.read_only;

        match &field.field_type {
            FieldType::TextField => self.text_input(field, &value, disabled, "text"),
            FieldType::Email => self.text_input(field, &value, disabled, "email"),
            FieldType::Phone => self.text_input(field, &value, disabled, "tel"),
            FieldType::Number => self.text_input(field, &value, disabled, "number"),
            FieldType::Date => self.text_input(field, &value, disabled, "date"),
            FieldType::TextArea => html! {
                div.field data-key=(field.key) {
                    (label_for(field))
                    textarea id=(field.key) name=(field.key)
                        placeholder=(field.placeholder.as_deref().unwrap_or(""))
                        spellcheck=[field.spellcheck.map(flag)]
                        disabled[disabled] { (value.to_string()) }
                    (description(field))
                }
            },
            FieldType::Checkbox => html! {
                div.field.field-checkbox data-key=(field.key) {
                    input type="checkbox" id=(field.key) name=(field.key)
                        checked[value.is_truthy()] disabled[disabled];
                    label for=(field.key) {
                        (field.label)
                        @if field.is_required() { span.required { "*" } }
                    }
                    (description(field))
                }
            },
            FieldType::Radio => html! {
                div.field.field-radio data-key=(field.key) {
                    (label_for(field))
                    div.radio-group role="radiogroup" {
                        @for option in field.choices() {
                            @let id = format!("{}-{}", field.key, option.value);
                            div.radio-item {
                                input type="radio" id=(id) name=(field.key) value=(option.value)
                                    checked[value.to_string() == option.value] disabled[disabled];
                                label for=(id) { (option.label) }
                            }
                        }
                    }
                    (description(field))
                }
            },
            FieldType::Select => html! {
                div.field.field-select data-key=(field.key) {
                    (label_for(field))
                    select id=(field.key) name=(field.key) disabled[disabled] {
                        option value="" disabled selected[value.to_string().is_empty()] {
                            (field.placeholder.as_deref().unwrap_or("Select an option"))
                        }
                        @for option in field.choices() {
                            option value=(option.value) selected[value.to_string() == option.value] {
                                (option.label)
                            }
                        }
                    }
                    (description(field))
                }
            },
            FieldType::Button => html! {
                div.field.field-button data-key=(field.key) {
                    button type="button" data-action="submit" disabled[field.is_disabled()] {
                        @if field.label.is_empty() { "Submit" } @else { (field.label) }
                    }
                }
            },
            FieldType::Unknown(tag) => {
                trace!(tag = %tag, key = %field.key, "no control for unknown field type");
                html! {}
            }
        }
    }

    fn text_input(&self, field: &FieldSchema, value: &FormValue, disabled: bool, default_type: &str) -> Markup {
        let input_type = field.input_type.as_deref().unwrap_or(default_type);
        let prefix = field.prefix.as_deref().filter(|p| !p.is_empty());
        let suffix = field.suffix.as_deref().filter(|s| !s.is_empty());

        html! {
            div.field data-key=(field.key) {
                (label_for(field))
                div.input-group {
                    @if let Some(prefix) = prefix { span.input-prefix { (prefix) } }
                    input type=(input_type) id=(field.key) name=(field.key)
                        value=(value.to_string())
                        placeholder=(field.placeholder.as_deref().unwrap_or(""))
                        spellcheck=[field.spellcheck.map(flag)]
                        required[field.is_required()]
                        disabled[disabled];
                    @if let Some(suffix) = suffix { span.input-suffix { (suffix) } }
                }
                (description(field))
            }
        }
    }
}

fn flag(on: bool) -> &'static str {
    if on {
        "true"
    } else {
        "false"
    }
}

fn label_for(field: &FieldSchema) -> Markup {
    if field.hide_label.unwrap_or(false) {
        return html! {};
    }
    html! {
        label for=(field.key) {
            (field.label)
            @if field.is_required() { span.required { "*" } }
        }
    }
}

fn description(field: &FieldSchema) -> Markup {
    html! {
        @if let Some(text) = &field.description {
            p.description { (text) }
        }
    }
}
