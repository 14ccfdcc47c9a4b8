// File: src/schema.rs
// Purpose: Field schema data model and its JSON interchange format

use crate::error::Result;
use crate::value::FormValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Attributes outside the modelled schema, kept verbatim for round-trips
pub type ExtraAttrs = BTreeMap<String, serde_json::Value>;

/// The kind of control a field renders as
///
/// Serialized as the bare type tag (`"textfield"`, `"button"`, ...). Tags the
/// builder does not know are kept in [`FieldType::Unknown`] so that a loaded
/// form re-serializes unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    TextField,
    Number,
    TextArea,
    Checkbox,
    Radio,
    Select,
    Email,
    Date,
    Phone,
    Button,
    Unknown(String),
}

impl FieldType {
    /// Every type the builder knows, in palette order
    pub const KNOWN: [FieldType; 10] = [
        FieldType::TextField,
        FieldType::Number,
        FieldType::TextArea,
        FieldType::Checkbox,
        FieldType::Radio,
        FieldType::Select,
        FieldType::Email,
        FieldType::Date,
        FieldType::Phone,
        FieldType::Button,
    ];

    /// Wire tag used in the JSON schema
    pub fn tag(&self) -> &str {
        match self {
            FieldType::TextField => "textfield",
            FieldType::Number => "number",
            FieldType::TextArea => "textarea",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Select => "select",
            FieldType::Email => "email",
            FieldType::Date => "date",
            FieldType::Phone => "phone",
            FieldType::Button => "button",
            FieldType::Unknown(tag) => tag,
        }
    }

    /// Select and radio carry an option list
    pub fn is_choice(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FieldType::Unknown(_))
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        match tag {
            "textfield" => FieldType::TextField,
            "number" => FieldType::Number,
            "textarea" => FieldType::TextArea,
            "checkbox" => FieldType::Checkbox,
            "radio" => FieldType::Radio,
            "select" => FieldType::Select,
            "email" => FieldType::Email,
            "date" => FieldType::Date,
            "phone" => FieldType::Phone,
            "button" => FieldType::Button,
            other => FieldType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        FieldType::from(tag.as_str())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Unknown(tag) => tag,
            known => known.tag().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One `{label, value}` choice of a select or radio field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Which part of an option the editor changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionPart {
    Label,
    Value,
}

/// Validation rules attached to a field. Only `required` is acted upon (as a
/// visual marker); the rest is carried for schema compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_length: Option<FormValue>,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_length: Option<FormValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraAttrs,
}

/// Where the label sits relative to its control
///
/// Positions other than the four plain sides (`"left-left"`, ...) are kept in
/// [`LabelPosition::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LabelPosition {
    Top,
    Left,
    Right,
    Bottom,
    Other(String),
}

impl LabelPosition {
    pub fn as_str(&self) -> &str {
        match self {
            LabelPosition::Top => "top",
            LabelPosition::Left => "left",
            LabelPosition::Right => "right",
            LabelPosition::Bottom => "bottom",
            LabelPosition::Other(position) => position,
        }
    }
}

impl From<String> for LabelPosition {
    fn from(position: String) -> Self {
        match position.as_str() {
            "top" => LabelPosition::Top,
            "left" => LabelPosition::Left,
            "right" => LabelPosition::Right,
            "bottom" => LabelPosition::Bottom,
            _ => LabelPosition::Other(position),
        }
    }
}

impl From<LabelPosition> for String {
    fn from(position: LabelPosition) -> Self {
        match position {
            LabelPosition::Other(position) => position,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Declarative description of one form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub key: String,
    #[serde(default = "default_input")]
    pub input: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_label: Option<bool>,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<FormValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<ValidationRules>,

    // Rarely used flags, part of the schema shape only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_position: Option<LabelPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_on_hide: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_view: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal_edit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<Widget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spellcheck: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabindex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autofocus: Option<bool>,
    #[serde(default, rename = "id", skip_serializing_if = "Option::is_none")]
    pub html_id: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraAttrs,
}

fn default_input() -> bool {
    true
}

/// A present `null` is a value (`Some(FormValue::Null)`), only an absent key is `None`
fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<FormValue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    FormValue::deserialize(deserializer).map(Some)
}

impl FieldSchema {
    /// A bare interactive field with every optional attribute absent
    pub fn new(field_type: FieldType, key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field_type,
            label: label.into(),
            key: key.into(),
            input: true,
            placeholder: None,
            prefix: None,
            suffix: None,
            disabled: None,
            description: None,
            tooltip: None,
            hidden: None,
            hide_label: None,
            default_value: None,
            options: None,
            validate: None,
            required: None,
            action: None,
            multiple: None,
            label_position: None,
            clear_on_hide: None,
            unique: None,
            persistent: None,
            protected: None,
            table_view: None,
            modal_edit: None,
            widget: None,
            input_type: None,
            input_format: None,
            input_mask: None,
            spellcheck: None,
            custom_class: None,
            tabindex: None,
            autofocus: None,
            html_id: None,
            extra: ExtraAttrs::new(),
        }
    }

    pub fn is_required(&self) -> bool {
        self.validate
            .as_ref()
            .and_then(|v| v.required)
            .unwrap_or(false)
    }

    /// Sets `validate.required`, keeping the other validation rules
    pub fn set_required(&mut self, required: bool) {
        self.validate.get_or_insert_with(ValidationRules::default).required = Some(required);
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }

    /// Options as shown to the user; empty for non-choice types
    pub fn choices(&self) -> &[FieldOption] {
        if !self.field_type.is_choice() {
            return &[];
        }
        self.options.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Form,
    Wizard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Form-level wrapper around the component list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDocument {
    pub components: Vec<FieldSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(flatten)]
    pub extra: ExtraAttrs,
}

impl FormDocument {
    pub fn new(components: Vec<FieldSchema>) -> Self {
        Self {
            components,
            ..Self::default()
        }
    }

    /// Parse either a bare component array or a `{components: [...]}` document
    pub fn from_json(input: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        if value.is_array() {
            Ok(Self::new(serde_json::from_value(value)?))
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The four-field form the builder starts with
    pub fn sample() -> Self {
        let mut name = FieldSchema::new(FieldType::TextField, "textfield_1738511824482", "Name");
        name.placeholder = Some("Enter your Name".to_string());
        name.prefix = Some(String::new());

        let mut age = FieldSchema::new(FieldType::Number, "number_1738511853329", "Age");
        age.placeholder = Some("Enter your age".to_string());

        let mut gender = FieldSchema::new(FieldType::Radio, "radio_1738511875719", "Gender");
        gender.options = Some(vec![
            FieldOption::new("Male", "male"),
            FieldOption::new("Female", "Female"),
        ]);

        let submit = FieldSchema::new(FieldType::Button, "button_1738511899808", "Submit");

        Self::new(vec![name, age, gender, submit])
    }
}

/// Pretty-printed structural dump of a component list (the JSON view)
pub fn to_pretty_json(fields: &[FieldSchema]) -> Result<String> {
    Ok(serde_json::to_string_pretty(fields)?)
}

/// Parse a component list produced by [`to_pretty_json`]
pub fn from_json(input: &str) -> Result<Vec<FieldSchema>> {
    Ok(serde_json::from_str(input)?)
}
