// File: src/registry.rs
// Purpose: Static catalog of field types: palette metadata and editable properties

use crate::schema::FieldType;

/// A property the property editor can show for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Key,
    Label,
    Placeholder,
    Prefix,
    Suffix,
    DefaultValue,
    Options,
    Disabled,
    Required,
}

impl Property {
    /// Label shown next to the input in the editor
    pub fn label(&self) -> &'static str {
        match self {
            Property::Key => "Key",
            Property::Label => "Label",
            Property::Placeholder => "Placeholder",
            Property::Prefix => "Prefix",
            Property::Suffix => "Suffix",
            Property::DefaultValue => "Default Value",
            Property::Options => "Options",
            Property::Disabled => "Disabled",
            Property::Required => "Required",
        }
    }

    /// Checkbox-style properties take a bool, the rest take text
    pub fn is_flag(&self) -> bool {
        matches!(self, Property::Disabled | Property::Required)
    }
}

const BUTTON_PROPERTIES: &[Property] = &[Property::Label, Property::Disabled];

const CHOICE_PROPERTIES: &[Property] = &[
    Property::Key,
    Property::Label,
    Property::Options,
    Property::Disabled,
    Property::Required,
];

const TEXT_PROPERTIES: &[Property] = &[
    Property::Key,
    Property::Label,
    Property::Placeholder,
    Property::Prefix,
    Property::Suffix,
    Property::DefaultValue,
    Property::Disabled,
    Property::Required,
];

/// Properties the editor presents for a field type, in display order
pub fn editable_properties(field_type: &FieldType) -> &'static [Property] {
    match field_type {
        FieldType::Button => BUTTON_PROPERTIES,
        FieldType::Select | FieldType::Radio => CHOICE_PROPERTIES,
        FieldType::TextField | FieldType::Email | FieldType::Phone | FieldType::Number => {
            TEXT_PROPERTIES
        }
        FieldType::TextArea | FieldType::Checkbox | FieldType::Date | FieldType::Unknown(_) => &[],
    }
}

/// A draggable entry in the palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub field_type: FieldType,
    pub label: &'static str,
    /// Icon name from the lucide icon set
    pub icon: &'static str,
}

fn palette_metadata(field_type: &FieldType) -> Option<(&'static str, &'static str)> {
    let meta = match field_type {
        FieldType::TextField => ("Text Field", "text"),
        FieldType::Number => ("Number", "hash"),
        FieldType::TextArea => ("Text Area", "align-left"),
        FieldType::Checkbox => ("Checkbox", "check-square"),
        FieldType::Radio => ("Radio", "radio"),
        FieldType::Select => ("Select", "list"),
        FieldType::Email => ("Email", "mail"),
        FieldType::Date => ("Date", "calendar"),
        FieldType::Phone => ("Phone", "phone"),
        FieldType::Button => ("Submit", "send-horizontal"),
        FieldType::Unknown(_) => return None,
    };
    Some(meta)
}

/// Palette entry for a type, `None` for types the palette does not offer
pub fn lookup(field_type: &FieldType) -> Option<PaletteEntry> {
    palette_metadata(field_type).map(|(label, icon)| PaletteEntry {
        field_type: field_type.clone(),
        label,
        icon,
    })
}

/// All palette entries in display order
pub fn palette() -> Vec<PaletteEntry> {
    FieldType::KNOWN.iter().filter_map(lookup).collect()
}
