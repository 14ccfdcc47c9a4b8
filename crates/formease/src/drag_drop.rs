// File: src/drag_drop.rs
// Purpose: Turn palette drags and canvas drops into "append field" events

use crate::canvas::FieldList;
use crate::registry::{self, PaletteEntry};
use crate::schema::{FieldSchema, FieldType};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What a palette entry carries while it is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
}

impl From<&PaletteEntry> for DragPayload {
    fn from(entry: &PaletteEntry) -> Self {
        Self {
            field_type: entry.field_type.clone(),
            label: entry.label.to_string(),
        }
    }
}

impl DragPayload {
    /// Schema for a dropped field, keyed `<type>_<millis>`
    pub fn into_schema(self, key: String) -> FieldSchema {
        FieldSchema::new(self.field_type, key, self.label)
    }
}

/// Source of creation timestamps for generated keys
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall clock via chrono
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl<F: Fn() -> i64> Clock for F {
    fn now_millis(&self) -> i64 {
        self()
    }
}

pub fn generate_key(field_type: &FieldType, millis: i64) -> String {
    format!("{}_{}", field_type.tag(), millis)
}

/// A `<type>_<millis>` key not yet used in `list`; two drops within one
/// millisecond advance the timestamp.
pub fn unique_key(list: &FieldList, field_type: &FieldType, millis: i64) -> String {
    let mut stamp = millis;
    loop {
        let key = generate_key(field_type, stamp);
        if !list.key_in_use(&key, None) {
            return key;
        }
        stamp += 1;
    }
}

/// Tracks one drag gesture from palette to canvas
#[derive(Debug, Clone, Default)]
pub struct DragDropCoordinator {
    dragging: Option<DragPayload>,
    over_canvas: bool,
}

impl DragDropCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up a palette entry. Types without a palette entry cannot be dragged.
    pub fn begin_drag(&mut self, field_type: &FieldType) -> bool {
        match registry::lookup(field_type) {
            Some(entry) => {
                debug!(field_type = %field_type, "drag started");
                self.dragging = Some(DragPayload::from(&entry));
                self.over_canvas = false;
                true
            }
            None => false,
        }
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        self.dragging.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Pointer entered or left the canvas drop zone
    pub fn hover(&mut self, over_canvas: bool) {
        if self.dragging.is_some() {
            self.over_canvas = over_canvas;
        }
    }

    /// Canvas highlight state
    pub fn is_over_canvas(&self) -> bool {
        self.dragging.is_some() && self.over_canvas
    }

    /// Release the pointer. Yields the payload only when released over the canvas.
    pub fn release(&mut self) -> Option<DragPayload> {
        let over = self.over_canvas;
        self.over_canvas = false;
        let payload = self.dragging.take()?;
        if over {
            debug!(field_type = %payload.field_type, "dropped on canvas");
            Some(payload)
        } else {
            debug!("drag released outside canvas");
            None
        }
    }

    pub fn cancel(&mut self) {
        self.dragging = None;
        self.over_canvas = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_on_canvas_yields_payload() {
        let mut dnd = DragDropCoordinator::new();
        assert!(dnd.begin_drag(&FieldType::Email));
        assert!(!dnd.is_over_canvas());
        dnd.hover(true);
        assert!(dnd.is_over_canvas());
        let payload = dnd.release().unwrap();
        assert_eq!(payload.field_type, FieldType::Email);
        assert_eq!(payload.label, "Email");
        assert!(!dnd.is_dragging());
    }

    #[test]
    fn test_release_outside_canvas_yields_nothing() {
        let mut dnd = DragDropCoordinator::new();
        dnd.begin_drag(&FieldType::Date);
        dnd.hover(true);
        dnd.hover(false);
        assert_eq!(dnd.release(), None);
        assert!(!dnd.is_dragging());
    }

    #[test]
    fn test_unknown_type_cannot_be_dragged() {
        let mut dnd = DragDropCoordinator::new();
        assert!(!dnd.begin_drag(&FieldType::Unknown("signature".into())));
        dnd.hover(true);
        assert!(!dnd.is_over_canvas());
        assert_eq!(dnd.release(), None);
    }

    #[test]
    fn test_cancel_clears_gesture() {
        let mut dnd = DragDropCoordinator::new();
        dnd.begin_drag(&FieldType::Radio);
        dnd.hover(true);
        dnd.cancel();
        assert_eq!(dnd.release(), None);
    }

    #[test]
    fn test_payload_becomes_interactive_schema() {
        let payload = DragPayload {
            field_type: FieldType::Button,
            label: "Submit".into(),
        };
        let schema = payload.into_schema(generate_key(&FieldType::Button, 1700000000000));
        assert_eq!(schema.key, "button_1700000000000");
        assert_eq!(schema.label, "Submit");
        assert!(schema.input);
    }

    #[test]
    fn test_unique_key_advances_timestamp() {
        let list = FieldList::from_schemas(vec![
            FieldSchema::new(FieldType::TextField, "textfield_5", "A"),
            FieldSchema::new(FieldType::TextField, "textfield_6", "B"),
        ]);
        assert_eq!(unique_key(&list, &FieldType::TextField, 5), "textfield_7");
        assert_eq!(unique_key(&list, &FieldType::Number, 5), "number_5");
    }

    #[test]
    fn test_closure_clock() {
        let clock = || 42_i64;
        assert_eq!(clock.now_millis(), 42);
    }
}
