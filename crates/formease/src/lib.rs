// FormEase - drag-and-drop form builder core
// Field schema, canvas edit operations, property editor and Maud form preview

pub mod error;
pub mod schema;
pub mod value;
pub mod registry;

// Builder state
pub mod canvas;
pub mod editor;
pub mod drag_drop;
pub mod renderer;
pub mod builder;
pub mod config;

// Re-export Maud for hosts rendering around the preview
pub use maud::{html as maud, Markup, PreEscaped, DOCTYPE};

// Re-export core types
pub use builder::FormBuilder;
pub use canvas::{Field, FieldId, FieldList, KeyAnomaly};
pub use config::BuilderConfig;
pub use drag_drop::{Clock, DragDropCoordinator, DragPayload, SystemClock};
pub use editor::{EditorState, PropertyEdit, PropertyEditor};
pub use error::{FormError, Result};
pub use registry::{PaletteEntry, Property};
pub use renderer::{FormRenderer, ValueMap};
pub use schema::{
    DisplayMode, FieldOption, FieldSchema, FieldType, FormDocument, LabelPosition, OptionPart,
    Theme, ValidationRules, Widget,
};
pub use value::FormValue;
