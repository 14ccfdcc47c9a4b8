// File: src/error.rs
// Purpose: Error type for the form builder edges (parsing, I/O, editor commits)

use thiserror::Error;

/// Errors surfaced by FormEase
///
/// Edit operations on the canvas are total and never produce these; they only
/// come from parsing input, reading files and the key policy on editor save.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("invalid form JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("field key must not be empty")]
    EmptyKey,

    #[error("field key '{0}' is already used by another field")]
    DuplicateKey(String),

    #[error("no field is open in the property editor")]
    EditorClosed,
}

pub type Result<T> = std::result::Result<T, FormError>;
