pub mod check;
pub mod palette;
pub mod preview;
pub mod sample;

use anyhow::{Context, Result};
use formease::FormDocument;
use std::fs;
use std::path::Path;

/// Read a component array or form document from disk
pub fn load_document(path: &Path) -> Result<FormDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read form file: {:?}", path))?;
    FormDocument::from_json(&content)
        .with_context(|| format!("Failed to parse form file: {:?}", path))
}
