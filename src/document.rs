//! JSON document I/O boundary
//!
//! Loads the baseline and environment documents, renders the merged
//! document back to text (tab-indented when requested), and writes it out.
//! The merge core never touches the filesystem; everything here is glue
//! around it.

use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Document I/O errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("IO error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("JSON parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("JSON serialization failed: {0}")]
    Serialize(String),
}

/// Read a JSON document from disk
pub fn load(path: &Path) -> Result<Value, DocumentError> {
    let contents = fs::read_to_string(path).map_err(|e| DocumentError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| DocumentError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Render a document to JSON text, tab-indented when `indent` is set
pub fn render(value: &Value, indent: bool) -> Result<String, DocumentError> {
    if !indent {
        return serde_json::to_string(value).map_err(|e| DocumentError::Serialize(e.to_string()));
    }

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| DocumentError::Serialize(e.to_string()))?;

    String::from_utf8(buffer).map_err(|e| DocumentError::Serialize(e.to_string()))
}

/// Write the rendered document to disk
pub fn write(path: &Path, contents: &str) -> Result<(), DocumentError> {
    fs::write(path, contents).map_err(|e| DocumentError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    info!("File saved at {}", path.display());
    Ok(())
}
