//! Writer — renders the [`OutputDocument`] and persists it.
//!
//! The rendering is indented with four spaces and leaves non-ASCII text
//! (zone names are often Cyrillic) unescaped.

use std::path::Path;

use serde::Serialize;

use crate::error::OutputError;
use crate::types::OutputDocument;

const INDENT: &[u8] = b"    ";

/// Render `doc` as indented UTF-8 JSON.
pub fn render(doc: &OutputDocument) -> Result<String, OutputError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut serializer)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Render `doc`, write it to `path` (creating parent directories) and return
/// the rendered text.
pub fn write_document(doc: &OutputDocument, path: &Path) -> Result<String, OutputError> {
    let rendered = render(doc)?;
    let write_err = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, &rendered).map_err(write_err)?;
    Ok(rendered)
}
