//! Plain-text document loading.
//!
//! Extraction never fails across this boundary: unreadable files become documents with
//! empty text, which the ranker then reports as skipped.

use std::path::Path;

use tracing::{debug, warn};

use crate::ranking::Document;


/// Decodes bytes as UTF-8, dropping invalid sequences.
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|&c| c != char::REPLACEMENT_CHARACTER)
        .collect()
}

/// Reads `path` into a [`Document`] named after the file.
///
/// I/O errors are logged and produce an empty document.
pub fn read_document(path: &Path) -> Document {
    let id = document_id(path);

    match std::fs::read(path) {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes = bytes.len(), "Read document");
            Document::new(id, decode_text(&bytes))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read document");
            Document::new(id, String::new())
        }
    }
}

fn document_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
