//! Document store shapes: chunks written at ingestion, fragments returned
//! by similarity search.

use serde::{Deserialize, Serialize};

/// A chunk of a source document, ready to be embedded and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: String,
    /// Path or name of the file the chunk came from.
    pub source: String,
    pub chunk_index: u32,
    pub text: String,
}

/// A chunk returned by a similarity search, with its cosine distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFragment {
    pub source: String,
    pub chunk_index: u32,
    pub text: String,
    pub distance: f32,
}

/// Join retrieved fragments into the `document_context` prompt field.
///
/// Fragments keep their rank order and are separated by a blank line.
pub fn format_document_context(fragments: &[DocumentFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.trim())
        .collect::<Vec<_>>()
        .join("\n\n")
}
