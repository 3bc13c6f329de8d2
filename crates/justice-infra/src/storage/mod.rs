//! Legal document ingestion: file discovery, chunking, and indexing.

use std::path::Path;

pub mod chunker;
pub mod indexer;

/// Detect MIME type from file extension.
pub fn detect_mime(filename: &str) -> String {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        // Text
        "txt" | "text" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "xml" => "text/xml",
        "rst" => "text/x-rst",
        "json" => "application/json",

        // Documents (not indexable as plain text)
        "pdf" => "application/pdf",
        "doc" | "docx" => "application/msword",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",

        _ => "application/octet-stream",
    }
    .to_string()
}

/// Check whether a MIME type represents indexable text content.
pub fn is_text_mime(mime: &str) -> bool {
    mime.starts_with("text/") || mime == "application/json"
}
