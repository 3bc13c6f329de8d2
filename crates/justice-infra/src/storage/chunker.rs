//! Semantic text chunker for legal documents.
//!
//! Uses the `text-splitter` crate to split text into chunks suitable for
//! embedding. Markdown files use `MarkdownSplitter` for heading-aware
//! splitting; all other text uses `TextSplitter`.
//!
//! Chunk target size: 512 characters with paragraph boundary awareness.

use text_splitter::{MarkdownSplitter, TextSplitter};

/// Maximum characters per chunk.
pub const CHUNK_SIZE: usize = 512;

/// Split `text` into non-empty chunks, choosing the splitter from `mime`.
pub fn chunk_text(text: &str, mime: &str) -> Vec<String> {
    let chunks: Vec<&str> = if mime == "text/markdown" {
        MarkdownSplitter::new(CHUNK_SIZE).chunks(text).collect()
    } else {
        TextSplitter::new(CHUNK_SIZE).chunks(text).collect()
    };

    chunks
        .into_iter()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = chunk_text("Section 303. Theft.", "text/plain");
        assert_eq!(chunks, vec!["Section 303. Theft."]);
    }

    #[test]
    fn test_long_text_respects_chunk_size() {
        let paragraph = "Whoever intending to take dishonestly any movable property out of the possession of any person without that person's consent moves that property is said to commit theft. ";
        let text = paragraph.repeat(20);
        let chunks = chunk_text(&text, "text/plain");
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= CHUNK_SIZE));
    }

    #[test]
    fn test_markdown_splits_on_headings() {
        let body = "Lorem ipsum dolor sit amet. ".repeat(15);
        let text = format!("# Chapter I\n\n{body}\n\n# Chapter II\n\n{body}");
        let chunks = chunk_text(&text, "text/markdown");
        assert!(chunks.len() >= 2);
        assert!(chunks[0].starts_with("# Chapter I"));
        assert!(chunks.iter().any(|c| c.starts_with("# Chapter II")));
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(chunk_text("   \n\n", "text/plain").is_empty());
    }
}
