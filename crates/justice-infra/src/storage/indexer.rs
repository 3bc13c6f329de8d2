//! Document indexer: files on disk into the LanceDB `documents` table.
//!
//! Walks the given paths, keeps text files, chunks them, embeds the chunks,
//! and appends the rows. A file that cannot be read or indexed is skipped
//! with a warning so one bad file does not abort a large ingestion.
//!
//! A file's rows are written in one append after all of its chunks are
//! embedded, so a skipped file leaves nothing behind in the table.
//! Symlinked directories met while walking are not followed.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;

use justice_types::document::DocumentChunk;
use justice_types::error::RetrievalError;

use super::chunker::chunk_text;
use super::{detect_mime, is_text_mime};
use crate::vector::documents::LanceDocumentStore;

/// Chunks embedded per call to the embedder.
const EMBED_BATCH: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}

/// Outcome of an ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct IngestReport {
    pub files_indexed: usize,
    pub files_skipped: usize,
    pub chunks_added: usize,
}

pub struct DocumentIndexer {
    store: LanceDocumentStore,
}

impl DocumentIndexer {
    pub fn new(store: LanceDocumentStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &LanceDocumentStore {
        &self.store
    }

    /// Index every text file under `paths`.
    pub async fn index_paths(&self, paths: &[PathBuf]) -> IngestReport {
        let mut report = IngestReport::default();
        let (files, skipped) = collect_files(paths);
        report.files_skipped += skipped;

        for file in files {
            match self.index_file(&file).await {
                Ok(0) => {
                    debug!(path = %file.display(), "no text to index");
                    report.files_skipped += 1;
                }
                Ok(chunks) => {
                    report.files_indexed += 1;
                    report.chunks_added += chunks;
                }
                Err(e) => {
                    warn!(path = %file.display(), error = %e, "skipping file");
                    report.files_skipped += 1;
                }
            }
        }

        info!(
            files = report.files_indexed,
            skipped = report.files_skipped,
            chunks = report.chunks_added,
            "ingestion complete"
        );
        report
    }

    /// Chunk, embed, and store one file. Returns the number of chunks added.
    ///
    /// Nothing is written unless every batch embeds successfully.
    pub async fn index_file(&self, path: &Path) -> Result<usize, IndexError> {
        let source = path.display().to_string();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| IndexError::Read {
                path: source.clone(),
                source: e,
            })?;

        let mime = detect_mime(&source);
        let chunks: Vec<DocumentChunk> = chunk_text(&text, &mime)
            .into_iter()
            .enumerate()
            .map(|(i, text)| DocumentChunk {
                id: Uuid::new_v4().to_string(),
                source: source.clone(),
                chunk_index: i as u32,
                text,
            })
            .collect();

        let mut embeddings = Vec::with_capacity(chunks.len());
        for batch in chunks.chunks(EMBED_BATCH) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            embeddings.extend(self.store.embedder().embed(&texts).await?);
        }
        let added = self.store.add_chunks(&chunks, &embeddings).await?;

        debug!(path = %source, chunks = added, "indexed file");
        Ok(added)
    }
}

/// Expand directories recursively and keep text files, sorted.
///
/// Returns the files plus the number of paths skipped (missing, non-text,
/// or a symlinked directory below one of `paths`).
pub fn collect_files(paths: &[PathBuf]) -> (Vec<PathBuf>, usize) {
    let mut files = Vec::new();
    let mut skipped = 0;
    for path in paths {
        walk(path, &mut files, &mut skipped);
    }
    files.sort();
    files.dedup();
    (files, skipped)
}

fn walk(path: &Path, files: &mut Vec<PathBuf>, skipped: &mut usize) {
    if path.is_dir() {
        let entries = match std::fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read directory");
                *skipped += 1;
                return;
            }
        };
        for entry in entries.flatten() {
            let entry_path = entry.path();
            let is_symlink = entry.file_type().is_ok_and(|t| t.is_symlink());
            if is_symlink && entry_path.is_dir() {
                debug!(path = %entry_path.display(), "not following symlinked directory");
                *skipped += 1;
                continue;
            }
            walk(&entry_path, files, skipped);
        }
    } else if path.is_file() {
        let mime = detect_mime(&path.to_string_lossy());
        if is_text_mime(&mime) {
            files.push(path.to_path_buf());
        } else {
            debug!(path = %path.display(), %mime, "not a text file");
            *skipped += 1;
        }
    } else {
        warn!(path = %path.display(), "path does not exist");
        *skipped += 1;
    }
}
