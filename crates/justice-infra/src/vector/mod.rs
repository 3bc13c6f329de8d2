//! Vector database infrastructure for the legal document store.
//!
//! Provides LanceDB connection management, the `documents` table schema,
//! the retriever over it, and fastembed-based local embedding generation.

pub mod documents;
pub mod embedder;
pub mod lance;
pub mod schema;
