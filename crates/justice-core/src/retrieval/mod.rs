//! Document retrieval ports.
//!
//! - `Embedder` / `BoxEmbedder`: text-to-vector conversion
//! - `Retriever` / `BoxRetriever`: top-K similarity search over the
//!   legal document store

pub mod box_embedder;
pub mod box_retriever;
pub mod embedder;
pub mod retriever;
