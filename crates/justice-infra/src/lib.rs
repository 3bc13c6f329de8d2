//! Infrastructure layer for the Justice backend.
//!
//! Implements the ports defined in `justice-core`: the OpenAI-compatible
//! generation client, the LanceDB document store and retriever, the fastembed
//! embedder, document ingestion, and the `config.toml` loader.

pub mod config;
pub mod llm;
pub mod storage;
pub mod vector;
