//! Shared domain types for the Justice legal assistant backend.
//!
//! Chat request/response shapes, intent routing labels, LLM request/response
//! types, retrieved document fragments, configuration, and error enums.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod document;
pub mod error;
pub mod intent;
pub mod llm;
