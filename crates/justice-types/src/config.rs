//! Configuration types for the Justice backend.
//!
//! `JusticeConfig` represents the top-level `config.toml` in the data
//! directory. Every field has a default matching the local Ollama setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration, loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JusticeConfig {
    /// LanceDB directory holding the legal document table.
    /// Relative paths resolve against the data directory.
    #[serde(default = "default_document_store_dir")]
    pub document_store_dir: PathBuf,

    /// Embedding model identifier (fastembed model code).
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Number of fragments retrieved per question.
    #[serde(default = "default_retrieval_k")]
    pub retrieval_k: usize,

    /// Keep at most this many turns per session. Unset = unbounded.
    #[serde(default)]
    pub max_history_turns: Option<usize>,

    #[serde(default)]
    pub llm: LlmSettings,

    #[serde(default)]
    pub server: ServerSettings,
}

fn default_document_store_dir() -> PathBuf {
    PathBuf::from("document_store")
}

fn default_embedding_model() -> String {
    "mixedbread-ai/mxbai-embed-large-v1".to_string()
}

fn default_retrieval_k() -> usize {
    5
}

impl Default for JusticeConfig {
    fn default() -> Self {
        Self {
            document_store_dir: default_document_store_dir(),
            embedding_model: default_embedding_model(),
            retrieval_k: default_retrieval_k(),
            max_history_turns: None,
            llm: LlmSettings::default(),
            server: ServerSettings::default(),
        }
    }
}

impl JusticeConfig {
    /// Absolute path of the document store.
    pub fn document_store_path(&self, data_dir: &Path) -> PathBuf {
        if self.document_store_dir.is_absolute() {
            self.document_store_dir.clone()
        } else {
            data_dir.join(&self.document_store_dir)
        }
    }

    /// Reject values the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retrieval_k == 0 {
            return Err(invalid("retrieval_k", "must be at least 1"));
        }
        if self.embedding_model.trim().is_empty() {
            return Err(invalid("embedding_model", "must not be empty"));
        }
        if self.llm.model.trim().is_empty() {
            return Err(invalid("llm.model", "must not be empty"));
        }
        if self.llm.max_tokens == 0 {
            return Err(invalid("llm.max_tokens", "must be at least 1"));
        }
        if self.max_history_turns == Some(0) {
            return Err(invalid("max_history_turns", "must be at least 1 when set"));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Generation backend settings (OpenAI-compatible endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Ollama ignores the key but the client requires one.
    #[serde(default = "default_llm_api_key")]
    pub api_key: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: Option<f64>,
}

fn default_llm_base_url() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_llm_model() -> String {
    "huihui_ai/llama3.2-abliterate:latest".to_string()
}

fn default_llm_api_key() -> String {
    "ollama".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            api_key: default_llm_api_key(),
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
