//! Configuration and defaults for OpenAI-compatible providers.

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "ollama").
    pub provider_name: String,
    /// Base URL for the API (e.g., "http://localhost:11434/v1").
    pub base_url: String,
    /// API key. Ollama accepts any non-empty value.
    pub api_key: String,
    /// Model identifier (e.g., "huihui_ai/llama3.2-abliterate:latest").
    pub model: String,
}

/// Ollama default configuration.
///
/// Ollama serves the OpenAI chat completions protocol under `/v1`.
pub fn ollama_defaults(base_url: &str, model: &str, api_key: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "ollama".into(),
        base_url: base_url.trim_end_matches('/').into(),
        api_key: api_key.into(),
        model: model.into(),
    }
}
