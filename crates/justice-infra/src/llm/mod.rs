//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `justice-core`, a factory ([`create_provider`]) that
//! builds it from [`LlmSettings`], and a connectivity probe
//! ([`test_provider_connection`]).
//!
//! [`LlmProvider`]: justice_core::llm::provider::LlmProvider

pub mod openai_compat;

use justice_core::llm::box_provider::BoxLlmProvider;
use justice_types::config::LlmSettings;
use justice_types::llm::{CompletionRequest, LlmError};

use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] from the `[llm]` config table.
pub fn create_provider(settings: &LlmSettings) -> BoxLlmProvider {
    BoxLlmProvider::new(OpenAiCompatibleProvider::ollama(
        &settings.base_url,
        &settings.model,
        &settings.api_key,
    ))
}

/// Send a minimal completion request to verify the endpoint and model.
pub async fn test_provider_connection(provider: &BoxLlmProvider) -> Result<(), LlmError> {
    let request = CompletionRequest {
        model: String::new(), // Provider uses its configured default
        prompt: "Hello".to_string(),
        max_tokens: 10,
        temperature: Some(0.0),
    };
    provider.complete(&request).await?;
    Ok(())
}
