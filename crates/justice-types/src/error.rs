use thiserror::Error;

use crate::llm::LlmError;

/// Errors from the document store or the embedding model behind it.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("document store error: {0}")]
    Store(String),

    #[error("embedding error: {0}")]
    Embedding(String),

    #[error("schema mismatch: {0}")]
    Schema(String),
}

/// Errors from invoking a prompt chain.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("template field '{0}' has no value")]
    MissingField(String),

    #[error("generation failed: {0}")]
    Llm(#[from] LlmError),

    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),
}

/// Invalid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{key}': {reason}")]
    Invalid { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_error_from_llm() {
        let err: ChainError = LlmError::AuthenticationFailed.into();
        assert!(matches!(err, ChainError::Llm(_)));
        assert_eq!(err.to_string(), "generation failed: authentication failed");
    }

    #[test]
    fn test_chain_error_from_retrieval() {
        let err: ChainError = RetrievalError::Store("connection refused".to_string()).into();
        assert_eq!(
            err.to_string(),
            "retrieval failed: document store error: connection refused"
        );
    }

    #[test]
    fn test_missing_field_display() {
        let err = ChainError::MissingField("classification".to_string());
        assert_eq!(err.to_string(), "template field 'classification' has no value");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            key: "retrieval_k".to_string(),
            reason: "must be at least 1".to_string(),
        };
        assert!(err.to_string().contains("retrieval_k"));
    }
}
