//! Application error type mapping to HTTP status codes.
//!
//! Error bodies are `{"detail": "..."}`, the shape the web frontend reads.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use justice_types::error::ChainError;

#[derive(Debug)]
pub enum AppError {
    /// Chains are still being built, or failed to build.
    NotReady,
    /// A chain invocation failed (retrieval, embedding, or generation).
    Chain(ChainError),
}

impl From<ChainError> for AppError {
    fn from(e: ChainError) -> Self {
        AppError::Chain(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::NotReady => (StatusCode::SERVICE_UNAVAILABLE, "Chains are not ready"),
            AppError::Chain(e) => {
                tracing::error!(error = %e, "chat request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use justice_types::llm::LlmError;

    #[test]
    fn test_not_ready_is_503() {
        let response = AppError::NotReady.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_chain_error_is_500() {
        let err: AppError = ChainError::from(LlmError::AuthenticationFailed).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
