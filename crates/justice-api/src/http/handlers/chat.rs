//! POST /api/chat -- one conversational turn.

use axum::Json;
use axum::extract::State;

use justice_types::chat::{ChatRequest, ChatResponse};

use crate::http::error::AppError;
use crate::state::AppState;

/// Route the message through the chat service.
///
/// Answers 503 without touching any chain until the chains are ready.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let service = state.chat_service().await.ok_or(AppError::NotReady)?;
    let response = service.handle_message(body).await?;
    Ok(Json(response))
}
