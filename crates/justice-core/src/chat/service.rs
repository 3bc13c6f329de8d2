//! ChatService -- routes an officer's message to a chain and records the turn.

use std::sync::Arc;

use justice_types::chat::{ChatRequest, ChatResponse, assistant_line, officer_line};
use justice_types::error::ChainError;
use justice_types::intent::{Classification, Intent};
use tracing::{Span, debug, info};
use uuid::Uuid;

use crate::chain::{CHAT_HISTORY, CLASSIFICATION, ChainInput, ChainSet, QUESTION, USER_MESSAGE};

use super::session::SessionStore;

/// Request handler behind `POST /api/chat`.
pub struct ChatService {
    chains: ChainSet,
    sessions: Arc<SessionStore>,
}

impl ChatService {
    pub fn new(chains: ChainSet, sessions: Arc<SessionStore>) -> Self {
        Self { chains, sessions }
    }

    /// Handle one chat turn.
    ///
    /// Resolves (or mints) the session id, asks the router chain which path
    /// to take, runs that chain with the session's history, then appends the
    /// turn. Nothing is recorded when any chain fails.
    #[tracing::instrument(
        name = "chat.handle_message",
        skip_all,
        fields(session_id = tracing::field::Empty, intent = tracing::field::Empty)
    )]
    pub async fn handle_message(&self, request: ChatRequest) -> Result<ChatResponse, ChainError> {
        let session_id = request
            .session_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Span::current().record("session_id", session_id.as_str());

        let chat_history = self.sessions.get_history(&session_id).join("\n");
        let message = request.message;

        let intent = self.route(&message).await?;
        Span::current().record("intent", intent.as_str());

        let base = ChainInput::new()
            .with(QUESTION, message.as_str())
            .with(CHAT_HISTORY, chat_history);

        let response = match intent {
            Intent::Guide => {
                let classification = Classification::from_message(&message);
                info!(%classification, "routing to investigative guide");
                let input = base.with(CLASSIFICATION, classification.as_str());
                self.chains.guide.invoke(&input).await?
            }
            Intent::FormFiller => {
                info!("routing to form filler");
                self.chains.form_filler.invoke(&base).await?
            }
            Intent::Qa | Intent::Unknown => {
                info!(%intent, "routing to Q&A");
                self.chains.qa.invoke(&base).await?
            }
        };

        self.sessions
            .append_turn(&session_id, officer_line(&message), assistant_line(&response));

        Ok(ChatResponse {
            response,
            session_id,
        })
    }

    /// Classify a message with the router chain.
    pub async fn route(&self, message: &str) -> Result<Intent, ChainError> {
        let input = ChainInput::new().with(USER_MESSAGE, message);
        let label = self.chains.router.invoke(&input).await?;
        let intent = Intent::from_router_output(&label);
        debug!(raw_label = %label.trim(), %intent, "router output");
        Ok(intent)
    }
}
