//! Chat request/response types for the `/api/chat` endpoint.

use serde::{Deserialize, Serialize};

/// Prefix for the officer's line in a session history.
pub const OFFICER_PREFIX: &str = "Officer: ";

/// Prefix for the assistant's line in a session history.
pub const ASSISTANT_PREFIX: &str = "AI Guide: ";

/// Incoming chat message.
///
/// Unknown fields (the web frontend also sends `case_id`) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The officer's message.
    pub message: String,
    /// Existing session to continue; a fresh one is created when absent or empty.
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ChatRequest {
    /// Build a request, optionally continuing an existing session.
    pub fn new(message: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            message: message.into(),
            session_id,
        }
    }
}

/// Generated answer plus the session it was recorded under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

/// Format the officer's half of a turn.
pub fn officer_line(message: &str) -> String {
    format!("{OFFICER_PREFIX}{message}")
}

/// Format the assistant's half of a turn.
pub fn assistant_line(response: &str) -> String {
    format!("{ASSISTANT_PREFIX}{response}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_session_id_optional() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"hello"}"#).unwrap();
        assert_eq!(req.message, "hello");
        assert!(req.session_id.is_none());
    }

    #[test]
    fn test_chat_request_ignores_unknown_fields() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message":"hi","session_id":"s1","case_id":"42"}"#).unwrap();
        assert_eq!(req.session_id.as_deref(), Some("s1"));
    }

    #[test]
    fn test_chat_request_requires_message() {
        let result = serde_json::from_str::<ChatRequest>(r#"{"session_id":"s1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_chat_response_shape() {
        let resp = ChatResponse {
            response: "Section 303".to_string(),
            session_id: "abc".to_string(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["response"], "Section 303");
        assert_eq!(json["session_id"], "abc");
    }

    #[test]
    fn test_history_line_prefixes() {
        assert_eq!(officer_line("theft at market"), "Officer: theft at market");
        assert_eq!(assistant_line("Who is the victim?"), "AI Guide: Who is the victim?");
    }
}
