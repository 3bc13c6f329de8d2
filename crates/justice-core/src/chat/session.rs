//! In-memory conversation history keyed by session id.
//!
//! Each session holds formatted history lines ("Officer: ..." then
//! "AI Guide: ..."), always appended in pairs so the length stays even.
//! State lives for the process lifetime and is cleared at shutdown.

use dashmap::DashMap;

/// Process-wide session history, owned by the application state.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, Vec<String>>,
    /// Max turns (line pairs) kept per session. `None` keeps everything.
    max_turns: Option<usize>,
}

impl SessionStore {
    /// Unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that keeps at most `max_turns` turns per session, dropping the
    /// oldest turns first.
    pub fn with_cap(max_turns: Option<usize>) -> Self {
        Self {
            sessions: DashMap::new(),
            max_turns,
        }
    }

    /// History lines for a session, oldest first. Unknown ids yield an
    /// empty history.
    pub fn get_history(&self, session_id: &str) -> Vec<String> {
        self.sessions
            .get(session_id)
            .map(|lines| lines.value().clone())
            .unwrap_or_default()
    }

    /// Append one turn, creating the session if it does not exist.
    pub fn append_turn(&self, session_id: &str, user_line: String, ai_line: String) {
        let mut lines = self.sessions.entry(session_id.to_string()).or_default();
        lines.push(user_line);
        lines.push(ai_line);

        if let Some(max_turns) = self.max_turns {
            let keep = max_turns * 2;
            if lines.len() > keep {
                let excess = lines.len() - keep;
                lines.drain(..excess);
            }
        }
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every session.
    pub fn clear(&self) {
        self.sessions.clear();
    }
}
