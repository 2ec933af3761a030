//! Session Management
//!
//! Per-conversation exclusive state: the transcript plus the iteration
//! budget spent so far. A session is owned by exactly one agent run at a
//! time; resetting it clears conversation state only and never touches any
//! durable store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::Conversation;

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A conversation session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier
    pub id: SessionId,

    /// Conversation transcript
    pub conversation: Conversation,

    /// Reasoning iterations consumed across runs of this session
    pub iterations: usize,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last activity timestamp
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session with an empty transcript
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            conversation: Conversation::new(),
            iterations: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create with a system prompt already in the transcript
    pub fn with_system_prompt(system_prompt: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.conversation = Conversation::with_system_prompt(system_prompt);
        session
    }

    /// Update the activity timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Clear the transcript (keeping any system prompt) and the iteration
    /// count. Durable state written by tools is unaffected.
    pub fn reset(&mut self) {
        self.conversation.clear_history();
        self.iterations = 0;
        self.touch();
    }

    /// Message count
    pub fn message_count(&self) -> usize {
        self.conversation.len()
    }

    /// Duration since creation
    pub fn duration(&self) -> chrono::Duration {
        self.updated_at - self.created_at
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    #[test]
    fn test_session_creation() {
        let session = Session::new();
        assert_eq!(session.message_count(), 0);
        assert_eq!(session.iterations, 0);
    }

    #[test]
    fn test_reset_clears_transcript_and_iterations() {
        let mut session = Session::with_system_prompt("You are a travel concierge.");
        session.conversation.push(Message::user("book a flight"));
        session.iterations = 4;

        session.reset();

        assert_eq!(session.message_count(), 1); // system prompt survives
        assert_eq!(session.iterations, 0);
    }
}
