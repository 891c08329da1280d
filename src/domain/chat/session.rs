//! Chat session aggregate.

use crate::domain::foundation::{ChatSessionId, Timestamp, UserId};

use super::{ChatMessage, ChatRole};

/// Days a chat session stays reachable after it is created.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;

/// Reply stored when the model returns no text.
pub const FALLBACK_REPLY: &str = "Sorry, I'm not sure how to respond.";

const TITLE_MAX_CHARS: usize = 60;

/// Builds a listing title from a session's first user message.
pub fn session_title(first_user_message: Option<&str>) -> String {
    let first = first_user_message.map(str::trim).unwrap_or("");
    if first.is_empty() {
        return "New chat".to_string();
    }

    let mut title: String = first.chars().take(TITLE_MAX_CHARS).collect();
    if first.chars().count() > TITLE_MAX_CHARS {
        title.push('…');
    }
    title
}

/// A user's conversation with the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    pub id: ChatSessionId,
    pub user_id: UserId,
    pub messages: Vec<ChatMessage>,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Listing view of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSessionSummary {
    pub id: ChatSessionId,
    pub title: String,
    pub message_count: usize,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl ChatSession {
    /// Starts an empty session that expires `ttl_days` after `now`.
    pub fn start(id: ChatSessionId, user_id: UserId, now: Timestamp, ttl_days: i64) -> Self {
        Self {
            id,
            user_id,
            messages: Vec::new(),
            created_at: now,
            expires_at: now.add_days(ttl_days),
        }
    }

    /// Appends a message. Expiry is fixed at creation and is not extended.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// True once `now` has reached the expiry instant.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        !self.expires_at.is_after(&now)
    }

    /// True if `user_id` owns this session.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// The last `n` messages, oldest first.
    pub fn recent(&self, n: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    /// Short title taken from the first user message.
    pub fn title(&self) -> String {
        let first = self
            .messages
            .iter()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str());
        session_title(first)
    }

    /// Listing view of this session.
    pub fn summary(&self) -> ChatSessionSummary {
        ChatSessionSummary {
            id: self.id,
            title: self.title(),
            message_count: self.messages.len(),
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}
