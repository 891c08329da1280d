//! GetChatSessionHandler - Query handler for one session's transcript.

use std::sync::Arc;

use crate::domain::chat::{ChatError, ChatMessage};
use crate::domain::foundation::{ChatSessionId, Timestamp, UserId};
use crate::ports::ChatSessionRepository;

/// Query for a session's messages.
#[derive(Debug, Clone)]
pub struct GetChatSessionQuery {
    pub user_id: UserId,
    pub session_id: String,
}

/// Handler for loading a session transcript.
///
/// Unparseable ids, foreign sessions and expired sessions all read as
/// `NotFound`.
pub struct GetChatSessionHandler {
    sessions: Arc<dyn ChatSessionRepository>,
}

impl GetChatSessionHandler {
    pub fn new(sessions: Arc<dyn ChatSessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, query: GetChatSessionQuery) -> Result<Vec<ChatMessage>, ChatError> {
        let id: ChatSessionId = query.session_id.parse().map_err(|_| ChatError::NotFound)?;

        self.sessions
            .find(&id, &query.user_id, Timestamp::now())
            .await?
            .map(|s| s.messages)
            .ok_or(ChatError::NotFound)
    }
}
