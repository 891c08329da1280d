//! ListChatSessionsHandler - Query handler for a user's live sessions.

use std::sync::Arc;

use crate::domain::chat::{ChatError, ChatSessionSummary};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::ChatSessionRepository;

/// Query for the caller's sessions.
#[derive(Debug, Clone)]
pub struct ListChatSessionsQuery {
    pub user_id: UserId,
}

/// Handler listing live sessions, newest first.
pub struct ListChatSessionsHandler {
    sessions: Arc<dyn ChatSessionRepository>,
}

impl ListChatSessionsHandler {
    pub fn new(sessions: Arc<dyn ChatSessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        query: ListChatSessionsQuery,
    ) -> Result<Vec<ChatSessionSummary>, ChatError> {
        Ok(self
            .sessions
            .list_for_user(&query.user_id, Timestamp::now())
            .await?)
    }
}
