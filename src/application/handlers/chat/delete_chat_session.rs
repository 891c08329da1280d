//! DeleteChatSessionHandler - Command handler for removing a session.

use std::sync::Arc;

use tracing::info;

use crate::domain::chat::ChatError;
use crate::domain::foundation::{ChatSessionId, UserId};
use crate::ports::ChatSessionRepository;

/// Command to delete one of the caller's sessions.
#[derive(Debug, Clone)]
pub struct DeleteChatSessionCommand {
    pub user_id: UserId,
    pub session_id: String,
}

/// Handler for deleting a session the caller owns.
pub struct DeleteChatSessionHandler {
    sessions: Arc<dyn ChatSessionRepository>,
}

impl DeleteChatSessionHandler {
    pub fn new(sessions: Arc<dyn ChatSessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: DeleteChatSessionCommand) -> Result<(), ChatError> {
        let id: ChatSessionId = cmd.session_id.parse().map_err(|_| ChatError::NotFound)?;

        if !self.sessions.delete(&id, &cmd.user_id).await? {
            return Err(ChatError::NotFound);
        }

        info!(session_id = %id, user_id = %cmd.user_id, "Chat session deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryChatSessionRepository;
    use crate::domain::chat::{ChatSession, DEFAULT_SESSION_TTL_DAYS};
    use crate::domain::foundation::Timestamp;

    #[tokio::test]
    async fn owner_can_delete_once() {
        let repo = Arc::new(InMemoryChatSessionRepository::new());
        let user = UserId::new();
        let session =
            ChatSession::start(ChatSessionId::new(), user, Timestamp::now(), DEFAULT_SESSION_TTL_DAYS);
        repo.create(&session).await.unwrap();
        let handler = DeleteChatSessionHandler::new(repo.clone());

        let cmd = DeleteChatSessionCommand {
            user_id: user,
            session_id: session.id.to_string(),
        };
        handler.handle(cmd.clone()).await.unwrap();

        assert_eq!(repo.count().await, 0);
        assert_eq!(handler.handle(cmd).await.unwrap_err(), ChatError::NotFound);
    }

    #[tokio::test]
    async fn other_users_cannot_delete() {
        let repo = Arc::new(InMemoryChatSessionRepository::new());
        let session = ChatSession::start(
            ChatSessionId::new(),
            UserId::new(),
            Timestamp::now(),
            DEFAULT_SESSION_TTL_DAYS,
        );
        repo.create(&session).await.unwrap();

        let err = DeleteChatSessionHandler::new(repo.clone())
            .handle(DeleteChatSessionCommand {
                user_id: UserId::new(),
                session_id: session.id.to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, ChatError::NotFound);
        assert_eq!(repo.count().await, 1);
    }
}
