//! PurgeExpiredChatSessionsHandler - Command handler run by the expiry sweeper.

use std::sync::Arc;

use tracing::info;

use crate::domain::chat::ChatError;
use crate::domain::foundation::Timestamp;
use crate::ports::ChatSessionRepository;

/// Command to delete every session expired at `now`.
#[derive(Debug, Clone, Copy)]
pub struct PurgeExpiredChatSessionsCommand {
    pub now: Timestamp,
}

/// Handler that removes expired sessions.
///
/// Reads already hide expired sessions; this reclaims their storage.
pub struct PurgeExpiredChatSessionsHandler {
    sessions: Arc<dyn ChatSessionRepository>,
}

impl PurgeExpiredChatSessionsHandler {
    pub fn new(sessions: Arc<dyn ChatSessionRepository>) -> Self {
        Self { sessions }
    }

    /// Returns the number of sessions removed.
    pub async fn handle(&self, cmd: PurgeExpiredChatSessionsCommand) -> Result<u64, ChatError> {
        let removed = self.sessions.purge_expired(cmd.now).await?;
        if removed > 0 {
            info!(removed, "Purged expired chat sessions");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryChatSessionRepository;
    use crate::domain::chat::{ChatSession, DEFAULT_SESSION_TTL_DAYS};
    use crate::domain::foundation::{ChatSessionId, UserId};

    #[tokio::test]
    async fn removes_only_expired_sessions() {
        let repo = Arc::new(InMemoryChatSessionRepository::new());
        let now = Timestamp::now();
        for age in [0, 3, 8, 30] {
            let session = ChatSession::start(
                ChatSessionId::new(),
                UserId::new(),
                now.add_days(-age),
                DEFAULT_SESSION_TTL_DAYS,
            );
            repo.create(&session).await.unwrap();
        }

        let removed = PurgeExpiredChatSessionsHandler::new(repo.clone())
            .handle(PurgeExpiredChatSessionsCommand { now })
            .await
            .unwrap();

        assert_eq!(removed, 2);
        assert_eq!(repo.count().await, 2);
    }
}
