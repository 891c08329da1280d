//! SendChatMessageHandler - Command handler for one assistant chat turn.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::chat::{ChatError, ChatMessage, ChatSession, FALLBACK_REPLY};
use crate::domain::foundation::{ChatSessionId, ErrorCode, Timestamp, UserId};
use crate::ports::{AIProvider, ChatSessionRepository, CompletionRequest, MessageRole};

/// System prompt sent with every chat turn.
pub const CHAT_SYSTEM_PROMPT: &str = "You are SkillzUp, a friendly learning assistant. \
Help the learner understand topics, plan study time and find good resources. \
Keep answers clear and practical.";

/// Command to send one message to the assistant.
#[derive(Debug, Clone)]
pub struct SendChatMessageCommand {
    pub user_id: UserId,
    pub message: Option<String>,
    /// Client-held session id; absent on the first turn.
    pub session_id: Option<String>,
}

/// Result of a chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendChatMessageResult {
    pub reply: String,
    pub session_id: ChatSessionId,
}

/// Handler for a chat turn.
///
/// A presented session id is reused only when it names a live session of
/// the caller. An id nobody has used yet starts a fresh session under that
/// id. Any other id (another user's session, an expired one, or garbage)
/// is replaced by a new random id so sessions are never shared.
pub struct SendChatMessageHandler {
    sessions: Arc<dyn ChatSessionRepository>,
    ai: Arc<dyn AIProvider>,
    history_window: usize,
    session_ttl_days: i64,
}

impl SendChatMessageHandler {
    pub fn new(
        sessions: Arc<dyn ChatSessionRepository>,
        ai: Arc<dyn AIProvider>,
        history_window: usize,
        session_ttl_days: i64,
    ) -> Self {
        Self {
            sessions,
            ai,
            history_window,
            session_ttl_days,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendChatMessageCommand,
    ) -> Result<SendChatMessageResult, ChatError> {
        let text = cmd
            .message
            .filter(|m| !m.trim().is_empty())
            .ok_or(ChatError::EmptyMessage)?;

        let now = Timestamp::now();
        let (session, is_new) = self
            .resolve_session(cmd.session_id.as_deref(), cmd.user_id, now)
            .await?;

        let request = CompletionRequest::new()
            .with_system_prompt(CHAT_SYSTEM_PROMPT)
            .with_history(session.recent(self.history_window))
            .with_message(MessageRole::User, text.clone());

        let response = self.ai.complete(request).await.map_err(|e| {
            error!(session_id = %session.id, error = %e, "Chat completion failed");
            ChatError::AssistantUnavailable(e.to_string())
        })?;
        let reply = response.text_or(FALLBACK_REPLY);

        let replied_at = Timestamp::now();
        let turn = [
            ChatMessage::user(text, now),
            ChatMessage::assistant(reply.clone(), replied_at),
        ];

        if is_new {
            let session_id = self.start_session(session, turn, now).await?;
            return Ok(SendChatMessageResult { reply, session_id });
        }

        self.sessions.append(&session.id, &turn).await?;
        debug!(session_id = %session.id, "Chat turn appended");

        Ok(SendChatMessageResult {
            reply,
            session_id: session.id,
        })
    }

    /// Stores a new session holding `turn` and returns its id.
    ///
    /// A concurrent request may claim the same id first. The turn then joins
    /// that session when it belongs to the same user, otherwise it is stored
    /// under a fresh id.
    async fn start_session(
        &self,
        mut session: ChatSession,
        turn: [ChatMessage; 2],
        now: Timestamp,
    ) -> Result<ChatSessionId, ChatError> {
        for message in turn.iter().cloned() {
            session.push(message);
        }

        match self.sessions.create(&session).await {
            Ok(()) => {}
            Err(e) if e.code == ErrorCode::ChatSessionExists => {
                let user_id = session.user_id;
                if self.sessions.find(&session.id, &user_id, now).await?.is_some() {
                    self.sessions.append(&session.id, &turn).await?;
                    debug!(session_id = %session.id, "Chat turn joined a concurrently created session");
                    return Ok(session.id);
                }
                session.id = ChatSessionId::new();
                self.sessions.create(&session).await?;
            }
            Err(e) => return Err(e.into()),
        }

        info!(session_id = %session.id, user_id = %session.user_id, "Chat session started");
        Ok(session.id)
    }

    /// Returns the session to continue and whether it still has to be created.
    async fn resolve_session(
        &self,
        requested: Option<&str>,
        user_id: UserId,
        now: Timestamp,
    ) -> Result<(ChatSession, bool), ChatError> {
        let requested = requested.and_then(|raw| raw.trim().parse::<ChatSessionId>().ok());

        let id = match requested {
            Some(id) => {
                if let Some(existing) = self.sessions.find(&id, &user_id, now).await? {
                    return Ok((existing, false));
                }
                if self.sessions.exists(&id).await? {
                    ChatSessionId::new()
                } else {
                    id
                }
            }
            None => ChatSessionId::new(),
        };

        Ok((
            ChatSession::start(id, user_id, now, self.session_ttl_days),
            true,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::InMemoryChatSessionRepository;
    use crate::domain::chat::{ChatRole, ChatSessionSummary, DEFAULT_SESSION_TTL_DAYS};
    use crate::domain::foundation::DomainError;
    use crate::ports::AIError;

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn handler(
        sessions: Arc<InMemoryChatSessionRepository>,
        ai: Arc<MockAIProvider>,
    ) -> SendChatMessageHandler {
        SendChatMessageHandler::new(sessions, ai, 20, DEFAULT_SESSION_TTL_DAYS)
    }

    fn cmd(user_id: UserId, message: &str, session_id: Option<String>) -> SendChatMessageCommand {
        SendChatMessageCommand {
            user_id,
            message: Some(message.to_string()),
            session_id,
        }
    }

    /// Inserts `rival` right before the first `create`, as if another request
    /// had claimed the same id in between.
    struct ContendedSessions {
        inner: InMemoryChatSessionRepository,
        rival: std::sync::Mutex<Option<ChatSession>>,
    }

    impl ContendedSessions {
        fn new(rival: ChatSession) -> Self {
            Self {
                inner: InMemoryChatSessionRepository::new(),
                rival: std::sync::Mutex::new(Some(rival)),
            }
        }
    }

    #[async_trait::async_trait]
    impl ChatSessionRepository for ContendedSessions {
        async fn create(&self, session: &ChatSession) -> Result<(), DomainError> {
            let rival = self.rival.lock().unwrap().take();
            if let Some(rival) = rival {
                self.inner.create(&rival).await?;
            }
            self.inner.create(session).await
        }

        async fn find(
            &self,
            id: &ChatSessionId,
            user_id: &UserId,
            now: Timestamp,
        ) -> Result<Option<ChatSession>, DomainError> {
            self.inner.find(id, user_id, now).await
        }

        async fn exists(&self, id: &ChatSessionId) -> Result<bool, DomainError> {
            self.inner.exists(id).await
        }

        async fn append(
            &self,
            id: &ChatSessionId,
            messages: &[ChatMessage],
        ) -> Result<(), DomainError> {
            self.inner.append(id, messages).await
        }

        async fn list_for_user(
            &self,
            user_id: &UserId,
            now: Timestamp,
        ) -> Result<Vec<ChatSessionSummary>, DomainError> {
            self.inner.list_for_user(user_id, now).await
        }

        async fn delete(&self, id: &ChatSessionId, user_id: &UserId) -> Result<bool, DomainError> {
            self.inner.delete(id, user_id).await
        }

        async fn purge_expired(&self, now: Timestamp) -> Result<u64, DomainError> {
            self.inner.purge_expired(now).await
        }
    }

    fn rival_session(id: ChatSessionId, owner: UserId) -> ChatSession {
        let now = Timestamp::now();
        let mut session = ChatSession::start(id, owner, now, DEFAULT_SESSION_TTL_DAYS);
        session.push(ChatMessage::user("from the other tab", now));
        session.push(ChatMessage::assistant("answer", now));
        session
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn first_message_starts_a_session() {
        let sessions = Arc::new(InMemoryChatSessionRepository::new());
        let ai = Arc::new(MockAIProvider::new().with_response("Ownership moves values."));
        let user = UserId::new();

        let result = handler(sessions.clone(), ai)
            .handle(cmd(user, "What is ownership?", None))
            .await
            .unwrap();

        assert_eq!(result.reply, "Ownership moves values.");
        let stored = sessions
            .find(&result.session_id, &user, Timestamp::now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.messages.len(), 2);
        assert_eq!(stored.messages[0].role, ChatRole::User);
        assert_eq!(stored.messages[1].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn follow_up_sends_history_and_appends() {
        let sessions = Arc::new(InMemoryChatSessionRepository::new());
        let ai = Arc::new(
            MockAIProvider::new()
                .with_response("first answer")
                .with_response("second answer"),
        );
        let handler = handler(sessions.clone(), ai.clone());
        let user = UserId::new();

        let first = handler.handle(cmd(user, "one", None)).await.unwrap();
        let second = handler
            .handle(cmd(user, "two", Some(first.session_id.to_string())))
            .await
            .unwrap();

        assert_eq!(second.session_id, first.session_id);
        assert_eq!(sessions.count().await, 1);

        let calls = ai.get_calls();
        assert_eq!(calls[1].messages.len(), 3);
        assert_eq!(calls[1].system_prompt.as_deref(), Some(CHAT_SYSTEM_PROMPT));
    }

    #[tokio::test]
    async fn unused_client_id_is_kept() {
        let sessions = Arc::new(InMemoryChatSessionRepository::new());
        let ai = Arc::new(MockAIProvider::new());
        let wanted = ChatSessionId::new();

        let result = handler(sessions, ai)
            .handle(cmd(UserId::new(), "hi", Some(wanted.to_string())))
            .await
            .unwrap();

        assert_eq!(result.session_id, wanted);
    }

    #[tokio::test]
    async fn another_users_session_is_never_joined() {
        let sessions = Arc::new(InMemoryChatSessionRepository::new());
        let ai = Arc::new(MockAIProvider::new());
        let handler = handler(sessions.clone(), ai);
        let owner = UserId::new();
        let intruder = UserId::new();

        let owned = handler.handle(cmd(owner, "mine", None)).await.unwrap();
        let other = handler
            .handle(cmd(intruder, "let me in", Some(owned.session_id.to_string())))
            .await
            .unwrap();

        assert_ne!(other.session_id, owned.session_id);
        let original = sessions
            .find(&owned.session_id, &owner, Timestamp::now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(original.messages.len(), 2);
    }

    #[tokio::test]
    async fn blank_reply_uses_fallback() {
        let sessions = Arc::new(InMemoryChatSessionRepository::new());
        let ai = Arc::new(MockAIProvider::new().with_response("   "));

        let result = handler(sessions, ai)
            .handle(cmd(UserId::new(), "hello", None))
            .await
            .unwrap();

        assert_eq!(result.reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn blank_message_is_rejected_without_calling_ai() {
        let sessions = Arc::new(InMemoryChatSessionRepository::new());
        let ai = Arc::new(MockAIProvider::new());

        let err = handler(sessions, ai.clone())
            .handle(cmd(UserId::new(), "  ", None))
            .await
            .unwrap_err();

        assert_eq!(err, ChatError::EmptyMessage);
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn provider_failure_persists_nothing() {
        let sessions = Arc::new(InMemoryChatSessionRepository::new());
        let ai = Arc::new(MockAIProvider::new().with_error(AIError::network("reset")));

        let err = handler(sessions.clone(), ai)
            .handle(cmd(UserId::new(), "hello", None))
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::AssistantUnavailable(_)));
        assert_eq!(sessions.count().await, 0);
    }

    #[tokio::test]
    async fn concurrent_first_turns_with_same_id_share_the_session() {
        let user = UserId::new();
        let wanted = ChatSessionId::new();
        let sessions = Arc::new(ContendedSessions::new(rival_session(wanted, user)));
        let handler = SendChatMessageHandler::new(
            sessions.clone(),
            Arc::new(MockAIProvider::new()),
            20,
            DEFAULT_SESSION_TTL_DAYS,
        );

        let result = handler
            .handle(cmd(user, "from this tab", Some(wanted.to_string())))
            .await
            .unwrap();

        assert_eq!(result.session_id, wanted);
        let stored = sessions
            .find(&wanted, &user, Timestamp::now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.messages.len(), 4);
        assert_eq!(stored.messages[2].content, "from this tab");
    }

    #[tokio::test]
    async fn id_claimed_by_another_user_mid_turn_gets_fresh_id() {
        let user = UserId::new();
        let other = UserId::new();
        let wanted = ChatSessionId::new();
        let sessions = Arc::new(ContendedSessions::new(rival_session(wanted, other)));
        let handler = SendChatMessageHandler::new(
            sessions.clone(),
            Arc::new(MockAIProvider::new()),
            20,
            DEFAULT_SESSION_TTL_DAYS,
        );

        let result = handler
            .handle(cmd(user, "mine", Some(wanted.to_string())))
            .await
            .unwrap();

        assert_ne!(result.session_id, wanted);
        let rival = sessions
            .find(&wanted, &other, Timestamp::now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rival.messages.len(), 2);
        let mine = sessions
            .find(&result.session_id, &user, Timestamp::now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(mine.messages.len(), 2);
    }
}
