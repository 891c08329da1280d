//! In-memory chat session repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::chat::{ChatMessage, ChatSession, ChatSessionSummary};
use crate::domain::foundation::{ChatSessionId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::ChatSessionRepository;

/// In-memory storage for chat sessions
#[derive(Debug, Clone, Default)]
pub struct InMemoryChatSessionRepository {
    sessions: Arc<RwLock<HashMap<ChatSessionId, ChatSession>>>,
}

impl InMemoryChatSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl ChatSessionRepository for InMemoryChatSessionRepository {
    async fn create(&self, session: &ChatSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(DomainError::new(
                ErrorCode::ChatSessionExists,
                format!("Chat session {} already exists", session.id),
            ));
        }
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn find(
        &self,
        id: &ChatSessionId,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<Option<ChatSession>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(id)
            .filter(|s| s.is_owned_by(user_id) && !s.is_expired(now))
            .cloned())
    }

    async fn exists(&self, id: &ChatSessionId) -> Result<bool, DomainError> {
        Ok(self.sessions.read().await.contains_key(id))
    }

    async fn append(
        &self,
        id: &ChatSessionId,
        messages: &[ChatMessage],
    ) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| DomainError::new(ErrorCode::ChatSessionNotFound, "Chat not found"))?;
        for message in messages {
            session.push(message.clone());
        }
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<Vec<ChatSessionSummary>, DomainError> {
        let sessions = self.sessions.read().await;
        let mut live: Vec<_> = sessions
            .values()
            .filter(|s| s.is_owned_by(user_id) && !s.is_expired(now))
            .map(ChatSession::summary)
            .collect();
        live.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(live)
    }

    async fn delete(&self, id: &ChatSessionId, user_id: &UserId) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(id) {
            Some(s) if s.is_owned_by(user_id) => {
                sessions.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn purge_expired(&self, now: Timestamp) -> Result<u64, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        Ok((before - sessions.len()) as u64)
    }
}
