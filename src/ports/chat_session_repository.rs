//! Chat session repository port.
//!
//! # Expiry
//!
//! Sessions carry an `expires_at` instant. Every read takes `now` and must
//! treat a session whose expiry has passed as absent, even if the physical
//! row has not been purged yet. `purge_expired` removes those rows.

use async_trait::async_trait;

use crate::domain::chat::{ChatMessage, ChatSession, ChatSessionSummary};
use crate::domain::foundation::{ChatSessionId, DomainError, Timestamp, UserId};

/// Repository port for chat sessions and their messages.
#[async_trait]
pub trait ChatSessionRepository: Send + Sync {
    /// Insert a new session together with any messages it already holds.
    ///
    /// # Errors
    ///
    /// - `ChatSessionExists` if the id is already in use
    async fn create(&self, session: &ChatSession) -> Result<(), DomainError>;

    /// Find a live session owned by `user_id`.
    async fn find(
        &self,
        id: &ChatSessionId,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<Option<ChatSession>, DomainError>;

    /// Returns true if any row uses this id, regardless of owner or expiry.
    async fn exists(&self, id: &ChatSessionId) -> Result<bool, DomainError>;

    /// Append messages to an existing session, preserving order.
    ///
    /// # Errors
    ///
    /// - `ChatSessionNotFound` if the session does not exist
    async fn append(&self, id: &ChatSessionId, messages: &[ChatMessage])
        -> Result<(), DomainError>;

    /// Live sessions of a user, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<Vec<ChatSessionSummary>, DomainError>;

    /// Delete a session owned by `user_id`. Returns false if nothing matched.
    async fn delete(&self, id: &ChatSessionId, user_id: &UserId) -> Result<bool, DomainError>;

    /// Delete every session expired at `now`. Returns the number removed.
    async fn purge_expired(&self, now: Timestamp) -> Result<u64, DomainError>;
}
