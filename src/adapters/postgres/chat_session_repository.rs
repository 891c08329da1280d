//! PostgreSQL implementation of ChatSessionRepository.
//!
//! Sessions and their messages live in `chat_sessions` / `chat_messages`.
//! Every read filters on `expires_at > now`; the sweeper deletes what the
//! filter hides.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::chat::{session_title, ChatMessage, ChatRole, ChatSession, ChatSessionSummary};
use crate::domain::foundation::{ChatSessionId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::ChatSessionRepository;

use super::{parse_column, violated_constraint};

/// PostgreSQL implementation of the ChatSessionRepository port.
pub struct PostgresChatSessionRepository {
    pool: PgPool,
}

impl PostgresChatSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    role: String,
    content: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    id: Uuid,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    message_count: i64,
    first_message: Option<String>,
}

impl TryFrom<MessageRow> for ChatMessage {
    type Error = DomainError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let role = parse_column::<ChatRole>("role", &row.role)?;
        Ok(ChatMessage {
            role,
            content: row.content,
            timestamp: Timestamp::from_datetime(row.created_at),
        })
    }
}

impl From<SummaryRow> for ChatSessionSummary {
    fn from(row: SummaryRow) -> Self {
        ChatSessionSummary {
            id: ChatSessionId::from_uuid(row.id),
            title: session_title(row.first_message.as_deref()),
            message_count: message_count(row.message_count),
            created_at: Timestamp::from_datetime(row.created_at),
            expires_at: Timestamp::from_datetime(row.expires_at),
        }
    }
}

/// `COUNT(*)` comes back as BIGINT.
fn message_count(count: i64) -> usize {
    usize::try_from(count).unwrap_or(0)
}

fn conflict_for(constraint: &str) -> Option<DomainError> {
    (constraint == "chat_sessions_pkey").then(|| {
        DomainError::new(ErrorCode::ChatSessionExists, "Chat session already exists")
    })
}

#[async_trait]
impl ChatSessionRepository for PostgresChatSessionRepository {
    async fn create(&self, session: &ChatSession) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO chat_sessions (id, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.created_at.as_datetime())
        .bind(session.expires_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            violated_constraint(&e).and_then(conflict_for).unwrap_or_else(|| {
                DomainError::database(format!("Failed to create chat session: {}", e))
            })
        })?;

        for message in &session.messages {
            insert_message(&mut tx, &session.id, message).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit chat session: {}", e)))?;

        Ok(())
    }

    async fn find(
        &self,
        id: &ChatSessionId,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<Option<ChatSession>, DomainError> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, created_at, expires_at
            FROM chat_sessions
            WHERE id = $1 AND user_id = $2 AND expires_at > $3
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(now.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch chat session: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let messages: Vec<MessageRow> = sqlx::query_as(
            r#"
            SELECT role, content, created_at
            FROM chat_messages
            WHERE session_id = $1
            ORDER BY id
            "#,
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch chat messages: {}", e)))?;

        Ok(Some(ChatSession {
            id: ChatSessionId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            messages: messages
                .into_iter()
                .map(ChatMessage::try_from)
                .collect::<Result<_, _>>()?,
            created_at: Timestamp::from_datetime(row.created_at),
            expires_at: Timestamp::from_datetime(row.expires_at),
        }))
    }

    async fn exists(&self, id: &ChatSessionId) -> Result<bool, DomainError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM chat_sessions WHERE id = $1)")
                .bind(id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::database(format!("Failed to check chat session: {}", e))
                })?;

        Ok(exists)
    }

    async fn append(
        &self,
        id: &ChatSessionId,
        messages: &[ChatMessage],
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to begin transaction: {}", e)))?;

        for message in messages {
            insert_message(&mut tx, id, message).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit chat messages: {}", e)))?;

        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<Vec<ChatSessionSummary>, DomainError> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT
                s.id,
                s.created_at,
                s.expires_at,
                (SELECT COUNT(*) FROM chat_messages m WHERE m.session_id = s.id) AS message_count,
                (SELECT m.content FROM chat_messages m
                  WHERE m.session_id = s.id AND m.role = 'user'
                  ORDER BY m.id LIMIT 1) AS first_message
            FROM chat_sessions s
            WHERE s.user_id = $1 AND s.expires_at > $2
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list chat sessions: {}", e)))?;

        Ok(rows.into_iter().map(ChatSessionSummary::from).collect())
    }

    async fn delete(&self, id: &ChatSessionId, user_id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM chat_sessions WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete chat session: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self, now: Timestamp) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM chat_sessions WHERE expires_at <= $1")
            .bind(now.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to purge chat sessions: {}", e))
            })?;

        Ok(result.rows_affected())
    }
}

async fn insert_message(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    session_id: &ChatSessionId,
    message: &ChatMessage,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO chat_messages (session_id, role, content, created_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(session_id.as_uuid())
    .bind(message.role.as_str())
    .bind(&message.content)
    .bind(message.timestamp.as_datetime())
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_foreign_key_violation() {
                return DomainError::new(ErrorCode::ChatSessionNotFound, "Chat not found");
            }
        }
        DomainError::database(format!("Failed to save chat message: {}", e))
    })?;

    Ok(())
}
