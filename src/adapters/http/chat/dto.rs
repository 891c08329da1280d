//! HTTP DTOs for chat endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::chat::{ChatMessage, ChatSessionSummary};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One chat turn from the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Conversation to continue; omitted for a new one.
    #[serde(default)]
    pub session_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// The assistant's answer and the session it was filed under.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub success: bool,
    pub reply: String,
    pub session_id: String,
}

/// Listing row for one live session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummaryResponse {
    pub session_id: String,
    pub title: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub message_count: usize,
}

impl From<ChatSessionSummary> for SessionSummaryResponse {
    fn from(summary: ChatSessionSummary) -> Self {
        Self {
            session_id: summary.id.to_string(),
            title: summary.title,
            created_at: summary.created_at,
            expires_at: summary.expires_at,
            message_count: summary.message_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionListResponse {
    pub success: bool,
    pub sessions: Vec<SessionSummaryResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptResponse {
    pub success: bool,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub message: &'static str,
}
