//! Chat-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Chat-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Message text was missing or blank.
    EmptyMessage,

    /// Session does not exist, has expired, or belongs to someone else.
    NotFound,

    /// The language model call failed.
    AssistantUnavailable(String),

    /// Storage failure.
    Infrastructure(String),
}

impl ChatError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::EmptyMessage => ErrorCode::EmptyField,
            ChatError::NotFound => ErrorCode::ChatSessionNotFound,
            ChatError::AssistantUnavailable(_) => ErrorCode::InternalError,
            ChatError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns the client-facing message.
    pub fn message(&self) -> String {
        match self {
            ChatError::EmptyMessage => "Message required".to_string(),
            ChatError::NotFound => "Chat not found".to_string(),
            ChatError::AssistantUnavailable(msg) => format!("Assistant unavailable: {}", msg),
            ChatError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ChatError {}

impl From<DomainError> for ChatError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ChatSessionNotFound => ChatError::NotFound,
            _ => ChatError::Infrastructure(err.to_string()),
        }
    }
}
