//! Error vocabulary shared by repositories and feature errors.

use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input
    ValidationFailed,
    EmptyField,

    // Lookup
    UserNotFound,
    PaymentNotFound,
    ChatSessionNotFound,

    // Uniqueness
    EmailTaken,
    UsernameTaken,
    DuplicateOrder,
    SubscriptionExists,
    ChatSessionExists,

    InvalidStateTransition,
    Unauthorized,

    // Infrastructure
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::PaymentNotFound => "PAYMENT_NOT_FOUND",
            ErrorCode::ChatSessionNotFound => "CHAT_SESSION_NOT_FOUND",
            ErrorCode::EmailTaken => "EMAIL_TAKEN",
            ErrorCode::UsernameTaken => "USERNAME_TAKEN",
            ErrorCode::DuplicateOrder => "DUPLICATE_ORDER",
            ErrorCode::SubscriptionExists => "SUBSCRIPTION_EXISTS",
            ErrorCode::ChatSessionExists => "CHAT_SESSION_EXISTS",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a port implementation.
///
/// Feature errors (`AccountError`, `PaymentError`, `ChatError`) convert
/// from this by inspecting `code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Shorthand for a storage failure.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// True for uniqueness violations reported by a repository.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::EmailTaken
                | ErrorCode::UsernameTaken
                | ErrorCode::DuplicateOrder
                | ErrorCode::SubscriptionExists
                | ErrorCode::ChatSessionExists
        )
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_code_and_message() {
        let err = DomainError::new(ErrorCode::PaymentNotFound, "Payment record not found");
        assert_eq!(err.to_string(), "[PAYMENT_NOT_FOUND] Payment record not found");
    }

    #[test]
    fn database_shorthand() {
        let err = DomainError::database("connection reset");
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "connection reset");
    }

    #[test]
    fn conflict_codes_are_detected() {
        assert!(DomainError::new(ErrorCode::EmailTaken, "").is_conflict());
        assert!(DomainError::new(ErrorCode::SubscriptionExists, "").is_conflict());
        assert!(DomainError::new(ErrorCode::ChatSessionExists, "").is_conflict());
        assert!(!DomainError::database("boom").is_conflict());
        assert!(!DomainError::new(ErrorCode::UserNotFound, "").is_conflict());
    }
}
