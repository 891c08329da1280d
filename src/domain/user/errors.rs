//! Account-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | InvalidCredentials | 401 |
//! | NotFound | 404 |
//! | EmailTaken / UsernameTaken | 409 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode};

/// Account-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Input failed validation; `message` is shown to the client verbatim.
    ValidationFailed { field: String, message: String },

    /// Username unknown or password mismatch. Deliberately indistinguishable.
    InvalidCredentials,

    /// The account referenced by a session no longer exists.
    NotFound,

    /// Another account already uses this email.
    EmailTaken,

    /// Another account already uses this username.
    UsernameTaken,

    /// Storage or hashing failure.
    Infrastructure(String),
}

impl AccountError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccountError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AccountError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AccountError::InvalidCredentials => ErrorCode::Unauthorized,
            AccountError::NotFound => ErrorCode::UserNotFound,
            AccountError::EmailTaken => ErrorCode::EmailTaken,
            AccountError::UsernameTaken => ErrorCode::UsernameTaken,
            AccountError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns the client-facing message.
    pub fn message(&self) -> String {
        match self {
            AccountError::ValidationFailed { message, .. } => message.clone(),
            AccountError::InvalidCredentials => "Invalid credentials".to_string(),
            AccountError::NotFound => "User not found".to_string(),
            AccountError::EmailTaken => "Email already registered".to_string(),
            AccountError::UsernameTaken => "Username already taken".to_string(),
            AccountError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AccountError {}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::EmailTaken => AccountError::EmailTaken,
            ErrorCode::UsernameTaken => AccountError::UsernameTaken,
            ErrorCode::UserNotFound => AccountError::NotFound,
            _ => AccountError::Infrastructure(err.to_string()),
        }
    }
}
