//! Errors for the learning-feature handlers (roadmap, search, discovery).

use crate::domain::foundation::ErrorCode;
use crate::ports::{AIError, SearchError};

/// Learning-feature errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    /// Required query or topic was missing; the message is client-facing.
    MissingInput(&'static str),

    /// The integration has no API key configured.
    NotConfigured(&'static str),

    /// Upstream search API refused the request; status and body are forwarded.
    Upstream { status: u16, body: String },

    /// The integration failed; `message` is client-facing, `detail` is logged.
    Failed {
        message: &'static str,
        detail: String,
    },
}

impl FeatureError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            FeatureError::MissingInput(_) => ErrorCode::EmptyField,
            FeatureError::NotConfigured(_)
            | FeatureError::Upstream { .. }
            | FeatureError::Failed { .. } => ErrorCode::InternalError,
        }
    }

    /// Returns the client-facing message.
    pub fn message(&self) -> String {
        match self {
            FeatureError::MissingInput(message) => message.to_string(),
            FeatureError::NotConfigured(key) => format!("{} not set", key),
            FeatureError::Upstream { body, .. } => body.clone(),
            FeatureError::Failed { message, .. } => message.to_string(),
        }
    }

    /// Upstream status to forward, if this error came from a search API.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            FeatureError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Maps a search failure, using `message` for failures without a better one.
    pub fn from_search(err: SearchError, message: &'static str) -> Self {
        match err {
            SearchError::NotConfigured(key) => FeatureError::NotConfigured(key),
            SearchError::Upstream { status, body } => FeatureError::Upstream { status, body },
            other => FeatureError::Failed {
                message,
                detail: other.to_string(),
            },
        }
    }

    /// Maps a model failure, using `message` for failures without a better one.
    pub fn from_ai(err: AIError, message: &'static str) -> Self {
        match err {
            AIError::NotConfigured(key) => FeatureError::NotConfigured(key),
            other => FeatureError::Failed {
                message,
                detail: other.to_string(),
            },
        }
    }
}

impl std::fmt::Display for FeatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureError::Failed { message, detail } => write!(f, "{}: {}", message, detail),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for FeatureError {}
