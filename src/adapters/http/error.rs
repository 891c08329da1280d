//! API error type shared by every route.
//!
//! All failures render as `{"success": false, "error": "<message>"}`. Server
//! errors keep their detail in the log, never in the body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::application::FeatureError;
use crate::domain::chat::ChatError;
use crate::domain::foundation::ErrorCode;
use crate::domain::payment::PaymentError;
use crate::domain::user::AccountError;

/// Error body returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

/// HTTP error with a status and a client-facing message.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// 500 with a generic message; `detail` is logged only.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "Request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

/// Maps an error code onto its HTTP status.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::EmptyField => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::UserNotFound | ErrorCode::PaymentNotFound | ErrorCode::ChatSessionNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::EmailTaken
        | ErrorCode::UsernameTaken
        | ErrorCode::DuplicateOrder
        | ErrorCode::SubscriptionExists
        | ErrorCode::ChatSessionExists
        | ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match &err {
            AccountError::Infrastructure(_) => Self::internal(&err),
            _ => Self::new(status_for(err.code()), err.message()),
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match &err {
            PaymentError::Infrastructure(_) | PaymentError::Gateway(_) => Self::internal(&err),
            PaymentError::MissingSignature | PaymentError::InvalidSignature(_) => {
                Self::bad_request(err.message())
            }
            _ => Self::new(status_for(err.code()), err.message()),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match &err {
            ChatError::Infrastructure(_) | ChatError::AssistantUnavailable(_) => Self::internal(&err),
            _ => Self::new(status_for(err.code()), err.message()),
        }
    }
}

impl From<FeatureError> for ApiError {
    fn from(err: FeatureError) -> Self {
        if let Some(status) = err.upstream_status() {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            return Self::new(status, err.message());
        }
        if let FeatureError::Failed { .. } = &err {
            error!(error = %err, "Feature request failed");
        }
        Self::new(status_for(err.code()), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::SignatureKind;

    #[test]
    fn account_conflicts_are_409() {
        let err = ApiError::from(AccountError::EmailTaken);
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.message, "Email already registered");
    }

    #[test]
    fn bad_credentials_are_401() {
        let err = ApiError::from(AccountError::InvalidCredentials);
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn signature_failures_are_400() {
        let err = ApiError::from(PaymentError::InvalidSignature(SignatureKind::Webhook));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid signature");

        let err = ApiError::from(PaymentError::MissingSignature);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_order_is_404() {
        let err = ApiError::from(PaymentError::order_not_found("order_x"));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Payment record not found");
    }

    #[test]
    fn infrastructure_detail_is_hidden() {
        let err = ApiError::from(ChatError::Infrastructure("pool timed out".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal Server Error");
    }

    #[test]
    fn upstream_status_is_forwarded() {
        let err = ApiError::from(FeatureError::Upstream {
            status: 403,
            body: "quotaExceeded".to_string(),
        });
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.message, "quotaExceeded");
    }

    #[test]
    fn missing_vendor_key_is_500_naming_the_key() {
        let err = ApiError::from(FeatureError::NotConfigured("NEWS_API_KEY"));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "NEWS_API_KEY not set");
    }
}
