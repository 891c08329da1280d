//! Payment-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | MissingSignature / InvalidSignature | 400 |
//! | MalformedEvent | 400 |
//! | AmountMismatch / UnknownAmount | 400 |
//! | OrderNotFound | 404 |
//! | InvalidTransition | 409 |
//! | Gateway | 500 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode};

use super::PaymentStatus;

/// Which signature check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureKind {
    /// `order_id|payment_id` signed with the key secret.
    Checkout,
    /// Raw webhook body signed with the webhook secret.
    Webhook,
}

/// Payment-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Request input failed validation.
    ValidationFailed { field: String, message: String },

    /// Webhook arrived without a signature header.
    MissingSignature,

    /// Signature did not match the expected HMAC.
    InvalidSignature(SignatureKind),

    /// Webhook body was not a recognizable event.
    MalformedEvent(String),

    /// No payment record exists for the gateway order.
    OrderNotFound(String),

    /// Gateway reported an amount that differs from the recorded order.
    AmountMismatch { expected: i64, actual: i64 },

    /// Amount does not correspond to any plan.
    UnknownAmount(i64),

    /// Payment state machine refused the transition.
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    /// Payment gateway call failed.
    Gateway(String),

    /// Storage failure.
    Infrastructure(String),
}

impl PaymentError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn order_not_found(order_id: impl Into<String>) -> Self {
        PaymentError::OrderNotFound(order_id.into())
    }

    pub fn invalid_transition(from: PaymentStatus, to: PaymentStatus) -> Self {
        PaymentError::InvalidTransition { from, to }
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        PaymentError::Gateway(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PaymentError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PaymentError::ValidationFailed { .. }
            | PaymentError::MalformedEvent(_)
            | PaymentError::AmountMismatch { .. }
            | PaymentError::UnknownAmount(_) => ErrorCode::ValidationFailed,
            PaymentError::MissingSignature | PaymentError::InvalidSignature(_) => {
                ErrorCode::Unauthorized
            }
            PaymentError::OrderNotFound(_) => ErrorCode::PaymentNotFound,
            PaymentError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            PaymentError::Gateway(_) => ErrorCode::InternalError,
            PaymentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns the client-facing message.
    pub fn message(&self) -> String {
        match self {
            PaymentError::ValidationFailed { message, .. } => message.clone(),
            PaymentError::MissingSignature => "Missing signature".to_string(),
            PaymentError::InvalidSignature(SignatureKind::Checkout) => {
                "Invalid payment signature".to_string()
            }
            PaymentError::InvalidSignature(SignatureKind::Webhook) => {
                "Invalid signature".to_string()
            }
            PaymentError::MalformedEvent(reason) => format!("Malformed webhook event: {}", reason),
            PaymentError::OrderNotFound(_) => "Payment record not found".to_string(),
            PaymentError::AmountMismatch { expected, actual } => format!(
                "Captured amount {} does not match order amount {}",
                actual, expected
            ),
            PaymentError::UnknownAmount(amount) => {
                format!("Amount {} does not match any plan", amount)
            }
            PaymentError::InvalidTransition { from, to } => {
                format!("Cannot move payment from {} to {}", from, to)
            }
            PaymentError::Gateway(msg) => format!("Payment gateway error: {}", msg),
            PaymentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if the gateway should redeliver the webhook later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentError::Infrastructure(_) | PaymentError::Gateway(_)
        )
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PaymentError {}

impl From<DomainError> for PaymentError {
    fn from(err: DomainError) -> Self {
        PaymentError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_messages_differ_by_kind() {
        assert_eq!(
            PaymentError::InvalidSignature(SignatureKind::Checkout).message(),
            "Invalid payment signature"
        );
        assert_eq!(
            PaymentError::InvalidSignature(SignatureKind::Webhook).message(),
            "Invalid signature"
        );
    }

    #[test]
    fn not_found_message_hides_order_id() {
        let err = PaymentError::order_not_found("order_secret");
        assert_eq!(err.message(), "Payment record not found");
        assert_eq!(err.code(), ErrorCode::PaymentNotFound);
    }

    #[test]
    fn only_infrastructure_failures_are_retryable() {
        assert!(PaymentError::infrastructure("db down").is_retryable());
        assert!(PaymentError::gateway("timeout").is_retryable());
        assert!(!PaymentError::MissingSignature.is_retryable());
        assert!(!PaymentError::order_not_found("o").is_retryable());
    }
}
