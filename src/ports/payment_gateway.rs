//! Payment gateway port.
//!
//! Abstracts the hosted checkout provider. The backend only ever creates
//! orders; the customer pays in the provider's checkout widget and the
//! result comes back through the webhook and the verify-payment call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for the payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order the client can open a checkout for.
    async fn create_order(&self, request: OrderRequest) -> Result<GatewayOrder, GatewayError>;
}

/// Request to create a gateway order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Amount in minor units (paise).
    pub amount_minor: i64,
    /// ISO currency code.
    pub currency: String,
    /// Merchant receipt reference.
    pub receipt: String,
}

/// Order as returned by the gateway.
///
/// Forwarded to the client verbatim, which hands it to the checkout widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<i64>,
}

/// Payment gateway error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    /// Error code for categorization.
    pub code: GatewayErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,
}

impl GatewayError {
    /// Create a new gateway error.
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    /// Attach the provider's own error code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::AuthenticationError, message)
    }

    /// Whether the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for GatewayError {}

/// Gateway error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API credentials rejected.
    AuthenticationError,

    /// The gateway rejected the request parameters.
    InvalidRequest,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Gateway-side failure.
    ProviderError,
}

impl GatewayErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayErrorCode::NetworkError
                | GatewayErrorCode::RateLimitExceeded
                | GatewayErrorCode::ProviderError
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_order_deserializes_provider_payload() {
        let order: GatewayOrder = serde_json::from_value(serde_json::json!({
            "id": "order_Ab12",
            "entity": "order",
            "amount": 1000,
            "amount_paid": 0,
            "currency": "INR",
            "receipt": "rcpt_1",
            "status": "created",
            "created_at": 1700000000
        }))
        .unwrap();

        assert_eq!(order.id, "order_Ab12");
        assert_eq!(order.amount, 1000);
        assert_eq!(order.status, "created");
    }

    #[test]
    fn retryable_codes() {
        assert!(GatewayError::network("reset").is_retryable());
        assert!(!GatewayError::authentication("bad key").is_retryable());
        assert!(!GatewayError::new(GatewayErrorCode::InvalidRequest, "x").is_retryable());
    }

    #[test]
    fn provider_code_is_kept() {
        let err = GatewayError::new(GatewayErrorCode::InvalidRequest, "amount too low")
            .with_provider_code("BAD_REQUEST_ERROR");
        assert_eq!(err.provider_code.as_deref(), Some("BAD_REQUEST_ERROR"));
    }
}
