//! HTTP DTOs for payment endpoints.
//!
//! The verify-payment body keeps the gateway's snake_case `razorpay_*`
//! names, since the checkout widget hands them over as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::Timestamp;
use crate::domain::payment::{Plan, Subscription, SubscriptionStatus};
use crate::ports::GatewayOrder;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to open an order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub plan_id: Option<String>,
    /// Only honoured when it is a JSON number.
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub receipt: Option<String>,
}

impl CreateOrderRequest {
    pub fn numeric_amount(&self) -> Option<f64> {
        self.amount.as_ref().and_then(Value::as_f64)
    }
}

/// Checkout widget success callback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order: GatewayOrder,
    pub payment_record_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: &'static str,
    /// False when the order had already been settled.
    pub activated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub success: bool,
}

/// One purchased premium period.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub id: String,
    pub order_id: String,
    pub plan: Plan,
    pub months: u32,
    /// Amount in paise.
    pub amount: i64,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: SubscriptionStatus,
}

impl SubscriptionResponse {
    /// `status` is evaluated at `now`, so lapsed periods read as expired.
    pub fn from_subscription(sub: &Subscription, now: Timestamp) -> Self {
        Self {
            id: sub.id.to_string(),
            order_id: sub.order_id.clone(),
            plan: sub.plan,
            months: sub.plan.months(),
            amount: sub.amount_minor,
            start_date: sub.start_date,
            end_date: sub.end_date,
            status: sub.effective_status(now),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionListResponse {
    pub success: bool,
    pub subscriptions: Vec<SubscriptionResponse>,
}
