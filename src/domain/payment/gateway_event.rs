//! Payment gateway webhook events.
//!
//! Only the fields the reconciliation flow reads are modelled; everything
//! else in the delivery is ignored.

use serde::Deserialize;

use super::PaymentError;

/// A successful capture reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPayment {
    pub order_id: String,
    pub payment_id: String,
    /// Amount in paise.
    pub amount_minor: i64,
    pub currency: Option<String>,
    pub method: Option<String>,
}

/// A failed payment attempt reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPayment {
    pub order_id: String,
    pub payment_id: Option<String>,
    pub reason: Option<String>,
}

/// Webhook event classified by what reconciliation should do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    /// `payment.captured` or `order.paid`.
    Captured(CapturedPayment),
    /// `payment.failed`.
    Failed(FailedPayment),
    /// Any other event; acknowledged without action.
    Ignored(String),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    payload: Payload,
}

#[derive(Debug, Default, Deserialize)]
struct Payload {
    payment: Option<Wrapped<PaymentEntity>>,
    order: Option<Wrapped<OrderEntity>>,
}

#[derive(Debug, Deserialize)]
struct Wrapped<T> {
    entity: T,
}

#[derive(Debug, Deserialize)]
struct PaymentEntity {
    id: Option<String>,
    order_id: Option<String>,
    amount: Option<i64>,
    currency: Option<String>,
    method: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrderEntity {
    id: String,
}

impl GatewayEvent {
    /// Parses a verified webhook body.
    ///
    /// # Errors
    ///
    /// `MalformedEvent` if the body is not JSON, or if a payment event is
    /// missing the fields needed to act on it.
    pub fn parse(body: &[u8]) -> Result<Self, PaymentError> {
        let envelope: Envelope = serde_json::from_slice(body)
            .map_err(|e| PaymentError::MalformedEvent(e.to_string()))?;

        match envelope.event.as_str() {
            "payment.captured" | "order.paid" => {
                let payment = envelope
                    .payload
                    .payment
                    .ok_or_else(|| malformed("payment entity missing"))?
                    .entity;
                let order_id = payment
                    .order_id
                    .or_else(|| envelope.payload.order.map(|o| o.entity.id))
                    .ok_or_else(|| malformed("order_id missing"))?;

                Ok(GatewayEvent::Captured(CapturedPayment {
                    order_id,
                    payment_id: payment.id.ok_or_else(|| malformed("payment id missing"))?,
                    amount_minor: payment.amount.ok_or_else(|| malformed("amount missing"))?,
                    currency: payment.currency,
                    method: payment.method,
                }))
            }
            "payment.failed" => {
                let payment = envelope
                    .payload
                    .payment
                    .ok_or_else(|| malformed("payment entity missing"))?
                    .entity;

                Ok(GatewayEvent::Failed(FailedPayment {
                    order_id: payment.order_id.ok_or_else(|| malformed("order_id missing"))?,
                    payment_id: payment.id,
                    reason: payment.error_description,
                }))
            }
            other => Ok(GatewayEvent::Ignored(other.to_string())),
        }
    }

    /// Gateway order this event refers to, if any.
    pub fn order_id(&self) -> Option<&str> {
        match self {
            GatewayEvent::Captured(c) => Some(&c.order_id),
            GatewayEvent::Failed(f) => Some(&f.order_id),
            GatewayEvent::Ignored(_) => None,
        }
    }
}

fn malformed(reason: &str) -> PaymentError {
    PaymentError::MalformedEvent(reason.to_string())
}
