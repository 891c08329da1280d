//! Payment module - Plans, payments, subscriptions and gateway signatures.
//!
//! # Components
//!
//! - `Plan` - The canonical price/duration table
//! - `Payment` - One gateway order and its settlement state
//! - `Subscription` - Premium period created when a payment settles
//! - `SignatureVerifier` - HMAC-SHA256 checks for checkout and webhooks
//! - `GatewayEvent` - Classified webhook payloads
//! - `PaymentError` - Errors raised by payment operations

mod errors;
mod gateway_event;
mod record;
mod plan;
mod signature;
mod subscription;

pub use errors::{PaymentError, SignatureKind};
pub use gateway_event::{CapturedPayment, FailedPayment, GatewayEvent};
pub use record::{Payment, PaymentStatus};
pub use plan::{months_for_amount, Plan, DEFAULT_CURRENCY};
pub use signature::{checkout_payload, SignatureVerifier};
pub use subscription::{Subscription, SubscriptionStatus};
