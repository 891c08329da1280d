//! Payment handlers.
//!
//! ## Commands
//! - Creating a gateway order for a plan
//! - Verifying a checkout confirmation
//! - Processing gateway webhooks
//!
//! ## Queries
//! - List the caller's subscriptions

mod create_order;
mod handle_payment_webhook;
mod list_subscriptions;
mod subscription_activator;
mod verify_payment;

pub use subscription_activator::{ActivationOutcome, SubscriptionActivator};

// Commands
pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};

// Queries
pub use list_subscriptions::{ListSubscriptionsHandler, ListSubscriptionsQuery};
