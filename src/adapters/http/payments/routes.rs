//! Axum router configuration for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{create_order, list_subscriptions, verify_payment, webhook};

/// Create the payment API router.
///
/// # Routes
///
/// ## User Endpoints (require authentication)
/// - `POST /create-order` - Open an order
/// - `POST /verify-payment` - Confirm a checkout
/// - `GET /subscriptions` - Subscription history
///
/// ## Webhook Endpoints (no auth, signature verified)
/// - `POST /webhook` - Gateway events
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/create-order", post(create_order))
        .route("/verify-payment", post(verify_payment))
        .route("/subscriptions", get(list_subscriptions))
        .route("/webhook", post(webhook))
}
