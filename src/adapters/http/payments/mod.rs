//! HTTP adapter for premium plan payments.
//!
//! - `POST /api/payment/create-order` - Open a gateway order
//! - `POST /api/payment/verify-payment` - Confirm a checkout
//! - `POST /api/payment/webhook` - Gateway webhook
//! - `GET /api/payment/subscriptions` - Subscription history

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::SIGNATURE_HEADER;
pub use routes::payment_routes;
