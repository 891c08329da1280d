//! Razorpay payment gateway adapter.
//!
//! Implements the `PaymentGateway` port against the Razorpay Orders API.
//! Signature checks for checkout callbacks and webhooks live in the payment
//! domain, since they need nothing but the shared secrets.
//!
//! # Configuration
//!
//! - `SKILLZUP__PAYMENT__RAZORPAY_KEY_ID`
//! - `SKILLZUP__PAYMENT__RAZORPAY_KEY_SECRET`

mod mock_payment_gateway;
mod razorpay_gateway;

pub use mock_payment_gateway::MockPaymentGateway;
pub use razorpay_gateway::{RazorpayConfig, RazorpayGateway};
