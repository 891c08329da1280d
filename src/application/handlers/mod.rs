//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations through
//! ports. Each handler owns `Arc<dyn Port>` dependencies and exposes a
//! single `handle` method.

pub mod accounts;
pub mod chat;
pub mod features;
pub mod payments;
