//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth)
//! - `user` - Accounts, signup validation and premium flags
//! - `payment` - Plan catalog, payments, subscriptions and gateway signatures
//! - `chat` - Chat sessions with a fixed time-to-live
//! - `roadmap` - Learning roadmaps parsed from generated text

pub mod chat;
pub mod foundation;
pub mod payment;
pub mod roadmap;
pub mod user;
