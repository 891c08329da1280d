//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - sqlx repositories
//! - `memory` - in-process repositories for tests and local runs
//! - `auth` - JWT sessions and Argon2 password hashing
//! - `razorpay` - payment gateway client
//! - `ai` - Gemini text generation
//! - `search` - keyed search APIs and the discovery workflow
//! - `http` - axum routes and middleware

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod razorpay;
pub mod search;
