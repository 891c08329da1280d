//! HTTP adapter for account endpoints.
//!
//! - `POST /api/auth/signup` - Register and start a session
//! - `POST /api/auth/login` - Start a session
//! - `POST /api/auth/logout` - End the session
//! - `GET /api/auth/me` - Session identity
//! - `GET /api/user/me` - Premium standing

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{auth_routes, user_routes};
