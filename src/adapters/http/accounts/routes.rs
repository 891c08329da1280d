//! Axum router configuration for account endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{login, logout, profile, session_user, signup};

/// Create the auth API router.
///
/// # Routes
///
/// - `POST /signup` - Register and start a session
/// - `POST /login` - Start a session
/// - `POST /logout` - End the session
/// - `GET /me` - Session identity
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(session_user))
}

/// Create the user API router.
///
/// # Routes
///
/// - `GET /me` - Premium standing (requires authentication)
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/me", get(profile))
}
