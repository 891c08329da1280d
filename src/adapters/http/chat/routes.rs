//! Axum router configuration for chat endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::AppState;

use super::handlers::{delete_session, get_session, list_sessions, send_message};

/// Create the chat API router.
///
/// # Routes
///
/// - `POST /` - Send a message
/// - `GET /` - List live sessions
/// - `GET /:id` - Session transcript
/// - `DELETE /:id` - Delete a session
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(send_message))
        .route("/:id", get(get_session).delete(delete_session))
}
