//! HTTP adapter for the AI chat assistant.
//!
//! - `POST /api/chat` - Send a message
//! - `GET /api/chat` - List live sessions
//! - `GET /api/chat/:id` - Session transcript
//! - `DELETE /api/chat/:id` - Delete a session

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::chat_routes;
