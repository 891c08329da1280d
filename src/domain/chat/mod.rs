//! Chat module - Assistant conversations with a fixed lifetime.
//!
//! A session is created by the first message a user sends and expires a
//! fixed number of days after creation, regardless of later activity.

mod errors;
mod message;
mod session;

pub use errors::ChatError;
pub use message::{ChatMessage, ChatRole};
pub use session::{
    session_title, ChatSession, ChatSessionSummary, DEFAULT_SESSION_TTL_DAYS, FALLBACK_REPLY,
};
