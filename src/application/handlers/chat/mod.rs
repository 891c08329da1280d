//! Chat handlers.
//!
//! ## Commands
//! - Sending a message to the assistant
//! - Deleting a session
//! - Purging expired sessions (background sweeper)
//!
//! ## Queries
//! - Get a session transcript
//! - List the caller's live sessions

mod delete_chat_session;
mod get_chat_session;
mod list_chat_sessions;
mod purge_expired_chat_sessions;
mod send_chat_message;

// Commands
pub use delete_chat_session::{DeleteChatSessionCommand, DeleteChatSessionHandler};
pub use purge_expired_chat_sessions::{
    PurgeExpiredChatSessionsCommand, PurgeExpiredChatSessionsHandler,
};
pub use send_chat_message::{
    SendChatMessageCommand, SendChatMessageHandler, SendChatMessageResult, CHAT_SYSTEM_PROMPT,
};

// Queries
pub use get_chat_session::{GetChatSessionHandler, GetChatSessionQuery};
pub use list_chat_sessions::{ListChatSessionsHandler, ListChatSessionsQuery};
