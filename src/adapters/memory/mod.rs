//! In-memory adapters.
//!
//! Repository implementations backed by `tokio::sync::RwLock` maps. They
//! honour the same uniqueness and expiry rules as the PostgreSQL adapters
//! and are used by tests and local runs without a database.

mod chat_session_repository;
mod payment_repository;
mod subscription_repository;
mod user_repository;

pub use chat_session_repository::InMemoryChatSessionRepository;
pub use payment_repository::InMemoryPaymentRepository;
pub use subscription_repository::InMemorySubscriptionRepository;
pub use user_repository::InMemoryUserRepository;
