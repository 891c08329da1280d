//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresUserRepository` - Accounts and premium flags
//! - `PostgresPaymentRepository` - Gateway orders with guarded settlement
//! - `PostgresSubscriptionRepository` - Premium periods
//! - `PostgresChatSessionRepository` - Expiring chat sessions
//!
//! `connect` and `run_migrations` build the shared pool at startup.

mod chat_session_repository;
mod payment_repository;
mod pool;
mod subscription_repository;
mod user_repository;

pub use chat_session_repository::PostgresChatSessionRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use pool::{connect, run_migrations};
pub use subscription_repository::PostgresSubscriptionRepository;
pub use user_repository::PostgresUserRepository;

use std::str::FromStr;

use crate::domain::foundation::DomainError;

/// Parses a text column into its domain type. Unknown values are reported
/// as storage errors since the schema should never hold them.
fn parse_column<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|e| DomainError::database(format!("Invalid {} value: {}", column, e)))
}

/// Name of the constraint a failed statement violated, if any.
fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}
