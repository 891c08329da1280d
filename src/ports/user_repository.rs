//! User repository port.
//!
//! Persists registered accounts. Email and username uniqueness is enforced
//! by the store itself, so concurrent signups racing for the same name
//! still resolve to exactly one winner.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{PremiumStatus, User};

/// Repository port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// - `EmailTaken` if the email is already registered
    /// - `UsernameTaken` if the username is already registered
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by (lowercase) username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by (lowercase) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Overwrite the premium flags of a user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no such user exists
    async fn update_premium(&self, id: &UserId, premium: &PremiumStatus)
        -> Result<(), DomainError>;
}
