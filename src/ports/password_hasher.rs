//! Password hashing port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Port for one-way password hashing.
///
/// Hashing is deliberately slow; implementations should keep it off the
/// async executor threads.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing hash string.
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// A malformed stored hash verifies as `false`.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
