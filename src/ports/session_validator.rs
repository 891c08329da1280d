//! Session token ports.
//!
//! `TokenIssuer` mints a session token at signup/login; `SessionValidator`
//! turns a presented token back into an `AuthenticatedUser`. The HTTP
//! middleware depends only on `SessionValidator`.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp};
use crate::domain::user::User;

/// A freshly issued session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Encoded token to hand to the client.
    pub token: String,
    /// Instant after which the token is rejected.
    pub expires_at: Timestamp,
}

/// Issues session tokens for authenticated users.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Issue a token for `user`.
    async fn issue(&self, user: &User) -> Result<IssuedToken, AuthError>;
}

/// Validates session tokens and extracts user identity.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature
/// - Validate the expiry claim
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token and return the authenticated user.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
