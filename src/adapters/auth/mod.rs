//! Authentication adapters.
//!
//! Implementations of the `TokenIssuer`, `SessionValidator` and
//! `PasswordHasher` ports:
//!
//! - `jwt` - HS256 session tokens
//! - `password` - Argon2id hashing
//! - `mock` - Test implementations that skip cryptography

mod jwt;
mod mock;
mod password;

pub use jwt::JwtSessionManager;
pub use mock::{MockSessionValidator, PlaintextPasswordHasher};
pub use password::Argon2PasswordHasher;
