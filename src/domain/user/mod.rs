//! User module - Accounts, credentials and premium flags.
//!
//! # Components
//!
//! - `User` - Registered account with optional premium access
//! - `SignupInput` / `NewAccount` - Raw and validated signup data
//! - `AccountError` - Errors raised by account operations

mod account;
mod errors;
mod signup;

pub use account::{PremiumStatus, User};
pub use errors::AccountError;
pub use signup::{normalize_login, NewAccount, SignupInput, MIN_PASSWORD_LEN};
