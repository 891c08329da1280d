//! Account handlers.
//!
//! ## Commands
//! - Registering an account (signup)
//! - Logging in with username and password
//!
//! ## Queries
//! - Get the authenticated user's account

mod get_current_user;
mod login;
mod signup;

// Commands
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use signup::{SignupCommand, SignupHandler, SignupResult};

// Queries
pub use get_current_user::{GetCurrentUserHandler, GetCurrentUserQuery};
