//! SignupHandler - Command handler for registering a new account.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::Timestamp;
use crate::domain::user::{AccountError, SignupInput, User};
use crate::ports::{IssuedToken, PasswordHasher, TokenIssuer, UserRepository};

/// Command to register an account.
#[derive(Debug, Clone, Default)]
pub struct SignupCommand {
    pub input: SignupInput,
}

/// Result of a successful signup.
#[derive(Debug, Clone)]
pub struct SignupResult {
    pub user: User,
    pub token: IssuedToken,
}

/// Handler for account registration.
///
/// Email is checked before username so a client re-submitting the same
/// form sees the email conflict first. The database constraints still
/// guard against two concurrent signups racing past the checks.
pub struct SignupHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl SignupHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: SignupCommand) -> Result<SignupResult, AccountError> {
        let account = cmd.input.validate()?;

        if self.users.find_by_email(&account.email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }
        if self.users.find_by_username(&account.username).await?.is_some() {
            return Err(AccountError::UsernameTaken);
        }

        let hash = self.hasher.hash(&account.password).await?;
        let user = User::register(account, hash, Timestamp::now());
        self.users.create(&user).await?;

        let token = self
            .tokens
            .issue(&user)
            .await
            .map_err(|e| AccountError::infrastructure(e.to_string()))?;

        info!(user_id = %user.id, username = %user.username, "Account registered");

        Ok(SignupResult { user, token })
    }
}
