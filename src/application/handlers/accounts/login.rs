//! LoginHandler - Command handler for credential login.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::user::{normalize_login, AccountError, User};
use crate::ports::{IssuedToken, PasswordHasher, TokenIssuer, UserRepository};

/// Command to log in with username and password.
#[derive(Debug, Clone, Default)]
pub struct LoginCommand {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub token: IssuedToken,
}

/// Handler for credential login.
///
/// Unknown usernames and wrong passwords both yield `InvalidCredentials`.
/// When the username is unknown the password is still hashed so the
/// response time does not reveal which accounts exist.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
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

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AccountError> {
        let username = cmd
            .username
            .as_deref()
            .map(normalize_login)
            .filter(|u| !u.is_empty());
        let password = cmd.password.filter(|p| !p.is_empty());

        let (Some(username), Some(password)) = (username, password) else {
            return Err(AccountError::validation(
                "credentials",
                "Username and password are required",
            ));
        };

        let Some(user) = self.users.find_by_username(&username).await? else {
            let _ = self.hasher.hash(&password).await;
            warn!(username = %username, "Login for unknown username");
            return Err(AccountError::InvalidCredentials);
        };

        if !self.hasher.verify(&password, &user.password_hash).await? {
            warn!(user_id = %user.id, "Login with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&user)
            .await
            .map_err(|e| AccountError::infrastructure(e.to_string()))?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginResult { user, token })
    }
}
