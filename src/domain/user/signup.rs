//! Signup input validation.

use once_cell::sync::Lazy;
use regex::Regex;

use super::AccountError;

/// Shortest password accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,20}$").expect("username pattern compiles"));

/// Raw signup fields as received from the client.
#[derive(Debug, Clone, Default)]
pub struct SignupInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Signup data that passed validation, with email and username normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl SignupInput {
    /// Validates the signup fields in the order the client expects errors.
    pub fn validate(self) -> Result<NewAccount, AccountError> {
        let name = present(self.name);
        let email = present(self.email);
        let username = present(self.username);
        let password = self.password.filter(|p| !p.is_empty());

        let (Some(name), Some(email), Some(username), Some(password)) =
            (name, email, username, password)
        else {
            return Err(AccountError::validation("fields", "All fields are required"));
        };

        if !EMAIL_PATTERN.is_match(&email) {
            return Err(AccountError::validation("email", "Invalid email format"));
        }

        if !USERNAME_PATTERN.is_match(&username) {
            return Err(AccountError::validation(
                "username",
                "Username must be 3-20 characters (letters, numbers, underscore only)",
            ));
        }

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AccountError::validation(
                "password",
                "Password must be at least 6 characters",
            ));
        }

        Ok(NewAccount {
            name,
            email: email.to_lowercase(),
            username: username.to_lowercase(),
            password,
        })
    }
}

/// Normalizes a login username the same way signup stores it.
pub fn normalize_login(username: &str) -> String {
    username.trim().to_lowercase()
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
