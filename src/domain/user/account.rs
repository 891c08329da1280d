//! User aggregate.

use std::fmt;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::payment::Plan;

use super::NewAccount;

/// Premium flags carried on the user record.
///
/// `is_premium` is the stored flag; whether access is actually live also
/// depends on `expires_at`, see [`PremiumStatus::is_active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PremiumStatus {
    pub is_premium: bool,
    pub plan: Option<Plan>,
    pub expires_at: Option<Timestamp>,
}

impl PremiumStatus {
    /// Premium access granted on `plan` until `expires_at`.
    pub fn granted(plan: Plan, expires_at: Timestamp) -> Self {
        Self {
            is_premium: true,
            plan: Some(plan),
            expires_at: Some(expires_at),
        }
    }

    /// True while the flag is set and the expiry lies in the future.
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.is_premium && self.expires_at.is_some_and(|exp| exp.is_after(&now))
    }
}

/// A registered account.
///
/// Email and username are always stored lowercase. The password is only
/// ever held as a hash and is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub premium: PremiumStatus,
    pub created_at: Timestamp,
}

impl User {
    /// Builds a new account from validated signup data and a password hash.
    pub fn register(account: NewAccount, password_hash: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: UserId::new(),
            name: account.name,
            email: account.email,
            username: account.username,
            password_hash: password_hash.into(),
            premium: PremiumStatus::default(),
            created_at: now,
        }
    }

    /// Sets the premium flags for a paid plan.
    pub fn grant_premium(&mut self, plan: Plan, expires_at: Timestamp) {
        self.premium = PremiumStatus::granted(plan, expires_at);
    }

    /// Returns true if premium access is live at `now`.
    pub fn has_active_premium(&self, now: Timestamp) -> bool {
        self.premium.is_active(now)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("premium", &self.premium)
            .field("created_at", &self.created_at)
            .finish()
    }
}
