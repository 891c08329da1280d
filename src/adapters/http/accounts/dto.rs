//! HTTP DTOs for account endpoints.
//!
//! Response types copy fields out of `User` one by one so the password hash
//! can never reach a response body.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::payment::Plan;
use crate::domain::user::{SignupInput, User};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create an account. Missing fields are reported by validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl From<SignupRequest> for SignupInput {
    fn from(req: SignupRequest) -> Self {
        SignupInput {
            name: req.name,
            email: req.email,
            username: req.username,
            password: req.password,
        }
    }
}

/// Request to log in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Public identity of an account.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
        }
    }
}

/// Response for signup and login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: &'static str,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(message: &'static str, user: &User) -> Self {
        Self {
            success: true,
            message,
            user: UserResponse::from(user),
        }
    }
}

/// Response for `/auth/me`; `user` is null when the caller is anonymous.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUserResponse {
    pub success: bool,
    pub user: Option<UserResponse>,
}

impl SessionUserResponse {
    pub fn anonymous() -> Self {
        Self {
            success: false,
            user: None,
        }
    }
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

/// The caller's premium standing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub is_premium: bool,
    pub plan: Option<Plan>,
    pub expires_at: Option<Timestamp>,
}

impl ProfileResponse {
    /// `is_premium` reports whether premium is active at `now`, so an
    /// expired grant reads as false.
    pub fn from_user(user: &User, now: Timestamp) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            is_premium: user.has_active_premium(now),
            plan: user.premium.plan,
            expires_at: user.premium.expires_at,
        }
    }
}

/// Envelope for `/user/me`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileEnvelope {
    pub success: bool,
    pub user: ProfileResponse,
}
