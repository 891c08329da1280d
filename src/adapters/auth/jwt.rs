//! HS256 session tokens.
//!
//! `JwtSessionManager` implements both `TokenIssuer` and `SessionValidator`
//! with a single shared secret. Tokens carry the user id, username and email
//! so validation needs no database round trip.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer};

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    /// User id
    sub: String,
    username: String,
    email: String,
    /// Issued at (unix seconds)
    iat: i64,
    /// Expiry (unix seconds)
    exp: i64,
}

/// Issues and validates HS256 session tokens.
pub struct JwtSessionManager {
    secret: Secret<String>,
    ttl_days: i64,
}

impl JwtSessionManager {
    /// Creates a manager signing with `secret`; tokens live `ttl_days`.
    pub fn new(secret: impl Into<String>, ttl_days: i64) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            ttl_days,
        }
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.expose_secret().as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.expose_secret().as_bytes())
    }

    /// Signs a token for `user` as of `now`.
    pub fn issue_at(&self, user: &User, now: Timestamp) -> Result<IssuedToken, AuthError> {
        let expires_at = now.add_days(self.ttl_days);
        let claims = SessionClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            iat: now.as_unix_secs(),
            exp: expires_at.as_unix_secs(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key())
            .map_err(|e| AuthError::service_unavailable(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken { token, expires_at })
    }
}

#[async_trait]
impl TokenIssuer for JwtSessionManager {
    async fn issue(&self, user: &User) -> Result<IssuedToken, AuthError> {
        self.issue_at(user, Timestamp::now())
    }
}

#[async_trait]
impl SessionValidator for JwtSessionManager {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<SessionClaims>(token, &self.decoding_key(), &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => {
                    tracing::debug!("Rejected session token: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        let claims = data.claims;
        let id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthenticatedUser::new(id, claims.username, claims.email))
    }
}
