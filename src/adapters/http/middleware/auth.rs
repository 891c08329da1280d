//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that reads the session token and injects the user into extensions
//! - `RequireAuth` - Extractor that requires authentication
//! - `OptionalAuth` - Extractor for optional authentication
//!
//! # Architecture
//!
//! The middleware uses the `SessionValidator` port, so tests can swap the
//! JWT adapter for a mock without touching the routes.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! The middleware never rejects. Public routes must keep working when a
//! browser sends a stale cookie, so failures are recorded and only
//! `RequireAuth` turns them into a 401.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, error};

use crate::adapters::http::{ApiError, AppState};
use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Why a presented token was not accepted.
#[derive(Debug, Clone)]
pub struct AuthFailure(pub AuthError);

/// Authentication middleware.
///
/// 1. Reads the token from the session cookie, falling back to
///    `Authorization: Bearer <token>`
/// 2. Validates it through the `SessionValidator` port
/// 3. On success, injects `AuthenticatedUser` into request extensions
/// 4. On failure, injects `AuthFailure` and continues
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = jar
        .get(&state.settings.cookie_name)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| bearer_token(request.headers()));

    if let Some(token) = token {
        match state.session_validator.validate(&token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(e) => {
                if let AuthError::ServiceUnavailable(msg) = &e {
                    error!(error = %msg, "Session validation unavailable");
                } else {
                    debug!(error = %e, "Rejected session token");
                }
                request.extensions_mut().insert(AuthFailure(e));
            }
        }
    }

    next.run(request).await
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Extractor that requires authentication.
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(RequireAuth(user.clone()));
        }

        match parts.extensions.get::<AuthFailure>() {
            Some(AuthFailure(AuthError::ServiceUnavailable(_))) => Err(AuthRejection::Unavailable),
            Some(_) => Err(AuthRejection::InvalidToken),
            None => Err(AuthRejection::Unauthenticated),
        }
    }
}

/// Extractor for optional authentication. Never rejects.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No token was presented.
    Unauthenticated,
    /// A token was presented but did not validate.
    InvalidToken,
    /// Tokens could not be checked.
    Unavailable,
}

impl From<AuthRejection> for ApiError {
    fn from(rejection: AuthRejection) -> Self {
        match rejection {
            AuthRejection::Unauthenticated => ApiError::unauthorized("Unauthorized"),
            AuthRejection::InvalidToken => ApiError::unauthorized("Invalid token"),
            AuthRejection::Unavailable => ApiError::new(
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                "Authentication service unavailable",
            ),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
