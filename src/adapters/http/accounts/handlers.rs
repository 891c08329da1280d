//! HTTP handlers for account endpoints.
//!
//! These handlers connect Axum routes to the account command/query handlers
//! and manage the session cookie.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::adapters::http::cookies::{with_session, without_session};
use crate::adapters::http::middleware::{OptionalAuth, RequireAuth};
use crate::adapters::http::{ApiError, ApiJson, AppState};
use crate::application::handlers::accounts::{GetCurrentUserQuery, LoginCommand, SignupCommand};
use crate::domain::foundation::Timestamp;
use crate::domain::user::AccountError;

use super::dto::{
    AuthResponse, LoginRequest, MessageResponse, ProfileEnvelope, ProfileResponse,
    SessionUserResponse, SignupRequest, UserResponse,
};

/// POST /api/auth/signup - Create an account and start a session
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .signup_handler()
        .handle(SignupCommand {
            input: request.into(),
        })
        .await?;

    info!(user_id = %result.user.id, "User registered");

    let jar = with_session(jar, &state.settings, result.token.token);
    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse::new("User registered successfully", &result.user)),
    ))
}

/// POST /api/auth/login - Verify credentials and start a session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .login_handler()
        .handle(LoginCommand {
            username: request.username,
            password: request.password,
        })
        .await?;

    let jar = with_session(jar, &state.settings, result.token.token);
    Ok((jar, Json(AuthResponse::new("Login successful", &result.user))))
}

/// POST /api/auth/logout - Clear the session cookie
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = without_session(jar, &state.settings);
    (
        jar,
        Json(MessageResponse {
            success: true,
            message: "Logged out",
        }),
    )
}

/// GET /api/auth/me - Identity of the session holder
///
/// Anonymous callers get 401 with a null user rather than the usual error body.
pub async fn session_user(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<Response, ApiError> {
    let Some(user) = user else {
        return Ok((StatusCode::UNAUTHORIZED, Json(SessionUserResponse::anonymous())).into_response());
    };

    match state
        .current_user_handler()
        .handle(GetCurrentUserQuery { user_id: user.id })
        .await
    {
        Ok(user) => Ok(Json(SessionUserResponse {
            success: true,
            user: Some(UserResponse::from(&user)),
        })
        .into_response()),
        Err(AccountError::NotFound) => {
            Ok((StatusCode::NOT_FOUND, Json(SessionUserResponse::anonymous())).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /api/user/me - Premium standing of the caller
pub async fn profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .current_user_handler()
        .handle(GetCurrentUserQuery { user_id: user.id })
        .await?;

    Ok(Json(ProfileEnvelope {
        success: true,
        user: ProfileResponse::from_user(&user, Timestamp::now()),
    }))
}
