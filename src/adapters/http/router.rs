//! Router assembly: nests every feature router under `/api` and wraps the
//! result in the shared middleware stack.

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::ServerConfig;

use super::accounts::{auth_routes, user_routes};
use super::chat::chat_routes;
use super::features::{feature_routes, search_routes};
use super::middleware::auth_middleware;
use super::payments::payment_routes;
use super::{ApiError, AppState};

/// All API routes, relative to `/api`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth_routes())
        .nest("/user", user_routes())
        .nest("/chat", chat_routes())
        .nest("/features", feature_routes())
        .nest("/search", search_routes())
        .nest("/payment", payment_routes())
}

/// The complete application: API routes, session middleware and the
/// transport layers from `server`.
pub fn build_app(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .nest("/api", api_router())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(RequestBodyLimitLayer::new(server.body_limit_bytes))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Explicit origins allow credentials so the session cookie is sent;
/// without any, every origin is allowed and cookies are not.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
    }
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not found")
}
