//! Axum router configuration for learning-feature endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{articles, discover, news, roadmap, videos};

/// Create the features API router.
///
/// # Routes
///
/// - `GET /roadmap?q=` - Study roadmap
/// - `GET /yt?q=` - Video search
/// - `GET /news?q=` - News search
/// - `GET /article?q=` - Article search
pub fn feature_routes() -> Router<AppState> {
    Router::new()
        .route("/roadmap", get(roadmap))
        .route("/yt", get(videos))
        .route("/news", get(news))
        .route("/article", get(articles))
}

/// Create the discovery router, mounted at `/api/search`.
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/", post(discover))
}
