//! HTTP handlers for learning-feature endpoints.
//!
//! These routes are public. Missing vendor keys surface here as a 500 that
//! names the key.

use axum::extract::{Json, Query, State};
use axum::response::IntoResponse;

use crate::adapters::http::{ApiError, ApiJson, AppState};
use crate::application::handlers::features::{
    DiscoverResourcesQuery, GenerateRoadmapQuery, SearchResourcesQuery,
};
use crate::ports::ResourceSource;

use super::dto::{DiscoverRequest, ItemsResponse, TopicParams};

/// GET /api/features/roadmap?q= - Generate a study roadmap
pub async fn roadmap(
    State(state): State<AppState>,
    Query(params): Query<TopicParams>,
) -> Result<impl IntoResponse, ApiError> {
    let roadmap = state
        .roadmap_handler()
        .handle(GenerateRoadmapQuery { topic: params.q })
        .await?;

    Ok(Json(roadmap))
}

/// GET /api/features/yt?q= - Search videos
pub async fn videos(
    state: State<AppState>,
    params: Query<TopicParams>,
) -> Result<impl IntoResponse, ApiError> {
    search(state, params, ResourceSource::Videos).await
}

/// GET /api/features/news?q= - Search news
pub async fn news(
    state: State<AppState>,
    params: Query<TopicParams>,
) -> Result<impl IntoResponse, ApiError> {
    search(state, params, ResourceSource::News).await
}

/// GET /api/features/article?q= - Search articles
pub async fn articles(
    state: State<AppState>,
    params: Query<TopicParams>,
) -> Result<impl IntoResponse, ApiError> {
    search(state, params, ResourceSource::Articles).await
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<TopicParams>,
    source: ResourceSource,
) -> Result<Json<ItemsResponse>, ApiError> {
    let items = state
        .search_handler(source)
        .handle(SearchResourcesQuery { query: params.q })
        .await?;

    Ok(Json(ItemsResponse { items }))
}

/// POST /api/search - Curated resources from the discovery workflow
pub async fn discover(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DiscoverRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .discover_handler()
        .handle(DiscoverResourcesQuery {
            topic: request.topic,
        })
        .await?;

    Ok(Json(result))
}
