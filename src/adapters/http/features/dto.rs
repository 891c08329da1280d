//! HTTP DTOs for learning-feature endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `?q=` query string shared by the feature routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// Body of `POST /api/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoverRequest {
    #[serde(default)]
    pub topic: Option<String>,
}

/// Search results, forwarded as the upstream sent them.
#[derive(Debug, Clone, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<Value>,
}
