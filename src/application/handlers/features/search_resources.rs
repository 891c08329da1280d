//! SearchResourcesHandler - Query handler proxying one keyed search API.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::ports::ResourceFeed;

use super::FeatureError;

/// Query for resources matching a search term.
#[derive(Debug, Clone, Default)]
pub struct SearchResourcesQuery {
    pub query: Option<String>,
}

/// Handler proxying a single feed. One instance exists per source.
pub struct SearchResourcesHandler {
    feed: Arc<dyn ResourceFeed>,
}

impl SearchResourcesHandler {
    pub fn new(feed: Arc<dyn ResourceFeed>) -> Self {
        Self { feed }
    }

    pub async fn handle(&self, query: SearchResourcesQuery) -> Result<Vec<Value>, FeatureError> {
        let source = self.feed.source();
        let term = query
            .query
            .filter(|q| !q.trim().is_empty())
            .ok_or(FeatureError::MissingInput(source.missing_query_message()))?;

        let items = self.feed.search(&term).await.map_err(|e| {
            warn!(source = %source, error = %e, "Resource search failed");
            FeatureError::from_search(e, "Internal Server Error")
        })?;

        debug!(source = %source, count = items.len(), "Resource search returned");
        Ok(items)
    }
}
