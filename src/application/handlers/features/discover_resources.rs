//! DiscoverResourcesHandler - Query handler for the curation workflow.

use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use crate::ports::LearningWorkflow;

use super::FeatureError;

/// Query for curated resources on a topic.
#[derive(Debug, Clone, Default)]
pub struct DiscoverResourcesQuery {
    pub topic: Option<String>,
}

/// Handler forwarding a topic to the curation workflow.
pub struct DiscoverResourcesHandler {
    workflow: Arc<dyn LearningWorkflow>,
}

impl DiscoverResourcesHandler {
    pub fn new(workflow: Arc<dyn LearningWorkflow>) -> Self {
        Self { workflow }
    }

    pub async fn handle(&self, query: DiscoverResourcesQuery) -> Result<Value, FeatureError> {
        let topic = query
            .topic
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(FeatureError::MissingInput("Topic is required"))?;

        self.workflow.discover(&topic).await.map_err(|e| {
            error!(topic = %topic, error = %e, "Learning workflow failed");
            FeatureError::Failed {
                message: "Failed to fetch learning resources",
                detail: e.to_string(),
            }
        })
    }
}
