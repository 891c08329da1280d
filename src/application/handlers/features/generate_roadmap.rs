//! GenerateRoadmapHandler - Query handler producing a learning roadmap.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::roadmap::{roadmap_prompt, Roadmap};
use crate::ports::{AIProvider, CompletionRequest};

use super::FeatureError;

/// Query for a roadmap on a topic.
#[derive(Debug, Clone, Default)]
pub struct GenerateRoadmapQuery {
    pub topic: Option<String>,
}

/// Handler that asks the model for a structured roadmap.
///
/// Unparseable model output still yields a roadmap: a single stage holding
/// the raw text.
pub struct GenerateRoadmapHandler {
    ai: Arc<dyn AIProvider>,
}

impl GenerateRoadmapHandler {
    pub fn new(ai: Arc<dyn AIProvider>) -> Self {
        Self { ai }
    }

    pub async fn handle(&self, query: GenerateRoadmapQuery) -> Result<Roadmap, FeatureError> {
        let topic = query
            .topic
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(FeatureError::MissingInput("Missing query"))?;

        let response = self
            .ai
            .complete(CompletionRequest::prompt(roadmap_prompt(&topic)))
            .await
            .map_err(|e| {
                error!(topic = %topic, error = %e, "Roadmap generation failed");
                FeatureError::from_ai(e, "Failed to generate roadmap")
            })?;

        let roadmap = Roadmap::from_ai_text(&topic, response.content.trim());
        info!(topic = %topic, stages = roadmap.roadmap.len(), "Roadmap generated");
        Ok(roadmap)
    }
}
