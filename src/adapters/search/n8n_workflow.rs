//! Resource-curation workflow client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::ports::{LearningWorkflow, SearchError};

/// Posts `{topic}` to an n8n webhook and returns its JSON answer.
pub struct N8nWorkflow {
    url: String,
    client: Client,
}

impl N8nWorkflow {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl LearningWorkflow for N8nWorkflow {
    async fn discover(&self, topic: &str) -> Result<Value, SearchError> {
        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "topic": topic }))
            .send()
            .await
            .map_err(|e| SearchError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))
    }
}
