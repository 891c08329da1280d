//! Resource search configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Keys and endpoints for the resource search integrations
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// YouTube Data API key
    pub youtube_api_key: Option<String>,

    /// NewsAPI key
    pub news_api_key: Option<String>,

    /// GNews key
    pub article_api_key: Option<String>,

    /// Resource-curation workflow webhook
    #[serde(default = "default_workflow_url")]
    pub workflow_url: String,

    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SearchConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate search configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.workflow_url.starts_with("http://") && !self.workflow_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("SEARCH_WORKFLOW_URL"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            youtube_api_key: None,
            news_api_key: None,
            article_api_key: None,
            workflow_url: default_workflow_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_workflow_url() -> String {
    "http://localhost:5678/webhook/skillzup-search".to_string()
}

fn default_timeout() -> u64 {
    15
}
