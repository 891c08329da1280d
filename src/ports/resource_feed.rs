//! Resource search ports.
//!
//! - `ResourceFeed` - keyed search APIs (videos, news, articles) whose result
//!   items are forwarded to the client untouched
//! - `LearningWorkflow` - an external automation that curates resources for
//!   a topic and answers with arbitrary JSON

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Which external catalog a feed searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceSource {
    Videos,
    News,
    Articles,
}

impl ResourceSource {
    /// Environment name of the API key this source needs.
    pub fn key_name(&self) -> &'static str {
        match self {
            ResourceSource::Videos => "YT_API_KEY",
            ResourceSource::News => "NEWS_API_KEY",
            ResourceSource::Articles => "ARTICLE_API_KEY",
        }
    }

    /// Message returned when the query parameter is missing.
    pub fn missing_query_message(&self) -> &'static str {
        match self {
            ResourceSource::Videos => "Please provide a search query (?q=topic)",
            ResourceSource::News | ResourceSource::Articles => "Please provide a topic (?q=topic)",
        }
    }
}

impl fmt::Display for ResourceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceSource::Videos => "videos",
            ResourceSource::News => "news",
            ResourceSource::Articles => "articles",
        };
        f.write_str(s)
    }
}

/// Port for a keyed search API.
#[async_trait]
pub trait ResourceFeed: Send + Sync {
    /// The catalog this feed searches.
    fn source(&self) -> ResourceSource;

    /// Search the catalog and return its result items verbatim.
    async fn search(&self, query: &str) -> Result<Vec<Value>, SearchError>;
}

/// Port for the resource-curation workflow.
#[async_trait]
pub trait LearningWorkflow: Send + Sync {
    /// Ask the workflow for resources on `topic`.
    async fn discover(&self, topic: &str) -> Result<Value, SearchError>;
}

/// Errors from search integrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The integration has no API key.
    #[error("{0} not set")]
    NotConfigured(&'static str),

    /// Upstream answered with a non-success status; `body` is its raw text.
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Request never completed.
    #[error("network error: {0}")]
    Network(String),

    /// Upstream answered with something other than the expected JSON.
    #[error("parse error: {0}")]
    Parse(String),
}

impl SearchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
