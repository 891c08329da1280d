//! Keyed search APIs.
//!
//! Each feed issues one GET with the query and key as URL parameters and
//! forwards the result items without reshaping them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;

use crate::ports::{ResourceFeed, ResourceSource, SearchError};

/// Result cap shared by all feeds.
const MAX_RESULTS: &str = "12";

/// HTTP client for one keyed search API.
pub struct HttpResourceFeed {
    source: ResourceSource,
    endpoint: String,
    api_key: Option<Secret<String>>,
    client: Client,
}

impl HttpResourceFeed {
    fn build(
        source: ResourceSource,
        endpoint: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            source,
            endpoint: endpoint.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()).map(Secret::new),
            client,
        })
    }

    /// YouTube Data API video search.
    pub fn youtube(api_key: Option<String>, timeout: Duration) -> Result<Self, SearchError> {
        Self::build(
            ResourceSource::Videos,
            "https://www.googleapis.com/youtube/v3/search",
            api_key,
            timeout,
        )
    }

    /// NewsAPI `everything` search.
    pub fn news(api_key: Option<String>, timeout: Duration) -> Result<Self, SearchError> {
        Self::build(
            ResourceSource::News,
            "https://newsapi.org/v2/everything",
            api_key,
            timeout,
        )
    }

    /// GNews article search.
    pub fn articles(api_key: Option<String>, timeout: Duration) -> Result<Self, SearchError> {
        Self::build(
            ResourceSource::Articles,
            "https://gnews.io/api/v4/search",
            api_key,
            timeout,
        )
    }

    /// Points the feed at another host (for testing).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Query parameters for `query`, key included.
    fn params(&self, query: &str, key: &str) -> Vec<(&'static str, String)> {
        let q = ("q", query.to_string());
        match self.source {
            ResourceSource::Videos => vec![
                ("part", "snippet".to_string()),
                ("type", "video".to_string()),
                ("maxResults", MAX_RESULTS.to_string()),
                q,
                ("key", key.to_string()),
            ],
            ResourceSource::News => vec![
                q,
                ("language", "en".to_string()),
                ("pageSize", MAX_RESULTS.to_string()),
                ("apiKey", key.to_string()),
            ],
            ResourceSource::Articles => vec![
                q,
                ("lang", "en".to_string()),
                ("max", MAX_RESULTS.to_string()),
                ("apikey", key.to_string()),
            ],
        }
    }

    /// Name of the array holding result items in the upstream body.
    fn items_field(&self) -> &'static str {
        match self.source {
            ResourceSource::Videos => "items",
            ResourceSource::News | ResourceSource::Articles => "articles",
        }
    }
}

#[async_trait]
impl ResourceFeed for HttpResourceFeed {
    fn source(&self) -> ResourceSource {
        self.source
    }

    async fn search(&self, query: &str) -> Result<Vec<Value>, SearchError> {
        let key = self
            .api_key
            .as_ref()
            .ok_or(SearchError::NotConfigured(self.source.key_name()))?;

        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.params(query, key.expose_secret()))
            .send()
            .await
            .map_err(|e| SearchError::network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(source = %self.source, status = status.as_u16(), "Search API error");
            return Err(SearchError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let mut body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.without_url().to_string()))?;

        let items = match body.get_mut(self.items_field()).map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        tracing::debug!(source = %self.source, count = items.len(), "Search API returned");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(ctor: fn(Option<String>, Duration) -> Result<HttpResourceFeed, SearchError>) -> HttpResourceFeed {
        ctor(Some("k".to_string()), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn youtube_params() {
        let params = feed(HttpResourceFeed::youtube).params("rust", "k");
        assert!(params.contains(&("type", "video".to_string())));
        assert!(params.contains(&("maxResults", "12".to_string())));
        assert!(params.contains(&("key", "k".to_string())));
    }

    #[test]
    fn news_params() {
        let params = feed(HttpResourceFeed::news).params("rust", "k");
        assert!(params.contains(&("pageSize", "12".to_string())));
        assert!(params.contains(&("apiKey", "k".to_string())));
    }

    #[test]
    fn article_params() {
        let params = feed(HttpResourceFeed::articles).params("rust", "k");
        assert!(params.contains(&("max", "12".to_string())));
        assert!(params.contains(&("apikey", "k".to_string())));
    }

    #[test]
    fn items_field_per_source() {
        assert_eq!(feed(HttpResourceFeed::youtube).items_field(), "items");
        assert_eq!(feed(HttpResourceFeed::news).items_field(), "articles");
        assert_eq!(feed(HttpResourceFeed::articles).items_field(), "articles");
    }

    #[tokio::test]
    async fn missing_key_names_env_var() {
        let feed = HttpResourceFeed::news(None, Duration::from_secs(5)).unwrap();
        let err = feed.search("rust").await.unwrap_err();
        assert_eq!(err, SearchError::NotConfigured("NEWS_API_KEY"));
    }
}
