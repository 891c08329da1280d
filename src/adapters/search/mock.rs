//! Search test doubles.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::{LearningWorkflow, ResourceFeed, ResourceSource, SearchError};

/// Feed returning fixed items, or a fixed error.
#[derive(Clone)]
pub struct MockResourceFeed {
    source: ResourceSource,
    result: Result<Vec<Value>, SearchError>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockResourceFeed {
    pub fn new(source: ResourceSource, items: Vec<Value>) -> Self {
        Self {
            source,
            result: Ok(items),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(source: ResourceSource, error: SearchError) -> Self {
        Self {
            source,
            result: Err(error),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ResourceFeed for MockResourceFeed {
    fn source(&self) -> ResourceSource {
        self.source
    }

    async fn search(&self, query: &str) -> Result<Vec<Value>, SearchError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }
        self.result.clone()
    }
}

/// Workflow returning a fixed answer.
#[derive(Clone)]
pub struct MockLearningWorkflow {
    result: Result<Value, SearchError>,
}

impl MockLearningWorkflow {
    pub fn new(answer: Value) -> Self {
        Self { result: Ok(answer) }
    }

    pub fn failing(error: SearchError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl LearningWorkflow for MockLearningWorkflow {
    async fn discover(&self, _topic: &str) -> Result<Value, SearchError> {
        self.result.clone()
    }
}
