//! Resource search adapters.
//!
//! - `HttpResourceFeed` - keyed GET search against YouTube, NewsAPI and GNews
//! - `N8nWorkflow` - resource-curation webhook
//! - `MockResourceFeed` / `MockLearningWorkflow` - test doubles

mod http_feed;
mod mock;
mod n8n_workflow;

pub use http_feed::HttpResourceFeed;
pub use mock::{MockLearningWorkflow, MockResourceFeed};
pub use n8n_workflow::N8nWorkflow;
