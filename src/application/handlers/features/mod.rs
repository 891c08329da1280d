//! Learning-feature handlers.
//!
//! ## Queries
//! - Generate a learning roadmap for a topic
//! - Search a keyed resource API (videos, news, articles)
//! - Discover curated resources through the external workflow

mod discover_resources;
mod errors;
mod generate_roadmap;
mod search_resources;

pub use errors::FeatureError;

// Queries
pub use discover_resources::{DiscoverResourcesHandler, DiscoverResourcesQuery};
pub use generate_roadmap::{GenerateRoadmapHandler, GenerateRoadmapQuery};
pub use search_resources::{SearchResourcesHandler, SearchResourcesQuery};
