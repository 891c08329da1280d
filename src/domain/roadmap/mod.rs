//! Roadmap module - Structured learning plans built from model output.

mod model;

pub use model::{roadmap_prompt, Roadmap, RoadmapResource, RoadmapStage};
