//! HTTP adapter for the public learning features.
//!
//! - `GET /api/features/roadmap?q=` - AI study roadmap
//! - `GET /api/features/{yt,news,article}?q=` - Keyed search proxies
//! - `POST /api/search` - Curated resource discovery

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{feature_routes, search_routes};
