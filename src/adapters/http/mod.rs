//! HTTP adapter - REST API over axum.
//!
//! Each feature has its own module with `dto`, `handlers` and `routes`.
//! `router::build_app` assembles them under `/api`.

pub mod accounts;
pub mod chat;
pub mod cookies;
pub mod error;
pub mod extract;
pub mod features;
pub mod middleware;
pub mod payments;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorBody};
pub use extract::ApiJson;
pub use router::{api_router, build_app};
pub use state::{AppSettings, AppState};
