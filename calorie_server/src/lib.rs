#![forbid(unsafe_code)]

//! HTTP transport for calburn.
//!
//! Validates requests, runs the estimation engine from `calorie_core`, and
//! merges in an optional fallback estimate from an OpenAI-compatible
//! provider when the activity is not in the catalog.

pub mod error;
pub mod openai;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use openai::OpenAiFallback;
pub use state::{AppState, TimeBoundFallback};
