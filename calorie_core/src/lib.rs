#![forbid(unsafe_code)]

//! Core domain model and estimation logic for calburn.
//!
//! This crate provides:
//! - Domain types (activities, units, requests, results)
//! - The MET activity catalog
//! - The estimation engine (activity resolution + calorie formula)
//! - The fallback estimator capability and its orchestration
//! - Configuration and logging shared by the binaries

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod engine;
pub mod fallback;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use engine::{estimate_calories, resolve_activity, resolve_intensity_factor, ActivityMatch, MatchKind};
pub use fallback::{estimate_with_fallback, parse_fallback_calories, FallbackContext, FallbackEstimator};
