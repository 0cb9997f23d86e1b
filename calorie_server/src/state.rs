//! Application state management
//!
//! Shared, read-only state passed to handlers via Axum's state extraction.
//! Cloning is cheap: the catalog is `'static` and the rest sits behind `Arc`.

use async_trait::async_trait;
use calorie_core::{Catalog, Config, FallbackContext, FallbackEstimator};
use std::sync::Arc;
use std::time::Duration;

/// Caps how long a fallback estimator may run
///
/// An estimate that does not finish within `limit` counts as unavailable, so
/// a slow provider cannot push the request past the server timeout.
pub struct TimeBoundFallback {
    inner: Arc<dyn FallbackEstimator>,
    limit: Duration,
}

impl TimeBoundFallback {
    pub fn new(inner: Arc<dyn FallbackEstimator>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl FallbackEstimator for TimeBoundFallback {
    async fn estimate(&self, context: &FallbackContext) -> Option<i64> {
        match tokio::time::timeout(self.limit, self.inner.estimate(context)).await {
            Ok(estimate) => estimate,
            Err(_) => {
                tracing::warn!(
                    "Fallback estimate for '{}' timed out after {:?}",
                    context.activity_name,
                    self.limit
                );
                None
            }
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Immutable activity catalog
    pub catalog: &'static Catalog,
    /// Optional fallback estimator for unresolved activities
    pub fallback: Option<Arc<dyn FallbackEstimator>>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new application state
    ///
    /// The fallback is wrapped in a [`TimeBoundFallback`] limited to
    /// `fallback.timeout_secs`.
    pub fn new(
        catalog: &'static Catalog,
        fallback: Option<Arc<dyn FallbackEstimator>>,
        config: Config,
    ) -> Self {
        let limit = Duration::from_secs(config.fallback.timeout_secs);
        let fallback = fallback.map(|inner| {
            Arc::new(TimeBoundFallback::new(inner, limit)) as Arc<dyn FallbackEstimator>
        });

        Self {
            catalog,
            fallback,
            config: Arc::new(config),
        }
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Borrow the fallback estimator, if one is configured
    #[inline]
    pub fn fallback(&self) -> Option<&dyn FallbackEstimator> {
        self.fallback.as_deref()
    }
}
