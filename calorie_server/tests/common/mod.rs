//! Common test utilities for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use calorie_core::{get_default_catalog, Config, FallbackContext, FallbackEstimator};
use calorie_server::{routes, AppState};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// Fallback double that records how it was called
pub struct RecordingFallback {
    pub reply: Option<i64>,
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
    pub last_context: Mutex<Option<FallbackContext>>,
}

impl RecordingFallback {
    pub fn new(reply: Option<i64>) -> Arc<Self> {
        Self::build(reply, None)
    }

    /// Double that sleeps for `delay` before replying
    pub fn slow(reply: Option<i64>, delay: Duration) -> Arc<Self> {
        Self::build(reply, Some(delay))
    }

    fn build(reply: Option<i64>, delay: Option<Duration>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            delay,
            calls: AtomicUsize::new(0),
            last_context: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FallbackEstimator for RecordingFallback {
    async fn estimate(&self, context: &FallbackContext) -> Option<i64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_context.lock().unwrap() = Some(context.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply
    }
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    /// App without a fallback provider
    pub fn new() -> Self {
        Self::build(None, Config::default())
    }

    /// App with the given fallback provider
    pub fn with_fallback(fallback: Arc<RecordingFallback>) -> Self {
        Self::with_fallback_and_config(fallback, Config::default())
    }

    /// App with the given fallback provider and configuration
    pub fn with_fallback_and_config(fallback: Arc<RecordingFallback>, config: Config) -> Self {
        Self::build(Some(fallback as Arc<dyn FallbackEstimator>), config)
    }

    fn build(fallback: Option<Arc<dyn FallbackEstimator>>, config: Config) -> Self {
        let state = AppState::new(get_default_catalog(), fallback, config);
        Self {
            app: routes::create_router(state),
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }
}
