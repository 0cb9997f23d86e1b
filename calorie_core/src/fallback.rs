//! Approximate fallback estimates for activities the catalog cannot resolve.
//!
//! The estimator itself is an injected capability (usually a text-generation
//! service). This module owns the prompt, the parsing of its reply, and the
//! orchestration rule: the fallback runs at most once per request, only when
//! the deterministic engine found no match, and its failures degrade to
//! "no fallback value".

use crate::engine::estimate_calories;
use crate::{CalorieReport, Catalog, EstimationRequest, WeightUnit};
use async_trait::async_trait;

/// Descriptive context handed to a fallback estimator
#[derive(Clone, Debug, PartialEq)]
pub struct FallbackContext {
    pub activity_name: String,
    pub duration_minutes: f64,
    pub weight_value: f64,
    pub weight_unit: WeightUnit,
}

impl From<&EstimationRequest> for FallbackContext {
    fn from(request: &EstimationRequest) -> Self {
        Self {
            activity_name: request.activity_name.clone(),
            duration_minutes: request.duration_minutes,
            weight_value: request.weight_value,
            weight_unit: request.weight_unit,
        }
    }
}

impl FallbackContext {
    /// Render the user prompt sent to a text-generation estimator
    pub fn prompt(&self) -> String {
        format!(
            "Calculate the approximate calories burned for a {duration}-minute {activity} session \
             for a person weighing {weight} {unit}.\n\n\
             Please provide a realistic estimate based on:\n\
             - Person weighs {weight} {unit}\n\
             - Moderate intensity level\n\
             - Common fitness guidelines and MET values\n\
             - Account for body weight in calorie calculations\n\n\
             Respond with ONLY a number representing the estimated calories burned. \
             No explanation, just the number.",
            duration = self.duration_minutes,
            activity = self.activity_name.trim(),
            weight = self.weight_value,
            unit = self.weight_unit,
        )
    }
}

/// A capability that produces an approximate calorie count
///
/// Implementations must swallow their own errors (network, timeouts,
/// malformed replies) and return `None`.
#[async_trait]
pub trait FallbackEstimator: Send + Sync {
    async fn estimate(&self, context: &FallbackContext) -> Option<i64>;
}

/// Parse the leading integer of a free-text reply
///
/// Leading whitespace and an optional sign are accepted, then digits up to
/// the first non-digit ("250 calories" -> 250). Replies without leading
/// digits, and negative values, yield `None`.
pub fn parse_fallback_calories(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let value: i64 = rest[..digits_end].parse().ok()?;
    if negative && value != 0 {
        return None;
    }
    Some(value)
}

/// Run the deterministic engine, consulting `fallback` only on a miss
pub async fn estimate_with_fallback(
    catalog: &Catalog,
    request: &EstimationRequest,
    fallback: Option<&dyn FallbackEstimator>,
) -> CalorieReport {
    let result = estimate_calories(catalog, request);
    let resolved = result.is_resolved();
    let mut report = CalorieReport::from(result);

    if resolved {
        return report;
    }

    match fallback {
        Some(estimator) => {
            tracing::info!(
                "No MET match for '{}', requesting fallback estimate",
                request.activity_name
            );
            report.fallback_calories_burned = estimator.estimate(&FallbackContext::from(request)).await;
            if report.fallback_calories_burned.is_none() {
                tracing::warn!("Fallback estimate unavailable for '{}'", request.activity_name);
            }
        }
        None => {
            tracing::debug!("No fallback estimator configured");
        }
    }

    report
}
