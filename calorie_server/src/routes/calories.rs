//! Calorie estimation endpoints
//!
//! - POST /api/calculate-calories - deterministic estimate, plus a fallback
//!   estimate when the activity is not in the catalog
//! - GET /api/activities - the activity catalog

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use calorie_core::{estimate_with_fallback, ActivityRecord, CalorieReport, EstimationRequest, WeightUnit};
use serde::Deserialize;

/// Message for requests missing any of the four inputs
pub const REQUIRED_FIELDS_MESSAGE: &str = "Workout, duration, weight, and weight unit are required";

/// Raw request body; every field optional so absence maps to a 400
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateCaloriesBody {
    #[serde(alias = "workout")]
    pub activity_name: Option<String>,
    #[serde(alias = "duration")]
    pub duration_minutes: Option<f64>,
    #[serde(alias = "weight")]
    pub weight_value: Option<f64>,
    pub weight_unit: Option<String>,
}

impl CalculateCaloriesBody {
    /// Check presence and convert into an engine request
    pub fn into_request(self) -> ApiResult<EstimationRequest> {
        let (Some(activity), Some(duration), Some(weight), Some(unit)) = (
            self.activity_name.filter(|a| !a.trim().is_empty()),
            self.duration_minutes,
            self.weight_value,
            self.weight_unit.filter(|u| !u.trim().is_empty()),
        ) else {
            return Err(ApiError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        };

        let unit: WeightUnit = unit.parse().map_err(ApiError::Validation)?;
        let request = EstimationRequest::new(activity, duration, weight, unit);
        request.validate()?;
        Ok(request)
    }
}

/// Estimate calories for one activity
pub async fn calculate_calories(
    State(state): State<AppState>,
    payload: Result<Json<CalculateCaloriesBody>, JsonRejection>,
) -> ApiResult<Json<CalorieReport>> {
    let Json(body) = payload?;
    let request = body.into_request()?;

    tracing::info!(
        activity = %request.activity_name,
        duration_minutes = request.duration_minutes,
        weight = request.weight_value,
        unit = %request.weight_unit,
        "Calculating calories"
    );

    let report = estimate_with_fallback(state.catalog, &request, state.fallback()).await;
    Ok(Json(report))
}

/// List the activity catalog in resolution order
pub async fn list_activities(State(state): State<AppState>) -> Json<Vec<ActivityRecord>> {
    Json(state.catalog.as_slice().to_vec())
}
