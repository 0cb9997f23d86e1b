//! Core domain types for the calorie estimator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Activity records and their categories
//! - Weight units
//! - Estimation requests and results
//! - The boundary report merged with a fallback estimate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Activity Types
// ============================================================================

/// Grouping label for an activity (informational only)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    Running,
    Walking,
    Cycling,
    Swimming,
    Strength,
    Cardio,
    Sports,
    Fitness,
    Dance,
    Climbing,
    #[serde(rename = "martial arts")]
    MartialArts,
}

impl ActivityCategory {
    /// Human-readable label, as used in the published compendium tables
    pub fn label(&self) -> &'static str {
        match self {
            ActivityCategory::Running => "running",
            ActivityCategory::Walking => "walking",
            ActivityCategory::Cycling => "cycling",
            ActivityCategory::Swimming => "swimming",
            ActivityCategory::Strength => "strength",
            ActivityCategory::Cardio => "cardio",
            ActivityCategory::Sports => "sports",
            ActivityCategory::Fitness => "fitness",
            ActivityCategory::Dance => "dance",
            ActivityCategory::Climbing => "climbing",
            ActivityCategory::MartialArts => "martial arts",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActivityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', " ").as_str() {
            "running" => Ok(ActivityCategory::Running),
            "walking" => Ok(ActivityCategory::Walking),
            "cycling" => Ok(ActivityCategory::Cycling),
            "swimming" => Ok(ActivityCategory::Swimming),
            "strength" => Ok(ActivityCategory::Strength),
            "cardio" => Ok(ActivityCategory::Cardio),
            "sports" => Ok(ActivityCategory::Sports),
            "fitness" => Ok(ActivityCategory::Fitness),
            "dance" => Ok(ActivityCategory::Dance),
            "climbing" => Ok(ActivityCategory::Climbing),
            "martial arts" => Ok(ActivityCategory::MartialArts),
            other => Err(format!("unknown activity category '{}'", other)),
        }
    }
}

/// One entry in the activity catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActivityRecord {
    /// Canonical lowercase label (e.g. "running")
    pub name: String,
    /// Metabolic equivalent of task (MET), always > 0
    pub intensity_factor: f64,
    pub category: ActivityCategory,
}

// ============================================================================
// Units
// ============================================================================

/// Pound-to-kilogram conversion factor (exact, never rounded)
pub const KG_PER_POUND: f64 = 0.453592;

/// Unit the performer's body weight is given in
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[serde(alias = "lb", alias = "lbs")]
    Pound,
    #[serde(alias = "kg")]
    Kilogram,
}

impl WeightUnit {
    /// Convert a weight in this unit to kilograms
    pub fn to_kilograms(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Pound => value * KG_PER_POUND,
            WeightUnit::Kilogram => value,
        }
    }

    /// Short symbol (lb / kg)
    pub fn symbol(&self) -> &'static str {
        match self {
            WeightUnit::Pound => "lb",
            WeightUnit::Kilogram => "kg",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Pound),
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kilogram),
            other => Err(format!("unknown weight unit '{}'", other)),
        }
    }
}

// ============================================================================
// Estimation Types
// ============================================================================

/// A single estimation call
///
/// The engine assumes `duration_minutes > 0` and `weight_value > 0`; callers
/// validate before constructing one.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EstimationRequest {
    pub activity_name: String,
    pub duration_minutes: f64,
    pub weight_value: f64,
    pub weight_unit: WeightUnit,
}

impl EstimationRequest {
    pub fn new(
        activity_name: impl Into<String>,
        duration_minutes: f64,
        weight_value: f64,
        weight_unit: WeightUnit,
    ) -> Self {
        Self {
            activity_name: activity_name.into(),
            duration_minutes,
            weight_value,
            weight_unit,
        }
    }

    /// Boundary checks the engine relies on
    ///
    /// Rejects a blank activity name and non-finite or non-positive
    /// duration/weight.
    pub fn validate(&self) -> crate::Result<()> {
        if self.activity_name.trim().is_empty() {
            return Err(crate::Error::InvalidInput(
                "activity name must not be empty".into(),
            ));
        }
        if !self.duration_minutes.is_finite() || self.duration_minutes <= 0.0 {
            return Err(crate::Error::InvalidInput(format!(
                "duration must be a positive number of minutes, got {}",
                self.duration_minutes
            )));
        }
        if !self.weight_value.is_finite() || self.weight_value <= 0.0 {
            return Err(crate::Error::InvalidInput(format!(
                "weight must be a positive number, got {}",
                self.weight_value
            )));
        }
        Ok(())
    }
}

/// Outcome of the deterministic MET estimate
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    pub calories_burned: Option<i64>,
    pub intensity_factor_used: Option<f64>,
    /// Formula rendering, or an explanatory message when no estimate exists
    pub derivation_text: String,
}

impl EstimationResult {
    /// True when the activity resolved and a calorie count was computed
    pub fn is_resolved(&self) -> bool {
        self.calories_burned.is_some()
    }
}

/// Boundary output: the engine's result plus an optional fallback estimate
///
/// `fallback_calories_burned` is only ever populated when
/// `calories_burned` is `None`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalorieReport {
    pub calories_burned: Option<i64>,
    pub intensity_factor_used: Option<f64>,
    pub derivation_text: String,
    pub fallback_calories_burned: Option<i64>,
}

impl From<EstimationResult> for CalorieReport {
    fn from(result: EstimationResult) -> Self {
        Self {
            calories_burned: result.calories_burned,
            intensity_factor_used: result.intensity_factor_used,
            derivation_text: result.derivation_text,
            fallback_calories_burned: None,
        }
    }
}

// ============================================================================
// Catalog Type
// ============================================================================

/// Ordered, read-only table of activity records
///
/// Order matters: resolution scans records front to back and the first
/// match wins.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub(crate) activities: Vec<ActivityRecord>,
}
