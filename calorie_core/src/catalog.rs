//! Default catalog of activities and their MET values.
//!
//! Values come from the 2011 Compendium of Physical Activities
//! (Ainsworth et al.). They are literal constants, not derived.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn record(name: &str, intensity_factor: f64, category: ActivityCategory) -> ActivityRecord {
    ActivityRecord {
        name: name.into(),
        intensity_factor,
        category,
    }
}

fn build_default_catalog_internal() -> Catalog {
    use ActivityCategory::*;

    let activities = vec![
        // Running
        record("running", 8.0, Running),
        record("jogging", 7.0, Running),
        record("sprinting", 12.0, Running),
        // Walking
        record("walking", 3.5, Walking),
        record("brisk walking", 4.0, Walking),
        record("hiking", 6.0, Walking),
        // Cycling
        record("cycling", 6.8, Cycling),
        record("biking", 6.8, Cycling),
        record("mountain biking", 8.5, Cycling),
        // Swimming
        record("swimming", 8.0, Swimming),
        record("freestyle swimming", 8.3, Swimming),
        record("water aerobics", 4.0, Swimming),
        // Strength training
        record("weightlifting", 6.0, Strength),
        record("strength training", 6.0, Strength),
        record("bodyweight exercises", 5.0, Strength),
        record("push-ups", 3.8, Strength),
        record("pull-ups", 8.0, Strength),
        record("squats", 5.0, Strength),
        // Cardio equipment
        record("treadmill", 7.0, Cardio),
        record("elliptical", 5.0, Cardio),
        record("stationary bike", 6.8, Cardio),
        record("rowing machine", 7.0, Cardio),
        record("stair climber", 9.0, Cardio),
        // Sports
        record("basketball", 6.5, Sports),
        record("soccer", 7.0, Sports),
        record("tennis", 7.3, Sports),
        record("golf", 4.8, Sports),
        record("volleyball", 4.0, Sports),
        // Fitness classes
        record("yoga", 2.5, Fitness),
        record("pilates", 3.0, Fitness),
        record("zumba", 7.3, Fitness),
        record("aerobics", 7.3, Fitness),
        record("crossfit", 5.6, Fitness),
        // Dance
        record("dancing", 4.8, Dance),
        record("ballroom dancing", 3.0, Dance),
        // Other
        record("jumping rope", 12.3, Cardio),
        record("rock climbing", 8.0, Climbing),
        record("martial arts", 10.3, MartialArts),
    ];

    Catalog::new(activities)
}

impl Catalog {
    /// Build a catalog from an explicit record list (order preserved)
    pub fn new(activities: Vec<ActivityRecord>) -> Self {
        Self { activities }
    }

    /// Records in catalog order, as a slice
    pub fn as_slice(&self) -> &[ActivityRecord] {
        &self.activities
    }

    /// Records in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, ActivityRecord> {
        self.activities.iter()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Records belonging to `category`, in catalog order
    pub fn by_category(&self, category: ActivityCategory) -> impl Iterator<Item = &ActivityRecord> {
        self.activities
            .iter()
            .filter(move |a| a.category == category)
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.activities.is_empty() {
            errors.push("Catalog has no activities".to_string());
        }

        let mut seen = HashSet::new();
        for activity in &self.activities {
            if activity.name.is_empty() {
                errors.push("Activity has empty name".to_string());
                continue;
            }
            if activity.name != activity.name.trim().to_lowercase() {
                errors.push(format!(
                    "Activity '{}' is not a trimmed lowercase name",
                    activity.name
                ));
            }
            if !seen.insert(activity.name.to_lowercase()) {
                errors.push(format!("Duplicate activity '{}'", activity.name));
            }
            if !activity.intensity_factor.is_finite() || activity.intensity_factor <= 0.0 {
                errors.push(format!(
                    "Activity '{}' has non-positive MET {}",
                    activity.name, activity.intensity_factor
                ));
            }
        }

        errors
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ActivityRecord;
    type IntoIter = std::slice::Iter<'a, ActivityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.activities.iter()
    }
}
