//! Estimation engine: activity resolution and the MET calorie formula.
//!
//! Resolution runs two passes over the catalog in order:
//! - Exact match on the normalized (lowercased, trimmed) name
//! - Partial match, where either string contains the other
//!
//! The first record in catalog order wins each pass. There is no scoring, so
//! reordering the catalog changes results for ambiguous inputs.
//!
//! Calories = MET × weight (kg) × duration (hours)

use crate::{ActivityRecord, Catalog, EstimationRequest, EstimationResult};

/// Message returned when no catalog record matches the activity name
pub const NOT_FOUND_MESSAGE: &str = "Activity not found in MET database";

/// How an activity name was matched to a catalog record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Partial,
}

/// A resolved catalog record
#[derive(Clone, Copy, Debug)]
pub struct ActivityMatch<'a> {
    pub record: &'a ActivityRecord,
    pub kind: MatchKind,
}

/// Lowercase and trim; nothing else (no punctuation or plural handling)
fn normalize(activity_name: &str) -> String {
    activity_name.trim().to_lowercase()
}

/// Render `value` with `digits` decimals, rounding exact ties upward
///
/// `{:.N}` rounds an exactly representable tie (68.25, 0.125) to even. The
/// derivation text rounds it away from zero instead, so those ties are
/// detected and rounded explicitly. A tie at N decimals means the value is
/// an odd multiple of 2^-(N+1), and scaling by a power of two is exact.
fn to_fixed(value: f64, digits: usize) -> String {
    let halves = value * 2f64.powi(digits as i32 + 1);
    if halves.fract() == 0.0 && halves % 2.0 != 0.0 {
        let scale = 10f64.powi(digits as i32);
        return format!("{:.*}", digits, (value * scale).round() / scale);
    }
    format!("{:.*}", digits, value)
}

/// Resolve a free-text activity name to a catalog record
pub fn resolve_activity<'a>(catalog: &'a Catalog, activity_name: &str) -> Option<ActivityMatch<'a>> {
    let normalized = normalize(activity_name);

    if let Some(record) = catalog.iter().find(|a| a.name == normalized) {
        return Some(ActivityMatch {
            record,
            kind: MatchKind::Exact,
        });
    }

    catalog
        .iter()
        .find(|a| normalized.contains(a.name.as_str()) || a.name.contains(normalized.as_str()))
        .map(|record| ActivityMatch {
            record,
            kind: MatchKind::Partial,
        })
}

/// Resolve a free-text activity name to its MET value
pub fn resolve_intensity_factor(catalog: &Catalog, activity_name: &str) -> Option<f64> {
    resolve_activity(catalog, activity_name).map(|m| m.record.intensity_factor)
}

/// Compute a deterministic calorie estimate
///
/// Never fails: an unresolved activity yields a result with no numbers and
/// an explanatory derivation text.
pub fn estimate_calories(catalog: &Catalog, request: &EstimationRequest) -> EstimationResult {
    let Some(activity) = resolve_activity(catalog, &request.activity_name) else {
        tracing::debug!("No MET match for activity '{}'", request.activity_name);
        return EstimationResult {
            calories_burned: None,
            intensity_factor_used: None,
            derivation_text: NOT_FOUND_MESSAGE.to_string(),
        };
    };

    let met = activity.record.intensity_factor;
    let weight_kg = request.weight_unit.to_kilograms(request.weight_value);
    let duration_hours = request.duration_minutes / 60.0;
    let calories = (met * weight_kg * duration_hours).round() as i64;

    tracing::debug!(
        "Resolved '{}' to '{}' ({:?}, {} MET)",
        request.activity_name,
        activity.record.name,
        activity.kind,
        met
    );

    EstimationResult {
        calories_burned: Some(calories),
        intensity_factor_used: Some(met),
        derivation_text: format!(
            "{} MET × {}kg × {}h = {} calories",
            met,
            to_fixed(weight_kg, 1),
            to_fixed(duration_hours, 2),
            calories
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_default_catalog, get_default_catalog, ActivityCategory, WeightUnit};

    fn running_request(weight: f64, unit: WeightUnit) -> EstimationRequest {
        EstimationRequest::new("running", 30.0, weight, unit)
    }

    #[test]
    fn test_exact_match() {
        let catalog = get_default_catalog();
        assert_eq!(resolve_intensity_factor(catalog, "running"), Some(8.0));
        assert_eq!(resolve_intensity_factor(catalog, "yoga"), Some(2.5));
        assert_eq!(resolve_intensity_factor(catalog, "martial arts"), Some(10.3));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let catalog = get_default_catalog();
        assert_eq!(
            resolve_intensity_factor(catalog, "  Running "),
            resolve_intensity_factor(catalog, "running")
        );
        assert_eq!(resolve_intensity_factor(catalog, "\tROCK CLIMBING\n"), Some(8.0));
    }

    #[test]
    fn test_exact_match_beats_earlier_partial() {
        let catalog = get_default_catalog();

        // "swimming" is contained in "freestyle swimming" but the exact pass wins
        let m = resolve_activity(catalog, "freestyle swimming").unwrap();
        assert_eq!(m.kind, MatchKind::Exact);
        assert_eq!(m.record.intensity_factor, 8.3);

        // "walking" (earlier) is a substring of "brisk walking"
        assert_eq!(resolve_intensity_factor(catalog, "brisk walking"), Some(4.0));
        // "biking" (earlier) is a substring of "mountain biking"
        assert_eq!(resolve_intensity_factor(catalog, "mountain biking"), Some(8.5));
    }

    #[test]
    fn test_exact_precedence_with_custom_order() {
        let catalog = Catalog::new(vec![
            ActivityRecord {
                name: "sprinting".into(),
                intensity_factor: 12.0,
                category: ActivityCategory::Running,
            },
            ActivityRecord {
                name: "trail running".into(),
                intensity_factor: 9.0,
                category: ActivityCategory::Running,
            },
            ActivityRecord {
                name: "running".into(),
                intensity_factor: 8.0,
                category: ActivityCategory::Running,
            },
        ]);

        // "trail running" contains "running" and comes first, but exact wins
        assert_eq!(resolve_intensity_factor(&catalog, "running"), Some(8.0));
    }

    #[test]
    fn test_substring_fallback() {
        let catalog = get_default_catalog();
        let m = resolve_activity(catalog, "evening jogging session").unwrap();
        assert_eq!(m.kind, MatchKind::Partial);
        assert_eq!(m.record.name, "jogging");
        assert_eq!(m.record.intensity_factor, 7.0);
    }

    #[test]
    fn test_input_contained_in_catalog_name() {
        let catalog = get_default_catalog();
        // "climb" is contained in "stair climber" before "rock climbing"
        let m = resolve_activity(catalog, "climb").unwrap();
        assert_eq!(m.record.name, "stair climber");
        assert_eq!(m.kind, MatchKind::Partial);
    }

    #[test]
    fn test_first_declared_wins_for_multiple_names() {
        let catalog = get_default_catalog();
        // Contains both "running" and "swimming"; running is declared first
        assert_eq!(
            resolve_activity(catalog, "swimming then running").unwrap().record.name,
            "running"
        );
        // "walking" precedes "treadmill" in catalog order
        assert_eq!(
            resolve_activity(catalog, "treadmill walking").unwrap().record.name,
            "walking"
        );
    }

    #[test]
    fn test_unknown_activity() {
        let catalog = get_default_catalog();
        assert_eq!(resolve_intensity_factor(catalog, "underwater basket weaving"), None);
        assert!(resolve_activity(catalog, "chess").is_none());
    }

    #[test]
    fn test_empty_input_matches_first_record() {
        let catalog = get_default_catalog();
        assert_eq!(resolve_activity(catalog, "   ").unwrap().record.name, "running");
    }

    #[test]
    fn test_formula_pounds() {
        let catalog = get_default_catalog();
        let result = estimate_calories(catalog, &running_request(150.0, WeightUnit::Pound));

        assert_eq!(result.calories_burned, Some(272));
        assert_eq!(result.intensity_factor_used, Some(8.0));
        assert_eq!(
            result.derivation_text,
            "8 MET × 68.0kg × 0.50h = 272 calories"
        );
    }

    #[test]
    fn test_formula_kilograms_matches_pounds() {
        let catalog = get_default_catalog();
        let lb = estimate_calories(catalog, &running_request(150.0, WeightUnit::Pound));
        let kg = estimate_calories(catalog, &running_request(68.0388, WeightUnit::Kilogram));

        assert_eq!(lb.calories_burned, kg.calories_burned);
        assert_eq!(lb.derivation_text, kg.derivation_text);
    }

    #[test]
    fn test_fractional_met_rendering() {
        let catalog = get_default_catalog();
        let request = EstimationRequest::new("jumping rope", 45.0, 70.0, WeightUnit::Kilogram);
        let result = estimate_calories(catalog, &request);

        // 12.3 * 70 * 0.75 = 645.75
        assert_eq!(result.calories_burned, Some(646));
        assert_eq!(
            result.derivation_text,
            "12.3 MET × 70.0kg × 0.75h = 646 calories"
        );
    }

    #[test]
    fn test_to_fixed_rounds_ties_up() {
        assert_eq!(to_fixed(68.25, 1), "68.3");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(0.375, 2), "0.38");
        assert_eq!(to_fixed(2.5, 0), "3");
    }

    #[test]
    fn test_to_fixed_non_ties_unchanged() {
        assert_eq!(to_fixed(68.0388, 1), "68.0");
        assert_eq!(to_fixed(0.5, 2), "0.50");
        assert_eq!(to_fixed(0.75, 2), "0.75");
        // 1.005 is stored just below the tie
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(70.0, 1), "70.0");
    }

    #[test]
    fn test_derivation_rounds_tied_weight_and_hours_up() {
        let catalog = get_default_catalog();

        let half_hour = EstimationRequest::new("running", 30.0, 68.25, WeightUnit::Kilogram);
        assert_eq!(
            estimate_calories(catalog, &half_hour).derivation_text,
            "8 MET × 68.3kg × 0.50h = 273 calories"
        );

        // 7.5 min = 0.125 h; 8 * 68.25 * 0.125 = 68.25
        let short = EstimationRequest::new("running", 7.5, 68.25, WeightUnit::Kilogram);
        assert_eq!(
            estimate_calories(catalog, &short).derivation_text,
            "8 MET × 68.3kg × 0.13h = 68 calories"
        );
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        let catalog = Catalog::new(vec![ActivityRecord {
            name: "test".into(),
            intensity_factor: 1.0,
            category: ActivityCategory::Fitness,
        }]);
        // 1.0 * 2.5 * 1h = 2.5 -> 3
        let request = EstimationRequest::new("test", 60.0, 2.5, WeightUnit::Kilogram);
        assert_eq!(estimate_calories(&catalog, &request).calories_burned, Some(3));
    }

    #[test]
    fn test_not_found_result() {
        let catalog = get_default_catalog();
        let request =
            EstimationRequest::new("underwater basket weaving", 30.0, 150.0, WeightUnit::Pound);
        let result = estimate_calories(catalog, &request);

        assert_eq!(result.calories_burned, None);
        assert_eq!(result.intensity_factor_used, None);
        assert_eq!(result.derivation_text, NOT_FOUND_MESSAGE);
        assert!(!result.is_resolved());
    }

    #[test]
    fn test_idempotent() {
        crate::logging::init_test();
        let catalog = build_default_catalog();
        let request = EstimationRequest::new("Evening Jogging", 42.0, 181.0, WeightUnit::Pound);

        let first = estimate_calories(&catalog, &request);
        let second = estimate_calories(&catalog, &request);
        assert_eq!(first, second);
    }
}
