//! Constants used throughout the risk engine.
//!
//! Thresholds that belong to a single disease table live next to that table; the values here
//! are shared by more than one component.

/// Version of the scoring rules implemented by this crate.
pub const CALCULATION_VERSION: &str = "v4.0.0";

/// Lowest accepted patient age in years.
pub const MIN_AGE: i64 = 0;

/// Highest accepted patient age in years.
pub const MAX_AGE: i64 = 120;

/// Upper bound of every risk score.
pub const MAX_SCORE: u32 = 100;

/// Upper bound of a ten-year risk percentage.
pub const MAX_TEN_YEAR_RISK: f64 = 100.0;

/// BMI from which a patient counts as overweight.
pub const OVERWEIGHT_BMI: f64 = 24.0;

/// Recommended weekly minutes of moderate exercise.
pub const WEEKLY_EXERCISE_TARGET_MINUTES: u32 = 150;

/// Weekly alcohol units above which intake counts as excessive.
pub const WEEKLY_ALCOHOL_LIMIT_UNITS: f64 = 14.0;
