//! Score-to-level mapping shared by every disease and the overall result.

use crate::constants::MAX_SCORE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal risk level. Ordering follows severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Quantizes a 0-100 score. Scores above 100 are treated as 100.
    ///
    /// - `< 25` → `Low`
    /// - `25..=49` → `Medium`
    /// - `50..=74` → `High`
    /// - `>= 75` → `VeryHigh`
    pub fn from_score(score: u32) -> Self {
        match score.min(MAX_SCORE) {
            0..=24 => Self::Low,
            25..=49 => Self::Medium,
            50..=74 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    /// High and very high levels call for closer clinical follow-up.
    pub fn is_elevated(self) -> bool {
        self >= Self::High
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low risk",
            Self::Medium => "Medium risk",
            Self::High => "High risk",
            Self::VeryHigh => "Very high risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::VeryHigh => "VERY_HIGH",
        };
        f.write_str(code)
    }
}
