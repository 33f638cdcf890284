//! Ten-year risk estimate.
//!
//! A secondary, uncalibrated percentage derived from the disease score: `score × base`,
//! multiplied by every amplifier whose condition holds, clamped to 100 and rounded to one
//! decimal.

use crate::constants::MAX_TEN_YEAR_RISK;
use crate::factors::Predicate;
use crate::input::PatientInput;

pub(crate) struct Amplifier {
    pub applies: Predicate,
    pub factor: f64,
}

pub(crate) struct TenYearModel {
    pub base: f64,
    pub amplifiers: &'static [Amplifier],
}

impl TenYearModel {
    pub fn estimate(&self, input: &PatientInput, score: u32) -> f64 {
        let risk = self
            .amplifiers
            .iter()
            .filter(|a| (a.applies)(input))
            .fold(f64::from(score) * self.base, |risk, a| risk * a.factor);

        round_one_decimal(risk.min(MAX_TEN_YEAR_RISK))
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
