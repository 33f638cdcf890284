//! Metabolic syndrome classification.
//!
//! Five boolean criteria, positive when at least three are met. A criterion that cannot be
//! evaluated because its inputs are missing counts as not met and is reported in
//! [`MetabolicSyndromeStatus::missing_values`].

use crate::input::PatientInput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of met criteria that makes the verdict positive.
pub const METABOLIC_SYNDROME_THRESHOLD: u8 = 3;

/// One criterion. Serialized as its human label, so `missingValues` reads as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetabolicCriterion {
    #[serde(rename = "waist circumference", alias = "waist")]
    Waist,
    #[serde(rename = "blood pressure", alias = "bloodPressure")]
    BloodPressure,
    #[serde(rename = "fasting glucose", alias = "glucose")]
    Glucose,
    #[serde(rename = "triglycerides")]
    Triglycerides,
    #[serde(rename = "HDL cholesterol", alias = "hdl")]
    Hdl,
}

impl MetabolicCriterion {
    pub const ALL: [Self; 5] = [
        Self::Waist,
        Self::BloodPressure,
        Self::Glucose,
        Self::Triglycerides,
        Self::Hdl,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Waist => "waist circumference",
            Self::BloodPressure => "blood pressure",
            Self::Glucose => "fasting glucose",
            Self::Triglycerides => "triglycerides",
            Self::Hdl => "HDL cholesterol",
        }
    }
}

impl fmt::Display for MetabolicCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which criteria are met. Unknown criteria are `false` here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetabolicDetails {
    pub waist: bool,
    pub blood_pressure: bool,
    pub glucose: bool,
    pub triglycerides: bool,
    pub hdl: bool,
}

impl MetabolicDetails {
    pub fn is_met(&self, criterion: MetabolicCriterion) -> bool {
        match criterion {
            MetabolicCriterion::Waist => self.waist,
            MetabolicCriterion::BloodPressure => self.blood_pressure,
            MetabolicCriterion::Glucose => self.glucose,
            MetabolicCriterion::Triglycerides => self.triglycerides,
            MetabolicCriterion::Hdl => self.hdl,
        }
    }

    fn set(&mut self, criterion: MetabolicCriterion, met: bool) {
        let slot = match criterion {
            MetabolicCriterion::Waist => &mut self.waist,
            MetabolicCriterion::BloodPressure => &mut self.blood_pressure,
            MetabolicCriterion::Glucose => &mut self.glucose,
            MetabolicCriterion::Triglycerides => &mut self.triglycerides,
            MetabolicCriterion::Hdl => &mut self.hdl,
        };
        *slot = met;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetabolicSyndromeStatus {
    pub is_metabolic_syndrome: bool,
    /// 0-5
    pub criteria_met: u8,
    pub details: MetabolicDetails,
    /// Criteria that could not be evaluated, in criterion order.
    pub missing_values: Vec<MetabolicCriterion>,
}

impl MetabolicSyndromeStatus {
    /// Human labels of the criteria that could not be evaluated.
    pub fn missing_labels(&self) -> Vec<&'static str> {
        self.missing_values.iter().map(|c| c.label()).collect()
    }
}

/// `Some(met)` when the criterion can be evaluated, `None` when its inputs are missing.
fn criterion_met(criterion: MetabolicCriterion, input: &PatientInput) -> Option<bool> {
    let c = &input.clinical;
    match criterion {
        MetabolicCriterion::Waist => {
            let limit = if input.is_male() { 90.0 } else { 80.0 };
            c.waist.map(|w| w >= limit)
        }
        MetabolicCriterion::BloodPressure => {
            if c.on_hypertension_meds {
                return Some(true);
            }
            if c.systolic_bp.is_none() && c.diastolic_bp.is_none() {
                return None;
            }
            Some(
                c.systolic_bp.is_some_and(|s| s >= 130.0)
                    || c.diastolic_bp.is_some_and(|d| d >= 85.0),
            )
        }
        MetabolicCriterion::Glucose => {
            if c.on_diabetes_meds {
                return Some(true);
            }
            c.fasting_glucose.map(|g| g >= 100.0)
        }
        MetabolicCriterion::Triglycerides => {
            if c.on_lipid_lowering_meds {
                return Some(true);
            }
            c.triglycerides.map(|tg| tg >= 150.0)
        }
        MetabolicCriterion::Hdl => {
            let limit = if input.is_male() { 40.0 } else { 50.0 };
            c.hdl_cholesterol.map(|hdl| hdl < limit)
        }
    }
}

pub fn evaluate_metabolic_syndrome(input: &PatientInput) -> MetabolicSyndromeStatus {
    let mut details = MetabolicDetails::default();
    let mut missing_values = Vec::new();

    for criterion in MetabolicCriterion::ALL {
        match criterion_met(criterion, input) {
            Some(met) => details.set(criterion, met),
            None => missing_values.push(criterion),
        }
    }

    let criteria_met = MetabolicCriterion::ALL
        .iter()
        .filter(|c| details.is_met(**c))
        .count() as u8;

    MetabolicSyndromeStatus {
        is_metabolic_syndrome: criteria_met >= METABOLIC_SYNDROME_THRESHOLD,
        criteria_met,
        details,
        missing_values,
    }
}
