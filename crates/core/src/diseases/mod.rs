//! The five disease scorers.
//!
//! Every disease is described by a static [`DiseaseModel`]: an optional diagnosis override, an
//! ordered factor table, an optional ten-year model and its advice. [`score_disease`] is the
//! single interpreter for all of them.

mod cardiovascular;
mod diabetes;
mod heart_disease;
mod hypertension;
mod stroke;

use crate::constants::MAX_SCORE;
use crate::factors::{evaluate, FactorRule, FactorValue, Predicate, RiskFactor};
use crate::input::PatientInput;
use crate::level::RiskLevel;
use crate::recommendations::DiseaseAdvice;
use crate::ten_year::TenYearModel;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Disease {
    Diabetes,
    Hypertension,
    Stroke,
    /// Major adverse cardiovascular events.
    #[serde(rename = "MACE")]
    Cardiovascular,
    HeartDisease,
}

impl Disease {
    /// Report order.
    pub const ALL: [Self; 5] = [
        Self::Diabetes,
        Self::Hypertension,
        Self::Stroke,
        Self::Cardiovascular,
        Self::HeartDisease,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::Hypertension => "Hypertension",
            Self::Stroke => "Stroke",
            Self::Cardiovascular => "Major adverse cardiovascular events (MACE)",
            Self::HeartDisease => "Heart disease",
        }
    }

    pub(crate) fn model(self) -> &'static DiseaseModel {
        match self {
            Self::Diabetes => &diabetes::MODEL,
            Self::Hypertension => &hypertension::MODEL,
            Self::Stroke => &stroke::MODEL,
            Self::Cardiovascular => &cardiovascular::MODEL,
            Self::HeartDisease => &heart_disease::MODEL,
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An existing diagnosis that short-circuits scoring.
pub(crate) struct Diagnosis {
    pub applies: Predicate,
    pub name: &'static str,
    pub description: &'static str,
    /// Ten-year risk reported for a diagnosed patient. `None` leaves it unset.
    pub ten_year_risk: Option<f64>,
    /// Recommendations for a patient already living with the disease.
    pub maintenance: &'static [&'static str],
}

pub(crate) struct DiseaseModel {
    pub diagnosis: Option<Diagnosis>,
    pub factors: &'static [FactorRule],
    pub ten_year: Option<TenYearModel>,
    pub advice: DiseaseAdvice,
}

/// Score, level and explanation for one disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseRiskResult {
    #[serde(rename = "diseaseType")]
    pub disease: Disease,
    /// 0-100
    #[serde(rename = "riskScore")]
    pub score: u32,
    #[serde(rename = "riskLevel")]
    pub level: RiskLevel,
    /// Percent, one decimal. Absent for diseases without a ten-year model.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ten_year_risk: Option<f64>,
    pub factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
}

/// Scores one disease against a validated record.
pub fn score_disease(disease: Disease, input: &PatientInput) -> DiseaseRiskResult {
    let model = disease.model();

    if let Some(diagnosis) = model.diagnosis.as_ref().filter(|d| (d.applies)(input)) {
        return DiseaseRiskResult {
            disease,
            score: MAX_SCORE,
            level: RiskLevel::VeryHigh,
            ten_year_risk: diagnosis.ten_year_risk,
            factors: vec![RiskFactor::new(
                diagnosis.name,
                FactorValue::Flag(true),
                MAX_SCORE,
                diagnosis.description,
            )],
            recommendations: diagnosis
                .maintenance
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };
    }

    let (score, factors) = evaluate(model.factors, input);
    let level = RiskLevel::from_score(score);

    DiseaseRiskResult {
        disease,
        score,
        level,
        ten_year_risk: model.ten_year.as_ref().map(|m| m.estimate(input, score)),
        factors,
        recommendations: model.advice.for_level(input, level),
    }
}

pub fn score_diabetes(input: &PatientInput) -> DiseaseRiskResult {
    score_disease(Disease::Diabetes, input)
}

pub fn score_hypertension(input: &PatientInput) -> DiseaseRiskResult {
    score_disease(Disease::Hypertension, input)
}

pub fn score_stroke(input: &PatientInput) -> DiseaseRiskResult {
    score_disease(Disease::Stroke, input)
}

pub fn score_cardiovascular(input: &PatientInput) -> DiseaseRiskResult {
    score_disease(Disease::Cardiovascular, input)
}

pub fn score_heart_disease(input: &PatientInput) -> DiseaseRiskResult {
    score_disease(Disease::HeartDisease, input)
}
