//! The assembled assessment returned to callers.

use crate::diseases::{Disease, DiseaseRiskResult};
use crate::input::PatientInput;
use crate::level::RiskLevel;
use crate::metabolic::MetabolicSyndromeStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub calculation_version: String,
    /// The normalized record the scores were computed from.
    pub input_data: PatientInput,
    /// Highest of the five disease scores.
    #[serde(rename = "overallRiskScore")]
    pub overall_score: u32,
    #[serde(rename = "overallRiskLevel")]
    pub overall_level: RiskLevel,
    pub diabetes_risk: DiseaseRiskResult,
    pub hypertension_risk: DiseaseRiskResult,
    pub stroke_risk: DiseaseRiskResult,
    #[serde(rename = "maceRisk")]
    pub cardiovascular_risk: DiseaseRiskResult,
    pub heart_disease_risk: DiseaseRiskResult,
    pub metabolic_syndrome: MetabolicSyndromeStatus,
    pub general_recommendations: Vec<String>,
    pub lifestyle_modifications: Vec<String>,
    pub medical_follow_up: Vec<String>,
}

impl AssessmentResult {
    pub fn disease(&self, disease: Disease) -> &DiseaseRiskResult {
        match disease {
            Disease::Diabetes => &self.diabetes_risk,
            Disease::Hypertension => &self.hypertension_risk,
            Disease::Stroke => &self.stroke_risk,
            Disease::Cardiovascular => &self.cardiovascular_risk,
            Disease::HeartDisease => &self.heart_disease_risk,
        }
    }

    /// The five disease results in report order.
    pub fn disease_results(&self) -> impl Iterator<Item = &DiseaseRiskResult> {
        Disease::ALL.into_iter().map(|d| self.disease(d))
    }
}

/// Overall score is the maximum of the disease scores, never an average.
pub fn overall_score<'a>(results: impl IntoIterator<Item = &'a DiseaseRiskResult>) -> u32 {
    results.into_iter().map(|r| r.score).max().unwrap_or(0)
}
