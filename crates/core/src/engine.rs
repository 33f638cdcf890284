//! Assessment orchestration.
//!
//! Normalizer, then the metabolic evaluator and the five scorers over the same record, then the
//! aggregator and the recommendation generator.

use crate::assessment::{overall_score, AssessmentResult};
use crate::config::EngineConfig;
use crate::diseases::{
    score_cardiovascular, score_diabetes, score_heart_disease, score_hypertension, score_stroke,
};
use crate::error::ValidationResult;
use crate::input::{PatientInput, RawPatientInput};
use crate::level::RiskLevel;
use crate::metabolic::evaluate_metabolic_syndrome;
use crate::recommendations::{general_recommendations, lifestyle_modifications, medical_follow_up};
use crate::validation::normalize;

/// Stateless apart from its configuration; one engine can serve any number of callers.
#[derive(Clone, Debug, Default)]
pub struct RiskEngine {
    cfg: EngineConfig,
}

impl RiskEngine {
    pub fn new(cfg: EngineConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Validates `raw` and produces a full assessment.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ValidationError`] when age or sex is missing or age is out of range.
    /// No scorer runs in that case.
    pub fn assess(&self, raw: &RawPatientInput) -> ValidationResult<AssessmentResult> {
        let input = normalize(raw)?;
        Ok(self.assess_normalized(input))
    }

    /// Scores a record that has already been validated.
    pub fn assess_normalized(&self, input: PatientInput) -> AssessmentResult {
        let metabolic_syndrome = evaluate_metabolic_syndrome(&input);
        let diabetes_risk = score_diabetes(&input);
        let hypertension_risk = score_hypertension(&input);
        let stroke_risk = score_stroke(&input);
        let cardiovascular_risk = score_cardiovascular(&input);
        let heart_disease_risk = score_heart_disease(&input);

        let overall_score = overall_score([
            &diabetes_risk,
            &hypertension_risk,
            &stroke_risk,
            &cardiovascular_risk,
            &heart_disease_risk,
        ]);
        let overall_level = RiskLevel::from_score(overall_score);

        tracing::debug!(
            version = self.cfg.calculation_version(),
            overall_score,
            %overall_level,
            diabetes = diabetes_risk.score,
            hypertension = hypertension_risk.score,
            stroke = stroke_risk.score,
            mace = cardiovascular_risk.score,
            heart_disease = heart_disease_risk.score,
            metabolic_criteria = metabolic_syndrome.criteria_met,
            "assessment scored"
        );

        AssessmentResult {
            calculation_version: self.cfg.calculation_version().to_string(),
            general_recommendations: general_recommendations(overall_level),
            lifestyle_modifications: lifestyle_modifications(&input),
            medical_follow_up: medical_follow_up(overall_level),
            input_data: input,
            overall_score,
            overall_level,
            diabetes_risk,
            hypertension_risk,
            stroke_risk,
            cardiovascular_risk,
            heart_disease_risk,
            metabolic_syndrome,
        }
    }
}

/// Assesses `raw` with the default configuration.
pub fn assess(raw: &RawPatientInput) -> ValidationResult<AssessmentResult> {
    RiskEngine::default().assess(raw)
}
