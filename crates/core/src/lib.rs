//! # MetaRisk Core
//!
//! Deterministic chronic-disease risk scoring engine.
//!
//! This crate contains pure scoring logic only:
//! - Input validation and BMI derivation
//! - Metabolic syndrome classification
//! - Five declarative disease factor tables (diabetes, hypertension, stroke, MACE, heart disease)
//! - Score-to-level mapping, ten-year estimates and the overall aggregate
//! - Recommendation text and the Markdown health guide
//!
//! **No I/O**: persistence lives in `metarisk-store`; HTTP and CLI surfaces live in `api-rest`
//! and `metarisk-cli`.

pub mod assessment;
pub mod config;
pub mod constants;
pub mod diseases;
pub mod engine;
pub mod error;
pub mod factors;
pub mod input;
pub mod level;
pub mod metabolic;
pub mod recommendations;
pub mod report;
pub mod ten_year;
pub mod validation;

pub use assessment::{overall_score, AssessmentResult};
pub use config::{engine_config_from_env_value, EngineConfig};
pub use constants::CALCULATION_VERSION;
pub use diseases::{
    score_cardiovascular, score_diabetes, score_disease, score_heart_disease, score_hypertension,
    score_stroke, Disease, DiseaseRiskResult,
};
pub use engine::{assess, RiskEngine};
pub use error::{ConfigError, ValidationError, ValidationResult};
pub use factors::{FactorValue, RiskFactor};
pub use input::{ClinicalData, PatientInput, RawPatientInput, Sex};
pub use level::RiskLevel;
pub use metabolic::{
    evaluate_metabolic_syndrome, MetabolicCriterion, MetabolicDetails, MetabolicSyndromeStatus,
};
pub use recommendations::{general_recommendations, lifestyle_modifications, medical_follow_up};
pub use report::{render_health_guide, HEALTH_GUIDE_TITLE};
pub use validation::{derive_bmi, normalize};
