//! Patient input records.
//!
//! Two records exist on purpose: [`RawPatientInput`] is what a form or a request body
//! delivers, with age and sex possibly missing; [`PatientInput`] is the validated record every
//! scorer consumes. The only way from one to the other is [`crate::normalize`].
//!
//! All clinical measurements are optional. `None` means "not measured" and a factor that needs
//! a missing value simply does not contribute.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex, used by sex-specific thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[serde(alias = "MALE", alias = "Male")]
    Male,
    #[serde(alias = "FEMALE", alias = "Female")]
    Female,
}

impl Sex {
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(format!("unknown sex '{other}', expected male or female")),
        }
    }
}

/// Everything about a patient except age and sex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalData {
    /// Height in centimetres.
    pub height: Option<f64>,
    /// Weight in kilograms.
    pub weight: Option<f64>,
    /// Waist circumference in centimetres.
    pub waist: Option<f64>,
    /// Body-mass index. Derived from height and weight during normalization when absent.
    pub bmi: Option<f64>,

    #[serde(rename = "systolicBP")]
    pub systolic_bp: Option<f64>,
    #[serde(rename = "diastolicBP")]
    pub diastolic_bp: Option<f64>,
    /// Resting heart rate in bpm. Recorded, not scored.
    pub heart_rate: Option<f64>,

    /// mg/dL
    pub fasting_glucose: Option<f64>,
    /// Percent.
    pub hba1c: Option<f64>,
    /// mg/dL
    pub total_cholesterol: Option<f64>,
    /// mg/dL
    pub ldl_cholesterol: Option<f64>,
    /// mg/dL
    pub hdl_cholesterol: Option<f64>,
    /// mg/dL
    pub triglycerides: Option<f64>,
    /// Serum creatinine in mg/dL. Recorded, not scored.
    pub creatinine: Option<f64>,

    #[serde(default)]
    pub has_diabetes: bool,
    #[serde(default)]
    pub has_hypertension: bool,
    #[serde(default)]
    pub has_heart_disease: bool,
    #[serde(default)]
    pub has_stroke: bool,

    /// First-degree relatives.
    #[serde(default)]
    pub family_history_diabetes: bool,
    #[serde(default)]
    pub family_history_heart_disease: bool,
    #[serde(default)]
    pub family_history_stroke: bool,

    #[serde(default)]
    pub is_smoker: bool,
    #[serde(rename = "smokeYears")]
    pub smoking_years: Option<u32>,
    pub smokes_per_day: Option<u32>,
    /// Standard drinks per week.
    #[serde(rename = "alcoholConsumption")]
    pub alcohol_units_per_week: Option<f64>,
    pub exercise_minutes_per_week: Option<u32>,

    #[serde(default)]
    pub on_hypertension_meds: bool,
    #[serde(default)]
    pub on_diabetes_meds: bool,
    /// Any lipid-lowering therapy, statins included.
    #[serde(default, rename = "onStatins", alias = "onLipidMeds")]
    pub on_lipid_lowering_meds: bool,
}

/// Patient record as submitted, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPatientInput {
    pub age: Option<i64>,
    #[serde(alias = "gender")]
    pub sex: Option<Sex>,
    #[serde(flatten)]
    pub clinical: ClinicalData,
}

impl RawPatientInput {
    /// Start a raw record with the two required fields set.
    pub fn new(age: i64, sex: Sex) -> Self {
        Self {
            age: Some(age),
            sex: Some(sex),
            clinical: ClinicalData::default(),
        }
    }
}

/// Validated patient record: age is within 0-120 and sex is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInput {
    pub age: u8,
    #[serde(alias = "gender")]
    pub sex: Sex,
    #[serde(flatten)]
    pub clinical: ClinicalData,
}

impl PatientInput {
    pub fn is_male(&self) -> bool {
        self.sex == Sex::Male
    }

    /// Diagnosed hypertension, or antihypertensive treatment without a recorded diagnosis.
    pub fn hypertension_present(&self) -> bool {
        self.clinical.has_hypertension || self.clinical.on_hypertension_meds
    }

    /// Diagnosed diabetes, or antidiabetic treatment without a recorded diagnosis.
    pub fn diabetes_present(&self) -> bool {
        self.clinical.has_diabetes || self.clinical.on_diabetes_meds
    }

    /// True when the patient has reached the age threshold for their sex.
    pub fn age_at_least_for_sex(&self, male: u8, female: u8) -> bool {
        match self.sex {
            Sex::Male => self.age >= male,
            Sex::Female => self.age >= female,
        }
    }
}

impl From<PatientInput> for RawPatientInput {
    fn from(input: PatientInput) -> Self {
        Self {
            age: Some(i64::from(input.age)),
            sex: Some(input.sex),
            clinical: input.clinical,
        }
    }
}
