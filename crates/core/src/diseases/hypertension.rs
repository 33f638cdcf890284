use super::{Diagnosis, DiseaseModel};
use crate::constants::WEEKLY_ALCOHOL_LIMIT_UNITS;
use crate::factors::{
    age, at_least, blood_pressure, bmi, flag, Bracket, FactorRule, FactorValue, Points,
};
use crate::input::PatientInput;
use crate::recommendations::DiseaseAdvice;

/// Either reading alone can place the patient in a bracket.
fn bp_at_least(input: &PatientInput, systolic: f64, diastolic: f64) -> bool {
    at_least(input.clinical.systolic_bp, systolic)
        || at_least(input.clinical.diastolic_bp, diastolic)
}

static FACTORS: &[FactorRule] = &[
    FactorRule {
        name: "Blood pressure",
        value: blood_pressure,
        brackets: &[
            Bracket {
                applies: |p| bp_at_least(p, 120.0, 80.0),
                points: Points::Fixed(20),
                description: "High-normal blood pressure",
            },
            Bracket {
                applies: |p| bp_at_least(p, 130.0, 85.0),
                points: Points::Fixed(30),
                description: "Elevated blood pressure",
            },
            Bracket {
                applies: |p| bp_at_least(p, 140.0, 90.0),
                points: Points::Fixed(40),
                description: "In the hypertensive range",
            },
        ],
    },
    FactorRule {
        name: "Age",
        value: age,
        brackets: &[
            Bracket {
                applies: |p| p.age >= 40,
                points: Points::Fixed(15),
                description: "Hypertension risk rises with age",
            },
            Bracket {
                applies: |p| p.age >= 55,
                points: Points::Fixed(25),
                description: "Hypertension risk rises with age",
            },
            Bracket {
                applies: |p| p.age >= 65,
                points: Points::Fixed(35),
                description: "Hypertension risk rises with age",
            },
        ],
    },
    FactorRule {
        name: "BMI",
        value: bmi,
        brackets: &[
            Bracket {
                applies: |p| at_least(p.clinical.bmi, 24.0),
                points: Points::Fixed(15),
                description: "Overweight raises hypertension risk",
            },
            Bracket {
                applies: |p| at_least(p.clinical.bmi, 28.0),
                points: Points::Fixed(20),
                description: "Obesity raises hypertension risk",
            },
        ],
    },
    FactorRule {
        name: "Family history of cardiovascular disease",
        value: flag,
        brackets: &[Bracket {
            applies: |p| p.clinical.family_history_heart_disease,
            points: Points::Fixed(15),
            description: "Family history raises hypertension risk",
        }],
    },
    FactorRule {
        name: "Smoking",
        value: flag,
        brackets: &[Bracket {
            applies: |p| p.clinical.is_smoker,
            points: Points::Fixed(10),
            description: "Smoking markedly raises cardiovascular risk",
        }],
    },
    FactorRule {
        name: "Excess alcohol",
        value: |p| {
            FactorValue::Text(format!(
                "{} drinks/week",
                p.clinical.alcohol_units_per_week.unwrap_or_default()
            ))
        },
        brackets: &[Bracket {
            applies: |p| {
                p.clinical
                    .alcohol_units_per_week
                    .is_some_and(|u| u > WEEKLY_ALCOHOL_LIMIT_UNITS)
            },
            points: Points::Fixed(10),
            description: "Heavy drinking raises hypertension risk",
        }],
    },
];

pub(super) static MODEL: DiseaseModel = DiseaseModel {
    diagnosis: Some(Diagnosis {
        applies: |p| p.clinical.has_hypertension,
        name: "Diagnosed hypertension",
        description: "Existing hypertension diagnosis",
        ten_year_risk: None,
        maintenance: &[
            "Take medication as prescribed",
            "Monitor blood pressure regularly",
            "Limit sodium intake",
            "Maintain a healthy weight",
        ],
    }),
    factors: FACTORS,
    ten_year: None,
    advice: DiseaseAdvice {
        base: &[
            "Limit sodium (less than 6 g of salt a day)",
            "Follow the DASH diet (vegetables, fruit, low-fat dairy)",
            "Monitor blood pressure regularly",
            "Exercise regularly",
            "Maintain a healthy weight",
        ],
        conditional: &[],
        escalation: &["Antihypertensive medication may be needed; consult a physician"],
    },
};

#[cfg(test)]
mod tests {
    use crate::diseases::score_hypertension;
    use crate::factors::FactorValue;
    use crate::input::{ClinicalData, PatientInput, Sex};

    fn patient(age: u8, clinical: ClinicalData) -> PatientInput {
        PatientInput {
            age,
            sex: Sex::Male,
            clinical,
        }
    }

    fn with_bp(sbp: f64, dbp: f64) -> ClinicalData {
        ClinicalData {
            systolic_bp: Some(sbp),
            diastolic_bp: Some(dbp),
            ..ClinicalData::default()
        }
    }

    #[test]
    fn only_highest_bp_bracket_counts() {
        let result = score_hypertension(&patient(30, with_bp(145.0, 70.0)));
        assert_eq!(result.score, 40);
        assert_eq!(
            result.factors[0].value,
            FactorValue::Text("145/70 mmHg".into())
        );
        assert_eq!(result.factors[0].description, "In the hypertensive range");

        let diastolic_only = score_hypertension(&patient(30, with_bp(118.0, 86.0)));
        assert_eq!(diastolic_only.score, 30);
    }

    #[test]
    fn single_reading_is_graded() {
        let systolic_only = score_hypertension(&patient(
            30,
            ClinicalData {
                systolic_bp: Some(185.0),
                ..ClinicalData::default()
            },
        ));
        assert_eq!(systolic_only.score, 40);
        assert_eq!(systolic_only.factors[0].name, "Blood pressure");

        let diastolic_only = score_hypertension(&patient(
            30,
            ClinicalData {
                diastolic_bp: Some(82.0),
                ..ClinicalData::default()
            },
        ));
        assert_eq!(diastolic_only.score, 20);

        let normal_systolic_only = score_hypertension(&patient(
            30,
            ClinicalData {
                systolic_bp: Some(112.0),
                ..ClinicalData::default()
            },
        ));
        assert_eq!(normal_systolic_only.score, 0);
        assert!(normal_systolic_only.factors.is_empty());
    }

    #[test]
    fn lifestyle_factors_add_up() {
        let mut clinical = with_bp(125.0, 78.0);
        clinical.bmi = Some(29.0);
        clinical.is_smoker = true;
        clinical.alcohol_units_per_week = Some(21.0);
        clinical.family_history_heart_disease = true;

        // 20 + 15 (age) + 20 + 15 + 10 + 10
        let result = score_hypertension(&patient(45, clinical));
        assert_eq!(result.score, 90);
        assert_eq!(result.factors.len(), 6);
        assert_eq!(result.ten_year_risk, None);
        assert_eq!(
            result.recommendations.last().map(String::as_str),
            Some("Antihypertensive medication may be needed; consult a physician")
        );
    }

    #[test]
    fn alcohol_at_limit_does_not_score() {
        let result = score_hypertension(&patient(
            30,
            ClinicalData {
                alcohol_units_per_week: Some(14.0),
                ..ClinicalData::default()
            },
        ));
        assert_eq!(result.score, 0);
    }
}
