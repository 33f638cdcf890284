use super::DiseaseModel;
use crate::factors::{at_least, below, flag, measurement, Bracket, FactorRule, FactorValue, Points};
use crate::input::PatientInput;
use crate::recommendations::DiseaseAdvice;
use crate::ten_year::{Amplifier, TenYearModel};

/// Major risk factors counted for clustering: diabetes, hypertension, smoking, LDL >= 160.
/// Treatment counts as presence.
fn major_risk_factor_count(input: &PatientInput) -> u32 {
    [
        input.diabetes_present(),
        input.hypertension_present(),
        input.clinical.is_smoker,
        at_least(input.clinical.ldl_cholesterol, 160.0),
    ]
    .into_iter()
    .filter(|present| *present)
    .count() as u32
}

static FACTORS: &[FactorRule] = &[
    FactorRule {
        name: "Previous cardiovascular event",
        value: flag,
        brackets: &[Bracket {
            applies: |p| p.clinical.has_heart_disease || p.clinical.has_stroke,
            points: Points::Fixed(40),
            description: "Has had a cardiovascular event before",
        }],
    },
    FactorRule {
        name: "Age and sex",
        value: |p| FactorValue::Text(format!("{}-year-old {}", p.age, p.sex)),
        brackets: &[
            Bracket {
                applies: |p| p.age_at_least_for_sex(35, 45),
                points: Points::Fixed(10),
                description: "Age and sex affect cardiovascular risk",
            },
            Bracket {
                applies: |p| p.age_at_least_for_sex(45, 55),
                points: Points::Fixed(20),
                description: "Age and sex affect cardiovascular risk",
            },
        ],
    },
    FactorRule {
        name: "Multiple risk factors",
        value: |p| FactorValue::Number(f64::from(major_risk_factor_count(p))),
        brackets: &[Bracket {
            applies: |p| major_risk_factor_count(p) >= 2,
            points: Points::PerCount {
                each: 10,
                count: major_risk_factor_count,
            },
            description: "Several major risk factors cluster together",
        }],
    },
    FactorRule {
        name: "LDL cholesterol",
        value: |p| measurement(p.clinical.ldl_cholesterol, "mg/dL"),
        brackets: &[
            Bracket {
                applies: |p| at_least(p.clinical.ldl_cholesterol, 100.0),
                points: Points::Fixed(10),
                description: "Raised LDL cholesterol",
            },
            Bracket {
                applies: |p| at_least(p.clinical.ldl_cholesterol, 130.0),
                points: Points::Fixed(15),
                description: "Raised LDL cholesterol",
            },
            Bracket {
                applies: |p| at_least(p.clinical.ldl_cholesterol, 160.0),
                points: Points::Fixed(20),
                description: "Raised LDL cholesterol",
            },
        ],
    },
    FactorRule {
        name: "Low HDL cholesterol",
        value: |p| measurement(p.clinical.hdl_cholesterol, "mg/dL"),
        brackets: &[Bracket {
            applies: |p| below(p.clinical.hdl_cholesterol, 40.0),
            points: Points::Fixed(10),
            description: "Low HDL cholesterol raises risk",
        }],
    },
];

pub(super) static MODEL: DiseaseModel = DiseaseModel {
    diagnosis: None,
    factors: FACTORS,
    ten_year: Some(TenYearModel {
        base: 0.2,
        amplifiers: &[
            Amplifier {
                applies: |p| p.age >= 55,
                factor: 1.8,
            },
            Amplifier {
                applies: |p| p.clinical.is_smoker,
                factor: 1.4,
            },
        ],
    }),
    advice: DiseaseAdvice {
        base: &[
            "Control every cardiovascular risk factor",
            "Healthy diet: less saturated and trans fat",
            "Exercise regularly",
            "Maintain a healthy weight",
        ],
        conditional: &[],
        escalation: &[
            "See a cardiologist",
            "Statin therapy may be needed to lower LDL cholesterol",
            "Consider aspirin (physician assessment required)",
            "Have regular cardiac checks (ECG, echocardiography)",
        ],
    },
};

#[cfg(test)]
mod tests {
    use crate::diseases::score_cardiovascular;
    use crate::factors::FactorValue;
    use crate::input::{ClinicalData, PatientInput, Sex};

    fn patient(age: u8, sex: Sex, clinical: ClinicalData) -> PatientInput {
        PatientInput {
            age,
            sex,
            clinical,
        }
    }

    #[test]
    fn age_band_depends_on_sex() {
        let male = score_cardiovascular(&patient(50, Sex::Male, ClinicalData::default()));
        let female = score_cardiovascular(&patient(50, Sex::Female, ClinicalData::default()));
        assert_eq!(male.score, 20);
        assert_eq!(female.score, 10);
        assert_eq!(
            male.factors[0].value,
            FactorValue::Text("50-year-old male".into())
        );
    }

    #[test]
    fn clustering_needs_two_factors() {
        let one = score_cardiovascular(&patient(
            30,
            Sex::Female,
            ClinicalData {
                is_smoker: true,
                ..ClinicalData::default()
            },
        ));
        assert_eq!(one.score, 0);

        // smoker + diabetes + LDL 170: cluster 30, LDL 20
        let three = score_cardiovascular(&patient(
            30,
            Sex::Female,
            ClinicalData {
                is_smoker: true,
                has_diabetes: true,
                ldl_cholesterol: Some(170.0),
                ..ClinicalData::default()
            },
        ));
        assert_eq!(three.score, 50);
        assert_eq!(three.factors[0].name, "Multiple risk factors");
        assert_eq!(three.factors[0].value, FactorValue::Number(3.0));
        assert_eq!(three.factors[0].points, 30);
    }

    #[test]
    fn age_factor_weight_reflects_its_own_points() {
        let result = score_cardiovascular(&patient(
            60,
            Sex::Male,
            ClinicalData {
                has_stroke: true,
                ..ClinicalData::default()
            },
        ));
        assert_eq!(result.score, 60);
        assert_eq!(result.factors[1].weight, 0.2);
    }

    #[test]
    fn ten_year_risk_for_older_smoker() {
        // 20 (age) + 10 (HDL 35) = 30; 30 * 0.2 * 1.8 * 1.4 = 15.12
        let result = score_cardiovascular(&patient(
            60,
            Sex::Male,
            ClinicalData {
                is_smoker: true,
                hdl_cholesterol: Some(35.0),
                ..ClinicalData::default()
            },
        ));
        assert_eq!(result.score, 30);
        assert_eq!(result.ten_year_risk, Some(15.1));
        assert_eq!(result.recommendations.len(), 8);
    }
}
