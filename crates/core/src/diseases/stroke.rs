use super::{Diagnosis, DiseaseModel};
use crate::factors::{age, at_least, flag, measurement, Bracket, FactorRule, Points};
use crate::recommendations::{ConditionalAdvice, DiseaseAdvice};
use crate::ten_year::{Amplifier, TenYearModel};

static FACTORS: &[FactorRule] = &[
    FactorRule {
        name: "Hypertension",
        value: flag,
        brackets: &[Bracket {
            applies: |p| p.hypertension_present() || at_least(p.clinical.systolic_bp, 140.0),
            points: Points::Fixed(35),
            description: "Hypertension is the leading risk factor for stroke",
        }],
    },
    FactorRule {
        name: "Age",
        value: age,
        brackets: &[
            Bracket {
                applies: |p| p.age >= 55,
                points: Points::Fixed(15),
                description: "Age is a major risk factor for stroke",
            },
            Bracket {
                applies: |p| p.age >= 65,
                points: Points::Fixed(25),
                description: "Age is a major risk factor for stroke",
            },
            Bracket {
                applies: |p| p.age >= 75,
                points: Points::Fixed(35),
                description: "Age is a major risk factor for stroke",
            },
        ],
    },
    FactorRule {
        name: "Diabetes",
        value: flag,
        brackets: &[Bracket {
            applies: |p| p.diabetes_present(),
            points: Points::Fixed(20),
            description: "Diabetes raises stroke risk",
        }],
    },
    FactorRule {
        name: "Heart disease",
        value: flag,
        brackets: &[Bracket {
            applies: |p| p.clinical.has_heart_disease,
            points: Points::Fixed(20),
            description: "Heart disease raises the risk of ischaemic stroke",
        }],
    },
    FactorRule {
        name: "Smoking",
        value: flag,
        brackets: &[Bracket {
            applies: |p| p.clinical.is_smoker,
            points: Points::Fixed(15),
            description: "Smoking markedly raises stroke risk",
        }],
    },
    FactorRule {
        name: "High cholesterol",
        value: |p| measurement(p.clinical.total_cholesterol, "mg/dL"),
        brackets: &[Bracket {
            applies: |p| at_least(p.clinical.total_cholesterol, 240.0),
            points: Points::Fixed(10),
            description: "High cholesterol accelerates atherosclerosis",
        }],
    },
    FactorRule {
        name: "Family history of stroke",
        value: flag,
        brackets: &[Bracket {
            applies: |p| p.clinical.family_history_stroke,
            points: Points::Fixed(10),
            description: "A first-degree relative has had a stroke",
        }],
    },
];

pub(super) static MODEL: DiseaseModel = DiseaseModel {
    diagnosis: Some(Diagnosis {
        applies: |p| p.clinical.has_stroke,
        name: "Previous stroke",
        description: "Has had a stroke before",
        ten_year_risk: None,
        maintenance: &[
            "Keep blood pressure strictly controlled",
            "Take antiplatelet medication",
            "Control blood lipids",
            "Attend regular follow-up",
        ],
    }),
    factors: FACTORS,
    ten_year: Some(TenYearModel {
        base: 0.12,
        amplifiers: &[
            Amplifier {
                applies: |p| p.age >= 65,
                factor: 2.0,
            },
            Amplifier {
                applies: |p| p.hypertension_present(),
                factor: 1.5,
            },
        ],
    }),
    advice: DiseaseAdvice {
        base: &[
            "Bring blood pressure down to target",
            "Control blood glucose (if diabetic)",
            "Control blood lipids",
            "Learn the stroke warning signs (FAST: face, arms, speech, time)",
        ],
        conditional: &[ConditionalAdvice {
            applies: |p| p.clinical.is_smoker,
            text: "Stop smoking now",
        }],
        escalation: &[
            "Consider antiplatelet therapy such as aspirin (physician assessment required)",
            "Have regular carotid ultrasound checks",
        ],
    },
};

#[cfg(test)]
mod tests {
    use crate::diseases::score_stroke;
    use crate::input::{ClinicalData, PatientInput, Sex};
    use crate::level::RiskLevel;

    fn patient(age: u8, clinical: ClinicalData) -> PatientInput {
        PatientInput {
            age,
            sex: Sex::Female,
            clinical,
        }
    }

    #[test]
    fn measured_systolic_counts_as_hypertension() {
        let result = score_stroke(&patient(
            40,
            ClinicalData {
                systolic_bp: Some(150.0),
                ..ClinicalData::default()
            },
        ));
        assert_eq!(result.score, 35);
        assert_eq!(result.factors[0].name, "Hypertension");
        // The ten-year amplifier ignores a single high reading.
        assert_eq!(result.ten_year_risk, Some(4.2));
    }

    #[test]
    fn ten_year_risk_for_older_hypertensive_patient() {
        // 35 + 25 = 60; 60 * 0.12 * 2 * 1.5 = 21.6
        let result = score_stroke(&patient(
            70,
            ClinicalData {
                has_hypertension: true,
                ..ClinicalData::default()
            },
        ));
        assert_eq!(result.score, 60);
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(result.ten_year_risk, Some(21.6));
    }

    #[test]
    fn smoker_gets_cessation_advice_before_escalation() {
        let result = score_stroke(&patient(
            80,
            ClinicalData {
                is_smoker: true,
                ..ClinicalData::default()
            },
        ));
        assert_eq!(result.score, 50);
        assert_eq!(result.recommendations.len(), 7);
        assert_eq!(result.recommendations[4], "Stop smoking now");
        assert_eq!(
            result.recommendations[6],
            "Have regular carotid ultrasound checks"
        );
    }

    #[test]
    fn previous_stroke_overrides() {
        let result = score_stroke(&patient(
            20,
            ClinicalData {
                has_stroke: true,
                ..ClinicalData::default()
            },
        ));
        assert_eq!(result.score, 100);
        assert_eq!(result.factors[0].name, "Previous stroke");
        assert_eq!(result.recommendations.len(), 4);
        assert_eq!(result.ten_year_risk, None);
    }
}
