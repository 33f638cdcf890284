use super::{Diagnosis, DiseaseModel};
use crate::factors::{age, at_least, flag, measurement, Bracket, FactorRule, FactorValue, Points};
use crate::recommendations::DiseaseAdvice;
use crate::ten_year::{Amplifier, TenYearModel};

static FACTORS: &[FactorRule] = &[
    FactorRule {
        name: "Age",
        value: age,
        brackets: &[
            Bracket {
                applies: |p| p.age_at_least_for_sex(35, 45),
                points: Points::Fixed(15),
                description: "Age is a major risk factor for heart disease",
            },
            Bracket {
                applies: |p| p.age_at_least_for_sex(45, 55),
                points: Points::Fixed(25),
                description: "Age is a major risk factor for heart disease",
            },
        ],
    },
    FactorRule {
        name: "Family history of heart disease",
        value: flag,
        brackets: &[Bracket {
            applies: |p| p.clinical.family_history_heart_disease,
            points: Points::Fixed(20),
            description: "A first-degree relative had early heart disease",
        }],
    },
    FactorRule {
        name: "Hypertension",
        value: flag,
        brackets: &[Bracket {
            applies: |p| p.hypertension_present(),
            points: Points::Fixed(15),
            description: "Hypertension puts extra load on the heart",
        }],
    },
    FactorRule {
        name: "Diabetes",
        value: flag,
        brackets: &[Bracket {
            applies: |p| p.diabetes_present(),
            points: Points::Fixed(20),
            description: "Diabetes raises coronary heart disease risk",
        }],
    },
    FactorRule {
        name: "Smoking",
        value: |p| match p.clinical.smoking_years {
            Some(years) => FactorValue::Text(format!("{years} years")),
            None => FactorValue::Flag(true),
        },
        brackets: &[
            Bracket {
                applies: |p| p.clinical.is_smoker,
                points: Points::Fixed(15),
                description: "Smoking seriously damages cardiovascular health",
            },
            Bracket {
                applies: |p| {
                    p.clinical.is_smoker && p.clinical.smoking_years.is_some_and(|y| y > 10)
                },
                points: Points::Fixed(20),
                description: "Smoking seriously damages cardiovascular health",
            },
        ],
    },
    FactorRule {
        name: "High cholesterol",
        value: |p| measurement(p.clinical.total_cholesterol, "mg/dL"),
        brackets: &[Bracket {
            applies: |p| at_least(p.clinical.total_cholesterol, 240.0),
            points: Points::Fixed(15),
            description: "High cholesterol drives atherosclerosis",
        }],
    },
    FactorRule {
        name: "High triglycerides",
        value: |p| measurement(p.clinical.triglycerides, "mg/dL"),
        brackets: &[Bracket {
            applies: |p| at_least(p.clinical.triglycerides, 200.0),
            points: Points::Fixed(10),
            description: "Raised triglycerides",
        }],
    },
];

pub(super) static MODEL: DiseaseModel = DiseaseModel {
    diagnosis: Some(Diagnosis {
        applies: |p| p.clinical.has_heart_disease,
        name: "Diagnosed heart disease",
        description: "Existing heart disease diagnosis",
        ten_year_risk: None,
        maintenance: &[
            "Take medication regularly",
            "Attend cardiac rehabilitation",
            "Control risk factors",
            "Have regular cardiac check-ups",
        ],
    }),
    factors: FACTORS,
    ten_year: Some(TenYearModel {
        base: 0.18,
        amplifiers: &[Amplifier {
            applies: |p| p.age_at_least_for_sex(45, 55),
            factor: 1.6,
        }],
    }),
    advice: DiseaseAdvice {
        base: &[
            "Follow a heart-healthy diet",
            "Do regular aerobic exercise",
            "Control blood pressure and lipids",
            "Learn to recognise the symptoms of a heart attack",
            "Make an emergency plan",
        ],
        conditional: &[],
        escalation: &[
            "See a cardiologist",
            "A stress test or coronary angiography may be needed",
            "Consider medication (statins, beta blockers)",
        ],
    },
};
