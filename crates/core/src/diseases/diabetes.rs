use super::{Diagnosis, DiseaseModel};
use crate::constants::{MAX_TEN_YEAR_RISK, WEEKLY_EXERCISE_TARGET_MINUTES};
use crate::factors::{
    age, at_least, bmi, flag, measurement, Bracket, FactorRule, FactorValue, Points,
};
use crate::recommendations::DiseaseAdvice;
use crate::ten_year::{Amplifier, TenYearModel};

static FACTORS: &[FactorRule] = &[
    FactorRule {
        name: "Age",
        value: age,
        brackets: &[
            Bracket {
                applies: |p| p.age >= 45,
                points: Points::Fixed(10),
                description: "Age 45-54 is a moderate-risk age band",
            },
            Bracket {
                applies: |p| p.age >= 55,
                points: Points::Fixed(20),
                description: "Age 55-64 is a moderately high-risk age band",
            },
            Bracket {
                applies: |p| p.age >= 65,
                points: Points::Fixed(30),
                description: "Age 65 and over is a high-risk age band",
            },
        ],
    },
    FactorRule {
        name: "BMI",
        value: bmi,
        brackets: &[
            Bracket {
                applies: |p| at_least(p.clinical.bmi, 24.0),
                points: Points::Fixed(10),
                description: "Overweight",
            },
            Bracket {
                applies: |p| at_least(p.clinical.bmi, 28.0),
                points: Points::Fixed(20),
                description: "Obese",
            },
            Bracket {
                applies: |p| at_least(p.clinical.bmi, 32.0),
                points: Points::Fixed(25),
                description: "Severely obese",
            },
        ],
    },
    FactorRule {
        name: "Fasting glucose",
        value: |p| measurement(p.clinical.fasting_glucose, "mg/dL"),
        brackets: &[
            Bracket {
                applies: |p| at_least(p.clinical.fasting_glucose, 100.0),
                points: Points::Fixed(20),
                description: "Prediabetic range",
            },
            Bracket {
                applies: |p| at_least(p.clinical.fasting_glucose, 126.0),
                points: Points::Fixed(30),
                description: "Meets the diagnostic threshold for diabetes",
            },
        ],
    },
    FactorRule {
        name: "HbA1c",
        value: |p| measurement(p.clinical.hba1c, "%"),
        brackets: &[
            Bracket {
                applies: |p| at_least(p.clinical.hba1c, 5.7),
                points: Points::Fixed(20),
                description: "Prediabetic range",
            },
            Bracket {
                applies: |p| at_least(p.clinical.hba1c, 6.5),
                points: Points::Fixed(30),
                description: "Meets the diagnostic threshold for diabetes",
            },
        ],
    },
    FactorRule {
        name: "Family history of diabetes",
        value: flag,
        brackets: &[Bracket {
            applies: |p| p.clinical.family_history_diabetes,
            points: Points::Fixed(15),
            description: "A first-degree relative has diabetes",
        }],
    },
    FactorRule {
        name: "History of hypertension",
        value: flag,
        brackets: &[Bracket {
            applies: |p| p.hypertension_present(),
            points: Points::Fixed(10),
            description: "Hypertension raises diabetes risk",
        }],
    },
    FactorRule {
        name: "Physical inactivity",
        value: |p| {
            FactorValue::Text(format!(
                "{} min/week",
                p.clinical.exercise_minutes_per_week.unwrap_or_default()
            ))
        },
        brackets: &[Bracket {
            applies: |p| {
                p.clinical
                    .exercise_minutes_per_week
                    .is_some_and(|m| m < WEEKLY_EXERCISE_TARGET_MINUTES)
            },
            points: Points::Fixed(10),
            description: "Too little exercise raises diabetes risk",
        }],
    },
];

pub(super) static MODEL: DiseaseModel = DiseaseModel {
    diagnosis: Some(Diagnosis {
        applies: |p| p.clinical.has_diabetes,
        name: "Diagnosed diabetes",
        description: "Existing diabetes diagnosis",
        ten_year_risk: Some(MAX_TEN_YEAR_RISK),
        maintenance: &[
            "Keep taking medication as prescribed",
            "Monitor blood glucose regularly",
            "Control your diet",
            "Exercise regularly",
        ],
    }),
    factors: FACTORS,
    ten_year: Some(TenYearModel {
        base: 0.15,
        amplifiers: &[
            Amplifier {
                applies: |p| p.age >= 45,
                factor: 1.5,
            },
            Amplifier {
                applies: |p| p.clinical.family_history_diabetes,
                factor: 1.3,
            },
        ],
    }),
    advice: DiseaseAdvice {
        base: &[
            "Limit carbohydrates and choose low glycaemic index foods",
            "Monitor blood glucose regularly",
            "Maintain a healthy weight",
            "Increase physical activity",
        ],
        conditional: &[],
        escalation: &[
            "See an endocrinologist promptly",
            "Arrange an oral glucose tolerance test (OGTT)",
        ],
    },
};
