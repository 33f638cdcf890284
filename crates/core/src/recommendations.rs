//! Recommendation text.
//!
//! Per-disease advice is attached to each disease table as a [`DiseaseAdvice`]. The three
//! assessment-wide lists (general, lifestyle, medical follow-up) are produced here from the
//! normalized input and the overall level.

use crate::constants::{OVERWEIGHT_BMI, WEEKLY_ALCOHOL_LIMIT_UNITS, WEEKLY_EXERCISE_TARGET_MINUTES};
use crate::factors::{at_least, Predicate};
use crate::input::PatientInput;
use crate::level::RiskLevel;

pub(crate) struct ConditionalAdvice {
    pub applies: Predicate,
    pub text: &'static str,
}

/// Advice for a patient who does not carry the diagnosis.
pub(crate) struct DiseaseAdvice {
    pub base: &'static [&'static str],
    pub conditional: &'static [ConditionalAdvice],
    /// Appended when the disease level is above `Low`.
    pub escalation: &'static [&'static str],
}

impl DiseaseAdvice {
    pub fn for_level(&self, input: &PatientInput, level: RiskLevel) -> Vec<String> {
        let conditional = self
            .conditional
            .iter()
            .filter(|c| (c.applies)(input))
            .map(|c| c.text);
        let escalation = self
            .escalation
            .iter()
            .copied()
            .filter(|_| level > RiskLevel::Low);

        self.base
            .iter()
            .copied()
            .chain(conditional)
            .chain(escalation)
            .map(str::to_string)
            .collect()
    }
}

const GENERAL_LOW: &[&str] = &[
    "Keep up a healthy lifestyle",
    "Have a general health check every 1-2 years",
];

const GENERAL_MEDIUM: &[&str] = &[
    "Have a comprehensive health check every year",
    "Improve lifestyle habits and bring risk factors under control",
    "Consider a personalised risk review with a physician",
];

const GENERAL_HIGH: &[&str] = &[
    "See a physician as soon as possible",
    "Monitor health indicators closely (every 3-6 months)",
    "Medication may be required",
    "Lifestyle changes are needed immediately",
];

const GENERAL_VERY_HIGH: &[&str] = &[
    "Seek medical care now; professional intervention is needed",
    "A comprehensive treatment plan is needed",
    "Attend regular follow-up and monitoring (every 1-3 months)",
];

/// Boilerplate guidance for the overall level. Each tier replaces the ones below it.
pub fn general_recommendations(level: RiskLevel) -> Vec<String> {
    let tier = match level {
        RiskLevel::Low => GENERAL_LOW,
        RiskLevel::Medium => GENERAL_MEDIUM,
        RiskLevel::High => GENERAL_HIGH,
        RiskLevel::VeryHigh => GENERAL_VERY_HIGH,
    };
    tier.iter().map(|s| s.to_string()).collect()
}

const LIFESTYLE_ALWAYS: &[&str] = &[
    "Healthy diet: more vegetables and fruit, less salt, sugar and saturated fat",
    "Sleep: 7-8 hours every night",
    "Stress management: practise relaxation techniques and look after mental health",
];

/// Lifestyle changes triggered by the input, followed by universal advice.
pub fn lifestyle_modifications(input: &PatientInput) -> Vec<String> {
    let c = &input.clinical;
    let mut items = Vec::new();

    if at_least(c.bmi, OVERWEIGHT_BMI) {
        items.push("Weight control: aim for a BMI below 24".to_string());
    }
    if c
        .exercise_minutes_per_week
        .map_or(true, |m| m < WEEKLY_EXERCISE_TARGET_MINUTES)
    {
        items.push(
            "More exercise: at least 150 minutes of moderate aerobic activity per week".to_string(),
        );
    }
    if c.is_smoker {
        items.push(
            "Stop smoking: the single most effective way to lower cardiovascular risk".to_string(),
        );
    }
    if c
        .alcohol_units_per_week
        .is_some_and(|u| u > WEEKLY_ALCOHOL_LIMIT_UNITS)
    {
        items.push(
            "Limit alcohol: no more than 2 standard drinks a day for men, 1 for women".to_string(),
        );
    }

    items.extend(LIFESTYLE_ALWAYS.iter().map(|s| s.to_string()));
    items
}

const FOLLOW_UP_FREQUENT: &[&str] = &[
    "Blood pressure: measure at least 2-3 times a week",
    "Blood glucose: check fasting glucose and HbA1c regularly when diabetes risk is present",
    "Blood lipids: check every 3-6 months",
];

const FOLLOW_UP_ROUTINE: &[&str] = &[
    "Blood pressure: measure 1-2 times a month",
    "Blood glucose and lipids: check once a year",
];

const FOLLOW_UP_ALWAYS: &[&str] = &[
    "ECG: as advised by your physician",
    "Fundus examination: if diabetic or hypertensive",
];

/// Monitoring cadence for the overall level plus the generic follow-up items.
pub fn medical_follow_up(level: RiskLevel) -> Vec<String> {
    let cadence = if level.is_elevated() {
        FOLLOW_UP_FREQUENT
    } else {
        FOLLOW_UP_ROUTINE
    };
    cadence
        .iter()
        .chain(FOLLOW_UP_ALWAYS)
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ClinicalData, Sex};

    fn patient() -> PatientInput {
        PatientInput {
            age: 50,
            sex: Sex::Female,
            clinical: ClinicalData::default(),
        }
    }

    #[test]
    fn general_tiers_replace_each_other() {
        assert_eq!(general_recommendations(RiskLevel::Low).len(), 2);
        assert_eq!(general_recommendations(RiskLevel::Medium).len(), 3);
        assert_eq!(general_recommendations(RiskLevel::High).len(), 4);

        let very_high = general_recommendations(RiskLevel::VeryHigh);
        assert_eq!(very_high.len(), 3);
        assert!(very_high[0].starts_with("Seek medical care now"));
    }

    #[test]
    fn unknown_exercise_triggers_exercise_advice() {
        let items = lifestyle_modifications(&patient());
        assert_eq!(items.len(), 4);
        assert!(items[0].starts_with("More exercise"));
        assert!(items[1].starts_with("Healthy diet"));
    }

    #[test]
    fn lifestyle_items_follow_input() {
        let mut input = patient();
        input.clinical.bmi = Some(27.0);
        input.clinical.exercise_minutes_per_week = Some(200);
        input.clinical.is_smoker = true;
        input.clinical.alcohol_units_per_week = Some(20.0);

        let items = lifestyle_modifications(&input);
        assert_eq!(items.len(), 6);
        assert!(items[0].starts_with("Weight control"));
        assert!(items[1].starts_with("Stop smoking"));
        assert!(items[2].starts_with("Limit alcohol"));
        assert!(items[5].starts_with("Stress management"));
    }

    #[test]
    fn follow_up_cadence_depends_on_level() {
        let routine = medical_follow_up(RiskLevel::Medium);
        assert_eq!(routine.len(), 4);
        assert!(routine[0].contains("1-2 times a month"));

        let frequent = medical_follow_up(RiskLevel::VeryHigh);
        assert_eq!(frequent.len(), 5);
        assert!(frequent[0].contains("2-3 times a week"));
        assert!(frequent[4].starts_with("Fundus examination"));
    }

    #[test]
    fn escalation_appended_above_low() {
        let advice = DiseaseAdvice {
            base: &["base"],
            conditional: &[ConditionalAdvice {
                applies: |p| p.clinical.is_smoker,
                text: "quit",
            }],
            escalation: &["escalate"],
        };

        assert_eq!(advice.for_level(&patient(), RiskLevel::Low), vec!["base"]);

        let mut smoker = patient();
        smoker.clinical.is_smoker = true;
        assert_eq!(
            advice.for_level(&smoker, RiskLevel::Medium),
            vec!["base", "quit", "escalate"]
        );
    }
}
