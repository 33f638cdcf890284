//! Declarative factor tables and the interpreter that scores them.
//!
//! A disease table is an ordered list of [`FactorRule`]s. Each rule owns brackets ordered from
//! least to most severe; the interpreter picks the most severe bracket whose predicate holds,
//! so brackets of one factor never stack. Every contributing factor is recorded with its points
//! and `weight = points / 100`.

use crate::constants::MAX_SCORE;
use crate::input::PatientInput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw value of a contributing factor as shown to the clinician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactorValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for FactorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(true) => f.write_str("yes"),
            Self::Flag(false) => f.write_str("no"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(t) => f.write_str(t),
        }
    }
}

/// A factor that contributed to a disease score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub value: FactorValue,
    pub points: u32,
    /// `points / 100`
    pub weight: f64,
    pub description: String,
}

impl RiskFactor {
    pub fn new(name: &str, value: FactorValue, points: u32, description: &str) -> Self {
        Self {
            name: name.to_string(),
            value,
            points,
            weight: f64::from(points) / 100.0,
            description: description.to_string(),
        }
    }
}

pub(crate) type Predicate = fn(&PatientInput) -> bool;

/// Points awarded by a bracket.
pub(crate) enum Points {
    Fixed(u32),
    /// `each × count(input)`, for clustering factors.
    PerCount {
        each: u32,
        count: fn(&PatientInput) -> u32,
    },
}

impl Points {
    fn resolve(&self, input: &PatientInput) -> u32 {
        match self {
            Self::Fixed(points) => *points,
            Self::PerCount { each, count } => each * count(input),
        }
    }
}

pub(crate) struct Bracket {
    pub applies: Predicate,
    pub points: Points,
    pub description: &'static str,
}

pub(crate) struct FactorRule {
    pub name: &'static str,
    /// Only called once a bracket has matched, so the fields it reads are present.
    pub value: fn(&PatientInput) -> FactorValue,
    /// Least to most severe.
    pub brackets: &'static [Bracket],
}

/// Scores `rules` against `input`, returning the clamped total and the contributing factors in
/// table order.
pub(crate) fn evaluate(rules: &[FactorRule], input: &PatientInput) -> (u32, Vec<RiskFactor>) {
    let mut total: u32 = 0;
    let mut factors = Vec::new();

    for rule in rules {
        let Some(bracket) = rule.brackets.iter().rev().find(|b| (b.applies)(input)) else {
            continue;
        };
        let points = bracket.points.resolve(input);
        if points == 0 {
            continue;
        }
        total = total.saturating_add(points);
        factors.push(RiskFactor::new(
            rule.name,
            (rule.value)(input),
            points,
            bracket.description,
        ));
    }

    (total.min(MAX_SCORE), factors)
}

/// `true` when the measurement is present and at least `threshold`.
pub(crate) fn at_least(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v >= threshold)
}

/// `true` when the measurement is present and strictly below `threshold`.
pub(crate) fn below(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v < threshold)
}

pub(crate) fn flag(_: &PatientInput) -> FactorValue {
    FactorValue::Flag(true)
}

pub(crate) fn age(input: &PatientInput) -> FactorValue {
    FactorValue::Number(f64::from(input.age))
}

pub(crate) fn bmi(input: &PatientInput) -> FactorValue {
    let bmi = input.clinical.bmi.unwrap_or_default();
    FactorValue::Number((bmi * 10.0).round() / 10.0)
}

pub(crate) fn measurement(value: Option<f64>, unit: &str) -> FactorValue {
    match value {
        Some(v) => FactorValue::Text(format!("{v} {unit}")),
        None => FactorValue::Flag(false),
    }
}

/// Formats systolic/diastolic, with `?` for a missing side.
pub(crate) fn blood_pressure(input: &PatientInput) -> FactorValue {
    let side = |v: Option<f64>| v.map_or_else(|| "?".to_string(), |v| v.to_string());
    FactorValue::Text(format!(
        "{}/{} mmHg",
        side(input.clinical.systolic_bp),
        side(input.clinical.diastolic_bp)
    ))
}
