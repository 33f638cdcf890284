//! Input validation and derived values.
//!
//! [`normalize`] is the single gate between submitted data and the scorers. It runs once per
//! assessment; scorers never re-check age or sex.

use crate::constants::{MAX_AGE, MIN_AGE};
use crate::error::{ValidationError, ValidationResult};
use crate::input::{PatientInput, RawPatientInput};

/// Validates a raw record and fills in derived fields.
///
/// BMI is computed as `weight_kg / height_m²` when both height and weight are present and no
/// usable BMI was supplied. Every other field is passed through unchanged.
///
/// # Errors
///
/// Returns a [`ValidationError`] if:
/// - age is missing or outside 0-120,
/// - sex is missing.
pub fn normalize(raw: &RawPatientInput) -> ValidationResult<PatientInput> {
    let age = raw.age.ok_or(ValidationError::MissingAge)?;
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(ValidationError::AgeOutOfRange { age });
    }
    let age = u8::try_from(age).map_err(|_| ValidationError::AgeOutOfRange { age })?;
    let sex = raw.sex.ok_or(ValidationError::MissingSex)?;

    let mut clinical = raw.clinical.clone();
    clinical.bmi = clinical
        .bmi
        .filter(|bmi| bmi.is_finite() && *bmi > 0.0)
        .or_else(|| derive_bmi(clinical.height, clinical.weight));

    Ok(PatientInput { age, sex, clinical })
}

/// Body-mass index from height in centimetres and weight in kilograms.
///
/// Returns `None` unless both values are present and positive.
pub fn derive_bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let height_m = height_cm.filter(|h| h.is_finite() && *h > 0.0)? / 100.0;
    let weight_kg = weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
    Some(weight_kg / (height_m * height_m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Sex;

    #[test]
    fn derives_bmi_from_height_and_weight() {
        let mut raw = RawPatientInput::new(40, Sex::Female);
        raw.clinical.height = Some(160.0);
        raw.clinical.weight = Some(64.0);

        let input = normalize(&raw).unwrap();
        let bmi = input.clinical.bmi.unwrap();
        assert!((bmi - 25.0).abs() < 1e-9);
    }

    #[test]
    fn supplied_bmi_is_kept() {
        let mut raw = RawPatientInput::new(40, Sex::Female);
        raw.clinical.height = Some(160.0);
        raw.clinical.weight = Some(64.0);
        raw.clinical.bmi = Some(31.2);

        assert_eq!(normalize(&raw).unwrap().clinical.bmi, Some(31.2));
    }

    #[test]
    fn bmi_stays_unknown_without_both_measurements() {
        let mut raw = RawPatientInput::new(40, Sex::Male);
        raw.clinical.weight = Some(80.0);
        assert_eq!(normalize(&raw).unwrap().clinical.bmi, None);

        raw.clinical.height = Some(0.0);
        assert_eq!(normalize(&raw).unwrap().clinical.bmi, None);
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert_eq!(normalize(&RawPatientInput::new(0, Sex::Male)).unwrap().age, 0);
        assert_eq!(
            normalize(&RawPatientInput::new(120, Sex::Female)).unwrap().age,
            120
        );
    }

    #[test]
    fn rejects_out_of_range_age() {
        let err = normalize(&RawPatientInput::new(150, Sex::Male)).unwrap_err();
        assert_eq!(err, ValidationError::AgeOutOfRange { age: 150 });

        let err = normalize(&RawPatientInput::new(-1, Sex::Male)).unwrap_err();
        assert_eq!(err, ValidationError::AgeOutOfRange { age: -1 });
    }

    #[test]
    fn rejects_missing_age_or_sex() {
        let mut raw = RawPatientInput::new(40, Sex::Male);
        raw.sex = None;
        assert_eq!(normalize(&raw).unwrap_err(), ValidationError::MissingSex);

        raw.age = None;
        assert_eq!(normalize(&raw).unwrap_err(), ValidationError::MissingAge);
    }
}
