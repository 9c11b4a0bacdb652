use std::str::FromStr;

use nutriscreen_core::models::classification::Classification;
use nutriscreen_core::models::indicator::IndicatorKind;
use nutriscreen_core::models::measurement::{AssessmentRequest, Measurement};
use nutriscreen_core::models::sex::Sex;

#[test]
fn sex_parses_case_insensitively() {
    assert_eq!(Sex::from_str("Male").unwrap(), Sex::Male);
    assert_eq!(Sex::from_str("female").unwrap(), Sex::Female);
    assert_eq!(Sex::from_str(" F ").unwrap(), Sex::Female);
    assert!(Sex::from_str("Other").is_err());
    assert!(Sex::from_str("").is_err());
}

#[test]
fn sex_deserializes_from_either_spelling() {
    let a: Sex = serde_json::from_str("\"male\"").unwrap();
    let b: Sex = serde_json::from_str("\"Female\"").unwrap();
    assert_eq!(a, Sex::Male);
    assert_eq!(b, Sex::Female);
}

#[test]
fn classification_serializes_snake_case_and_labels_are_human() {
    let json = serde_json::to_string(&Classification::SeverelyUnderweight).unwrap();
    assert_eq!(json, "\"severely_underweight\"");
    assert_eq!(Classification::OutOfRange.label(), "Out of range");
    assert_eq!(Classification::SeverelyWasted.to_string(), "Severely Wasted");
}

#[test]
fn non_assessments_are_not_concerns() {
    for c in [
        Classification::OutOfRange,
        Classification::NotApplicable,
        Classification::Unknown,
    ] {
        assert!(!c.is_assessed());
        assert!(!c.is_concern());
        assert_eq!(c.rank(), None);
    }
    assert!(!Classification::Normal.is_concern());
    assert!(!Classification::Tall.is_concern());
    assert!(Classification::Obese.is_concern());
}

#[test]
fn indicator_ids_round_trip_through_from_str() {
    for kind in IndicatorKind::ALL {
        assert_eq!(IndicatorKind::from_str(kind.id()).unwrap(), kind);
    }
    assert!(IndicatorKind::from_str("head_circumference").is_err());
}

#[test]
fn bmi_uses_height_in_metres() {
    let m = Measurement {
        weight_kg: 16.0,
        height_cm: 100.0,
        birth_date: jiff::civil::date(2020, 1, 1),
        sex: Sex::Male,
        observation_date: jiff::civil::date(2024, 1, 1),
    };
    assert!((m.bmi() - 16.0).abs() < 1e-9);
}

#[test]
fn request_observation_date_is_optional() {
    let json = r#"{"weight_kg": 12.5, "height_cm": 85.0, "birth_date": "2022-01-15", "sex": "Male"}"#;
    let req: AssessmentRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.observation_date, None);
    assert_eq!(req.birth_date, jiff::civil::date(2022, 1, 15));
}
