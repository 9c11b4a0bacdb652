use jiff::civil::date;
use nutriscreen_core::models::classification::Classification;
use nutriscreen_core::models::indicator::{IndicatorKind, Method};
use nutriscreen_core::models::measurement::Measurement;
use nutriscreen_core::models::sex::Sex;
use nutriscreen_engine::classify::{Scale, classify_z};
use nutriscreen_engine::indicators::bmi_for_age::{self, BmiForAge};
use nutriscreen_engine::indicators::{
    Indicator, Subject, all_indicators, get_indicator, height_for_age, weight_for_age,
    weight_for_height, weight_for_length,
};
use nutriscreen_standards::builtin;

#[test]
fn newborn_boy_severely_underweight() {
    let store = builtin();
    let r = weight_for_age::calculate(&store, 2.0, 0, Sex::Male);
    assert_eq!(r.classification, Classification::SeverelyUnderweight);
    assert_eq!(r.method, Some(Method::LookupTable));
    assert_eq!(r.age_used, Some(0));
    // z = -2.8 is only Underweight, so it is not reported.
    assert_eq!(r.z_score, None);
    assert_eq!(r.median, Some(3.4));
}

#[test]
fn newborn_boy_normal() {
    let store = builtin();
    let r = weight_for_age::calculate(&store, 3.5, 0, Sex::Male);
    assert_eq!(r.classification, Classification::Normal);
    assert_eq!(r.median, Some(3.4));
    assert_eq!(r.z_score, Some(0.2));
}

#[test]
fn newborn_boy_overweight() {
    let store = builtin();
    let r = weight_for_age::calculate(&store, 4.6, 0, Sex::Male);
    assert_eq!(r.classification, Classification::Overweight);
}

#[test]
fn band_max_stays_in_band() {
    let store = builtin();
    let at_max = weight_for_age::calculate(&store, 2.4, 0, Sex::Male);
    assert_eq!(at_max.classification, Classification::Underweight);
    let between = weight_for_age::calculate(&store, 2.45, 0, Sex::Male);
    assert_eq!(between.classification, Classification::Normal);
}

#[test]
fn oldest_boy_overweight() {
    let store = builtin();
    let r = weight_for_age::calculate(&store, 24.1, 71, Sex::Male);
    assert_eq!(r.classification, Classification::Overweight);
    let r = weight_for_age::calculate(&store, 24.0, 71, Sex::Male);
    assert_eq!(r.classification, Classification::Normal);
}

#[test]
fn lookup_z_score_agrees_with_classification() {
    let store = builtin();
    let mut reported = 0;
    for sex in [Sex::Male, Sex::Female] {
        for month in 0..=71 {
            for tenths in 1..=400 {
                let weight = f64::from(tenths) / 10.0;
                let r = weight_for_age::calculate(&store, weight, month, sex);
                assert_eq!(r.method, Some(Method::LookupTable));
                if let Some(z) = r.z_score {
                    reported += 1;
                    assert_eq!(
                        classify_z(z, Scale::Weight),
                        r.classification,
                        "{sex} {month} months {weight} kg: z = {z}"
                    );
                }
            }
        }
    }
    assert!(reported > 0);
}

#[test]
fn weight_for_height_lookup_z_score_agrees_with_classification() {
    let store = builtin();
    for sex in [Sex::Male, Sex::Female] {
        for half_cm in 130..=240 {
            let height = f64::from(half_cm) / 2.0;
            for tenths in 30..=350 {
                let weight = f64::from(tenths) / 10.0;
                let r = weight_for_height::calculate(&store, weight, height, sex);
                if r.method != Some(Method::LookupTable) {
                    continue;
                }
                if let Some(z) = r.z_score {
                    assert_eq!(
                        classify_z(z, Scale::Wasting),
                        r.classification,
                        "{sex} {height} cm {weight} kg: z = {z}"
                    );
                }
            }
        }
    }
}

#[test]
fn weight_for_age_out_of_range() {
    let store = builtin();
    let r = weight_for_age::calculate(&store, 20.0, 72, Sex::Female);
    assert_eq!(r.classification, Classification::OutOfRange);
    assert_eq!(r.z_score, None);
    assert_eq!(r.note.as_deref(), Some("Age must be 0-71 months"));
}

#[test]
fn girl_weight_for_height_obese() {
    let store = builtin();
    let r = weight_for_height::calculate(&store, 9.8, 65.0, Sex::Female);
    assert_eq!(r.classification, Classification::Obese);
    assert_eq!(r.method, Some(Method::LookupTable));
    assert_eq!(r.height_used, Some(65.0));
}

#[test]
fn girl_weight_for_height_between_boundary_rows_uses_formula() {
    let store = builtin();
    let r = weight_for_height::calculate(&store, 7.95, 67.0, Sex::Female);
    assert_eq!(r.method, Some(Method::Formula));
    assert_eq!(r.classification, Classification::Normal);
    assert_eq!(r.height_used, Some(67.0));
    assert_eq!(r.z_score, Some(0.0));
}

#[test]
fn boy_weight_for_height_half_centimetre_grid() {
    let store = builtin();
    let r = weight_for_height::calculate(&store, 22.2, 96.1, Sex::Male);
    assert_eq!(r.height_used, Some(96.0));
    assert_eq!(r.classification, Classification::Obese);
    let r = weight_for_height::calculate(&store, 12.0, 96.0, Sex::Male);
    assert_eq!(r.classification, Classification::SeverelyWasted);
}

#[test]
fn weight_for_height_out_of_range() {
    let store = builtin();
    let r = weight_for_height::calculate(&store, 5.0, 60.0, Sex::Male);
    assert_eq!(r.classification, Classification::OutOfRange);
    assert_eq!(r.note.as_deref(), Some("Height must be 65-120 cm"));
}

#[test]
fn weight_for_length_formula() {
    let store = builtin();
    let r = weight_for_length::calculate(&store, 8.43, 70.2, Sex::Male);
    assert_eq!(r.method, Some(Method::Formula));
    assert_eq!(r.height_used, Some(70.0));
    assert_eq!(r.classification, Classification::Normal);

    let r = weight_for_length::calculate(&store, 2.0, 50.0, Sex::Male);
    assert_eq!(r.classification, Classification::SeverelyWasted);

    let r = weight_for_length::calculate(&store, 10.0, 111.0, Sex::Female);
    assert_eq!(r.classification, Classification::OutOfRange);
}

#[test]
fn height_for_age_stunting_scale() {
    let store = builtin();
    let normal = height_for_age::calculate(&store, 96.3, 36, Sex::Male);
    assert_eq!(normal.classification, Classification::Normal);
    assert_eq!(normal.method, Some(Method::Formula));

    // z = -2.5
    let stunted = height_for_age::calculate(&store, 81.4, 24, Sex::Female);
    assert_eq!(stunted.classification, Classification::Stunted);

    let severe = height_for_age::calculate(&store, 80.0, 24, Sex::Female);
    assert_eq!(severe.classification, Classification::SeverelyStunted);

    let tall = height_for_age::calculate(&store, 92.0, 24, Sex::Female);
    assert_eq!(tall.classification, Classification::Tall);
}

#[test]
fn bmi_for_age_from_dates() {
    let store = builtin();
    let r = bmi_for_age::calculate(
        &store,
        14.0,
        95.0,
        date(2020, 1, 1),
        Sex::Male,
        date(2023, 1, 1),
    )
    .unwrap();
    assert_eq!(r.age_used, Some(36));
    assert_eq!(r.classification, Classification::Normal);
}

#[test]
fn bmi_for_age_under_two_not_applicable() {
    let store = builtin();
    let r = bmi_for_age::calculate(
        &store,
        9.0,
        75.0,
        date(2023, 1, 1),
        Sex::Female,
        date(2024, 7, 1),
    )
    .unwrap();
    assert_eq!(r.classification, Classification::NotApplicable);
    assert_eq!(r.age_used, Some(18));
}

#[test]
fn bmi_for_age_beyond_table_out_of_range() {
    let store = builtin();
    let r = BmiForAge::default().classify(&store, 15.0, 80, Sex::Male);
    assert_eq!(r.classification, Classification::OutOfRange);
    assert_eq!(r.note.as_deref(), Some("Age must be 24-71 months"));
}

#[test]
fn bmi_for_age_rejects_inverted_dates() {
    let store = builtin();
    let r = bmi_for_age::calculate(
        &store,
        14.0,
        95.0,
        date(2023, 1, 2),
        Sex::Male,
        date(2023, 1, 1),
    );
    assert!(r.is_err());
}

#[test]
fn non_positive_measurement_is_unknown() {
    let store = builtin();
    let r = weight_for_age::calculate(&store, f64::NAN, 10, Sex::Male);
    assert_eq!(r.classification, Classification::Unknown);
    let r = weight_for_height::calculate(&store, 0.0, 90.0, Sex::Male);
    assert_eq!(r.classification, Classification::Unknown);
}

#[test]
fn registry_covers_every_indicator() {
    let ids: Vec<_> = all_indicators().iter().map(|i| i.id()).collect();
    assert_eq!(
        ids,
        IndicatorKind::ALL.iter().map(|k| k.id()).collect::<Vec<_>>()
    );
    let wfa = get_indicator("weight_for_age").unwrap();
    assert_eq!(wfa.name(), "Weight-for-Age");
    assert!(get_indicator("head_circumference").is_none());
}

#[test]
fn each_indicator_declares_its_scale() {
    let scale = |id: &str| get_indicator(id).unwrap().scale();
    assert_eq!(scale("weight_for_age"), Scale::Weight);
    assert_eq!(scale("bmi_for_age"), Scale::Weight);
    assert_eq!(scale("height_for_age"), Scale::Stunting);
    assert_eq!(scale("weight_for_height"), Scale::Wasting);
    assert_eq!(scale("weight_for_length"), Scale::Wasting);
}

#[test]
fn trait_evaluation_matches_typed_calculation() {
    let store = builtin();
    let subject = Subject::new(Measurement {
        weight_kg: 24.1,
        height_cm: 115.0,
        birth_date: date(2018, 10, 15),
        sex: Sex::Male,
        observation_date: date(2024, 9, 15),
    })
    .unwrap();
    assert_eq!(subject.age_months, 71);

    let wfa = get_indicator("weight_for_age").unwrap();
    assert_eq!(
        wfa.evaluate(&store, &subject),
        weight_for_age::calculate(&store, 24.1, 71, Sex::Male)
    );

    let bmi = get_indicator("bmi_for_age").unwrap();
    assert_eq!(
        bmi.evaluate(&store, &subject).classification,
        Classification::Overweight
    );
}
