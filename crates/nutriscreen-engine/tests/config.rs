use nutriscreen_core::models::classification::Classification;
use nutriscreen_core::models::measurement::AssessmentRequest;
use nutriscreen_engine::config::CURRENT_VERSION;
use nutriscreen_engine::{Engine, EngineConfig, EngineError};
use nutriscreen_standards::BUILTIN_FILES;

#[test]
fn defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.config_version, CURRENT_VERSION);
    assert_eq!(config.length_age_threshold_months, 24);
    assert_eq!(config.bmi_min_age_months, 24);
    assert_eq!(config.max_weight_kg, 200.0);
    assert_eq!(config.max_height_cm, 300.0);
    assert!(config.data_dir.is_none());
}

#[test]
fn empty_object_gets_defaults() {
    let config = EngineConfig::from_json("{}").unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn unversioned_config_is_stamped_current() {
    let config = EngineConfig::from_json(r#"{"length_age_threshold_months": 18}"#).unwrap();
    assert_eq!(config.config_version, CURRENT_VERSION);
    assert_eq!(config.length_age_threshold_months, 18);
    assert_eq!(config.bmi_min_age_months, 24);
}

#[test]
fn newer_config_is_rejected() {
    let err = EngineConfig::from_json(r#"{"config_version": 99}"#).unwrap_err();
    assert!(matches!(err, EngineError::ConfigTooNew { found: 99, .. }));
}

#[test]
fn version_beyond_u32_is_too_new() {
    // 2^32 + 2 must not wrap around to version 2.
    let err = EngineConfig::from_json(r#"{"config_version": 4294967298}"#).unwrap_err();
    assert!(matches!(
        err,
        EngineError::ConfigTooNew {
            found: u32::MAX,
            ..
        }
    ));
}

#[test]
fn non_object_config_is_rejected() {
    assert!(matches!(
        EngineConfig::from_json("[1, 2]"),
        Err(EngineError::ConfigShape)
    ));
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"config_version": 1, "max_weight_kg": 50}"#).unwrap();
    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.max_weight_kg, 50.0);

    let missing = EngineConfig::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, EngineError::ConfigIo { .. }));
}

#[test]
fn data_dir_replaces_builtin_tables() {
    let dir = tempfile::tempdir().unwrap();
    for (name, json) in BUILTIN_FILES {
        let path = dir.path().join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, json).unwrap();
    }
    let config = EngineConfig {
        data_dir: Some(dir.path().to_path_buf()),
        ..EngineConfig::default()
    };
    let engine = Engine::from_config(config).unwrap();
    assert_eq!(engine.store().tables().count(), 10);

    std::fs::remove_file(dir.path().join("height_for_age/male.json")).unwrap();
    let config = EngineConfig {
        data_dir: Some(dir.path().to_path_buf()),
        ..EngineConfig::default()
    };
    assert!(matches!(
        Engine::from_config(config),
        Err(EngineError::Standards(_))
    ));
}

#[test]
fn thresholds_come_from_config() {
    let config = EngineConfig {
        length_age_threshold_months: 12,
        bmi_min_age_months: 30,
        max_weight_kg: 20.0,
        ..EngineConfig::default()
    };
    let engine = Engine::new(nutriscreen_standards::builtin(), config);
    let today = jiff::civil::date(2024, 9, 15);

    // 18 months: past the lowered length threshold, under the raised BMI age.
    let req = AssessmentRequest {
        weight_kg: 10.5,
        height_cm: 81.0,
        birth_date: jiff::civil::date(2023, 3, 15),
        sex: "Female".to_string(),
        observation_date: Some(today),
    };
    let result = engine.assess_on(&req, today);
    let gs = result.growth_standards.unwrap();
    assert_eq!(gs.weight_for_length.classification, Classification::NotApplicable);
    assert!(gs.weight_for_height.classification.is_assessed());
    assert_eq!(gs.bmi_for_age.classification, Classification::NotApplicable);

    let heavy = AssessmentRequest {
        weight_kg: 25.0,
        ..req
    };
    let result = engine.assess_on(&heavy, today);
    assert_eq!(
        result.errors,
        vec!["Weight must be greater than 0 and at most 20 kg"]
    );
}
