use jiff::civil::date;
use nutriscreen_engine::EngineError;
use nutriscreen_engine::age::age_in_months;

#[test]
fn same_day_is_zero() {
    assert_eq!(age_in_months(date(2024, 3, 9), date(2024, 3, 9)).unwrap(), 0);
}

#[test]
fn fifteen_day_remainder_rounds_up() {
    assert_eq!(age_in_months(date(2024, 1, 1), date(2024, 1, 15)).unwrap(), 0);
    assert_eq!(age_in_months(date(2024, 1, 1), date(2024, 1, 16)).unwrap(), 1);
    assert_eq!(age_in_months(date(2024, 1, 1), date(2024, 2, 15)).unwrap(), 1);
    assert_eq!(age_in_months(date(2024, 1, 1), date(2024, 2, 16)).unwrap(), 2);
}

#[test]
fn years_count_as_twelve_months() {
    assert_eq!(age_in_months(date(2018, 10, 15), date(2024, 9, 15)).unwrap(), 71);
    assert_eq!(age_in_months(date(2020, 1, 1), date(2023, 1, 1)).unwrap(), 36);
    assert_eq!(age_in_months(date(2019, 6, 10), date(2025, 6, 10)).unwrap(), 72);
}

#[test]
fn birth_after_observation_is_an_error() {
    let err = age_in_months(date(2024, 5, 2), date(2024, 5, 1)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidDateRange { .. }));
}
