use jiff::civil::Date;
use nutriscreen_core::models::classification::Classification;
use nutriscreen_core::models::indicator::{IndicatorKind, IndicatorResult};
use nutriscreen_core::models::measurement::bmi;
use nutriscreen_core::models::sex::Sex;
use nutriscreen_standards::store::ReferenceStore;

use super::{Indicator, Subject, by_age};
use crate::age::age_in_months;
use crate::classify::Scale;
use crate::error::EngineError;

/// BMI-for-age is only defined from two years.
pub const DEFAULT_MIN_AGE_MONTHS: u32 = 24;

/// BMI-for-age, 24-71 months, on the weight scale.
#[derive(Debug, Clone, Copy)]
pub struct BmiForAge {
    pub min_age_months: u32,
}

impl Default for BmiForAge {
    fn default() -> Self {
        Self {
            min_age_months: DEFAULT_MIN_AGE_MONTHS,
        }
    }
}

/// Compute BMI and age from raw dates and classify.
pub fn calculate(
    store: &ReferenceStore,
    weight_kg: f64,
    height_cm: f64,
    birth_date: Date,
    sex: Sex,
    observation_date: Date,
) -> Result<IndicatorResult, EngineError> {
    let age_months = age_in_months(birth_date, observation_date)?;
    Ok(BmiForAge::default().classify(store, bmi(weight_kg, height_cm), age_months, sex))
}

impl BmiForAge {
    pub fn classify(
        &self,
        store: &ReferenceStore,
        bmi: f64,
        age_months: u32,
        sex: Sex,
    ) -> IndicatorResult {
        if age_months < self.min_age_months {
            return IndicatorResult {
                age_used: Some(age_months),
                ..IndicatorResult::unassessed(
                    IndicatorKind::BmiForAge,
                    Classification::NotApplicable,
                    format!(
                        "BMI-for-age applies from {} months",
                        self.min_age_months
                    ),
                )
            };
        }
        by_age(
            store,
            self.kind(),
            self.scale(),
            bmi,
            age_months,
            sex,
        )
    }
}

impl Indicator for BmiForAge {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::BmiForAge
    }

    fn scale(&self) -> Scale {
        Scale::Weight
    }

    fn evaluate(&self, store: &ReferenceStore, subject: &Subject) -> IndicatorResult {
        let m = &subject.measurement;
        self.classify(store, m.bmi(), subject.age_months, m.sex)
    }
}
