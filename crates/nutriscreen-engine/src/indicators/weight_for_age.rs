use nutriscreen_core::models::indicator::{IndicatorKind, IndicatorResult};
use nutriscreen_core::models::sex::Sex;
use nutriscreen_standards::store::ReferenceStore;

use super::{Indicator, Subject, by_age};
use crate::classify::Scale;

/// Weight-for-age, 0-71 months. Boundary tables first, z-score second.
pub struct WeightForAge;

pub fn calculate(
    store: &ReferenceStore,
    weight_kg: f64,
    age_months: u32,
    sex: Sex,
) -> IndicatorResult {
    by_age(
        store,
        WeightForAge.kind(),
        WeightForAge.scale(),
        weight_kg,
        age_months,
        sex,
    )
}

impl Indicator for WeightForAge {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::WeightForAge
    }

    fn scale(&self) -> Scale {
        Scale::Weight
    }

    fn evaluate(&self, store: &ReferenceStore, subject: &Subject) -> IndicatorResult {
        let m = &subject.measurement;
        calculate(store, m.weight_kg, subject.age_months, m.sex)
    }
}
