use nutriscreen_core::models::indicator::{IndicatorKind, IndicatorResult};
use nutriscreen_core::models::sex::Sex;
use nutriscreen_standards::store::ReferenceStore;

use super::{Indicator, Subject, by_age};
use crate::classify::Scale;

/// Length/height-for-age, 0-71 months, on the stunting scale.
pub struct HeightForAge;

pub fn calculate(
    store: &ReferenceStore,
    height_cm: f64,
    age_months: u32,
    sex: Sex,
) -> IndicatorResult {
    by_age(
        store,
        HeightForAge.kind(),
        HeightForAge.scale(),
        height_cm,
        age_months,
        sex,
    )
}

impl Indicator for HeightForAge {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::HeightForAge
    }

    fn scale(&self) -> Scale {
        Scale::Stunting
    }

    fn evaluate(&self, store: &ReferenceStore, subject: &Subject) -> IndicatorResult {
        let m = &subject.measurement;
        calculate(store, m.height_cm, subject.age_months, m.sex)
    }
}
