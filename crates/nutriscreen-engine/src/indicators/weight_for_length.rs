use nutriscreen_core::models::indicator::{IndicatorKind, IndicatorResult};
use nutriscreen_core::models::sex::Sex;
use nutriscreen_standards::store::ReferenceStore;

use super::{Indicator, Subject, by_height};
use crate::classify::Scale;

/// Weight-for-length, 45-110 cm recumbent length. Used for children under two.
pub struct WeightForLength;

pub fn calculate(
    store: &ReferenceStore,
    weight_kg: f64,
    length_cm: f64,
    sex: Sex,
) -> IndicatorResult {
    by_height(
        store,
        WeightForLength.kind(),
        WeightForLength.scale(),
        weight_kg,
        length_cm,
        sex,
    )
}

impl Indicator for WeightForLength {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::WeightForLength
    }

    fn scale(&self) -> Scale {
        Scale::Wasting
    }

    fn evaluate(&self, store: &ReferenceStore, subject: &Subject) -> IndicatorResult {
        let m = &subject.measurement;
        calculate(store, m.weight_kg, m.height_cm, m.sex)
    }
}
