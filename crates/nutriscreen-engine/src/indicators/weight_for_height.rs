use nutriscreen_core::models::indicator::{IndicatorKind, IndicatorResult};
use nutriscreen_core::models::sex::Sex;
use nutriscreen_standards::store::ReferenceStore;

use super::{Indicator, Subject, by_height};
use crate::classify::Scale;

/// Weight-for-height, 65-120 cm standing height.
pub struct WeightForHeight;

pub fn calculate(
    store: &ReferenceStore,
    weight_kg: f64,
    height_cm: f64,
    sex: Sex,
) -> IndicatorResult {
    by_height(
        store,
        WeightForHeight.kind(),
        WeightForHeight.scale(),
        weight_kg,
        height_cm,
        sex,
    )
}

impl Indicator for WeightForHeight {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::WeightForHeight
    }

    fn scale(&self) -> Scale {
        Scale::Wasting
    }

    fn evaluate(&self, store: &ReferenceStore, subject: &Subject) -> IndicatorResult {
        let m = &subject.measurement;
        calculate(store, m.weight_kg, m.height_cm, m.sex)
    }
}
