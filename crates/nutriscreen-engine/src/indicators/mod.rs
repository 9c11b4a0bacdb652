pub mod bmi_for_age;
pub mod height_for_age;
pub mod weight_for_age;
pub mod weight_for_height;
pub mod weight_for_length;

use nutriscreen_core::models::classification::Classification;
use nutriscreen_core::models::indicator::{IndicatorKind, IndicatorResult};
use nutriscreen_core::models::measurement::Measurement;
use nutriscreen_core::models::sex::Sex;
use nutriscreen_standards::store::ReferenceStore;
use nutriscreen_standards::table::{Grid, GridIndex, IndexKind, ReferenceTable};

use crate::age::age_in_months;
use crate::classify::{Scale, round_to};
use crate::error::EngineError;
use crate::index::resolve_height_index;
use crate::strategy::{self, Query};

/// The child being assessed, with age already resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subject {
    pub measurement: Measurement,
    pub age_months: u32,
}

impl Subject {
    pub fn new(measurement: Measurement) -> Result<Self, EngineError> {
        let age_months = age_in_months(measurement.birth_date, measurement.observation_date)?;
        Ok(Self {
            measurement,
            age_months,
        })
    }
}

/// A growth indicator computed from a [`Subject`] against reference tables.
pub trait Indicator: Send + Sync {
    fn kind(&self) -> IndicatorKind;

    fn scale(&self) -> Scale;

    /// Stable identifier (e.g. "weight_for_age").
    fn id(&self) -> &'static str {
        self.kind().id()
    }

    /// Human-readable name (e.g. "Weight-for-Age").
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn evaluate(&self, store: &ReferenceStore, subject: &Subject) -> IndicatorResult;
}

/// Return all registered indicators.
pub fn all_indicators() -> Vec<Box<dyn Indicator>> {
    vec![
        Box::new(weight_for_age::WeightForAge),
        Box::new(height_for_age::HeightForAge),
        Box::new(weight_for_height::WeightForHeight),
        Box::new(weight_for_length::WeightForLength),
        Box::new(bmi_for_age::BmiForAge::default()),
    ]
}

/// Look up an indicator by ID.
pub fn get_indicator(id: &str) -> Option<Box<dyn Indicator>> {
    all_indicators().into_iter().find(|i| i.id() == id)
}

fn table_for(
    store: &ReferenceStore,
    kind: IndicatorKind,
    sex: Sex,
) -> Result<&ReferenceTable, IndicatorResult> {
    store.get(kind, sex).ok_or_else(|| {
        IndicatorResult::unassessed(
            kind,
            Classification::Unknown,
            format!("No {sex} reference table for {kind}"),
        )
    })
}

fn check_value(kind: IndicatorKind, value: f64) -> Result<(), IndicatorResult> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(IndicatorResult::unassessed(
            kind,
            Classification::Unknown,
            "Measurement must be a positive number",
        ))
    }
}

fn span_text(lo: f64, hi: f64) -> String {
    format!("{lo}-{hi}")
}

/// Classify `value` against an age-indexed table.
pub(crate) fn by_age(
    store: &ReferenceStore,
    kind: IndicatorKind,
    scale: Scale,
    value: f64,
    age_months: u32,
    sex: Sex,
) -> IndicatorResult {
    let table = match table_for(store, kind, sex) {
        Ok(table) => table,
        Err(result) => return result,
    };
    if let Err(result) = check_value(kind, value) {
        return result;
    }

    let Some((lo, hi)) = table.span() else {
        return IndicatorResult::unassessed(kind, Classification::Unknown, "Empty reference table");
    };
    let age = f64::from(age_months);
    if age < lo || age > hi {
        return IndicatorResult {
            age_used: Some(age_months),
            ..IndicatorResult::unassessed(
                kind,
                Classification::OutOfRange,
                format!("Age must be {} months", span_text(lo, hi)),
            )
        };
    }

    let result = run(table, kind, scale, value, GridIndex::from_months(age_months));
    IndicatorResult {
        age_used: Some(age_months),
        ..result
    }
}

/// Classify `value` against a height-indexed table.
pub(crate) fn by_height(
    store: &ReferenceStore,
    kind: IndicatorKind,
    scale: Scale,
    value: f64,
    height_cm: f64,
    sex: Sex,
) -> IndicatorResult {
    let table = match table_for(store, kind, sex) {
        Ok(table) => table,
        Err(result) => return result,
    };
    if let Err(result) = check_value(kind, value) {
        return result;
    }

    let (Some((lo, hi)), Some(grid)) = (table.span(), finest_grid(table)) else {
        return IndicatorResult::unassessed(kind, Classification::Unknown, "Empty reference table");
    };
    let Some(point) = resolve_height_index(height_cm, &grid) else {
        return IndicatorResult::unassessed(
            kind,
            Classification::OutOfRange,
            format!("Height must be {} cm", span_text(lo, hi)),
        );
    };

    run(table, kind, scale, value, GridIndex::from_value(point))
}

/// The grid with the smallest step among the table's sections.
fn finest_grid(table: &ReferenceTable) -> Option<Grid> {
    let boundary = table.boundaries.as_ref().map(|b| b.grid);
    let distribution = table.distribution.as_ref().map(|d| d.grid);
    match (boundary, distribution) {
        (Some(b), Some(d)) => Some(if b.step < d.step { b } else { d }),
        (b, d) => b.or(d),
    }
}

fn run(
    table: &ReferenceTable,
    kind: IndicatorKind,
    scale: Scale,
    value: f64,
    index: GridIndex,
) -> IndicatorResult {
    let outcome = strategy::resolve(&Query {
        table,
        index,
        value,
        scale,
    });
    let height_used = match table.index {
        IndexKind::HeightCm => Some(outcome.index.value()),
        IndexKind::AgeMonths => None,
    };
    IndicatorResult {
        indicator: kind,
        z_score: outcome.z_score.map(|z| round_to(z, 2)),
        classification: outcome.classification,
        method: outcome.method,
        age_used: None,
        height_used,
        median: outcome.median,
        sd: outcome.sd,
        note: outcome.note,
    }
}
