use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::classification::Classification;
use crate::error::CoreError;

/// The five supported growth indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum IndicatorKind {
    WeightForAge,
    HeightForAge,
    WeightForHeight,
    WeightForLength,
    BmiForAge,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 5] = [
        IndicatorKind::WeightForAge,
        IndicatorKind::HeightForAge,
        IndicatorKind::WeightForHeight,
        IndicatorKind::WeightForLength,
        IndicatorKind::BmiForAge,
    ];

    /// Stable identifier (e.g. "weight_for_age"), also the data directory name.
    pub fn id(self) -> &'static str {
        match self {
            IndicatorKind::WeightForAge => "weight_for_age",
            IndicatorKind::HeightForAge => "height_for_age",
            IndicatorKind::WeightForHeight => "weight_for_height",
            IndicatorKind::WeightForLength => "weight_for_length",
            IndicatorKind::BmiForAge => "bmi_for_age",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IndicatorKind::WeightForAge => "Weight-for-Age",
            IndicatorKind::HeightForAge => "Height-for-Age",
            IndicatorKind::WeightForHeight => "Weight-for-Height",
            IndicatorKind::WeightForLength => "Weight-for-Length",
            IndicatorKind::BmiForAge => "BMI-for-Age",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndicatorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndicatorKind::ALL
            .into_iter()
            .find(|k| k.id() == s)
            .ok_or_else(|| CoreError::UnknownIndicator(s.to_string()))
    }
}

/// How a classification was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Method {
    /// Direct boundary-table lookup.
    LookupTable,
    /// z-score from median/SD, then mapped to a category.
    Formula,
}

/// Result of one indicator calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IndicatorResult {
    pub indicator: IndicatorKind,
    /// Rounded to two decimals.
    pub z_score: Option<f64>,
    pub classification: Classification,
    pub method: Option<Method>,
    pub age_used: Option<u32>,
    /// The grid point actually used for height-indexed indicators.
    pub height_used: Option<f64>,
    pub median: Option<f64>,
    pub sd: Option<f64>,
    pub note: Option<String>,
}

impl IndicatorResult {
    /// A result carrying no assessment, with an explanatory note.
    pub fn unassessed(
        indicator: IndicatorKind,
        classification: Classification,
        note: impl Into<String>,
    ) -> Self {
        Self {
            indicator,
            z_score: None,
            classification,
            method: None,
            age_used: None,
            height_used: None,
            median: None,
            sd: None,
            note: Some(note.into()),
        }
    }
}
