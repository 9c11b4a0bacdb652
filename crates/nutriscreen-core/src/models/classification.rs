use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Outcome of classifying one indicator.
///
/// The first ten variants are nutritional categories. `OutOfRange`,
/// `NotApplicable` and `Unknown` mean no category could be assigned and
/// should be shown greyed out rather than as a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Classification {
    SeverelyUnderweight,
    Underweight,
    Normal,
    Overweight,
    Obese,
    SeverelyWasted,
    Wasted,
    SeverelyStunted,
    Stunted,
    Tall,
    OutOfRange,
    NotApplicable,
    Unknown,
}

impl Classification {
    pub fn label(self) -> &'static str {
        match self {
            Classification::SeverelyUnderweight => "Severely Underweight",
            Classification::Underweight => "Underweight",
            Classification::Normal => "Normal",
            Classification::Overweight => "Overweight",
            Classification::Obese => "Obese",
            Classification::SeverelyWasted => "Severely Wasted",
            Classification::Wasted => "Wasted",
            Classification::SeverelyStunted => "Severely Stunted",
            Classification::Stunted => "Stunted",
            Classification::Tall => "Tall",
            Classification::OutOfRange => "Out of range",
            Classification::NotApplicable => "Not applicable",
            Classification::Unknown => "Unknown",
        }
    }

    /// True when a nutritional category was assigned.
    pub fn is_assessed(self) -> bool {
        !matches!(
            self,
            Classification::OutOfRange | Classification::NotApplicable | Classification::Unknown
        )
    }

    /// True for assessed categories that warrant attention.
    ///
    /// Tall is assessed but not a concern: it never raises the risk level and
    /// is not listed among risk factors.
    pub fn is_concern(self) -> bool {
        self.is_assessed() && !matches!(self, Classification::Normal | Classification::Tall)
    }

    /// The most extreme undernutrition tier of any scale.
    pub fn is_severe(self) -> bool {
        matches!(
            self,
            Classification::SeverelyUnderweight
                | Classification::SeverelyWasted
                | Classification::SeverelyStunted
        )
    }

    /// Signed distance from Normal on its own scale: negative for
    /// undernutrition, positive for excess. `None` for non-assessments.
    pub fn rank(self) -> Option<i8> {
        match self {
            Classification::SeverelyUnderweight
            | Classification::SeverelyWasted
            | Classification::SeverelyStunted => Some(-2),
            Classification::Underweight | Classification::Wasted | Classification::Stunted => {
                Some(-1)
            }
            Classification::Normal => Some(0),
            Classification::Overweight | Classification::Tall => Some(1),
            Classification::Obese => Some(2),
            Classification::OutOfRange | Classification::NotApplicable | Classification::Unknown => {
                None
            }
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
