use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::sex::Sex;

/// A validated set of measurements for one child on one observation date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Measurement {
    pub weight_kg: f64,
    /// Standing height, or recumbent length for the youngest children.
    pub height_cm: f64,
    pub birth_date: Date,
    pub sex: Sex,
    pub observation_date: Date,
}

impl Measurement {
    /// Body mass index, kg/m².
    pub fn bmi(&self) -> f64 {
        bmi(self.weight_kg, self.height_cm)
    }
}

/// Body mass index from weight in kg and height in cm. Unrounded.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Raw input as received from the application layer, before validation.
///
/// `sex` stays a string so that an unrecognised value can be reported as a
/// validation error instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub birth_date: Date,
    pub sex: String,
    #[serde(default)]
    pub observation_date: Option<Date>,
}
