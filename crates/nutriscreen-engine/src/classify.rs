use nutriscreen_core::models::classification::Classification;
use serde::{Deserialize, Serialize};

/// The label set an indicator's z-scores map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    /// Weight-for-age and BMI-for-age.
    Weight,
    /// Height-for-age.
    Stunting,
    /// Weight-for-height and weight-for-length.
    Wasting,
}

/// Map a z-score onto `scale`. Exact cut points go to the less severe side,
/// so z = -2 is Normal and z = 2 is Normal.
pub fn classify_z(z: f64, scale: Scale) -> Classification {
    if !z.is_finite() {
        return Classification::Unknown;
    }

    let (severe, moderate) = match scale {
        Scale::Weight => (
            Classification::SeverelyUnderweight,
            Classification::Underweight,
        ),
        Scale::Stunting => (Classification::SeverelyStunted, Classification::Stunted),
        Scale::Wasting => (Classification::SeverelyWasted, Classification::Wasted),
    };

    match z {
        z if z < -3.0 => severe,
        z if z < -2.0 => moderate,
        z if z <= 2.0 => Classification::Normal,
        z => match scale {
            Scale::Weight => Classification::Overweight,
            Scale::Stunting => Classification::Tall,
            Scale::Wasting if z <= 3.0 => Classification::Overweight,
            Scale::Wasting => Classification::Obese,
        },
    }
}

/// Round to `places` decimals for reporting.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
