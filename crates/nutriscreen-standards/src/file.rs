//! On-disk JSON layout of a reference table.
//!
//! ```json
//! {
//!   "indicator": "weight_for_age",
//!   "sex": "male",
//!   "index": "age_months",
//!   "version": "2006.1",
//!   "source": "...",
//!   "boundaries": { "step": 1, "resolution": 0.1, "entries": [...] },
//!   "distribution": { "step": 1, "entries": [{ "index": 0, "median": 3.3, "sd": 0.45 }] }
//! }
//! ```

use nutriscreen_core::models::indicator::IndicatorKind;
use nutriscreen_core::models::sex::Sex;
use serde::{Deserialize, Serialize};

use crate::table::{Band, IndexKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableFile {
    pub indicator: IndicatorKind,
    pub sex: Sex,
    pub index: IndexKind,
    pub version: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundaries: Option<BoundarySection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<DistributionSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundarySection {
    pub step: f64,
    pub resolution: f64,
    #[serde(default)]
    pub sparse: bool,
    pub entries: Vec<BoundaryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundaryEntry {
    pub index: f64,
    pub bands: Vec<Band>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistributionSection {
    pub step: f64,
    pub entries: Vec<DistributionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistributionEntry {
    pub index: f64,
    pub median: f64,
    pub sd: f64,
}
