use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::indicator::{IndicatorKind, IndicatorResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum NutritionalRisk {
    Low,
    Moderate,
    Severe,
}

/// One result per indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GrowthStandards {
    pub weight_for_age: IndicatorResult,
    pub height_for_age: IndicatorResult,
    pub weight_for_height: IndicatorResult,
    pub weight_for_length: IndicatorResult,
    pub bmi_for_age: IndicatorResult,
}

impl GrowthStandards {
    pub fn get(&self, kind: IndicatorKind) -> &IndicatorResult {
        match kind {
            IndicatorKind::WeightForAge => &self.weight_for_age,
            IndicatorKind::HeightForAge => &self.height_for_age,
            IndicatorKind::WeightForHeight => &self.weight_for_height,
            IndicatorKind::WeightForLength => &self.weight_for_length,
            IndicatorKind::BmiForAge => &self.bmi_for_age,
        }
    }

    /// Results in fixed indicator order.
    pub fn iter(&self) -> impl Iterator<Item = &IndicatorResult> {
        IndicatorKind::ALL.into_iter().map(|k| self.get(k))
    }
}

/// The outcome of a full nutritional assessment.
///
/// On validation failure `success` is false, `errors` is populated and every
/// optional field is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentResult {
    pub success: bool,
    /// Rounded to one decimal.
    pub bmi: Option<f64>,
    pub age_months: Option<u32>,
    pub growth_standards: Option<GrowthStandards>,
    pub nutritional_risk: Option<NutritionalRisk>,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub errors: Vec<String>,
}

impl AssessmentResult {
    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            success: false,
            bmi: None,
            age_months: None,
            growth_standards: None,
            nutritional_risk: None,
            risk_factors: Vec::new(),
            recommendations: Vec::new(),
            errors,
        }
    }
}
