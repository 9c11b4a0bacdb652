use nutriscreen_core::models::assessment::{GrowthStandards, NutritionalRisk};
use nutriscreen_core::models::classification::Classification;
use nutriscreen_core::models::indicator::IndicatorKind;

/// Highest risk implied by any indicator.
pub fn risk_level(standards: &GrowthStandards) -> NutritionalRisk {
    standards
        .iter()
        .map(|r| classification_risk(r.classification))
        .max()
        .unwrap_or(NutritionalRisk::Low)
}

fn classification_risk(classification: Classification) -> NutritionalRisk {
    if classification.is_severe() {
        NutritionalRisk::Severe
    } else if classification.is_concern() {
        NutritionalRisk::Moderate
    } else {
        NutritionalRisk::Low
    }
}

/// `"<indicator name>: <label>"` for every indicator that warrants attention.
pub fn risk_factors(standards: &GrowthStandards) -> Vec<String> {
    standards
        .iter()
        .filter(|r| r.classification.is_concern())
        .map(|r| format!("{}: {}", r.indicator.name(), r.classification))
        .collect()
}

const SEVERE_BASELINE: &[&str] = &[
    "Immediate medical attention required",
    "Refer to pediatric nutritionist",
    "Consider hospitalization for severe malnutrition",
];

const MODERATE_BASELINE: &[&str] = &[
    "Schedule follow-up within 2 weeks",
    "Provide nutritional counseling",
    "Monitor growth closely",
];

const LOW_BASELINE: &[&str] = &[
    "Continue regular monitoring",
    "Maintain healthy diet and lifestyle",
];

/// Indicator-specific guidance. `None` matches any indicator.
const GUIDANCE: &[(Option<IndicatorKind>, Classification, &str)] = &[
    (
        Some(IndicatorKind::WeightForAge),
        Classification::SeverelyUnderweight,
        "Refer for nutritional intervention",
    ),
    (
        Some(IndicatorKind::WeightForAge),
        Classification::Underweight,
        "Focus on weight gain strategies",
    ),
    (
        Some(IndicatorKind::BmiForAge),
        Classification::SeverelyUnderweight,
        "Refer for nutritional intervention",
    ),
    (
        Some(IndicatorKind::BmiForAge),
        Classification::Underweight,
        "Focus on weight gain strategies",
    ),
    (
        Some(IndicatorKind::HeightForAge),
        Classification::SeverelyStunted,
        "Address stunting concerns",
    ),
    (
        Some(IndicatorKind::HeightForAge),
        Classification::Stunted,
        "Address stunting concerns",
    ),
    (
        None,
        Classification::SeverelyWasted,
        "Refer to a therapeutic feeding program",
    ),
    (None, Classification::Wasted, "Provide supplementary feeding"),
    (
        None,
        Classification::Overweight,
        "Implement healthy weight management",
    ),
    (
        None,
        Classification::Obese,
        "Implement healthy weight management",
    ),
];

/// Baseline guidance for `risk`, then guidance for each flagged indicator,
/// without duplicates and in first-seen order.
pub fn recommendations(standards: &GrowthStandards, risk: NutritionalRisk) -> Vec<String> {
    let baseline = match risk {
        NutritionalRisk::Severe => SEVERE_BASELINE,
        NutritionalRisk::Moderate => MODERATE_BASELINE,
        NutritionalRisk::Low => LOW_BASELINE,
    };

    let specific = standards.iter().flat_map(|result| {
        GUIDANCE
            .iter()
            .filter(move |(kind, class, _)| {
                *class == result.classification && kind.is_none_or(|k| k == result.indicator)
            })
            .map(|(_, _, text)| *text)
    });

    let mut out: Vec<String> = Vec::new();
    for text in baseline.iter().copied().chain(specific) {
        if !out.iter().any(|existing| existing == text) {
            out.push(text.to_string());
        }
    }
    out
}
