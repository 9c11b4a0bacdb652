use std::str::FromStr;
use std::sync::Arc;

use jiff::civil::Date;
use nutriscreen_core::models::assessment::{AssessmentResult, GrowthStandards};
use nutriscreen_core::models::classification::Classification;
use nutriscreen_core::models::indicator::{IndicatorKind, IndicatorResult};
use nutriscreen_core::models::measurement::{AssessmentRequest, Measurement};
use nutriscreen_core::models::sex::Sex;
use nutriscreen_standards::store::ReferenceStore;
use tracing::{debug, info};

use crate::classify::round_to;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::indicators::bmi_for_age::BmiForAge;
use crate::indicators::{Indicator, Subject, all_indicators};
use crate::risk;

/// Runs full assessments against one immutable reference store.
pub struct Engine {
    store: Arc<ReferenceStore>,
    config: EngineConfig,
    indicators: Vec<Box<dyn Indicator>>,
}

impl Engine {
    pub fn new(store: Arc<ReferenceStore>, config: EngineConfig) -> Self {
        let indicators = all_indicators()
            .into_iter()
            .map(|indicator| -> Box<dyn Indicator> {
                if indicator.kind() == IndicatorKind::BmiForAge {
                    Box::new(BmiForAge {
                        min_age_months: config.bmi_min_age_months,
                    })
                } else {
                    indicator
                }
            })
            .collect();
        Self {
            store,
            config,
            indicators,
        }
    }

    /// The embedded dataset with default settings.
    pub fn builtin() -> Self {
        Self::new(nutriscreen_standards::builtin(), EngineConfig::default())
    }

    /// Use `config.data_dir` when set, the embedded dataset otherwise.
    pub fn from_config(config: EngineConfig) -> Result<Self, EngineError> {
        let store = match &config.data_dir {
            Some(dir) => Arc::new(ReferenceStore::load_dir(dir)?),
            None => nutriscreen_standards::builtin(),
        };
        Ok(Self::new(store, config))
    }

    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A registered indicator, configured as this engine runs it.
    pub fn indicator(&self, id: &str) -> Option<&dyn Indicator> {
        self.indicators
            .iter()
            .find(|i| i.id() == id)
            .map(|i| i.as_ref())
    }

    /// Assess a raw request. A missing observation date means today.
    ///
    /// Never fails: invalid input comes back as `success = false` with every
    /// problem listed in `errors`.
    pub fn assess(&self, request: &AssessmentRequest) -> AssessmentResult {
        self.assess_on(request, jiff::Zoned::now().date())
    }

    /// Like [`Engine::assess`] with an explicit "today".
    pub fn assess_on(&self, request: &AssessmentRequest, today: Date) -> AssessmentResult {
        let measurement = match self.validate(request, today) {
            Ok(measurement) => measurement,
            Err(errors) => {
                debug!(?errors, "assessment request rejected");
                return AssessmentResult::failure(errors);
            }
        };
        // Validation guarantees birth_date <= observation_date.
        match self.assess_measurement(&measurement) {
            Ok(result) => result,
            Err(e) => AssessmentResult::failure(vec![e.to_string()]),
        }
    }

    /// Check a raw request, collecting every problem.
    pub fn validate(
        &self,
        request: &AssessmentRequest,
        today: Date,
    ) -> Result<Measurement, Vec<String>> {
        let mut errors = Vec::new();

        let weight = request.weight_kg;
        if !(weight.is_finite() && weight > 0.0 && weight <= self.config.max_weight_kg) {
            errors.push(format!(
                "Weight must be greater than 0 and at most {} kg",
                self.config.max_weight_kg
            ));
        }
        let height = request.height_cm;
        if !(height.is_finite() && height > 0.0 && height <= self.config.max_height_cm) {
            errors.push(format!(
                "Height must be greater than 0 and at most {} cm",
                self.config.max_height_cm
            ));
        }

        let observation_date = request.observation_date.unwrap_or(today);
        if request.birth_date > observation_date {
            errors.push(if request.observation_date.is_some() {
                "Birth date cannot be after the observation date".to_string()
            } else {
                "Birth date cannot be in the future".to_string()
            });
        }

        let sex = Sex::from_str(&request.sex);
        if sex.is_err() {
            errors.push("Sex must be Male or Female".to_string());
        }

        match sex {
            Ok(sex) if errors.is_empty() => Ok(Measurement {
                weight_kg: weight,
                height_cm: height,
                birth_date: request.birth_date,
                sex,
                observation_date,
            }),
            _ => Err(errors),
        }
    }

    /// Assess measurements that have already been validated.
    pub fn assess_measurement(
        &self,
        measurement: &Measurement,
    ) -> Result<AssessmentResult, EngineError> {
        let subject = Subject::new(*measurement)?;
        let standards = self.growth_standards(&subject);

        let risk = risk::risk_level(&standards);
        let risk_factors = risk::risk_factors(&standards);
        let recommendations = risk::recommendations(&standards, risk);

        info!(
            age_months = subject.age_months,
            sex = %measurement.sex,
            ?risk,
            factors = risk_factors.len(),
            "assessment complete"
        );

        Ok(AssessmentResult {
            success: true,
            bmi: Some(round_to(measurement.bmi(), 1)),
            age_months: Some(subject.age_months),
            growth_standards: Some(standards),
            nutritional_risk: Some(risk),
            risk_factors,
            recommendations,
            errors: Vec::new(),
        })
    }

    /// Run every indicator, reporting the off-route one of weight-for-length
    /// and weight-for-height as not applicable.
    pub fn growth_standards(&self, subject: &Subject) -> GrowthStandards {
        GrowthStandards {
            weight_for_age: self.evaluate(IndicatorKind::WeightForAge, subject),
            height_for_age: self.evaluate(IndicatorKind::HeightForAge, subject),
            weight_for_height: self.evaluate(IndicatorKind::WeightForHeight, subject),
            weight_for_length: self.evaluate(IndicatorKind::WeightForLength, subject),
            bmi_for_age: self.evaluate(IndicatorKind::BmiForAge, subject),
        }
    }

    fn evaluate(&self, kind: IndicatorKind, subject: &Subject) -> IndicatorResult {
        let threshold = self.config.length_age_threshold_months;
        let uses_length = subject.age_months < threshold;
        match kind {
            IndicatorKind::WeightForHeight if uses_length => {
                return IndicatorResult::unassessed(
                    kind,
                    Classification::NotApplicable,
                    format!("Under {threshold} months; see Weight-for-Length"),
                );
            }
            IndicatorKind::WeightForLength if !uses_length => {
                return IndicatorResult::unassessed(
                    kind,
                    Classification::NotApplicable,
                    format!("{threshold} months or older; see Weight-for-Height"),
                );
            }
            _ => {}
        }

        match self.indicators.iter().find(|i| i.kind() == kind) {
            Some(indicator) => indicator.evaluate(&self.store, subject),
            None => IndicatorResult::unassessed(
                kind,
                Classification::Unknown,
                "Indicator is not registered",
            ),
        }
    }
}
