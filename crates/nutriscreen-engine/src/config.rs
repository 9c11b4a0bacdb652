use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Below this age weight-for-length applies, at or above it weight-for-height.
    #[serde(default = "default_length_age_threshold")]
    pub length_age_threshold_months: u32,
    /// Youngest age at which BMI-for-age is assessed.
    #[serde(default = "default_bmi_min_age")]
    pub bmi_min_age_months: u32,
    #[serde(default = "default_max_weight")]
    pub max_weight_kg: f64,
    #[serde(default = "default_max_height")]
    pub max_height_cm: f64,
    /// Load reference tables from here instead of the built-in dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_length_age_threshold() -> u32 {
    24
}

fn default_bmi_min_age() -> u32 {
    24
}

fn default_max_weight() -> f64 {
    200.0
}

fn default_max_height() -> f64 {
    300.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            length_age_threshold_months: default_length_age_threshold(),
            bmi_min_age_months: default_bmi_min_age(),
            max_weight_kg: default_max_weight(),
            max_height_cm: default_max_height(),
            data_dir: None,
        }
    }
}

impl EngineConfig {
    /// Read a config file, migrating older versions in memory.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, EngineError> {
        // Parse as raw JSON so we can run migrations before deserializing.
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX));

        let migrated = migrate(json, on_disk_version)?;
        Ok(serde_json::from_value(migrated)?)
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> Result<serde_json::Value, EngineError> {
    if from_version > CURRENT_VERSION {
        return Err(EngineError::ConfigTooNew {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }
    let obj = json.as_object_mut().ok_or(EngineError::ConfigShape)?;

    // v0 → v1: stamp the version on pre-versioned files
    if from_version < 1 {
        obj.insert("config_version".to_string(), 1.into());
        tracing::info!("migrated config v0 → v1");
    }

    Ok(json)
}
