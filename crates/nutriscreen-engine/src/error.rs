use std::path::PathBuf;

use jiff::civil::Date;
use nutriscreen_standards::error::StandardsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("birth date {birth} is after observation date {observed}")]
    InvalidDateRange { birth: Date, observed: Date },

    #[error("age calculation failed: {0}")]
    Date(#[from] jiff::Error),

    #[error(transparent)]
    Standards(#[from] StandardsError),

    #[error("failed to read config at {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("config_version {found} is newer than this build supports ({supported})")]
    ConfigTooNew { found: u32, supported: u32 },

    #[error("config is not a JSON object")]
    ConfigShape,
}
