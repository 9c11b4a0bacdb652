use std::path::PathBuf;

use nutriscreen_core::models::indicator::IndicatorKind;
use nutriscreen_core::models::sex::Sex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StandardsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {name}: {source}")]
    Parse {
        name: String,
        source: serde_json::Error,
    },

    #[error("{table}{}: {message}", at_index(.index))]
    Defect {
        table: String,
        index: Option<f64>,
        message: String,
    },

    #[error("no {sex} table for {indicator}")]
    MissingPartition { indicator: IndicatorKind, sex: Sex },

    #[error("duplicate table for {indicator} ({sex})")]
    DuplicateTable { indicator: IndicatorKind, sex: Sex },
}

fn at_index(index: &Option<f64>) -> String {
    index.map(|i| format!(" at index {i}")).unwrap_or_default()
}
