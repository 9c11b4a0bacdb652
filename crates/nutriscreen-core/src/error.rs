use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("sex must be Male or Female, got '{0}'")]
    InvalidSex(String),

    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),
}
