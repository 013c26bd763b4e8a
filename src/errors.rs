use thiserror::Error;

use crate::domain::{DocId, WineCategory};

/// Unified error type for the session, storage and configuration layers.
#[derive(Debug, Error)]
pub enum TastingError {
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Record {id} not found in the {category} archive")]
    RecordNotFound { category: WineCategory, id: DocId },
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TastingError>;

impl From<std::io::Error> for TastingError {
    fn from(err: std::io::Error) -> Self {
        TastingError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TastingError {
    fn from(err: serde_json::Error) -> Self {
        TastingError::Storage(err.to_string())
    }
}

/// Errors surfaced by the terminal front-end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TastingError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}
