use std::result::Result as StdResult;

use thiserror::Error;

/// Error type shared by ledger construction, storage, and configuration.
///
/// Only `InvalidDate` and `NoEligibleDays` come out of the calculation core;
/// the remaining variants belong to collaborators (storage, config, CLI).
#[derive(Debug, Error)]
pub enum QadaError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("No eligible days (obligation start date is in the future)")]
    NoEligibleDays,
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = StdResult<T, QadaError>;
