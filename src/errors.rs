use thiserror::Error;

/// Reasons a draft entry is refused at the creation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please add a description.")]
    EmptyDescription,
    #[error("Amount must be a positive number.")]
    InvalidAmount,
    #[error("Please select a date.")]
    MissingDate,
    #[error("Please choose a category.")]
    MissingCategory,
}

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Couldn't import that file: {0}")]
    Import(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        LedgerError::Csv(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
