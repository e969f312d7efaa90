use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid amount `{input}`: {reason}")]
    Parse { input: String, reason: String },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Nothing to export: the ledger is empty")]
    EmptyLedger,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        LedgerError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
