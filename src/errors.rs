use thiserror::Error;
use uuid::Uuid;

use crate::config::ConfigError;

/// Error type that captures ledger, pricing, and intake failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Room not found: {0}")]
    RoomNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Persisted snapshot is unreadable: {0}")]
    PersistenceCorruption(String),
    #[error("External service error: {0}")]
    ExternalService(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Local errors that leave the ledger usable and only need a diagnostic.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LedgerError::TransactionNotFound(_) | LedgerError::PersistenceCorruption(_)
        )
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        LedgerError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Failures surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Unknown command `{0}`; run `help` to list commands")]
    UnknownCommand(String),
}

impl CliError {
    /// Ledger failures that left the data intact; reported as warnings.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CliError::Core(err) if err.is_recoverable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_corruption_are_recoverable() {
        assert!(LedgerError::TransactionNotFound(Uuid::new_v4()).is_recoverable());
        assert!(LedgerError::PersistenceCorruption("bad json".into()).is_recoverable());
        assert!(!LedgerError::Validation("amount".into()).is_recoverable());
        assert!(!LedgerError::RoomNotFound("999".into()).is_recoverable());
    }

    #[test]
    fn cli_errors_inherit_recoverability() {
        assert!(CliError::from(LedgerError::TransactionNotFound(Uuid::new_v4())).is_recoverable());
        assert!(!CliError::from(LedgerError::Validation("amount".into())).is_recoverable());
        assert!(!CliError::Input("missing <id>".into()).is_recoverable());
    }
}
