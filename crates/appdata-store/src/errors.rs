//! Error handling for appdata-store
//!
//! Wraps appdata-core ExError with store-specific helpers

use appdata_core::errors::{ExError, ExErrorKind};
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Failures of the SQLite session below the load protocol
///
/// The protocol decides the phase kind; these only say what the driver did.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("connection already has an open transaction")]
    TransactionInProgress,

    #[error("no open transaction")]
    NoTransaction,

    #[error("unknown bind parameter :{name}")]
    UnknownParameter { name: String },

    #[error("row does not bind parameter {name}")]
    MissingParameter { name: String },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl From<SessionError> for ExError {
    fn from(err: SessionError) -> Self {
        ExError::new(ExErrorKind::Persistence)
            .with_op("sqlite")
            .with_message(err.to_string())
    }
}

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Re-classify a session failure as a failure of one load phase
///
/// Keeps the underlying message and statement; the kind tells the caller how
/// far the protocol got.
pub fn phase_error(kind: ExErrorKind, source: &ExError) -> ExError {
    let err = ExError::new(kind)
        .with_op("load")
        .with_message(source.message().to_string());
    match source.statement() {
        Some(sql) => err.with_statement(sql),
        None => err,
    }
}
