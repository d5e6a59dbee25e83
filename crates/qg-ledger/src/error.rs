// error.rs — Error types for the ledger read models.

use thiserror::Error;

/// Errors that can occur while reading deal or activity records.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize a record.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
