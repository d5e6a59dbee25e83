// error.rs — Error types for the agent directory.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize an agent record.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The requested agent was not found.
    #[error("agent not found: {0}")]
    NotFound(Uuid),
}
