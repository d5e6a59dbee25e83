// error.rs — Error types for the target subsystem.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while creating or persisting targets.
#[derive(Debug, Error)]
pub enum TargetError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize target data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The requested target was not found.
    #[error("target not found: {0}")]
    NotFound(Uuid),

    /// The overall goal value must be strictly positive.
    #[error("target value must be positive, got {0}")]
    NonPositiveValue(f64),

    /// Incentives can be zero but never negative.
    #[error("incentive amount must not be negative, got {0}")]
    NegativeIncentive(f64),

    /// The period must end after it starts.
    #[error("period end {end} is not after period start {start}")]
    InvalidPeriod { start: String, end: String },

    /// Milestone deadlines must strictly increase with step order.
    /// Rejected outright — never clamped or reordered.
    #[error("milestone schedule not strictly increasing: step {step} deadline {deadline} does not follow its predecessor")]
    ScheduleNotIncreasing { step: u32, deadline: String },

    /// A metric or period name could not be parsed.
    #[error("unknown {kind}: '{value}'")]
    UnknownName { kind: &'static str, value: String },
}
