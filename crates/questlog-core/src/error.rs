//! Core error types for questlog-core.
//!
//! The engine itself is total: materialization and aggregation never fail
//! for malformed-but-plausible input (missing fields default, unknown
//! recurrence frequencies fall back, inconsistent cyclic declarations are
//! skipped). The types here serve the validation entry point offered to
//! callers and the plumbing layers above the engine.

use thiserror::Error;

/// Core error type for questlog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Validation errors for task records handed to the engine.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Priority outside the accepted band
    #[error("Priority {value} for task '{task_id}' is outside 1..=10")]
    InvalidPriority { task_id: String, value: i32 },

    /// Invalid time range
    #[error("Invalid time range for task '{task_id}': end_date ({end}) precedes start_date ({start})")]
    InvalidTimeRange {
        task_id: String,
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// Cyclic task declared with zero occurrences
    #[error("Cyclic task '{task_id}' declares zero occurrences")]
    EmptyCycle { task_id: String },

    /// Cyclic flag set without a cycle specification
    #[error("Task '{task_id}' is flagged cyclic but carries no cycle specification")]
    CyclicWithoutSpec { task_id: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
