//! Error types for scheduler operations.

use thiserror::Error;

/// Errors surfaced by event construction, collections, and strategy selection.
///
/// Every failing collection operation leaves the collection untouched, so all
/// variants except `TypeMismatch` and `InvalidAlgorithm` are safe to recover from.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The date or time string did not parse as `YYYY-MM-DD` / `HH:MM`.
    #[error("Invalid date '{date}' or time '{time}'")]
    Format { date: String, time: String },

    /// An argument of the wrong kind (e.g. a negative event ID).
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// The candidate event overlaps an event already in the collection.
    #[error("Conflict detected, cannot insert event '{candidate}': overlaps '{existing}'")]
    Conflict { candidate: String, existing: String },

    /// A positional argument fell outside the live range.
    #[error("Index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The ID counter cannot advance past its current value.
    #[error("Event ID counter exhausted at {0}")]
    IdsExhausted(u64),

    /// No event carries the requested ID.
    #[error("Could not find ID {0} in event list")]
    NotFound(u64),

    /// An unrecognized sort or search algorithm name.
    #[error("{0}")]
    InvalidAlgorithm(String),

    /// The configuration document was not valid JSON for `SchedulerConfig`.
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
