//! Validation errors for operator-supplied values.

use thiserror::Error;

/// Errors raised when an operator-supplied value cannot be used.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// An offset in seconds was NaN or infinite.
    #[error("offset must be a finite number of seconds, got {value}")]
    NonFiniteOffset { value: f64 },

    /// An offset in seconds does not fit a duration.
    #[error("offset of {value} seconds is out of range")]
    OffsetOutOfRange { value: f64 },

    /// A clock reading does not name a real instant.
    #[error("invalid clock reading: {reason}")]
    InvalidClockReading { reason: String },
}
