//! Clock drift between the logging machine and a camera.
//!
//! The operator photographs a clock showing the logging machine's time. The
//! photo's modification time and the time visible in it describe the same
//! instant, so their difference corrects every file the camera produced.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::types::ValidationError;

/// Offset that moves `file_instant` onto the logging clock.
///
/// Adding the result to a file timestamp from the same device yields the
/// logging-clock time. The magnitude is not bounded.
pub fn clock_offset(file_instant: NaiveDateTime, true_instant: NaiveDateTime) -> Duration {
    true_instant - file_instant
}

/// Converts an operator-supplied number of seconds into an offset.
///
/// Precision is one microsecond, matching the log timestamps.
pub fn offset_from_secs(secs: f64) -> Result<Duration, ValidationError> {
    if !secs.is_finite() {
        return Err(ValidationError::NonFiniteOffset { value: secs });
    }

    let micros = (secs * 1_000_000.0).round();
    // i64::MAX as f64 rounds up, so the bound is exclusive.
    if micros.abs() >= 9.2e18 {
        return Err(ValidationError::OffsetOutOfRange { value: secs });
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "range checked above"
    )]
    Ok(Duration::microseconds(micros as i64))
}

/// Offset expressed in seconds.
#[expect(
    clippy::cast_precision_loss,
    reason = "display value; sub-microsecond precision is not needed"
)]
pub fn offset_secs(offset: Duration) -> f64 {
    offset.num_microseconds().map_or_else(
        || offset.num_milliseconds() as f64 / 1_000.0,
        |micros| micros as f64 / 1_000_000.0,
    )
}

/// Builds the instant read off a photographed clock.
///
/// `fraction` is the digit string shown after the decimal point, so `"5"` is
/// half a second and `"000123"` is 123 microseconds.
pub fn clock_reading(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    fraction: &str,
) -> Result<NaiveDateTime, ValidationError> {
    let micros = parse_fraction(fraction)?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ValidationError::InvalidClockReading {
            reason: format!("{year}-{month}-{day} is not a calendar date"),
        })?
        .and_hms_micro_opt(hour, minute, second, micros)
        .ok_or_else(|| ValidationError::InvalidClockReading {
            reason: format!("{hour}:{minute}:{second} is not a time of day"),
        })
}

fn parse_fraction(fraction: &str) -> Result<u32, ValidationError> {
    let fraction = fraction.trim();
    if fraction.is_empty() || fraction.len() > 6 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidClockReading {
            reason: format!("fraction {fraction:?} must be 1 to 6 digits"),
        });
    }

    let padded = format!("{fraction:0<6}");
    padded
        .parse()
        .map_err(|_| ValidationError::InvalidClockReading {
            reason: format!("fraction {fraction:?} is not a number"),
        })
}
