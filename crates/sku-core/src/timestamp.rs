//! Text form of timestamps stored in the log and audit files.
//!
//! Timestamps are local wall-clock times without a zone, written with
//! microsecond precision: `2025-01-15 10:00:00.000000`.

use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime, ParseError};

/// Format used when writing timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Format used when reading timestamps. Accepts any fraction width.
const PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Formats a timestamp for storage.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a stored timestamp.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(s.trim(), PARSE_FORMAT)
}

/// The current local wall-clock time.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Converts a filesystem time to local wall-clock time.
pub fn system_time_to_local(time: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(time).naive_local()
}
