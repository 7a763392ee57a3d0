//! SKU log entries.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::sanitize::clean_filename;

/// Reserved label closing a logging session.
pub const END_MARKER: &str = "***END***";

/// Inputs that end an interactive session (compared case-insensitively).
const END_COMMANDS: &[&str] = &["", "break", "end", "exit", END_MARKER];

/// Returns true if an operator entry should end the session.
pub fn is_end_command(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    END_COMMANDS
        .iter()
        .any(|cmd| cmd.to_lowercase() == input)
}

/// One row of the SKU log.
///
/// Rows are written in entry order, which is also chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Local wall-clock time the SKU was entered.
    pub timestamp: NaiveDateTime,
    /// The SKU exactly as entered.
    pub label: String,
    /// Filesystem-safe form of the label.
    pub stem: String,
}

impl LogEvent {
    /// Creates an entry for `label`, deriving its stem.
    pub fn new(timestamp: NaiveDateTime, label: impl Into<String>) -> Self {
        let label = label.into();
        let stem = clean_filename(&label);
        Self {
            timestamp,
            label,
            stem,
        }
    }

    /// Creates the session-closing END entry.
    pub fn end(timestamp: NaiveDateTime) -> Self {
        Self::new(timestamp, END_MARKER)
    }

    /// Whether this entry is an END marker.
    pub fn is_end(&self) -> bool {
        self.label == END_MARKER
    }
}
