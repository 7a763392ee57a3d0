//! Storage layer for SKU file naming.
//!
//! A project is a directory holding two CSV files:
//!
//! - `<stem>_sku_log.csv`: the SKU log, columns `timestamp, sku, file_stem`
//! - `<stem>_rename_log.csv`: the rename audit trail, columns
//!   `timestamp, sku, original_path, renamed_path`
//!
//! Every field is quoted. The header row is written when a file is first
//! created and rows are only ever appended.
//!
//! # Timestamp Format
//!
//! Timestamps are local wall-clock time without a zone, fixed width with
//! microseconds (e.g., `2025-01-15 10:00:00.000000`). See
//! [`sku_core::timestamp`].
//!
//! # Concurrency
//!
//! Files are not locked. One operator and one process per project is assumed;
//! concurrent writers may interleave rows.

mod appender;
mod audit_log;
mod event_log;
mod project;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use appender::CsvAppender;
pub use audit_log::AuditLog;
pub use event_log::{EventAppender, EventLog};
pub use project::Project;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Opening, creating or flushing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A row could not be encoded or decoded.
    #[error("csv error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// A stored timestamp could not be parsed.
    #[error("invalid timestamp on line {line} of {}: {value:?}", .path.display())]
    TimestampParse {
        path: PathBuf,
        line: u64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
