//! The SKU log.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sku_core::LogEvent;
use sku_core::timestamp::{format_timestamp, parse_timestamp};

use crate::{CsvAppender, StoreError};

/// On-disk row of the SKU log.
#[derive(Debug, Serialize, Deserialize)]
struct LogRow {
    timestamp: String,
    sku: String,
    file_stem: String,
}

impl From<&LogEvent> for LogRow {
    fn from(event: &LogEvent) -> Self {
        Self {
            timestamp: format_timestamp(event.timestamp),
            sku: event.label.clone(),
            file_stem: event.stem.clone(),
        }
    }
}

/// Handle to a project's SKU log file.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Appends one event, holding the file only for the write.
    pub fn append(&self, event: &LogEvent) -> Result<(), StoreError> {
        CsvAppender::scoped(&self.path).append(&LogRow::from(event))
    }

    /// Opens an appender for a logging session.
    pub fn appender(&self, persistent: bool) -> Result<EventAppender, StoreError> {
        Ok(EventAppender(CsvAppender::open(&self.path, persistent)?))
    }

    /// Reads every event in write order.
    ///
    /// A missing file reads as an empty log. A row with an unparseable
    /// timestamp fails the whole read.
    pub fn read_all(&self) -> Result<Vec<LogEvent>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|e| StoreError::csv(&self.path, e))?;

        let mut events = Vec::new();
        for (index, row) in reader.deserialize::<LogRow>().enumerate() {
            let row = row.map_err(|e| StoreError::csv(&self.path, e))?;
            let timestamp =
                parse_timestamp(&row.timestamp).map_err(|source| StoreError::TimestampParse {
                    path: self.path.clone(),
                    // Line 1 is the header.
                    line: index as u64 + 2,
                    value: row.timestamp.clone(),
                    source,
                })?;
            events.push(LogEvent {
                timestamp,
                label: row.sku,
                stem: row.file_stem,
            });
        }

        tracing::debug!(path = %self.path.display(), events = events.len(), "read sku log");
        Ok(events)
    }
}

/// Appender for one logging session.
pub struct EventAppender(CsvAppender);

impl EventAppender {
    pub fn append(&mut self, event: &LogEvent) -> Result<(), StoreError> {
        self.0.append(&LogRow::from(event))
    }
}
