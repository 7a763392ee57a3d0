//! The rename audit trail.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sku_core::timestamp::format_timestamp;
use sku_core::{AuditSink, RenameRecord};

use crate::{CsvAppender, StoreError};

#[derive(Debug, Serialize)]
struct AuditRow {
    timestamp: String,
    sku: String,
    original_path: String,
    renamed_path: String,
}

impl From<&RenameRecord> for AuditRow {
    fn from(record: &RenameRecord) -> Self {
        Self {
            timestamp: format_timestamp(record.timestamp),
            sku: record.label.clone(),
            original_path: record.original_path.display().to_string(),
            renamed_path: record.renamed_path.display().to_string(),
        }
    }
}

/// Append-only log of executed renames.
pub struct AuditLog {
    appender: CsvAppender,
}

impl AuditLog {
    pub fn open(path: impl Into<PathBuf>, persistent: bool) -> Result<Self, StoreError> {
        Ok(Self {
            appender: CsvAppender::open(path, persistent)?,
        })
    }

    pub fn path(&self) -> &Path {
        self.appender.path()
    }
}

impl AuditSink for AuditLog {
    type Error = StoreError;

    fn record(&mut self, record: &RenameRecord) -> Result<(), Self::Error> {
        self.appender.append(&AuditRow::from(record))
    }
}
