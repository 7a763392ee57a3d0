//! Append-only CSV writing with scoped or session-long file handles.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;

use crate::StoreError;

/// Appends rows to a CSV file, writing the header only into an empty file.
///
/// A scoped appender opens the file for each row and closes it again, so an
/// interrupted process never leaves a half-written handle behind. A persistent
/// appender holds one handle until it is dropped. Both flush after every row.
pub struct CsvAppender {
    path: PathBuf,
    held: Option<csv::Writer<File>>,
}

impl CsvAppender {
    /// Appender that reopens the file for every row.
    pub fn scoped(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            held: None,
        }
    }

    /// Appender that keeps the file open for its whole lifetime.
    pub fn persistent(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let writer = open_writer(&path)?;
        Ok(Self {
            path,
            held: Some(writer),
        })
    }

    /// Creates either kind of appender.
    pub fn open(path: impl Into<PathBuf>, persistent: bool) -> Result<Self, StoreError> {
        if persistent {
            Self::persistent(path)
        } else {
            Ok(Self::scoped(path))
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row and flushes it to disk.
    pub fn append<T: Serialize>(&mut self, row: &T) -> Result<(), StoreError> {
        if let Some(writer) = self.held.as_mut() {
            return write_row(&self.path, writer, row);
        }

        let mut writer = open_writer(&self.path)?;
        write_row(&self.path, &mut writer, row)
    }
}

fn open_writer(path: &Path) -> Result<csv::Writer<File>, StoreError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StoreError::io(path, e))?;
    let is_empty = file
        .metadata()
        .map_err(|e| StoreError::io(path, e))?
        .len()
        == 0;

    Ok(WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .has_headers(is_empty)
        .from_writer(file))
}

fn write_row<T: Serialize, W: Write>(
    path: &Path,
    writer: &mut csv::Writer<W>,
    row: &T,
) -> Result<(), StoreError> {
    writer
        .serialize(row)
        .map_err(|e| StoreError::csv(path, e))?;
    writer.flush().map_err(|e| StoreError::io(path, e))
}
