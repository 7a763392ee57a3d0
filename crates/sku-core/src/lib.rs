//! Core domain logic for SKU-driven file naming.
//!
//! This crate contains the fundamental types and logic for:
//! - Interval building: turning a chronological SKU log into time spans
//! - Matching: locating the span a file timestamp falls into
//! - Clock offsets: aligning a camera clock with the logging clock
//! - Renaming: collision-safe batch renames with a per-file report

pub mod candidates;
pub mod event;
mod interval;
mod matcher;
mod offset;
pub mod rename;
pub mod sanitize;
pub mod timestamp;
mod types;

pub use candidates::{FileCandidate, FileSnapshot, snapshot_files};
pub use event::{END_MARKER, LogEvent, is_end_command};
pub use interval::{Interval, build_intervals};
pub use matcher::find_interval;
pub use offset::{clock_offset, clock_reading, offset_from_secs, offset_secs};
pub use rename::{
    AuditSink, FileOutcome, NameRegistry, RenameOptions, RenameOutcome, RenameRecord,
    RenameReport, run_renames,
};
pub use sanitize::clean_filename;
pub use types::ValidationError;
