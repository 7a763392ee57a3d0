//! Interactive SKU capture.
//!
//! Each entry is timestamped and appended to the project's SKU log as soon as
//! it is made. Every way out of a session (an end command, closed input,
//! Ctrl-C, an error or a panic) goes through [`LogSession::finalize`], which
//! writes the END marker once if anything was logged.

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use sku_core::timestamp::{format_timestamp, now_local};
use sku_core::{END_MARKER, LogEvent, is_end_command};
use sku_store::{EventAppender, EventLog, Project, StoreError};

use super::util::lock;

/// Exit status after Ctrl-C.
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// State of one logging session.
pub struct LogSession {
    log: EventLog,
    appender: EventAppender,
    entries: usize,
    finalized: bool,
}

impl LogSession {
    pub fn start(log: EventLog, persistent: bool) -> Result<Self, StoreError> {
        let appender = log.appender(persistent)?;
        Ok(Self {
            log,
            appender,
            entries: 0,
            finalized: false,
        })
    }

    /// Number of SKUs logged this session.
    pub const fn entries(&self) -> usize {
        self.entries
    }

    pub const fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Appends a SKU entered at `at`.
    pub fn record(&mut self, sku: &str, at: NaiveDateTime) -> Result<LogEvent, StoreError> {
        let event = LogEvent::new(at, sku);
        self.appender.append(&event)?;
        self.entries += 1;
        tracing::debug!(sku, stem = %event.stem, "logged sku");
        Ok(event)
    }

    /// Closes the session.
    ///
    /// Appends an END marker if at least one SKU was logged. Only the first
    /// call does anything, even if it fails. Returns the END event written.
    pub fn finalize(&mut self, at: NaiveDateTime) -> Result<Option<LogEvent>, StoreError> {
        if self.finalized {
            return Ok(None);
        }
        self.finalized = true;

        if self.entries == 0 {
            return Ok(None);
        }

        let end = LogEvent::end(at);
        self.appender.append(&end)?;
        tracing::info!(path = %self.log.path().display(), entries = self.entries, "session closed");
        Ok(Some(end))
    }
}

/// Finalizes the session when dropped, including during a panic.
struct FinalizeOnDrop(Arc<Mutex<LogSession>>);

impl Drop for FinalizeOnDrop {
    fn drop(&mut self) {
        close(&mut lock(&self.0), &mut io::stdout());
    }
}

/// Finalizes `session`, reporting the result. Never fails.
fn close<W: Write>(session: &mut LogSession, out: &mut W) {
    match session.finalize(now_local()) {
        Ok(Some(_)) => {
            let _ = writeln!(out, "Updated log with end flag: '{END_MARKER}'.");
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "failed to append end marker");
            let _ = writeln!(
                out,
                "Could not add the end flag to the log ({e}).\n\
                 The last SKU will be treated as current until the next logged SKU, \
                 or until the rename is run if there is none."
            );
        }
    }
}

/// Formats the confirmation printed after each entry.
pub fn describe(number: usize, event: &LogEvent) -> String {
    let mut line = format!(
        "{number} [{}] {}",
        format_timestamp(event.timestamp),
        event.label
    );
    if event.stem != event.label {
        line.push_str(&format!(" ({})", event.stem));
    }
    line
}

/// Reads SKUs from `input` until an end command or end of input.
///
/// The session is not finalized here.
pub fn capture<R: BufRead, W: Write>(
    session: &Mutex<LogSession>,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    loop {
        write!(out, "Current SKU: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read input")? == 0 {
            writeln!(out)?;
            return Ok(());
        }

        let sku = line.trim();
        if is_end_command(sku) {
            return Ok(());
        }

        let mut session = lock(session);
        let event = session
            .record(sku, now_local())
            .context("failed to write to the SKU log")?;
        writeln!(out, "{}", describe(session.entries(), &event))?;
    }
}

/// Runs an interactive session on stdin for `project`.
pub fn run(project: &Project, persistent: bool) -> Result<()> {
    project
        .ensure_dir()
        .context("failed to create project directory")?;

    let log = project.event_log();
    println!("Logging to {}", log.path().display());
    println!("Enter an empty line, 'end', 'exit' or 'break' when you are done.");

    let session = Arc::new(Mutex::new(
        LogSession::start(log, persistent).context("failed to open the SKU log")?,
    ));

    let interrupted = Arc::clone(&session);
    if let Err(e) = ctrlc::set_handler(move || {
        println!();
        close(&mut lock(&interrupted), &mut io::stdout());
        std::process::exit(INTERRUPTED_EXIT_CODE);
    }) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }

    let guard = FinalizeOnDrop(Arc::clone(&session));
    let result = capture(&session, io::stdin().lock(), &mut io::stdout());
    drop(guard);

    result
}
