//! Rename command: match files against the SKU log and rename them.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Duration;
use sku_core::timestamp::{format_timestamp, now_local};
use sku_core::{
    FileOutcome, NameRegistry, RenameOptions, RenameOutcome, RenameRecord, RenameReport,
    build_intervals, offset_from_secs, run_renames, snapshot_files,
};
use sku_store::{AuditLog, Project};

/// Options for one invocation of the rename command.
#[derive(Debug, Clone)]
pub struct RenameArgs<'a> {
    pub files_dir: &'a Path,
    pub recursive: bool,
    pub offset: Duration,
    pub dry_run: bool,
    pub json: bool,
    pub persistent_log: bool,
}

/// Converts the offset from the command line, falling back to config.
pub fn resolve_offset(cli: Option<f64>, config: Option<f64>) -> Result<Duration> {
    cli.or(config)
        .map_or(Ok(Duration::zero()), offset_from_secs)
        .context("invalid offset")
}

/// Runs the rename command, writing per-file results to `out`.
///
/// Fails only when the run as a whole cannot proceed: an unreadable SKU log
/// or a missing files directory.
pub fn run<W: Write>(out: &mut W, project: &Project, args: &RenameArgs<'_>) -> Result<RenameReport> {
    let log = project.event_log();
    if !log.exists() {
        tracing::warn!(path = %log.path().display(), "no SKU log found");
        writeln!(
            out,
            "No SKU log at {}; no files will match.",
            log.path().display()
        )?;
    }

    let events = log
        .read_all()
        .with_context(|| format!("failed to read SKU log {}", log.path().display()))?;
    let intervals = build_intervals(&events, now_local());
    tracing::debug!(events = events.len(), intervals = intervals.len(), "built intervals");

    let snapshot = snapshot_files(args.files_dir, args.recursive).with_context(|| {
        format!("failed to list files in {}", args.files_dir.display())
    })?;
    let mut registry = NameRegistry::from_paths(snapshot.existing.iter().cloned());

    let options = RenameOptions {
        offset: args.offset,
        dry_run: args.dry_run,
    };

    let report = if args.dry_run {
        let mut discarded: Vec<RenameRecord> = Vec::new();
        run_renames(&intervals, &snapshot, &mut registry, &options, &mut discarded)
    } else {
        project
            .ensure_dir()
            .context("failed to create project directory")?;
        let mut audit = AuditLog::open(project.rename_log_path(), args.persistent_log)
            .context("failed to open the rename log")?;
        run_renames(&intervals, &snapshot, &mut registry, &options, &mut audit)
    };

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        print_report(out, &report, args.files_dir, args.dry_run)?;
    }

    Ok(report)
}

fn print_report<W: Write>(
    out: &mut W,
    report: &RenameReport,
    root: &Path,
    dry_run: bool,
) -> Result<()> {
    for file in &report.files {
        writeln!(out, "{}", describe(file, root))?;
    }

    let verb = if dry_run { "to rename" } else { "renamed" };
    writeln!(
        out,
        "{} {verb}, {} unchanged, {} unmatched, {} failed",
        report.renamed(),
        report.unchanged(),
        report.unmatched(),
        report.failed()
    )?;
    Ok(())
}

/// One line describing what happened to a file.
fn describe(file: &FileOutcome, root: &Path) -> String {
    let shown = |path: &Path| path.strip_prefix(root).unwrap_or(path).display().to_string();
    let name = shown(&file.path);

    match &file.outcome {
        RenameOutcome::Renamed {
            renamed_path,
            audit_error: None,
            ..
        } => format!("Renamed: {name} >>> {}", shown(renamed_path)),
        RenameOutcome::Renamed {
            renamed_path,
            audit_error: Some(error),
            ..
        } => format!(
            "Renamed: {name} >>> {} (not recorded in rename log: {error})",
            shown(renamed_path)
        ),
        RenameOutcome::Planned { renamed_path, .. } => {
            format!("Would rename: {name} >>> {}", shown(renamed_path))
        }
        RenameOutcome::AlreadyNamed { label } => format!("Already named: {name} ({label})"),
        RenameOutcome::NoMatch => match file.matched_at {
            Some(at) => format!("No match: {name} ({})", format_timestamp(at)),
            None => format!("No match: {name}"),
        },
        RenameOutcome::Unnameable { label } => {
            format!("Skipped: {name} (SKU {label:?} has no filename-safe characters)")
        }
        RenameOutcome::Failed { error } => format!("Failed: {name}: {error}"),
    }
}
