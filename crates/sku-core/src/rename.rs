//! Batch renaming of files after the SKU that was current when they were made.
//!
//! # Algorithm Summary
//!
//! 1. Shift each candidate's modification time by the configured offset
//! 2. Find the interval containing the shifted time
//! 3. Build `<stem><.ext>`, adding ` (0)`, ` (1)`, ... until the name is free
//!    in the [`NameRegistry`] and on disk
//! 4. Rename on disk, then append an audit record
//!
//! A problem with one file never stops the run. Completed renames are not
//! rolled back.

use std::collections::HashSet;
use std::convert::Infallible;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::candidates::{FileCandidate, FileSnapshot};
use crate::interval::Interval;
use crate::matcher::find_interval;
use crate::timestamp::now_local;

/// Settings for one rename run.
#[derive(Debug, Clone)]
pub struct RenameOptions {
    /// Added to every file timestamp before matching.
    pub offset: Duration,
    /// Plan names without touching the filesystem or the audit log.
    pub dry_run: bool,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            offset: Duration::zero(),
            dry_run: false,
        }
    }
}

/// Audit entry for one executed rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameRecord {
    pub timestamp: NaiveDateTime,
    pub label: String,
    pub original_path: PathBuf,
    pub renamed_path: PathBuf,
}

/// Destination for audit records.
pub trait AuditSink {
    type Error: fmt::Display;

    /// Appends one record.
    fn record(&mut self, record: &RenameRecord) -> Result<(), Self::Error>;
}

impl AuditSink for Vec<RenameRecord> {
    type Error = Infallible;

    fn record(&mut self, record: &RenameRecord) -> Result<(), Self::Error> {
        self.push(record.clone());
        Ok(())
    }
}

/// Paths considered occupied during a run.
///
/// Seeded from the snapshot and updated as names are chosen, because the
/// directory on disk lags behind planned renames.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    taken: HashSet<PathBuf>,
}

impl NameRegistry {
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            taken: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_taken(&self, path: &Path) -> bool {
        self.taken.contains(path)
    }

    /// Marks `path` as occupied. Returns false if it already was.
    pub fn claim(&mut self, path: PathBuf) -> bool {
        self.taken.insert(path)
    }

    /// Frees a name claimed for a rename that did not happen.
    pub fn release(&mut self, path: &Path) {
        self.taken.remove(path);
    }

    /// First free name in `dir` for `stem` with the extension `ext`.
    pub fn resolve(&self, dir: &Path, stem: &str, ext: Option<&OsStr>) -> PathBuf {
        let mut candidate = dir.join(file_name(stem, None, ext));
        let mut counter = 0_u64;
        while self.is_taken(&candidate) {
            candidate = dir.join(file_name(stem, Some(counter), ext));
            counter += 1;
        }
        candidate
    }
}

fn file_name(stem: &str, counter: Option<u64>, ext: Option<&OsStr>) -> OsString {
    let mut name = OsString::from(stem);
    if let Some(n) = counter {
        name.push(format!(" ({n})"));
    }
    if let Some(ext) = ext {
        name.push(".");
        name.push(ext);
    }
    name
}

/// Whether `path` already carries a name derived from `stem`.
///
/// The name must be `stem`, optionally followed by a ` (N)` counter, then
/// nothing or a single `.ext`. Stems may contain dots.
fn is_already_named(path: &Path, stem: &str) -> bool {
    let Some(rest) = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|name| name.strip_prefix(stem))
    else {
        return false;
    };

    let rest = strip_counter(rest).unwrap_or(rest);
    rest.is_empty()
        || rest
            .strip_prefix('.')
            .is_some_and(|ext| !ext.is_empty() && !ext.contains('.'))
}

/// Strips a leading ` (N)` counter, returning what follows it.
fn strip_counter(rest: &str) -> Option<&str> {
    let (digits, after) = rest.strip_prefix(" (")?.split_once(')')?;
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(after)
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenameOutcome {
    /// Renamed on disk. `audit_error` is set if the audit append failed.
    Renamed {
        label: String,
        renamed_path: PathBuf,
        #[serde(skip_serializing_if = "Option::is_none")]
        audit_error: Option<String>,
    },
    /// Would be renamed (dry run).
    Planned { label: String, renamed_path: PathBuf },
    /// The name already reflects the matched SKU.
    AlreadyNamed { label: String },
    /// No interval contains the timestamp.
    NoMatch,
    /// Matched a SKU with no filesystem-safe characters.
    Unnameable { label: String },
    /// The file could not be processed.
    Failed { error: String },
}

/// Outcome for one file, with the timestamp used for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_at: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub outcome: RenameOutcome,
}

/// Per-file results of a run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenameReport {
    pub files: Vec<FileOutcome>,
}

impl RenameReport {
    fn count(&self, pred: impl Fn(&RenameOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }

    pub fn renamed(&self) -> usize {
        self.count(|o| matches!(o, RenameOutcome::Renamed { .. } | RenameOutcome::Planned { .. }))
    }

    pub fn unmatched(&self) -> usize {
        self.count(|o| matches!(o, RenameOutcome::NoMatch))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                RenameOutcome::AlreadyNamed { .. } | RenameOutcome::Unnameable { .. }
            )
        })
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RenameOutcome::Failed { .. }))
    }
}

/// Renames every candidate in `snapshot` according to `intervals`.
///
/// `registry` must hold every name present when the snapshot was taken; it is
/// updated with each chosen name. Unreadable snapshot entries are reported as
/// failures after the candidates.
pub fn run_renames<A: AuditSink>(
    intervals: &[Interval],
    snapshot: &FileSnapshot,
    registry: &mut NameRegistry,
    options: &RenameOptions,
    audit: &mut A,
) -> RenameReport {
    let mut report = RenameReport::default();

    for candidate in &snapshot.candidates {
        let (matched_at, outcome) = process(intervals, candidate, registry, options, audit);
        tracing::debug!(path = %candidate.path.display(), ?outcome, "processed file");
        report.files.push(FileOutcome {
            path: candidate.path.clone(),
            matched_at,
            outcome,
        });
    }

    for (path, error) in &snapshot.unreadable {
        report.files.push(FileOutcome {
            path: path.clone(),
            matched_at: None,
            outcome: RenameOutcome::Failed {
                error: error.clone(),
            },
        });
    }

    tracing::info!(
        renamed = report.renamed(),
        unmatched = report.unmatched(),
        unchanged = report.unchanged(),
        failed = report.failed(),
        dry_run = options.dry_run,
        "rename run complete"
    );

    report
}

/// Claims the first name free both in `registry` and on disk.
///
/// The registry decides first. A name it considers free is still skipped if
/// anything exists there now, including case-insensitive matches.
fn claim_free_name(
    registry: &mut NameRegistry,
    dir: &Path,
    stem: &str,
    ext: Option<&OsStr>,
) -> PathBuf {
    loop {
        let target = registry.resolve(dir, stem, ext);
        registry.claim(target.clone());
        if fs::symlink_metadata(&target).is_err() {
            return target;
        }
        tracing::warn!(path = %target.display(), "name in use on disk, trying the next one");
    }
}

fn process<A: AuditSink>(
    intervals: &[Interval],
    candidate: &FileCandidate,
    registry: &mut NameRegistry,
    options: &RenameOptions,
    audit: &mut A,
) -> (Option<NaiveDateTime>, RenameOutcome) {
    let Some(instant) = candidate.modified.checked_add_signed(options.offset) else {
        return (
            None,
            RenameOutcome::Failed {
                error: "offset moves the timestamp out of range".to_string(),
            },
        );
    };

    let Some(interval) = find_interval(intervals, instant) else {
        return (Some(instant), RenameOutcome::NoMatch);
    };
    let label = interval.label.clone();

    if interval.stem.is_empty() {
        return (Some(instant), RenameOutcome::Unnameable { label });
    }
    if is_already_named(&candidate.path, &interval.stem) {
        return (Some(instant), RenameOutcome::AlreadyNamed { label });
    }

    let dir = candidate.path.parent().unwrap_or_else(|| Path::new(""));
    let target = claim_free_name(registry, dir, &interval.stem, candidate.path.extension());

    if options.dry_run {
        return (
            Some(instant),
            RenameOutcome::Planned {
                label,
                renamed_path: target,
            },
        );
    }

    if let Err(e) = fs::rename(&candidate.path, &target) {
        registry.release(&target);
        return (
            Some(instant),
            RenameOutcome::Failed {
                error: format!("rename to {} failed: {e}", target.display()),
            },
        );
    }

    let record = RenameRecord {
        timestamp: now_local(),
        label: label.clone(),
        original_path: candidate.path.clone(),
        renamed_path: target.clone(),
    };
    let audit_error = audit.record(&record).err().map(|e| {
        tracing::warn!(path = %target.display(), error = %e, "renamed but audit append failed");
        e.to_string()
    });

    (
        Some(instant),
        RenameOutcome::Renamed {
            label,
            renamed_path: target,
            audit_error,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use filetime::{FileTime, set_file_mtime};

    use crate::candidates::snapshot_files;
    use crate::event::LogEvent;
    use crate::interval::build_intervals;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    /// SKU1 from 10:00 to 10:05, SKU2 from 10:05 to 10:10.
    fn session() -> Vec<Interval> {
        let events = [
            LogEvent::new(at(10, 0, 0), "SKU1"),
            LogEvent::new(at(10, 5, 0), "SKU2"),
            LogEvent::end(at(10, 10, 0)),
        ];
        build_intervals(&events, at(12, 0, 0))
    }

    fn candidate(dir: &Path, name: &str, modified: NaiveDateTime) -> FileCandidate {
        let path = dir.join(name);
        fs::write(&path, name).unwrap();
        FileCandidate { path, modified }
    }

    fn snapshot_of(candidates: Vec<FileCandidate>) -> FileSnapshot {
        FileSnapshot {
            existing: candidates.iter().map(|c| c.path.clone()).collect(),
            candidates,
            unreadable: Vec::new(),
        }
    }

    fn run(
        intervals: &[Interval],
        snapshot: &FileSnapshot,
        options: &RenameOptions,
    ) -> (RenameReport, Vec<RenameRecord>) {
        let mut registry = NameRegistry::from_paths(snapshot.existing.iter().cloned());
        let mut audit = Vec::new();
        let report = run_renames(intervals, snapshot, &mut registry, options, &mut audit);
        (report, audit)
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn files_take_the_sku_of_their_interval() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = snapshot_of(vec![
            candidate(dir.path(), "IMG_0001.jpg", at(10, 2, 0)),
            candidate(dir.path(), "IMG_0002.jpg", at(10, 7, 0)),
        ]);

        let (report, audit) = run(&session(), &snapshot, &RenameOptions::default());

        assert_eq!(file_names(dir.path()), ["SKU1.jpg", "SKU2.jpg"]);
        assert_eq!(report.renamed(), 2);
        assert_eq!(audit.len(), 2);
        assert_eq!(audit[0].label, "SKU1");
        assert_eq!(audit[0].original_path, dir.path().join("IMG_0001.jpg"));
        assert_eq!(audit[0].renamed_path, dir.path().join("SKU1.jpg"));
        assert_eq!(audit[1].label, "SKU2");
    }

    #[test]
    fn collisions_are_numbered_from_zero() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = snapshot_of(vec![
            candidate(dir.path(), "IMG_0001.jpg", at(10, 1, 0)),
            candidate(dir.path(), "IMG_0002.jpg", at(10, 2, 0)),
            candidate(dir.path(), "IMG_0003.jpg", at(10, 3, 0)),
        ]);

        let (report, _) = run(&session(), &snapshot, &RenameOptions::default());

        assert_eq!(report.renamed(), 3);
        assert_eq!(
            file_names(dir.path()),
            ["SKU1 (0).jpg", "SKU1 (1).jpg", "SKU1.jpg"]
        );
    }

    #[test]
    fn existing_files_are_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        // Outside every interval, but holds the name SKU1 would take.
        let bystander = candidate(dir.path(), "SKU1.jpg", at(9, 0, 0));
        let snapshot = snapshot_of(vec![
            candidate(dir.path(), "IMG_0001.jpg", at(10, 1, 0)),
            bystander,
        ]);

        let (report, _) = run(&session(), &snapshot, &RenameOptions::default());

        assert_eq!(file_names(dir.path()), ["SKU1 (0).jpg", "SKU1.jpg"]);
        assert_eq!(fs::read_to_string(dir.path().join("SKU1.jpg")).unwrap(), "SKU1.jpg");
        assert_eq!(report.unmatched(), 1);
    }

    #[test]
    fn unmatched_files_do_not_stop_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = snapshot_of(vec![
            candidate(dir.path(), "a_early.jpg", at(9, 0, 0)),
            candidate(dir.path(), "b_inside.jpg", at(10, 1, 0)),
            candidate(dir.path(), "c_late.jpg", at(11, 0, 0)),
        ]);

        let (report, audit) = run(&session(), &snapshot, &RenameOptions::default());

        assert_eq!(report.unmatched(), 2);
        assert_eq!(report.renamed(), 1);
        assert_eq!(audit.len(), 1);
        assert_eq!(
            file_names(dir.path()),
            ["SKU1.jpg", "a_early.jpg", "c_late.jpg"]
        );
        assert_eq!(report.files[0].matched_at, Some(at(9, 0, 0)));
    }

    #[test]
    fn empty_log_matches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = snapshot_of(vec![candidate(dir.path(), "IMG.jpg", at(10, 1, 0))]);

        let (report, audit) = run(&[], &snapshot, &RenameOptions::default());

        assert_eq!(report.unmatched(), 1);
        assert!(audit.is_empty());
    }

    #[test]
    fn second_run_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        for (name, minute) in [("IMG_1.jpg", 1), ("IMG_2.jpg", 2), ("IMG_3.jpg", 7)] {
            let path = dir.path().join(name);
            fs::write(&path, name).unwrap();
            let local = at(10, minute, 0)
                .and_local_timezone(chrono::Local)
                .single()
                .unwrap();
            set_file_mtime(&path, FileTime::from_system_time(local.into())).unwrap();
        }

        let first = snapshot_files(dir.path(), false).unwrap();
        let (report, _) = run(&session(), &first, &RenameOptions::default());
        assert_eq!(report.renamed(), 3);
        let after_first = file_names(dir.path());
        assert_eq!(after_first, ["SKU1 (0).jpg", "SKU1.jpg", "SKU2.jpg"]);

        let second = snapshot_files(dir.path(), false).unwrap();
        let (report, audit) = run(&session(), &second, &RenameOptions::default());
        assert_eq!(report.renamed(), 0);
        assert_eq!(report.unchanged(), 3);
        assert!(audit.is_empty());
        assert_eq!(file_names(dir.path()), after_first);
    }

    #[test]
    fn offset_shifts_file_time_before_matching() {
        let dir = tempfile::tempdir().unwrap();
        // Camera runs four minutes slow: 10:03 on the camera is 10:07 logged.
        let snapshot = snapshot_of(vec![candidate(dir.path(), "IMG.jpg", at(10, 3, 0))]);
        let options = RenameOptions {
            offset: Duration::minutes(4),
            dry_run: false,
        };

        let (report, _) = run(&session(), &snapshot, &options);

        assert_eq!(report.files[0].matched_at, Some(at(10, 7, 0)));
        assert_eq!(file_names(dir.path()), ["SKU2.jpg"]);
    }

    #[test]
    fn dry_run_plans_without_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = snapshot_of(vec![
            candidate(dir.path(), "IMG_1.jpg", at(10, 1, 0)),
            candidate(dir.path(), "IMG_2.jpg", at(10, 2, 0)),
        ]);
        let options = RenameOptions {
            dry_run: true,
            ..RenameOptions::default()
        };

        let (report, audit) = run(&session(), &snapshot, &options);

        assert!(audit.is_empty());
        assert_eq!(file_names(dir.path()), ["IMG_1.jpg", "IMG_2.jpg"]);
        assert_eq!(
            report.files[1].outcome,
            RenameOutcome::Planned {
                label: "SKU1".to_string(),
                renamed_path: dir.path().join("SKU1 (0).jpg"),
            }
        );
    }

    #[test]
    fn files_without_extension_keep_none() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = snapshot_of(vec![candidate(dir.path(), "RAW0001", at(10, 1, 0))]);

        run(&session(), &snapshot, &RenameOptions::default());

        assert_eq!(file_names(dir.path()), ["SKU1"]);
    }

    #[test]
    fn renames_stay_in_the_file_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("day1")).unwrap();
        let snapshot = snapshot_of(vec![candidate(
            &dir.path().join("day1"),
            "IMG.jpg",
            at(10, 1, 0),
        )]);

        run(&session(), &snapshot, &RenameOptions::default());

        assert!(dir.path().join("day1/SKU1.jpg").exists());
    }

    #[test]
    fn unnameable_label_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let events = [LogEvent::new(at(10, 0, 0), "###"), LogEvent::end(at(10, 5, 0))];
        let intervals = build_intervals(&events, at(12, 0, 0));
        let snapshot = snapshot_of(vec![candidate(dir.path(), "IMG.jpg", at(10, 1, 0))]);

        let (report, _) = run(&intervals, &snapshot, &RenameOptions::default());

        assert_eq!(
            report.files[0].outcome,
            RenameOutcome::Unnameable {
                label: "###".to_string()
            }
        );
        assert_eq!(file_names(dir.path()), ["IMG.jpg"]);
    }

    #[test]
    fn failed_rename_writes_no_audit_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let ghost = FileCandidate {
            path: dir.path().join("deleted.jpg"),
            modified: at(10, 1, 0),
        };
        let snapshot = snapshot_of(vec![
            ghost,
            candidate(dir.path(), "IMG.jpg", at(10, 2, 0)),
        ]);

        let (report, audit) = run(&session(), &snapshot, &RenameOptions::default());

        assert!(matches!(report.files[0].outcome, RenameOutcome::Failed { .. }));
        assert_eq!(report.failed(), 1);
        assert_eq!(audit.len(), 1);
        // The failed file's claim was released, so the survivor gets the base name.
        assert_eq!(file_names(dir.path()), ["SKU1.jpg"]);
    }

    #[test]
    fn audit_failure_keeps_the_rename() {
        struct Broken;
        impl AuditSink for Broken {
            type Error = String;
            fn record(&mut self, _: &RenameRecord) -> Result<(), String> {
                Err("disk full".to_string())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let snapshot = snapshot_of(vec![candidate(dir.path(), "IMG.jpg", at(10, 1, 0))]);
        let mut registry = NameRegistry::from_paths(snapshot.existing.iter().cloned());

        let report = run_renames(
            &session(),
            &snapshot,
            &mut registry,
            &RenameOptions::default(),
            &mut Broken,
        );

        assert_eq!(
            report.files[0].outcome,
            RenameOutcome::Renamed {
                label: "SKU1".to_string(),
                renamed_path: dir.path().join("SKU1.jpg"),
                audit_error: Some("disk full".to_string()),
            }
        );
        assert_eq!(file_names(dir.path()), ["SKU1.jpg"]);
    }

    #[test]
    fn registry_resolves_first_free_name() {
        let dir = Path::new("/photos");
        let jpg = Some(OsStr::new("jpg"));
        let mut registry = NameRegistry::from_paths(["/photos/A.jpg", "/photos/A (0).jpg"]);

        assert_eq!(registry.resolve(dir, "A", jpg), dir.join("A (1).jpg"));
        assert_eq!(registry.resolve(dir, "B", jpg), dir.join("B.jpg"));

        assert!(registry.claim(dir.join("A (1).jpg")));
        assert!(!registry.claim(dir.join("A (1).jpg")));
        assert_eq!(registry.resolve(dir, "A", jpg), dir.join("A (2).jpg"));
    }

    #[test]
    fn already_named_detection() {
        assert!(is_already_named(Path::new("/p/SKU1.jpg"), "SKU1"));
        assert!(is_already_named(Path::new("/p/SKU1 (12).jpg"), "SKU1"));
        assert!(is_already_named(Path::new("/p/SKU1"), "SKU1"));
        assert!(is_already_named(Path::new("/p/a.b (0).png"), "a.b"));
        assert!(!is_already_named(Path::new("/p/SKU10.jpg"), "SKU1"));
        assert!(!is_already_named(Path::new("/p/SKU1 (x).jpg"), "SKU1"));
        assert!(!is_already_named(Path::new("/p/IMG.jpg"), "SKU1"));
        assert!(is_already_named(Path::new("/p/ABC.123"), "ABC.123"));
        assert!(is_already_named(Path::new("/p/ABC.123 (3)"), "ABC.123"));
        assert!(!is_already_named(Path::new("/p/ABC.123.123"), "ABC"));
        assert!(!is_already_named(Path::new("/p/SKU1 ().jpg"), "SKU1"));
    }

    #[test]
    fn dotted_sku_on_extensionless_file_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("RAW0001");
        fs::write(&path, "raw").unwrap();
        let local = at(10, 1, 0)
            .and_local_timezone(chrono::Local)
            .single()
            .unwrap();
        set_file_mtime(&path, FileTime::from_system_time(local.into())).unwrap();

        let events = [LogEvent::new(at(10, 0, 0), "ABC.123"), LogEvent::end(at(10, 5, 0))];
        let intervals = build_intervals(&events, at(12, 0, 0));

        let first = snapshot_files(dir.path(), false).unwrap();
        let (report, _) = run(&intervals, &first, &RenameOptions::default());
        assert_eq!(report.renamed(), 1);
        assert_eq!(file_names(dir.path()), ["ABC.123"]);

        let second = snapshot_files(dir.path(), false).unwrap();
        let (report, audit) = run(&intervals, &second, &RenameOptions::default());
        assert_eq!(
            report.files[0].outcome,
            RenameOutcome::AlreadyNamed {
                label: "ABC.123".to_string()
            }
        );
        assert!(audit.is_empty());
        assert_eq!(file_names(dir.path()), ["ABC.123"]);
    }

    #[test]
    fn names_taken_after_the_snapshot_are_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = snapshot_of(vec![candidate(dir.path(), "IMG.jpg", at(10, 1, 0))]);
        // Appears on disk after the listing, so the registry does not know it.
        fs::write(dir.path().join("SKU1.jpg"), "keep me").unwrap();

        let (report, audit) = run(&session(), &snapshot, &RenameOptions::default());

        assert_eq!(report.renamed(), 1);
        assert_eq!(audit[0].renamed_path, dir.path().join("SKU1 (0).jpg"));
        assert_eq!(file_names(dir.path()), ["SKU1 (0).jpg", "SKU1.jpg"]);
        assert_eq!(
            fs::read_to_string(dir.path().join("SKU1.jpg")).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn report_serializes_with_status_tag() {
        let report = RenameReport {
            files: vec![FileOutcome {
                path: PathBuf::from("/p/IMG.jpg"),
                matched_at: Some(at(10, 1, 0)),
                outcome: RenameOutcome::Planned {
                    label: "SKU1".to_string(),
                    renamed_path: PathBuf::from("/p/SKU1.jpg"),
                },
            }],
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files"][0]["status"], "planned");
        assert_eq!(json["files"][0]["renamed_path"], "/p/SKU1.jpg");
        assert_eq!(json["files"][0]["matched_at"], "2025-01-15T10:01:00");
    }
}
