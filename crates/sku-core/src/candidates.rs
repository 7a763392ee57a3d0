//! Snapshotting the files a rename run will consider.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use walkdir::WalkDir;

use crate::timestamp::system_time_to_local;

/// A file eligible for renaming, with its modification time in local time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub modified: NaiveDateTime,
}

/// Everything found under a files directory at the start of a run.
#[derive(Debug, Default)]
pub struct FileSnapshot {
    /// Regular files, sorted by path.
    pub candidates: Vec<FileCandidate>,
    /// Every entry seen, files or not. These names are taken.
    pub existing: Vec<PathBuf>,
    /// Entries whose metadata could not be read, with the reason.
    pub unreadable: Vec<(PathBuf, String)>,
}

/// Lists `root`, optionally descending into subdirectories.
///
/// Symlinks are not followed. Only regular files become candidates, but
/// every entry is recorded in [`FileSnapshot::existing`] so that no rename
/// lands on a directory or link name. Fails only if `root` itself cannot be
/// listed.
pub fn snapshot_files(root: &Path, recursive: bool) -> io::Result<FileSnapshot> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a directory", root.display()),
        ));
    }

    let mut snapshot = FileSnapshot::default();

    let mut walker = WalkDir::new(root).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    for entry in walker {
        match entry {
            Ok(entry) => snapshot.add(entry.into_path()),
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                snapshot.unreadable.push((path, e.to_string()));
            }
        }
    }

    snapshot.candidates.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(
        candidates = snapshot.candidates.len(),
        entries = snapshot.existing.len(),
        "snapshot taken"
    );

    Ok(snapshot)
}

impl FileSnapshot {
    fn add(&mut self, path: PathBuf) {
        let metadata = fs::symlink_metadata(&path).and_then(|meta| {
            let modified = meta.modified()?;
            Ok((meta.is_file(), modified))
        });

        match metadata {
            Ok((true, modified)) => self.candidates.push(FileCandidate {
                path: path.clone(),
                modified: system_time_to_local(modified),
            }),
            Ok((false, _)) => {}
            Err(e) => self.unreadable.push((path.clone(), e.to_string())),
        }

        self.existing.push(path);
    }
}
