//! Project identity and file locations.

use std::fs;
use std::path::{Path, PathBuf};

use sku_core::{ValidationError, clean_filename};

use crate::{EventLog, StoreError};

/// A named project and the directory holding its logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    /// Filesystem-safe form of the name, used for the directory and file names.
    pub stem: String,
    pub dir: PathBuf,
}

impl Project {
    /// Resolves a project.
    ///
    /// The directory is `project_dir` when given, otherwise
    /// `<projects_root>/<stem>`. Nothing is created on disk.
    pub fn new(
        name: &str,
        projects_root: &Path,
        project_dir: Option<&Path>,
    ) -> Result<Self, ValidationError> {
        let stem = clean_filename(name.trim());
        if stem.is_empty() {
            return Err(ValidationError::Empty {
                field: "project name",
            });
        }

        let dir = project_dir.map_or_else(|| projects_root.join(&stem), Path::to_path_buf);
        Ok(Self {
            name: name.trim().to_string(),
            stem,
            dir,
        })
    }

    /// Creates the project directory if needed.
    pub fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))
    }

    pub fn sku_log_path(&self) -> PathBuf {
        self.dir.join(format!("{}_sku_log.csv", self.stem))
    }

    pub fn rename_log_path(&self) -> PathBuf {
        self.dir.join(format!("{}_rename_log.csv", self.stem))
    }

    pub fn event_log(&self) -> EventLog {
        EventLog::new(self.sku_log_path())
    }
}
