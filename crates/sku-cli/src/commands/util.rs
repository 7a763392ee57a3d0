//! Shared utilities for CLI commands.

use std::io::{BufRead, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use sku_store::Project;

use crate::{Config, ProjectArgs};

/// Prompts for a line of input, returning it without surrounding whitespace.
///
/// Fails if the input is closed before a line is read.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<String> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read input")?;
    if read == 0 {
        anyhow::bail!("input closed before a value was entered");
    }
    Ok(line.trim().to_string())
}

/// Resolves the project named on the command line, prompting if needed.
pub fn resolve_project<R: BufRead, W: Write>(
    args: &ProjectArgs,
    config: &Config,
    input: &mut R,
    out: &mut W,
) -> Result<Project> {
    let name = match &args.project {
        Some(name) => name.clone(),
        None => prompt(input, out, "Please enter a new or existing project name: ")?,
    };

    let project = Project::new(&name, &config.projects_dir, args.project_dir.as_deref())
        .with_context(|| format!("invalid project name {name:?}"))?;
    tracing::debug!(?project, "resolved project");
    Ok(project)
}

/// Locks a mutex, recovering the data if a previous holder panicked.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
