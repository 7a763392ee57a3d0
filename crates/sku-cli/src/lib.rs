//! SKU file naming CLI library.
//!
//! This crate provides the CLI interface for logging SKUs and renaming files.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, ClockArgs, Commands, ProjectArgs};
pub use config::Config;
