//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Name photographs after the product being handled when they were taken.
///
/// Log SKUs as you work through products, then rename the camera's files by
/// matching their timestamps against the log.
#[derive(Debug, Parser)]
#[command(name = "sku", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Keep a log of the SKUs you are working on for later renaming.
    ///
    /// Using a barcode scanner or your keyboard, enter the SKU you are
    /// currently working on when prompted. When you are done, enter an empty
    /// line or any of: break, end, exit.
    Log {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// Rename files based on a project's SKU log.
    Rename {
        #[command(flatten)]
        project: ProjectArgs,

        /// Directory of files to rename.
        #[arg(short, long)]
        files_dir: PathBuf,

        /// Look through subdirectories for files to rename.
        #[arg(short, long)]
        recursive: bool,

        /// Seconds to add to file timestamps (see `offset-calc`).
        #[arg(short, long, allow_negative_numbers = true)]
        offset: Option<f64>,

        /// Show what would be renamed without renaming anything.
        #[arg(long)]
        dry_run: bool,

        /// Output the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Display a running clock to photograph with the camera.
    OffsetCapture,

    /// Calculate the clock offset between the camera and this machine.
    OffsetCalc {
        /// Photo of the `offset-capture` clock.
        #[arg(short, long)]
        image_path: PathBuf,

        #[command(flatten)]
        reading: ClockArgs,
    },
}

/// Selects a project.
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Name of a new or existing project (prompted for if omitted).
    #[arg(short, long)]
    pub project: Option<String>,

    /// Alternate project directory.
    #[arg(short = 'd', long)]
    pub project_dir: Option<PathBuf>,
}

/// The time visible in a photographed clock.
#[derive(Debug, Clone, Default, Args)]
pub struct ClockArgs {
    /// Full timestamp as shown (`YYYY-MM-DD HH:MM:SS.ffffff`). Overrides the
    /// individual fields.
    #[arg(short, long)]
    pub timestamp: Option<String>,

    /// Year shown [default: current year].
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Month shown [default: current month].
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Day shown [default: current day].
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=31))]
    pub day: Option<u32>,

    /// Hour shown, 24-hour clock [default: current hour].
    #[arg(short = 'H', long, value_parser = clap::value_parser!(u32).range(0..=23))]
    pub hour: Option<u32>,

    /// Minute shown.
    #[arg(short = 'M', long, value_parser = clap::value_parser!(u32).range(0..=59))]
    pub minute: Option<u32>,

    /// Second shown.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=59))]
    pub second: Option<u32>,

    /// Digits shown after the decimal point.
    #[arg(short, long)]
    pub fraction: Option<String>,
}
