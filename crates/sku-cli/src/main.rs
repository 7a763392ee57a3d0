use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use sku_cli::commands::rename::RenameArgs;
use sku_cli::commands::{log, offset_calc, offset_capture, rename, util};
use sku_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match &cli.command {
        Some(Commands::Log { project }) => {
            // The stdin lock must be released before the session reads from it.
            let project = {
                let mut stdin = io::stdin().lock();
                util::resolve_project(project, &config, &mut stdin, &mut io::stdout())?
            };
            log::run(&project, config.persistent_log)?;
        }
        Some(Commands::Rename {
            project,
            files_dir,
            recursive,
            offset,
            dry_run,
            json,
        }) => {
            let mut stdout = io::stdout().lock();
            let project =
                util::resolve_project(project, &config, &mut io::stdin().lock(), &mut stdout)?;
            let args = RenameArgs {
                files_dir,
                recursive: *recursive,
                offset: rename::resolve_offset(*offset, config.offset_seconds)?,
                dry_run: *dry_run,
                json: *json,
                persistent_log: config.persistent_log,
            };
            rename::run(&mut stdout, &project, &args)?;
        }
        Some(Commands::OffsetCapture) => {
            offset_capture::run(
                &mut io::stdout(),
                Duration::from_millis(config.clock_refresh_ms),
                None,
            )?;
        }
        Some(Commands::OffsetCalc {
            image_path,
            reading,
        }) => {
            offset_calc::run(&mut io::stdout().lock(), image_path, reading)?;
        }
        None => {
            Cli::command().print_help()?;
            writeln!(io::stdout())?;
        }
    }

    Ok(())
}
