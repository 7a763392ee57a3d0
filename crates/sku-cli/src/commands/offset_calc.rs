//! Offset calculation from a photographed clock.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use sku_core::timestamp::{format_timestamp, now_local, parse_timestamp, system_time_to_local};
use sku_core::{clock_offset, clock_reading, offset_secs};

use crate::ClockArgs;

/// Resolves the clock reading from the command line.
///
/// A full `--timestamp` wins. Otherwise year, month, day and hour default to
/// `now`, and minute, second and fraction must be given.
pub fn reading_from_args(args: &ClockArgs, now: NaiveDateTime) -> Result<NaiveDateTime> {
    if let Some(timestamp) = &args.timestamp {
        return parse_timestamp(timestamp).with_context(|| {
            format!("invalid timestamp {timestamp:?}, expected YYYY-MM-DD HH:MM:SS.ffffff")
        });
    }

    let Some(minute) = args.minute else {
        anyhow::bail!("You must provide a -M / --minute value");
    };
    let Some(second) = args.second else {
        anyhow::bail!("You must provide a -s / --second value");
    };
    let Some(fraction) = args.fraction.as_deref() else {
        anyhow::bail!("You must provide a -f / --fraction value");
    };

    Ok(clock_reading(
        args.year.unwrap_or_else(|| now.year()),
        args.month.unwrap_or_else(|| now.month()),
        args.day.unwrap_or_else(|| now.day()),
        args.hour.unwrap_or_else(|| now.hour()),
        minute,
        second,
        fraction,
    )?)
}

/// Formats an offset as a signed `H:MM:SS.ffffff` span.
pub fn format_offset(offset: Duration) -> String {
    let sign = if offset < Duration::zero() { "-" } else { "+" };
    let offset = offset.abs();
    let hours = offset.num_hours();
    let minutes = offset.num_minutes() % 60;
    let seconds = offset.num_seconds() % 60;
    let micros = (offset - Duration::seconds(offset.num_seconds()))
        .num_microseconds()
        .unwrap_or(0);
    format!("{sign}{hours}:{minutes:02}:{seconds:02}.{micros:06}")
}

/// Writes the comparison between the clock reading and the file time.
pub fn write_report<W: Write>(
    out: &mut W,
    reading: NaiveDateTime,
    file_time: NaiveDateTime,
) -> Result<()> {
    let offset = clock_offset(file_time, reading);
    let secs = offset_secs(offset);

    writeln!(out, "Machine time was:   {}", format_timestamp(reading))?;
    writeln!(out, "File timestamp was: {}", format_timestamp(file_time))?;
    writeln!(out, "Offset value:       {}", format_offset(offset))?;
    writeln!(out, "Offset seconds:     {secs}")?;
    writeln!(out, "Rename with:        --offset {secs}")?;
    Ok(())
}

/// Runs the offset-calc command.
pub fn run<W: Write>(out: &mut W, image_path: &Path, args: &ClockArgs) -> Result<()> {
    let reading = reading_from_args(args, now_local())?;

    let modified = fs::symlink_metadata(image_path)
        .and_then(|meta| meta.modified())
        .with_context(|| format!("failed to read timestamp of {}", image_path.display()))?;
    let file_time = system_time_to_local(modified);
    tracing::debug!(%reading, %file_time, "computing offset");

    write_report(out, reading, file_time)
}
