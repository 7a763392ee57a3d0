//! A running clock for photographing with the camera being calibrated.

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use sku_core::timestamp::{format_timestamp, now_local};

/// Shows the local time, redrawn in place every `refresh`.
///
/// Runs until interrupted, or for `ticks` redraws when given.
pub fn run<W: Write>(out: &mut W, refresh: Duration, ticks: Option<u64>) -> Result<()> {
    writeln!(
        out,
        "Photograph this clock with your camera, then pass the photo and the time it shows to offset-calc."
    )?;

    let mut shown = 0_u64;
    loop {
        write!(out, "\r{}", format_timestamp(now_local()))?;
        out.flush()?;
        shown += 1;

        if ticks.is_some_and(|limit| shown >= limit) {
            writeln!(out)?;
            return Ok(());
        }
        thread::sleep(refresh);
    }
}
