//! CLI subcommand implementations.

pub mod log;
pub mod offset_calc;
pub mod offset_capture;
pub mod rename;
pub mod util;
