//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "strider", version, about = "Knee-mounted gyro distance tracker")]
pub struct Cli {
    /// Path to config TOML; a missing file means built-in defaults
    #[arg(long, value_name = "FILE", default_value = "etc/strider.toml")]
    pub config: PathBuf,

    /// Emit display refreshes, logs and errors as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); falls back to
    /// `[logging] level`, then info. RUST_LOG wins over both.
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calibrate, then track distance until Ctrl-C
    Run {
        /// Stop after this many samples
        #[arg(long, value_name = "N")]
        max_samples: Option<u64>,
        /// Override sampling.poll_hz
        #[arg(long, value_name = "HZ", value_parser = clap::value_parser!(u32).range(1..))]
        poll_hz: Option<u32>,
        /// Override display.refresh_ms
        #[arg(long, value_name = "MS")]
        refresh_ms: Option<u64>,
        /// Override calibration.max_polls (give up calibrating after N polls)
        #[arg(long, value_name = "N")]
        max_polls: Option<u64>,
    },
    /// Feed a recorded `rate,interval_ms` trace through the tracker
    Replay {
        /// Trace CSV; the leading rows must be at rest for calibration
        #[arg(long, value_name = "FILE")]
        trace: PathBuf,
    },
    /// Open the sensor, calibrate once and report the bias
    SelfCheck,
}
