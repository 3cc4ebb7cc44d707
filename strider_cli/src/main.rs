mod cli;
mod error_fmt;
mod track;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use eyre::{Result, WrapErr};
use strider_config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use crate::error_fmt::{CONFIG_ERROR_PREFIX, exit_code_for_error, format_error_json, humanize};
use crate::track::RunOpts;

fn main() {
    if let Err(e) = real_main() {
        let json = JSON_MODE.get().copied().unwrap_or(false);
        tracing::error!(error = %e, "strider failed");
        if json {
            println!("{}", format_error_json(&e));
        } else {
            eprintln!("{}", humanize(&e));
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

fn real_main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    let cfg = load_config(&cli.config)?;
    let level = cli
        .log_level
        .as_deref()
        .or(cfg.logging.level.as_deref())
        .unwrap_or("info");
    init_tracing(cli.json, level, &cfg.logging)?;
    tracing::debug!(config = %cli.config.display(), "config loaded");

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&shutdown);
        ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
            .wrap_err("install Ctrl-C handler")?;
    }

    match cli.cmd {
        Commands::Run {
            max_samples,
            poll_hz,
            refresh_ms,
            max_polls,
        } => {
            let opts = RunOpts {
                max_samples,
                poll_hz,
                refresh_ms,
                max_polls,
            };
            let reader = open_reader(&cfg)?;
            let summary = track::run_live(reader, &cfg, opts, cli.json, &shutdown)?;
            tracing::info!(
                samples = summary.samples,
                distance_m = summary.distance_m,
                "run finished"
            );
        }
        Commands::Replay { trace } => {
            let rows = strider_config::load_trace_csv(&trace)?;
            track::replay(&rows, &cfg, cli.json, &shutdown)?;
        }
        Commands::SelfCheck => {
            let reader = open_reader(&cfg)?;
            track::self_check(reader, &cfg, cli.json)?;
        }
    }
    Ok(())
}

/// Missing file means defaults; anything unreadable or invalid is a config error.
fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("{CONFIG_ERROR_PREFIX}: read {}: {e}", path.display()))?;
    let cfg = strider_config::load_toml(&text)
        .map_err(|e| eyre::eyre!("{CONFIG_ERROR_PREFIX}: {}: {e}", path.display()))?;
    cfg.validate()
        .map_err(|e| eyre::eyre!("{CONFIG_ERROR_PREFIX}: {e}"))?;
    Ok(cfg)
}

fn init_tracing(json: bool, level: &str, logging: &strider_config::Logging) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .wrap_err_with(|| format!("invalid log level {level:?}"))?;

    // Console goes to stderr so stdout carries only the display.
    let console: Box<dyn Layer<Registry> + Send + Sync> = if json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    let file_layer = match logging.file.as_deref() {
        Some(file) => {
            let path = Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("logging.file {file:?} has no file name"))?;
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().json().with_ansi(false).with_writer(writer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .with(filter)
        .try_init()
        .wrap_err("install tracing subscriber")?;
    Ok(())
}

#[cfg(all(feature = "hardware", target_os = "linux"))]
fn open_reader(cfg: &Config) -> Result<strider_hardware::L3gGyro> {
    let mut gyro = strider_hardware::L3gGyro::open(
        cfg.sensor.spi_bus,
        cfg.sensor.slave_select,
        cfg.sensor.clock_hz,
    )?;
    let who_am_i = gyro.identify()?;
    tracing::info!(who_am_i, bus = cfg.sensor.spi_bus, "gyro identified");
    Ok(gyro)
}

#[cfg(not(all(feature = "hardware", target_os = "linux")))]
fn open_reader(cfg: &Config) -> Result<strider_hardware::SimulatedGyro> {
    // Test hook: make the simulated gyro never report data.
    const SIM_STALL_ENV: &str = "STRIDER_TEST_SIM_STALL";
    let stalled = std::env::var(SIM_STALL_ENV).is_ok_and(|v| v == "1");
    if stalled {
        tracing::warn!("{SIM_STALL_ENV}=1: simulated gyro will never report data");
    }
    Ok(strider_hardware::SimulatedGyro::new(track::sim_params(
        cfg, stalled,
    )))
}
