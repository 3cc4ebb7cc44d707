#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and recorded-trace parsing for the distance tracker.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//!   Every section is optional; an empty file yields the reference device.
//! - Trace CSV loader enforces headers so recorded sessions can be replayed.
use serde::Deserialize;

/// Recorded sample trace schema, one row per poll.
///
/// Expected headers:
/// rate,interval_ms
///
/// An empty `rate` cell records a poll that found no new data.
///
/// Example:
/// rate,interval_ms
/// -31,100
/// ,0
/// -1024,101
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TraceRow {
    pub rate: Option<i16>,
    pub interval_ms: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SensorCfg {
    pub spi_bus: u8,
    pub slave_select: u8,
    /// SPI clock in Hz.
    pub clock_hz: u32,
}

impl Default for SensorCfg {
    fn default() -> Self {
        Self {
            spi_bus: 0,
            slave_select: 0,
            clock_hz: 1_000_000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CalibrationCfg {
    /// Number of at-rest samples averaged into the bias.
    pub samples: u32,
    /// Give up after this many polls. Absent means wait forever.
    pub max_polls: Option<u64>,
}

impl Default for CalibrationCfg {
    fn default() -> Self {
        Self {
            samples: 300,
            max_polls: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IntegratorCfg {
    /// Sensor sensitivity in millidegrees per second per LSB (datasheet, 245 dps range).
    pub sensitivity_mdps_per_lsb: f64,
    /// Angular velocities below this (deg/s) count as standing still.
    pub noise_threshold_dps: f64,
    /// Radius of the rotating segment in meters.
    pub radius_m: f64,
}

impl Default for IntegratorCfg {
    fn default() -> Self {
        Self {
            sensitivity_mdps_per_lsb: 8.75,
            noise_threshold_dps: 2.0,
            radius_m: 1.55,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SamplingCfg {
    /// Sampling loop rate. The reference device polls every 100 ms.
    pub poll_hz: u32,
}

impl Default for SamplingCfg {
    fn default() -> Self {
        Self { poll_hz: 10 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayCfg {
    /// Minimum time between display refreshes.
    pub refresh_ms: u64,
}

impl Default for DisplayCfg {
    fn default() -> Self {
        Self { refresh_ms: 1000 }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

/// Parameters of the simulated gyro used when no sensor backend is built in.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationCfg {
    pub bias: i16,
    pub amplitude: i16,
    pub period_ms: u64,
    pub ready_every: u32,
}

impl Default for SimulationCfg {
    fn default() -> Self {
        Self {
            bias: -25,
            amplitude: 8000,
            period_ms: 1000,
            ready_every: 1,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub sensor: SensorCfg,
    pub calibration: CalibrationCfg,
    pub integrator: IntegratorCfg,
    pub sampling: SamplingCfg,
    pub display: DisplayCfg,
    pub logging: Logging,
    pub simulation: SimulationCfg,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

pub fn load_trace_csv(path: &std::path::Path) -> eyre::Result<Vec<TraceRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open trace CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let expected = ["rate", "interval_ms"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "trace CSV must have headers 'rate,interval_ms', got: {}",
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<TraceRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }
    if rows.is_empty() {
        eyre::bail!("trace CSV {:?} has no samples", path);
    }
    Ok(rows)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Sensor
        if self.sensor.clock_hz == 0 {
            eyre::bail!("sensor.clock_hz must be > 0");
        }
        if self.sensor.clock_hz > 10_000_000 {
            eyre::bail!("sensor.clock_hz exceeds the 10 MHz SPI limit of the gyro");
        }

        // Calibration
        if self.calibration.samples == 0 {
            eyre::bail!("calibration.samples must be >= 1");
        }
        if let Some(max) = self.calibration.max_polls
            && max < u64::from(self.calibration.samples)
        {
            eyre::bail!("calibration.max_polls must be >= calibration.samples");
        }

        // Integrator
        let i = &self.integrator;
        if !(i.sensitivity_mdps_per_lsb.is_finite() && i.sensitivity_mdps_per_lsb > 0.0) {
            eyre::bail!("integrator.sensitivity_mdps_per_lsb must be > 0");
        }
        if i.sensitivity_mdps_per_lsb > 1000.0 {
            eyre::bail!("integrator.sensitivity_mdps_per_lsb must be <= 1000");
        }
        if !i.noise_threshold_dps.is_finite() || i.noise_threshold_dps.is_sign_negative() {
            eyre::bail!("integrator.noise_threshold_dps must be >= 0");
        }
        if !(i.radius_m.is_finite() && i.radius_m > 0.0) {
            eyre::bail!("integrator.radius_m must be > 0");
        }
        if i.radius_m > 10.0 {
            eyre::bail!("integrator.radius_m must be <= 10");
        }

        // Sampling
        if self.sampling.poll_hz == 0 {
            eyre::bail!("sampling.poll_hz must be > 0");
        }

        // Display
        if self.display.refresh_ms > 60 * 60 * 1000 {
            eyre::bail!("display.refresh_ms is unreasonably large (>1h)");
        }

        // Logging
        if let Some(r) = self.logging.rotation.as_deref()
            && !matches!(r, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        // Simulation
        if self.simulation.ready_every == 0 {
            eyre::bail!("simulation.ready_every must be >= 1");
        }
        if self.simulation.period_ms == 0 {
            eyre::bail!("simulation.period_ms must be >= 1");
        }

        Ok(())
    }
}
