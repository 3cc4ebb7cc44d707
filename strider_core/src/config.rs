//! Runtime configuration for the tracker.
//!
//! These are the structs the core operates on. They are separate from the
//! TOML-deserialized config in `strider_config`; see `conversions`.

use crate::calibration::{CALIBRATION_SAMPLE_COUNT, PollBudget};

/// Physical constants of the integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorParams {
    /// Degrees per second per LSB. 8.75 mdps/LSB at the 245 dps full scale, 25 °C.
    pub sensitivity_dps_per_lsb: f64,
    /// Angular velocities below this (deg/s) are treated as exactly zero.
    pub noise_threshold_dps: f64,
    /// Radius of the rotating segment (meters); converts angle to arc length.
    pub radius_m: f64,
}

impl Default for IntegratorParams {
    fn default() -> Self {
        Self {
            sensitivity_dps_per_lsb: 0.00875,
            noise_threshold_dps: 2.0,
            radius_m: 1.55,
        }
    }
}

/// Startup bias estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationCfg {
    /// Successful samples averaged into the offset.
    pub samples: u32,
    pub budget: PollBudget,
}

impl Default for CalibrationCfg {
    fn default() -> Self {
        Self {
            samples: CALIBRATION_SAMPLE_COUNT,
            budget: PollBudget::Unbounded,
        }
    }
}

/// Sampling loop pacing.
#[derive(Debug, Clone, Copy)]
pub struct SamplingCfg {
    /// Poll rate in Hz. 10 Hz matches the reference 100 ms loop.
    pub poll_hz: u32,
}

impl Default for SamplingCfg {
    fn default() -> Self {
        Self { poll_hz: 10 }
    }
}

/// Display refresh throttling.
#[derive(Debug, Clone, Copy)]
pub struct DisplayCfg {
    /// Refresh at most once per this many milliseconds.
    pub refresh_ms: u64,
}

impl Default for DisplayCfg {
    fn default() -> Self {
        Self { refresh_ms: 1000 }
    }
}
