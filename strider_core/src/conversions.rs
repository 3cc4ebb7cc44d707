//! `From` implementations bridging `strider_config` types to `strider_core` types.

use crate::calibration::PollBudget;
use crate::config::{CalibrationCfg, DisplayCfg, IntegratorParams, SamplingCfg};

// ── IntegratorParams ─────────────────────────────────────────────────────────

impl From<&strider_config::IntegratorCfg> for IntegratorParams {
    fn from(c: &strider_config::IntegratorCfg) -> Self {
        Self {
            sensitivity_dps_per_lsb: c.sensitivity_mdps_per_lsb / 1000.0,
            noise_threshold_dps: c.noise_threshold_dps,
            radius_m: c.radius_m,
        }
    }
}

// ── CalibrationCfg ───────────────────────────────────────────────────────────

impl From<&strider_config::CalibrationCfg> for CalibrationCfg {
    fn from(c: &strider_config::CalibrationCfg) -> Self {
        Self {
            samples: c.samples,
            budget: c
                .max_polls
                .map_or(PollBudget::Unbounded, PollBudget::MaxPolls),
        }
    }
}

// ── SamplingCfg / DisplayCfg ─────────────────────────────────────────────────

impl From<&strider_config::SamplingCfg> for SamplingCfg {
    fn from(c: &strider_config::SamplingCfg) -> Self {
        Self { poll_hz: c.poll_hz }
    }
}

impl From<&strider_config::DisplayCfg> for DisplayCfg {
    fn from(c: &strider_config::DisplayCfg) -> Self {
        Self {
            refresh_ms: c.refresh_ms,
        }
    }
}
