//! Type-state builder for `Tracker`.
//!
//! `build()` only exists once a reader has been supplied; parameters are
//! validated there.

use strider_traits::RateReader;

use crate::calibration::PollBudget;
use crate::config::{CalibrationCfg, IntegratorParams};
use crate::error::{BuildError, Result};
use crate::tracker::{Phase, Tracker};
use crate::window::History;

/// Coarsest sensitivity accepted; real rate gyros sit well below 1 dps/LSB.
const MAX_SENSITIVITY_DPS_PER_LSB: f64 = 1.0;
/// Longest lever arm accepted, in meters.
const MAX_RADIUS_M: f64 = 10.0;

/// Placeholder for a reader that has not been supplied yet.
pub struct Missing;

impl Tracker<Missing> {
    /// Start building a Tracker; the reader type is fixed by `with_reader`.
    pub fn builder() -> TrackerBuilder<Missing> {
        TrackerBuilder::default()
    }
}

/// Builder for `Tracker`. All fields are validated on `build()`.
pub struct TrackerBuilder<R> {
    reader: R,
    params: Option<IntegratorParams>,
    calibration: Option<CalibrationCfg>,
}

impl Default for TrackerBuilder<Missing> {
    fn default() -> Self {
        Self {
            reader: Missing,
            params: None,
            calibration: None,
        }
    }
}

impl<R> TrackerBuilder<R> {
    pub fn with_reader<N: RateReader>(self, reader: N) -> TrackerBuilder<N> {
        TrackerBuilder {
            reader,
            params: self.params,
            calibration: self.calibration,
        }
    }

    pub fn with_integrator(mut self, params: IntegratorParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_calibration(mut self, calibration: CalibrationCfg) -> Self {
        self.calibration = Some(calibration);
        self
    }
}

impl<R: RateReader> TrackerBuilder<R> {
    pub fn build(self) -> Result<Tracker<R>> {
        let params = self.params.unwrap_or_default();
        let calibration = self.calibration.unwrap_or_default();
        validate(&params, &calibration)?;
        Ok(Tracker {
            reader: self.reader,
            params,
            calibration,
            phase: Phase::Uninitialized,
            integrator: None,
            history: History::new(),
        })
    }
}

fn validate(params: &IntegratorParams, calibration: &CalibrationCfg) -> Result<()> {
    if !(params.sensitivity_dps_per_lsb.is_finite() && params.sensitivity_dps_per_lsb > 0.0) {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "sensitivity_dps_per_lsb must be > 0",
        )));
    }
    if params.sensitivity_dps_per_lsb > MAX_SENSITIVITY_DPS_PER_LSB {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "sensitivity_dps_per_lsb must be <= 1",
        )));
    }
    if !params.noise_threshold_dps.is_finite() || params.noise_threshold_dps.is_sign_negative() {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "noise_threshold_dps must be >= 0",
        )));
    }
    if !(params.radius_m.is_finite() && params.radius_m > 0.0) {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "radius_m must be > 0",
        )));
    }
    if params.radius_m > MAX_RADIUS_M {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "radius_m must be <= 10",
        )));
    }
    if calibration.samples == 0 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "calibration samples must be >= 1",
        )));
    }
    if let PollBudget::MaxPolls(max) = calibration.budget
        && max < u64::from(calibration.samples)
    {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "calibration poll budget is smaller than the sample count",
        )));
    }
    Ok(())
}
