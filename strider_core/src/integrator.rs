//! Rate-to-distance integration.
//!
//! Each sample goes through, in order:
//! 1. bias removal (`rate - offset`, in `i32` so nothing wraps)
//! 2. sign clamp: only the forward sense (non-positive corrected values)
//!    counts; positive values become zero before taking the magnitude
//! 3. unit conversion to degrees per second
//! 4. noise gate: below the threshold the velocity is exactly zero
//! 5. arc length over the sample interval, added to the running distance
//!
//! Steps 2-4 make every contribution non-negative, so the estimate never
//! decreases.

use std::f64::consts::TAU;

use strider_traits::RawSample;

use crate::calibration::CalibrationOffset;
use crate::config::IntegratorParams;
use crate::util::ms_to_secs;

/// Accumulated output of the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntegratorState {
    /// Integrated distance in meters.
    pub distance_m: f64,
    /// Interval of the most recent sample.
    pub last_interval_ms: u32,
    /// Samples processed so far.
    pub samples: u64,
}

/// Intermediate values of one integration step, for logging and telemetry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationStep {
    pub corrected: i32,
    /// Angular velocity after the noise gate (deg/s).
    pub angular_dps: f64,
    pub increment_m: f64,
    pub distance_m: f64,
}

/// Fold one sample into `state`. Deterministic: identical inputs and prior
/// state give bit-identical results.
pub fn integrate(
    params: &IntegratorParams,
    raw: RawSample,
    bias: CalibrationOffset,
    state: &mut IntegratorState,
) -> IntegrationStep {
    let corrected = i32::from(raw.rate) - bias.get();
    let magnitude = corrected.min(0).unsigned_abs();

    let mut angular_dps = f64::from(magnitude) * params.sensitivity_dps_per_lsb;
    if angular_dps < params.noise_threshold_dps {
        angular_dps = 0.0;
    }

    // A zero factor must not meet a non-finite one: 0 * inf is NaN.
    let increment_m = if raw.interval_ms == 0 || angular_dps == 0.0 {
        0.0
    } else {
        ms_to_secs(raw.interval_ms) * (angular_dps / 360.0) * TAU * params.radius_m
    };
    state.distance_m += increment_m;
    state.last_interval_ms = raw.interval_ms;
    state.samples += 1;

    IntegrationStep {
        corrected,
        angular_dps,
        increment_m,
        distance_m: state.distance_m,
    }
}

/// Integrator bound to a calibration offset; owns the running estimate.
#[derive(Debug, Clone)]
pub struct Integrator {
    params: IntegratorParams,
    bias: CalibrationOffset,
    state: IntegratorState,
}

impl Integrator {
    pub fn new(params: IntegratorParams, bias: CalibrationOffset) -> Self {
        Self {
            params,
            bias,
            state: IntegratorState::default(),
        }
    }

    pub fn process(&mut self, raw: RawSample) -> IntegrationStep {
        let step = integrate(&self.params, raw, self.bias, &mut self.state);
        tracing::trace!(
            interval_ms = raw.interval_ms,
            corrected = step.corrected,
            angular_dps = step.angular_dps,
            distance_m = step.distance_m,
            "integrated sample"
        );
        step
    }

    pub fn bias(&self) -> CalibrationOffset {
        self.bias
    }

    pub fn params(&self) -> &IntegratorParams {
        &self.params
    }

    pub fn state(&self) -> &IntegratorState {
        &self.state
    }

    pub fn distance_m(&self) -> f64 {
        self.state.distance_m
    }

    pub fn last_interval_ms(&self) -> u32 {
        self.state.last_interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_gate_is_strictly_below_threshold() {
        let params = IntegratorParams::default();
        let mut state = IntegratorState::default();
        // 2.0 / 0.00875 = 228.57 LSB: 228 is under, 229 is over
        let under = integrate(&params, RawSample::new(-228, 1000), CalibrationOffset::ZERO, &mut state);
        assert_eq!(under.angular_dps, 0.0);
        assert_eq!(state.distance_m, 0.0);
        let over = integrate(&params, RawSample::new(-229, 1000), CalibrationOffset::ZERO, &mut state);
        assert!(over.angular_dps >= 2.0);
        assert!(state.distance_m > 0.0);
    }

    #[test]
    fn bias_is_removed_before_clamp() {
        let params = IntegratorParams::default();
        let mut state = IntegratorState::default();
        // raw 500 with bias 1500 is -1000 after correction: forward motion
        let step = integrate(
            &params,
            RawSample::new(500, 1000),
            CalibrationOffset::new(1500),
            &mut state,
        );
        assert_eq!(step.corrected, -1000);
        assert_eq!(step.angular_dps, 1000.0 * 0.00875);
    }

    #[test]
    fn correction_does_not_wrap() {
        let params = IntegratorParams::default();
        let mut state = IntegratorState::default();
        let step = integrate(
            &params,
            RawSample::new(i16::MIN, 0),
            CalibrationOffset::new(i32::from(i16::MAX)),
            &mut state,
        );
        assert_eq!(step.corrected, i32::from(i16::MIN) - i32::from(i16::MAX));
        assert_eq!(step.increment_m, 0.0);
    }

    #[test]
    fn zero_interval_never_poisons_the_distance() {
        let params = IntegratorParams {
            sensitivity_dps_per_lsb: 1e306,
            noise_threshold_dps: 2.0,
            radius_m: 1.55,
        };
        let mut state = IntegratorState::default();
        let step = integrate(&params, RawSample::new(-1000, 0), CalibrationOffset::ZERO, &mut state);
        assert!(step.angular_dps.is_infinite());
        assert_eq!(step.increment_m, 0.0);
        assert!(!state.distance_m.is_nan());
        assert_eq!(state.distance_m, 0.0);
    }

    #[test]
    fn tracks_last_interval_and_count() {
        let mut it = Integrator::new(IntegratorParams::default(), CalibrationOffset::ZERO);
        it.process(RawSample::new(0, 97));
        it.process(RawSample::new(0, 103));
        assert_eq!(it.last_interval_ms(), 103);
        assert_eq!(it.state().samples, 2);
        assert_eq!(it.distance_m(), 0.0);
    }
}
