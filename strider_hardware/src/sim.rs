//! Synthetic gyro for running the tracker without a sensor attached.

use std::f64::consts::TAU;
use std::time::Instant;

use strider_traits::{Clock, MonotonicClock, NotReady, RateReader, RawSample};

use crate::util::IntervalTimer;

/// Shape of the simulated knee swing.
#[derive(Debug, Clone, Copy)]
pub struct SimParams {
    /// At-rest output in LSBs.
    pub bias: i16,
    /// Peak swing rate in LSBs. The forward half of each stride reads negative.
    pub amplitude: i16,
    /// Stride period in milliseconds.
    pub period_ms: u64,
    /// Data is ready on every n-th poll (1 = every poll).
    pub ready_every: u32,
    /// Number of leading samples reported at rest, covering calibration.
    pub rest_samples: u32,
    /// Never report data (models an unresponsive sensor).
    pub stalled: bool,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            bias: -25,
            amplitude: 8000,
            period_ms: 1000,
            ready_every: 1,
            rest_samples: 300,
            stalled: false,
        }
    }
}

pub struct SimulatedGyro<C: Clock = MonotonicClock> {
    params: SimParams,
    timer: IntervalTimer<C>,
    epoch: Instant,
    polls: u64,
    delivered: u64,
}

impl SimulatedGyro<MonotonicClock> {
    pub fn new(params: SimParams) -> Self {
        Self::with_clock(params, MonotonicClock::new())
    }
}

impl<C: Clock> SimulatedGyro<C> {
    pub fn with_clock(params: SimParams, clock: C) -> Self {
        let epoch = clock.now();
        Self {
            params,
            timer: IntervalTimer::start(clock),
            epoch,
            polls: 0,
            delivered: 0,
        }
    }

    /// Number of samples handed out so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    fn rate_now(&self) -> i16 {
        let p = &self.params;
        if self.delivered < u64::from(p.rest_samples) || p.period_ms == 0 {
            return p.bias;
        }
        let t_ms = self.timer.clock().ms_since(self.epoch);
        let phase = (t_ms % p.period_ms) as f64 / p.period_ms as f64;
        let swing = -f64::from(p.amplitude) * (TAU * phase).sin();
        (f64::from(p.bias) + swing).clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
    }
}

impl<C: Clock> RateReader for SimulatedGyro<C> {
    fn poll(&mut self) -> Result<RawSample, NotReady> {
        if self.params.stalled {
            return Err(NotReady);
        }
        self.polls = self.polls.wrapping_add(1);
        if self.polls % u64::from(self.params.ready_every.max(1)) != 0 {
            return Err(NotReady);
        }
        let rate = self.rate_now();
        let interval_ms = self.timer.lap_ms();
        self.delivered += 1;
        tracing::trace!(rate, interval_ms, "simulated gyro sample");
        Ok(RawSample::new(rate, interval_ms))
    }
}
