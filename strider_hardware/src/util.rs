use std::time::Instant;

use strider_traits::Clock;

/// Free-running lap timer behind every `RateReader`.
///
/// `lap_ms` reports the milliseconds since the previous lap (or since
/// construction) and restarts the timer. Readers call it exactly once per
/// successful sample so that the reported interval spans success to success.
#[derive(Debug, Clone)]
pub struct IntervalTimer<C: Clock> {
    clock: C,
    started: Instant,
}

impl<C: Clock> IntervalTimer<C> {
    pub fn start(clock: C) -> Self {
        let started = clock.now();
        Self { clock, started }
    }

    /// Milliseconds since the last lap without restarting.
    pub fn peek_ms(&self) -> u32 {
        u32::try_from(self.clock.ms_since(self.started)).unwrap_or(u32::MAX)
    }

    /// Milliseconds since the last lap; restarts the timer.
    pub fn lap_ms(&mut self) -> u32 {
        let now = self.clock.now();
        let ms = now.saturating_duration_since(self.started).as_millis();
        self.started = now;
        u32::try_from(ms).unwrap_or(u32::MAX)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
