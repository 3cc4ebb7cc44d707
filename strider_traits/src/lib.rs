//! Narrow contracts between the tracking core and its collaborators.
//!
//! The core only ever sees a [`RateReader`]: one signed rate sample plus the
//! milliseconds elapsed since the previous successful read. Bus access,
//! status polling and timers stay behind the implementation.

pub mod clock;

pub use clock::{Clock, MonotonicClock};

/// One successful read from a single-axis rate sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSample {
    /// Angular rate in raw sensor units (LSBs).
    pub rate: i16,
    /// Milliseconds since the previous successful read.
    pub interval_ms: u32,
}

impl RawSample {
    #[inline]
    pub const fn new(rate: i16, interval_ms: u32) -> Self {
        Self { rate, interval_ms }
    }
}

/// The sensor had no new data when polled. Callers retry on the next iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotReady;

impl core::fmt::Display for NotReady {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("sensor data not ready")
    }
}

impl std::error::Error for NotReady {}

/// Non-blocking source of rate samples.
///
/// `poll` must return immediately. On success the reported interval is the
/// time since the previous success; the timer behind it restarts on every
/// success and never on `NotReady`.
pub trait RateReader {
    fn poll(&mut self) -> Result<RawSample, NotReady>;
}

impl<R: RateReader + ?Sized> RateReader for &mut R {
    #[inline]
    fn poll(&mut self) -> Result<RawSample, NotReady> {
        (**self).poll()
    }
}

impl<R: RateReader + ?Sized> RateReader for Box<R> {
    #[inline]
    fn poll(&mut self) -> Result<RawSample, NotReady> {
        (**self).poll()
    }
}
