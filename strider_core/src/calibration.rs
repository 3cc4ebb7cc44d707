//! Startup bias estimation.
//!
//! While the device rests, a fixed number of raw rate samples are averaged
//! into a [`CalibrationOffset`] that is subtracted from every later reading.

use strider_traits::RateReader;
use tracing::{debug, info};

use crate::error::StriderError;

/// Samples averaged by the reference device.
pub const CALIBRATION_SAMPLE_COUNT: u32 = 300;

const PROGRESS_EVERY: u32 = 100;

/// Sensor output at rest, in raw LSBs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CalibrationOffset(i32);

impl CalibrationOffset {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn new(lsb: i32) -> Self {
        Self(lsb)
    }

    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// How long calibration may keep polling a sensor that is not delivering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollBudget {
    /// Poll until enough samples arrive, however long that takes.
    #[default]
    Unbounded,
    /// Give up after this many `poll` calls, successful or not.
    MaxPolls(u64),
}

impl PollBudget {
    #[inline]
    fn exhausted(self, polls: u64) -> bool {
        match self {
            PollBudget::Unbounded => false,
            PollBudget::MaxPolls(max) => polls >= max,
        }
    }
}

/// Running sum of at-rest samples.
#[derive(Debug, Clone)]
pub struct BiasAccumulator {
    sum: i64,
    collected: u32,
    required: u32,
}

impl BiasAccumulator {
    /// `required` is clamped to at least one sample.
    pub fn new(required: u32) -> Self {
        Self {
            sum: 0,
            collected: 0,
            required: required.max(1),
        }
    }

    /// Add one sample; returns true once the required count is reached.
    /// Samples pushed after completion are ignored.
    pub fn push(&mut self, rate: i16) -> bool {
        if self.is_complete() {
            return true;
        }
        self.sum += i64::from(rate);
        self.collected += 1;
        if self.collected % PROGRESS_EVERY == 0 {
            debug!(
                collected = self.collected,
                required = self.required,
                "calibration progress"
            );
        }
        self.is_complete()
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn required(&self) -> u32 {
        self.required
    }

    pub fn is_complete(&self) -> bool {
        self.collected >= self.required
    }

    /// Mean of the collected samples, truncated toward zero, once complete.
    pub fn offset(&self) -> Option<CalibrationOffset> {
        self.is_complete().then(|| self.mean())
    }

    fn mean(&self) -> CalibrationOffset {
        // The mean of i16 samples always fits in i16.
        let mean = self.sum / i64::from(self.collected.max(1));
        CalibrationOffset(mean as i32)
    }
}

/// Busy-poll `reader` until [`CALIBRATION_SAMPLE_COUNT`] samples arrive and
/// return their mean. `NotReady` results are skipped. Never returns if the
/// sensor never delivers; see [`try_calibrate`] for a bounded variant.
pub fn calibrate<R: RateReader + ?Sized>(reader: &mut R) -> CalibrationOffset {
    match try_calibrate(reader, CALIBRATION_SAMPLE_COUNT, PollBudget::Unbounded) {
        Ok(offset) => offset,
        Err(e) => unreachable!("unbounded calibration cannot stall: {e}"),
    }
}

/// Like [`calibrate`] with a configurable sample count and poll budget.
///
/// Returns [`StriderError::CalibrationStalled`] when the budget runs out
/// before `samples` successful reads.
pub fn try_calibrate<R: RateReader + ?Sized>(
    reader: &mut R,
    samples: u32,
    budget: PollBudget,
) -> Result<CalibrationOffset, StriderError> {
    let mut acc = BiasAccumulator::new(samples);
    let mut polls: u64 = 0;
    loop {
        if budget.exhausted(polls) {
            return Err(StriderError::CalibrationStalled {
                collected: acc.collected(),
                required: acc.required(),
                polls,
            });
        }
        polls += 1;
        if let Ok(sample) = reader.poll()
            && acc.push(sample.rate)
        {
            let offset = acc.mean();
            info!(
                offset = offset.get(),
                samples = acc.collected(),
                polls,
                "calibration complete"
            );
            return Ok(offset);
        }
    }
}
