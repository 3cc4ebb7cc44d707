//! Test and helper mocks for strider_core

use std::collections::VecDeque;

use strider_traits::{NotReady, RateReader, RawSample};

/// Reader that follows a fixed script: `Some` entries are delivered, `None`
/// entries report `NotReady`. After the script ends every poll is `NotReady`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedReader {
    script: VecDeque<Option<RawSample>>,
    polls: u64,
}

impl ScriptedReader {
    pub fn from_script(script: impl IntoIterator<Item = Option<RawSample>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            polls: 0,
        }
    }

    /// Every poll delivers the next sample.
    pub fn ready(samples: impl IntoIterator<Item = RawSample>) -> Self {
        Self::from_script(samples.into_iter().map(Some))
    }

    /// `n` at-rest samples of `rate`, e.g. to satisfy calibration.
    pub fn at_rest(rate: i16, n: usize, interval_ms: u32) -> Self {
        Self::ready(std::iter::repeat_n(RawSample::new(rate, interval_ms), n))
    }

    /// Append more entries to the end of the script.
    pub fn then(mut self, script: impl IntoIterator<Item = Option<RawSample>>) -> Self {
        self.script.extend(script);
        self
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl RateReader for ScriptedReader {
    fn poll(&mut self) -> Result<RawSample, NotReady> {
        self.polls += 1;
        self.script.pop_front().flatten().ok_or(NotReady)
    }
}
