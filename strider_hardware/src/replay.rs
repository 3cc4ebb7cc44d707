//! Replays a recorded sample trace through the `RateReader` contract.

use std::collections::VecDeque;

use strider_traits::{NotReady, RateReader, RawSample};

/// Hands out recorded polls in order, then reports `NotReady` forever.
///
/// Each entry is one poll: `Some` is a sample, `None` a poll that found no
/// new data. Intervals come from the recording, so replay is independent of
/// the wall clock and runs as fast as the caller polls.
#[derive(Debug, Clone, Default)]
pub struct ReplayReader {
    pending: VecDeque<Option<RawSample>>,
}

impl ReplayReader {
    pub fn new(polls: impl IntoIterator<Item = Option<RawSample>>) -> Self {
        Self {
            pending: polls.into_iter().collect(),
        }
    }

    /// Recorded polls not yet handed out, including the not-ready ones.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }
}

impl RateReader for ReplayReader {
    fn poll(&mut self) -> Result<RawSample, NotReady> {
        self.pending.pop_front().flatten().ok_or(NotReady)
    }
}
