//! The sampling loop: poll, integrate, record, and hand the tracker to the
//! display at a throttled cadence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use strider_traits::{Clock, RateReader};
use tracing::{debug, info};

use crate::config::DisplayCfg;
use crate::error::Result;
use crate::status::TrackStatus;
use crate::tracker::Tracker;
use crate::window::WindowState;

/// How the loop is paced between polls.
#[derive(Debug, Clone, Copy)]
pub enum Pacing {
    /// Sleep one period of the given rate (Hz) after every poll.
    Paced(u32),
    /// Poll back to back (replay, tests).
    Unpaced,
}

#[derive(Debug, Clone, Copy)]
pub struct RunParams {
    pub pacing: Pacing,
    pub display: DisplayCfg,
    /// Stop after this many integrated samples.
    pub max_samples: Option<u64>,
    /// Stop after this many consecutive `NotReady` polls.
    pub max_idle_polls: Option<u64>,
    /// Stop after this many polls, ready or not.
    pub max_polls: Option<u64>,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            pacing: Pacing::Paced(10),
            display: DisplayCfg::default(),
            max_samples: None,
            max_idle_polls: None,
            max_polls: None,
        }
    }
}

/// What the loop did before it stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub polls: u64,
    pub samples: u64,
    pub distance_m: f64,
    pub window: WindowState,
}

/// Lets a refresh through only when strictly more than `interval_ms` has
/// passed since the previous one (or since construction).
#[derive(Debug, Clone)]
pub struct RefreshGate {
    interval_ms: u64,
    last: Instant,
}

impl RefreshGate {
    pub fn new<C: Clock>(interval_ms: u64, clock: &C) -> Self {
        Self {
            interval_ms,
            last: clock.now(),
        }
    }

    pub fn due<C: Clock>(&mut self, clock: &C) -> bool {
        if clock.ms_since(self.last) > self.interval_ms {
            self.last = clock.now();
            true
        } else {
            false
        }
    }
}

/// Drive a calibrated tracker until `shutdown` is set or a stop limit in
/// `params` is reached. `on_refresh` runs after a successful sample whenever
/// the display refresh gate opens.
///
/// Samples are processed strictly in the order the reader produces them.
pub fn run<R, C, F>(
    tracker: &mut Tracker<R>,
    clock: &C,
    params: &RunParams,
    shutdown: &AtomicBool,
    mut on_refresh: F,
) -> Result<RunSummary>
where
    R: RateReader,
    C: Clock,
    F: FnMut(&Tracker<R>),
{
    let period = match params.pacing {
        Pacing::Paced(hz) => Some(Duration::from_micros(crate::util::period_us(hz))),
        Pacing::Unpaced => None,
    };
    let mut gate = RefreshGate::new(params.display.refresh_ms, clock);
    let mut polls: u64 = 0;
    let mut samples: u64 = 0;
    let mut idle: u64 = 0;

    info!(pacing = ?params.pacing, "sampling loop start");
    loop {
        if shutdown.load(Ordering::Relaxed) {
            info!("shutdown requested, leaving sampling loop");
            break;
        }
        if let Some(max) = params.max_samples
            && samples >= max
        {
            debug!(samples, "sample limit reached");
            break;
        }
        if let Some(max) = params.max_idle_polls
            && idle >= max
        {
            debug!(idle, "reader idle, leaving sampling loop");
            break;
        }
        if let Some(max) = params.max_polls
            && polls >= max
        {
            debug!(polls, "poll limit reached");
            break;
        }

        polls += 1;
        match tracker.step()? {
            TrackStatus::NotReady => idle += 1,
            TrackStatus::Sampled { .. } | TrackStatus::WindowClosed { .. } => {
                idle = 0;
                samples += 1;
                if gate.due(clock) {
                    on_refresh(tracker);
                }
            }
        }

        if let Some(p) = period {
            clock.sleep(p);
        }
    }

    let summary = RunSummary {
        polls,
        samples,
        distance_m: tracker.distance_m(),
        window: tracker.window_state(),
    };
    info!(
        polls,
        samples,
        distance_m = summary.distance_m,
        "sampling loop stopped"
    );
    Ok(summary)
}
