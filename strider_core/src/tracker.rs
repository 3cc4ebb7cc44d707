//! The per-run state machine (`Tracker`).
//!
//! `Uninitialized -> Calibrating -> Steady`, with no way back. Only `Steady`
//! integrates samples; the history window closes independently of it.

use strider_traits::{RateReader, RawSample};
use tracing::{debug, info};

use crate::calibration::{CalibrationOffset, try_calibrate};
use crate::config::{CalibrationCfg, IntegratorParams};
use crate::error::{Result, StriderError};
use crate::integrator::Integrator;
use crate::status::TrackStatus;
use crate::window::{History, HistoryPoint, WindowState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Calibrating,
    Steady,
}

/// Read-only view of everything a display needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub distance_m: f64,
    pub history: Vec<HistoryPoint>,
    pub window: WindowState,
    pub window_closed_distance_m: Option<f64>,
}

/// Owns the reader, the calibrated integrator and the history window.
pub struct Tracker<R> {
    pub(crate) reader: R,
    pub(crate) params: IntegratorParams,
    pub(crate) calibration: CalibrationCfg,
    pub(crate) phase: Phase,
    pub(crate) integrator: Option<Integrator>,
    pub(crate) history: History,
}

impl<R: RateReader> core::fmt::Debug for Tracker<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracker")
            .field("phase", &self.phase)
            .field("offset", &self.offset())
            .field("distance_m", &self.distance_m())
            .field("history_len", &self.history.len())
            .finish()
    }
}

impl<R: RateReader> Tracker<R> {
    /// Estimate the sensor bias; must be called exactly once before `step`.
    ///
    /// Blocks until the configured number of samples has been read, or until
    /// the poll budget runs out. On a stalled calibration the tracker goes
    /// back to `Uninitialized` so the caller may retry.
    pub fn calibrate(&mut self) -> Result<CalibrationOffset> {
        if self.phase != Phase::Uninitialized {
            return Err(StriderError::State(format!(
                "calibrate called in phase {:?}",
                self.phase
            ))
            .into());
        }
        self.phase = Phase::Calibrating;
        info!(samples = self.calibration.samples, "calibrating, keep the sensor still");
        match try_calibrate(
            &mut self.reader,
            self.calibration.samples,
            self.calibration.budget,
        ) {
            Ok(offset) => {
                self.integrator = Some(Integrator::new(self.params, offset));
                self.phase = Phase::Steady;
                Ok(offset)
            }
            Err(e) => {
                self.phase = Phase::Uninitialized;
                Err(e.into())
            }
        }
    }

    /// Poll the reader once and fold in the sample if there is one.
    pub fn step(&mut self) -> Result<TrackStatus> {
        self.ensure_steady()?;
        match self.reader.poll() {
            Ok(raw) => self.ingest(raw),
            Err(_) => Ok(TrackStatus::NotReady),
        }
    }

    /// Fold in a sample obtained outside of `step`.
    pub fn ingest(&mut self, raw: RawSample) -> Result<TrackStatus> {
        self.ensure_steady()?;
        let integrator = self
            .integrator
            .as_mut()
            .ok_or_else(|| StriderError::State("steady without integrator".into()))?;
        let step = integrator.process(raw);

        let was_open = self.history.state() == WindowState::Open;
        let recorded = self.history.record(step.distance_m, raw.interval_ms);
        if was_open && self.history.state() == WindowState::Closed {
            info!(
                distance_m = step.distance_m,
                span_ms = self.history.span_ms(),
                "observation window closed"
            );
            return Ok(TrackStatus::WindowClosed {
                distance_m: step.distance_m,
            });
        }
        Ok(TrackStatus::Sampled {
            distance_m: step.distance_m,
            recorded,
        })
    }

    fn ensure_steady(&self) -> Result<()> {
        if self.phase == Phase::Steady {
            Ok(())
        } else {
            debug!(phase = ?self.phase, "sample rejected before calibration");
            Err(StriderError::State(format!(
                "tracker must be calibrated before sampling (phase {:?})",
                self.phase
            ))
            .into())
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn offset(&self) -> Option<CalibrationOffset> {
        self.integrator.as_ref().map(Integrator::bias)
    }

    /// Current distance estimate in meters; zero before calibration.
    pub fn distance_m(&self) -> f64 {
        self.integrator.as_ref().map_or(0.0, Integrator::distance_m)
    }

    /// Interval of the most recent sample.
    pub fn last_interval_ms(&self) -> u32 {
        self.integrator
            .as_ref()
            .map_or(0, Integrator::last_interval_ms)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn window_state(&self) -> WindowState {
        self.history.state()
    }

    pub fn window_closed_distance_m(&self) -> Option<f64> {
        self.history.closing_distance_m()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            distance_m: self.distance_m(),
            history: self.history.points().to_vec(),
            window: self.history.state(),
            window_closed_distance_m: self.history.closing_distance_m(),
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }
}
