#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Gyro distance tracking core (hardware-agnostic).
//!
//! All sensor access goes through `strider_traits::RateReader`: a non-blocking
//! poll that yields one raw rate sample plus the milliseconds since the
//! previous one.
//!
//! ## Architecture
//!
//! - **Calibration**: startup bias estimate from at-rest samples (`calibration`)
//! - **Integration**: bias removal, sign clamp, noise gate, arc length (`integrator`)
//! - **Window**: fixed-capacity history of the first observation window (`window`)
//! - **Tracker**: `Uninitialized -> Calibrating -> Steady` state machine (`tracker`)
//! - **Runner**: paced sampling loop with display refresh gating (`runner`)
//!
//! Everything runs on one thread; the tracker is the single owner of the
//! offset, the running distance and the history.

pub mod builder;
pub mod calibration;
pub mod config;
pub mod conversions;
pub mod error;
pub mod integrator;
pub mod mocks;
pub mod runner;
pub mod status;
pub mod tracker;
pub mod util;
pub mod window;

pub use builder::{Missing, TrackerBuilder};
pub use calibration::{
    BiasAccumulator, CALIBRATION_SAMPLE_COUNT, CalibrationOffset, PollBudget, calibrate,
    try_calibrate,
};
pub use config::{CalibrationCfg, DisplayCfg, IntegratorParams, SamplingCfg};
pub use error::{BuildError, StriderError};
pub use integrator::{IntegrationStep, Integrator, IntegratorState, integrate};
pub use runner::{Pacing, RefreshGate, RunParams, RunSummary};
pub use status::TrackStatus;
pub use tracker::{Phase, Snapshot, Tracker};
pub use window::{HISTORY_CAPACITY, History, HistoryPoint, WindowState};
