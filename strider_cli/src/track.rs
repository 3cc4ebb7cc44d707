//! Tracker assembly from config, the text/JSON display, and the three run modes.

use std::sync::atomic::AtomicBool;

use eyre::WrapErr;
use strider_config::{Config, TraceRow};
use strider_core::error::Result;
use strider_core::runner::run;
use strider_core::{
    CalibrationCfg, DisplayCfg, HistoryPoint, IntegratorParams, Pacing, PollBudget, RunParams,
    RunSummary, SamplingCfg, Snapshot, Tracker, WindowState,
};
use strider_hardware::ReplayReader;
use strider_traits::{MonotonicClock, RateReader, RawSample};

/// Polls allowed per calibration sample when self-check has no configured budget.
const SELF_CHECK_POLLS_PER_SAMPLE: u64 = 1000;

/// Overrides taken from `run` flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOpts {
    pub max_samples: Option<u64>,
    pub poll_hz: Option<u32>,
    pub refresh_ms: Option<u64>,
    pub max_polls: Option<u64>,
}

#[cfg(not(all(feature = "hardware", target_os = "linux")))]
pub fn sim_params(cfg: &Config, stalled: bool) -> strider_hardware::SimParams {
    strider_hardware::SimParams {
        bias: cfg.simulation.bias,
        amplitude: cfg.simulation.amplitude,
        period_ms: cfg.simulation.period_ms,
        ready_every: cfg.simulation.ready_every,
        rest_samples: cfg.calibration.samples,
        stalled,
    }
}

fn build_tracker<R: RateReader>(
    reader: R,
    cfg: &Config,
    calibration: CalibrationCfg,
) -> Result<Tracker<R>> {
    let params: IntegratorParams = (&cfg.integrator).into();
    Tracker::builder()
        .with_reader(reader)
        .with_integrator(params)
        .with_calibration(calibration)
        .build()
}

/// Calibrate against `reader`, then track until Ctrl-C or `max_samples`.
pub fn run_live<R: RateReader>(
    reader: R,
    cfg: &Config,
    opts: RunOpts,
    json: bool,
    shutdown: &AtomicBool,
) -> Result<RunSummary> {
    let mut calibration: CalibrationCfg = (&cfg.calibration).into();
    if let Some(max) = opts.max_polls {
        calibration.budget = PollBudget::MaxPolls(max);
    }
    let mut tracker = build_tracker(reader, cfg, calibration)?;

    if !json {
        println!("Calibrating, keep the sensor still...");
    }
    let offset = tracker.calibrate()?;
    tracing::info!(offset = offset.get(), "tracker ready");

    let mut sampling: SamplingCfg = (&cfg.sampling).into();
    if let Some(hz) = opts.poll_hz {
        sampling.poll_hz = hz;
    }
    let mut display: DisplayCfg = (&cfg.display).into();
    if let Some(ms) = opts.refresh_ms {
        display.refresh_ms = ms;
    }
    let params = RunParams {
        pacing: Pacing::Paced(sampling.poll_hz),
        display,
        max_samples: opts.max_samples,
        max_idle_polls: None,
        max_polls: None,
    };

    let mut view = Display::new(json);
    let summary = run(&mut tracker, &MonotonicClock::new(), &params, shutdown, |t| {
        view.refresh(&t.snapshot());
    })?;
    view.refresh(&tracker.snapshot());
    Ok(summary)
}

/// Run a recorded trace through calibration and integration as fast as possible.
///
/// Rows without a rate replay as `NotReady` polls; the run ends when every
/// recorded poll has been handed out.
pub fn replay(
    rows: &[TraceRow],
    cfg: &Config,
    json: bool,
    shutdown: &AtomicBool,
) -> Result<RunSummary> {
    let available = rows.iter().filter(|r| r.rate.is_some()).count() as u64;
    let mut calibration: CalibrationCfg = (&cfg.calibration).into();
    if available < u64::from(calibration.samples) {
        eyre::bail!(
            "trace has {available} samples but calibration needs {} at-rest samples",
            calibration.samples
        );
    }
    // An exhausted trace never becomes ready again; cap calibration at its length.
    let recorded = rows.len() as u64;
    calibration.budget = match calibration.budget {
        PollBudget::MaxPolls(max) => PollBudget::MaxPolls(max.min(recorded)),
        PollBudget::Unbounded => PollBudget::MaxPolls(recorded),
    };

    let reader = ReplayReader::new(
        rows.iter()
            .map(|r| r.rate.map(|rate| RawSample::new(rate, r.interval_ms))),
    );
    let mut tracker = build_tracker(reader, cfg, calibration)?;
    tracker.calibrate().wrap_err("calibrate from trace")?;

    let params = RunParams {
        pacing: Pacing::Unpaced,
        display: (&cfg.display).into(),
        max_samples: None,
        max_idle_polls: None,
        max_polls: Some(tracker.reader().remaining() as u64),
    };
    let mut view = Display::new(json);
    let summary = run(&mut tracker, &MonotonicClock::new(), &params, shutdown, |t| {
        view.refresh(&t.snapshot());
    })?;
    view.refresh(&tracker.snapshot());
    tracing::info!(
        polls = summary.polls,
        samples = summary.samples,
        "replay finished"
    );
    Ok(summary)
}

/// Calibrate once with a bounded budget and report the bias.
pub fn self_check<R: RateReader>(reader: R, cfg: &Config, json: bool) -> Result<()> {
    let mut calibration: CalibrationCfg = (&cfg.calibration).into();
    if calibration.budget == PollBudget::Unbounded {
        calibration.budget =
            PollBudget::MaxPolls(u64::from(calibration.samples) * SELF_CHECK_POLLS_PER_SAMPLE);
    }
    let mut tracker = build_tracker(reader, cfg, calibration)?;
    let offset = tracker.calibrate()?;
    let params: IntegratorParams = (&cfg.integrator).into();
    let bias_dps = f64::from(offset.get()) * params.sensitivity_dps_per_lsb;
    if json {
        println!(
            "{}",
            serde_json::json!({ "ok": true, "bias_lsb": offset.get(), "bias_dps": bias_dps })
        );
    } else {
        println!("OK: bias {} LSB ({bias_dps:.3} dps)", offset.get());
    }
    Ok(())
}

/// Terminal rendering of tracker snapshots.
pub struct Display {
    json: bool,
    announced: bool,
}

impl Display {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            announced: false,
        }
    }

    pub fn refresh(&mut self, snap: &Snapshot) {
        if self.json {
            println!("{}", snapshot_json(snap));
            return;
        }
        println!("Distance: {} Meters", whole_meters(snap.distance_m));
        println!("[{}]", sparkline(&snap.history));
        if let Some(d) = snap.window_closed_distance_m
            && !self.announced
        {
            println!("In the first window you have traveled: {} meters", whole_meters(d));
            self.announced = true;
        }
    }
}

fn whole_meters(d: f64) -> i64 {
    d.trunc() as i64
}

const RAMP: &[u8] = b"_.-:=+*#%@";

/// One character per history point, scaled to the largest distance.
pub fn sparkline(points: &[HistoryPoint]) -> String {
    let max = points.iter().map(|p| p.distance_m).fold(0.0, f64::max);
    let top = RAMP.len() - 1;
    points
        .iter()
        .map(|p| {
            let idx = if max > 0.0 {
                ((p.distance_m / max) * top as f64).round() as usize
            } else {
                0
            };
            RAMP[idx.min(top)] as char
        })
        .collect()
}

pub fn snapshot_json(snap: &Snapshot) -> serde_json::Value {
    let history: Vec<serde_json::Value> = snap
        .history
        .iter()
        .map(|p| serde_json::json!({ "t_ms": p.t_ms, "distance_m": p.distance_m }))
        .collect();
    serde_json::json!({
        "distance_m": snap.distance_m,
        "window_closed": snap.window == WindowState::Closed,
        "window_closed_distance_m": snap.window_closed_distance_m,
        "history": history,
    })
}
