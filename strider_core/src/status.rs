//! Outcome of a single tracker step.

/// Public status of one iteration of the sampling loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackStatus {
    /// Sensor had nothing new; nothing changed.
    NotReady,
    /// A sample was integrated. `recorded` is true while the window was open.
    Sampled { distance_m: f64, recorded: bool },
    /// A sample was integrated and filled the last history slot.
    /// Reported exactly once per run.
    WindowClosed { distance_m: f64 },
}
