//! Bounded history of the distance estimate over the first observation window.
//!
//! Storage is a fixed array plus a length, so memory use never changes after
//! construction. Once full the window closes for good and later samples are
//! ignored.

/// Points kept by the reference device (one screen-width plot).
pub const HISTORY_CAPACITY: usize = 40;

/// One recorded point of the distance trace.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HistoryPoint {
    /// Sum of the sample intervals seen by the recorder up to this point.
    pub t_ms: u64,
    pub distance_m: f64,
}

/// Whether the recorder still accepts points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Open,
    Closed,
}

#[derive(Debug, Clone)]
pub struct History<const N: usize = HISTORY_CAPACITY> {
    points: [HistoryPoint; N],
    len: usize,
    elapsed_ms: u64,
}

impl<const N: usize> Default for History<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> History<N> {
    pub const CAPACITY: usize = N;

    pub const fn new() -> Self {
        Self {
            points: [HistoryPoint {
                t_ms: 0,
                distance_m: 0.0,
            }; N],
            len: 0,
            elapsed_ms: 0,
        }
    }

    /// Append `(elapsed, distance_m)` while the window is open, where elapsed
    /// is the running sum of every `interval_ms` passed in so far.
    /// Returns whether a point was appended; a closed window is left untouched.
    pub fn record(&mut self, distance_m: f64, interval_ms: u32) -> bool {
        if self.len >= N {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(u64::from(interval_ms));
        self.points[self.len] = HistoryPoint {
            t_ms: self.elapsed_ms,
            distance_m,
        };
        self.len += 1;
        true
    }

    /// Recorded points in chronological order.
    pub fn points(&self) -> &[HistoryPoint] {
        &self.points[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn state(&self) -> WindowState {
        if self.len >= N {
            WindowState::Closed
        } else {
            WindowState::Open
        }
    }

    /// Time covered by the recorded points.
    pub fn span_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Distance at the moment the window closed; `None` while still open.
    pub fn closing_distance_m(&self) -> Option<f64> {
        match self.state() {
            WindowState::Closed => self.points().last().map(|p| p.distance_m),
            WindowState::Open => None,
        }
    }
}
