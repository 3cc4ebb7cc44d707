//! Common time/period helpers for strider_core.

/// Number of microseconds in one second.
pub const MICROS_PER_SEC: u64 = 1_000_000;
/// Number of milliseconds in one second.
pub const MILLIS_PER_SEC: u64 = 1_000;

/// Loop period in microseconds for a given poll rate in Hz.
/// - Clamps `hz` to at least 1 in release builds to avoid division by zero.
/// - Ensures result is at least 1 microsecond.
#[inline]
pub fn period_us(hz: u32) -> u64 {
    debug_assert!(hz > 0, "poll_hz must be > 0");
    (MICROS_PER_SEC / u64::from(hz.max(1))).max(1)
}

/// Loop period in milliseconds for a given poll rate in Hz.
/// - Clamps `hz` to at least 1 in release builds to avoid division by zero.
/// - Ensures result is at least 1 millisecond.
#[inline]
pub fn period_ms(hz: u32) -> u64 {
    debug_assert!(hz > 0, "poll_hz must be > 0");
    (MILLIS_PER_SEC / u64::from(hz.max(1))).max(1)
}

/// Milliseconds as fractional seconds.
#[inline]
pub fn ms_to_secs(ms: u32) -> f64 {
    f64::from(ms) / MILLIS_PER_SEC as f64
}
