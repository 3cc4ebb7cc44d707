// Focused tests for period helpers.
use strider_core::util::{ms_to_secs, period_ms, period_us};

#[test]
fn period_us_clamps_and_floors() {
    // hz=1 → 1s
    assert_eq!(period_us(1), 1_000_000);
    // hz=10 → the reference 100 ms loop
    assert_eq!(period_us(10), 100_000);
    // Very high hz floors to 1µs minimum
    assert_eq!(period_us(1_000_000), 1);
    assert_eq!(period_us(u32::MAX), 1);
}

#[test]
fn period_ms_minimum_and_resolution_note() {
    assert_eq!(period_ms(1), 1000);
    assert_eq!(period_ms(10), 100);
    // hz>=1000 floors to 0ms but we cap to >=1ms
    assert_eq!(period_ms(1000), 1);
    assert_eq!(period_ms(10_000), 1);
    assert_eq!(period_ms(u32::MAX), 1);
}

#[test]
fn ms_to_secs_is_exact_for_whole_seconds() {
    assert_eq!(ms_to_secs(0), 0.0);
    assert_eq!(ms_to_secs(1000), 1.0);
    assert_eq!(ms_to_secs(250), 0.25);
}

// In debug builds we assert on hz=0 to catch misconfiguration early.
#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "poll_hz must be > 0")]
fn period_us_panics_on_zero_hz_in_debug() {
    let _ = period_us(0);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "poll_hz must be > 0")]
fn period_ms_panics_on_zero_hz_in_debug() {
    let _ = period_ms(0);
}
