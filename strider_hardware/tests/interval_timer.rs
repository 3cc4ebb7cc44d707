use rstest::rstest;
use strider_hardware::{IntervalTimer, SimParams, SimulatedGyro};
use strider_traits::clock::test_clock::TestClock;
use strider_traits::{NotReady, RateReader};

#[test]
fn lap_reports_time_since_previous_lap() {
    let clock = TestClock::new();
    let mut timer = IntervalTimer::start(clock.clone());

    clock.advance_ms(120);
    assert_eq!(timer.peek_ms(), 120);
    assert_eq!(timer.lap_ms(), 120);

    clock.advance_ms(7);
    assert_eq!(timer.lap_ms(), 7);
    assert_eq!(timer.lap_ms(), 0);
}

#[rstest]
#[case(1, 100)]
#[case(3, 300)]
#[case(5, 500)]
fn interval_spans_success_to_success(#[case] ready_every: u32, #[case] expected_ms: u32) {
    // Each poll costs 100 ms; NotReady polls must not restart the timer.
    let clock = TestClock::new();
    let mut gyro = SimulatedGyro::with_clock(
        SimParams {
            ready_every,
            ..SimParams::default()
        },
        clock.clone(),
    );

    let mut intervals = Vec::new();
    for _ in 0..(ready_every * 4) {
        clock.advance_ms(100);
        match gyro.poll() {
            Ok(s) => intervals.push(s.interval_ms),
            Err(NotReady) => {}
        }
    }
    assert_eq!(intervals, vec![expected_ms; 4]);
}
