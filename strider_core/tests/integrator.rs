use rstest::rstest;
use std::f64::consts::TAU;
use strider_core::{CalibrationOffset, Integrator, IntegratorParams, IntegratorState, integrate};
use strider_traits::RawSample;

fn run_one(rate: i16, bias: i32, interval_ms: u32) -> (IntegratorState, f64) {
    let mut state = IntegratorState::default();
    let step = integrate(
        &IntegratorParams::default(),
        RawSample::new(rate, interval_ms),
        CalibrationOffset::new(bias),
        &mut state,
    );
    (state, step.angular_dps)
}

#[test]
fn at_rest_leaves_distance_unchanged() {
    let (state, angular) = run_one(0, 0, 1000);
    assert_eq!(angular, 0.0);
    assert_eq!(state.distance_m, 0.0);
}

#[test]
fn one_second_at_8_75_dps() {
    let (state, angular) = run_one(-1000, 0, 1000);
    assert_eq!(angular, 8.75);
    let expected = 1.0 * (8.75 / 360.0) * TAU * 1.55;
    assert_eq!(state.distance_m, expected);
    assert!((state.distance_m - 0.2367).abs() < 1e-4);
}

#[rstest]
#[case(500, 0, 1000)]
#[case(500, 0, u32::MAX)]
#[case(1, 0, 60_000)]
#[case(i16::MAX, 0, 1000)]
// positive after bias removal
#[case(-100, -5000, 1000)]
fn reverse_motion_contributes_nothing(#[case] rate: i16, #[case] bias: i32, #[case] interval: u32) {
    let (state, angular) = run_one(rate, bias, interval);
    assert_eq!(angular, 0.0);
    assert_eq!(state.distance_m, 0.0);
}

#[rstest]
#[case(-1, 1000)]
#[case(-228, 1000)]
#[case(-228, u32::MAX)]
#[case(-100, 3_600_000)]
fn below_noise_gate_contributes_nothing(#[case] rate: i16, #[case] interval: u32) {
    let (state, angular) = run_one(rate, 0, interval);
    assert_eq!(angular, 0.0);
    assert_eq!(state.distance_m, 0.0);
}

#[test]
fn zero_interval_adds_nothing_even_when_moving() {
    let (state, angular) = run_one(i16::MIN, 0, 0);
    assert!(angular > 100.0);
    assert_eq!(state.distance_m, 0.0);
    assert_eq!(state.last_interval_ms, 0);
}

#[test]
fn contributions_accumulate_over_irregular_intervals() {
    let mut it = Integrator::new(IntegratorParams::default(), CalibrationOffset::new(-20));
    // -1020 - (-20) = -1000 → 8.75 dps
    for interval in [100, 97, 103, 250, 450] {
        it.process(RawSample::new(-1020, interval));
    }
    // total 1000 ms at 8.75 dps
    let expected = 1.0 * (8.75 / 360.0) * TAU * 1.55;
    assert!((it.distance_m() - expected).abs() < 1e-12);
    assert_eq!(it.last_interval_ms(), 450);
}

#[test]
fn custom_params_scale_the_arc() {
    let params = IntegratorParams {
        sensitivity_dps_per_lsb: 0.0175,
        noise_threshold_dps: 0.0,
        radius_m: 0.5,
    };
    let mut state = IntegratorState::default();
    integrate(
        &params,
        RawSample::new(-360, 2000),
        CalibrationOffset::ZERO,
        &mut state,
    );
    // 360 * 0.0175 = 6.3 dps for 2 s
    let expected = 2.0 * (6.3 / 360.0) * TAU * 0.5;
    assert!((state.distance_m - expected).abs() < 1e-12);
}
