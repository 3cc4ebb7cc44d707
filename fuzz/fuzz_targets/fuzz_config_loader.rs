#![no_main]
use libfuzzer_sys::fuzz_target;
use strider_core::{CalibrationOffset, IntegratorParams, IntegratorState, integrate};
use strider_traits::RawSample;

fuzz_target!(|data: &str| {
    // Parse and validation errors are fine; panics are not.
    let Ok(cfg) = strider_config::load_toml(data) else {
        return;
    };
    if cfg.validate().is_err() {
        return;
    }
    // A validated config must yield integrator params that never push the
    // estimate backwards or to NaN.
    let params = IntegratorParams::from(&cfg.integrator);
    let mut state = IntegratorState::default();
    for interval_ms in [0, u32::MAX] {
        for rate in [i16::MIN, -1000, 0, 1000, i16::MAX] {
            let before = state.distance_m;
            integrate(&params, RawSample::new(rate, interval_ms), CalibrationOffset::ZERO, &mut state);
            assert!(state.distance_m >= before);
            assert!(!state.distance_m.is_nan());
        }
    }
});
