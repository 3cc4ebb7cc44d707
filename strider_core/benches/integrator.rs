use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use strider_core::{CalibrationOffset, IntegratorParams, IntegratorState, integrate};
use strider_traits::RawSample;

// Knee-swing trace: negative half-sine strides plus small xorshift jitter
fn synth_trace(n: usize, seed: u32) -> Vec<RawSample> {
    let mut state = seed.max(1);
    let mut jitter = || {
        let mut x = state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        state = x;
        (x % 41) as i32 - 20
    };
    (0..n)
        .map(|i| {
            let phase = (i % 10) as f64 / 10.0;
            let swing = -8000.0 * (std::f64::consts::TAU * phase).sin();
            let rate = (swing as i32 - 25 + jitter()).clamp(i16::MIN as i32, i16::MAX as i32);
            RawSample::new(rate as i16, 100)
        })
        .collect()
}

pub fn bench_integrate(c: &mut Criterion) {
    let mut g = c.benchmark_group("integrate");
    //   BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p strider_core --bench integrator
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(n) = ss.parse::<usize>() {
            g.sample_size(n.max(1));
        }
    } else {
        g.sample_size(50);
    }
    if let Ok(ms) = std::env::var("BENCH_MEAS_MS")
        && let Ok(ms_u64) = ms.parse::<u64>()
    {
        g.measurement_time(std::time::Duration::from_millis(ms_u64));
    }

    let trace = synth_trace(50_000, 0xC0FFEE);
    let bias = CalibrationOffset::new(-25);

    for &threshold in &[0.0f64, 2.0, 20.0] {
        let params = IntegratorParams {
            noise_threshold_dps: threshold,
            ..IntegratorParams::default()
        };
        g.bench_function(format!("trace_gate_{threshold}"), |b| {
            b.iter_batched(
                IntegratorState::default,
                |mut state| {
                    for &raw in black_box(&trace) {
                        integrate(&params, raw, bias, &mut state);
                    }
                    black_box(state.distance_m);
                },
                BatchSize::SmallInput,
            )
        });
    }
    g.finish();
}

criterion_group!(integrator, bench_integrate);
criterion_main!(integrator);
