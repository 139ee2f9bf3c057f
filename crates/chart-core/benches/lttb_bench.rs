// File: crates/chart-core/benches/lttb_bench.rs
// Summary: LTTB throughput on long frame-like traces at window-sized targets.

use chart_core::downsample::lttb;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};

/// Slow oscillation plus a small fast wobble, like a head-pose trace.
fn frame_trace(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let f = i as f64;
            (f, 0.3 * (f * 0.002).sin() + 0.02 * (f * 0.7).cos())
        })
        .collect()
}

fn bench_lttb(c: &mut Criterion) {
    let mut group = c.benchmark_group("lttb");
    for &n in &[20_000usize, 200_000usize] {
        let data = frame_trace(n);
        for &target in &[1_000usize, 2_000usize] {
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_t{target}")), &target, |b, &t| {
                b.iter(|| black_box(lttb(black_box(&data), t)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_lttb);
criterion_main!(benches);
