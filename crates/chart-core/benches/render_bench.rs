// File: crates/chart-core/benches/render_bench.rs
// Summary: End-to-end PNG render cost for two long line series.

use anyhow::Result;
use chart_core::{Chart, RenderOptions, Series};
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn build_chart(n: usize) -> Chart {
    let mut ch = Chart::new();
    ch.add_series(Series::indexed("pitch", (0..n).map(|i| (i as f64 * 0.01).sin() * 0.2)));
    ch.add_series(Series::indexed("yawca", (0..n).map(|i| (i as f64 * 0.013).cos() * 0.1)));
    ch.autoscale_axes(0.0);
    ch
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    for &n in &[1_200usize, 50_000usize] {
        group.bench_function(format!("frames_{n}"), |b| {
            let ch = build_chart(n);
            let mut opts = RenderOptions::default();
            opts.width = 800;
            opts.height = 500;
            opts.draw_labels = false;
            b.iter(|| -> Result<()> {
                let bytes = ch.render_to_png_bytes(&opts)?;
                black_box(bytes);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
