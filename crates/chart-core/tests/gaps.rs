// File: crates/chart-core/tests/gaps.rs
// Purpose: Non-finite samples leave a visible gap, with and without LTTB.

use chart_core::{Axis, Chart, RenderOptions, Series};

fn pixel(px: &[u8], stride: usize, x: usize, y: usize) -> [u8; 4] {
    let i = y * stride + x * 4;
    [px[i], px[i + 1], px[i + 2], px[i + 3]]
}

fn opts() -> RenderOptions {
    let mut opts = RenderOptions::default();
    opts.draw_labels = false;
    opts
}

/// Any first-palette (blue) pixel in columns `xs`, inside the default plot area.
fn blue_in_columns(chart: &Chart, xs: std::ops::RangeInclusive<usize>) -> bool {
    let (px, _, _, stride) = chart.render_to_rgba8(&opts()).expect("rgba render");
    xs.flat_map(|x| (25..580).map(move |y| (x, y)))
        .map(|(x, y)| pixel(&px, stride, x, y))
        .any(|[r, _, b, _]| b > 150 && r < 120)
}

fn short_chart(ys: &[f64]) -> Chart {
    let mut chart = Chart::new();
    chart.x_axis = Axis::new("frame", 0.0, 6.0);
    chart.y_axis = Axis::new("rad", -1.0, 1.0);
    chart.add_series(Series::indexed("pitch", ys.iter().copied()));
    chart
}

#[test]
fn nan_breaks_short_series() {
    // x = 2.5 sits between grid lines; plot spans 84..1000 for 0..6.
    let cols = 462..=469;
    let solid = short_chart(&[0.1, 0.5, 0.05, -0.4, 0.2, 0.3, 0.8]);
    assert!(blue_in_columns(&solid, cols.clone()), "control: line crosses x = 2.5");

    let gapped = short_chart(&[0.1, 0.5, f64::NAN, -0.4, 0.2, f64::NAN, 0.8]);
    assert!(!blue_in_columns(&gapped, cols), "no stroke across the NaN frame");
}

fn long_chart(gap: bool) -> Chart {
    let n = 4000;
    let ys = (0..n).map(|i| if gap && (1900..2100).contains(&i) { f64::NAN } else { 0.0 });
    let mut chart = Chart::new();
    chart.x_axis = Axis::new("frame", 0.0, (n - 1) as f64);
    chart.y_axis = Axis::new("rad", -1.0, 1.0);
    chart.add_series(Series::indexed("pitch", ys));
    chart
}

#[test]
fn nan_breaks_downsampled_series() {
    // 4000 samples exceed the 2 x 916 px budget, so the series goes through LTTB.
    // Frame 2000 maps to column ~542.
    let cols = 538..=546;
    assert!(blue_in_columns(&long_chart(false), cols.clone()), "control: flat line crosses frame 2000");
    assert!(!blue_in_columns(&long_chart(true), cols), "gap kept after downsampling");
}
