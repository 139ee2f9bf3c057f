// File: crates/chart-core/src/view.rs
// First-class view state: visible ranges and helpers for pan/zoom/autoscale.

use crate::Chart;
use crate::geometry::RectI32;
use crate::types::Insets;

/// Fraction of the y span added above and below the data.
pub const Y_MARGIN: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// Data extents of every series in `chart`, with a small y margin.
    /// Charts with no finite samples get the unit square.
    pub fn from_chart(chart: &Chart) -> Self {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for ((sx0, sx1), (sy0, sy1)) in chart.series.iter().filter_map(|s| s.extents()) {
            x_min = x_min.min(sx0);
            x_max = x_max.max(sx1);
            y_min = y_min.min(sy0);
            y_max = y_max.max(sy1);
        }
        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        }
        // A single frame still gets a usable x range.
        if (x_max - x_min).abs() < 1e-9 { x_min -= 0.5; x_max += 0.5; }
        if (y_max - y_min).abs() < 1e-9 { y_min -= 0.5; y_max += 0.5; }
        let ym = (y_max - y_min) * Y_MARGIN;
        Self { x_min, x_max, y_min: y_min - ym, y_max: y_max + ym }
    }

    pub fn apply_to_chart(&self, chart: &mut Chart) {
        chart.x_axis.min = self.x_min;
        chart.x_axis.max = self.x_max;
        chart.y_axis.min = self.y_min;
        chart.y_axis.max = self.y_max;
    }

    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64, width: i32, height: i32, insets: &Insets) {
        let plot = RectI32::plot_area(width, height, insets);
        let plot_w = (plot.width() as f64).max(1.0);
        let plot_h = (plot.height() as f64).max(1.0);
        let x_span = self.x_max - self.x_min;
        let y_span = self.y_max - self.y_min;
        let wx = -dx / plot_w * x_span;
        // screen y grows downward
        let wy = dy / plot_h * y_span;
        self.x_min += wx; self.x_max += wx;
        self.y_min += wy; self.y_max += wy;
    }

    /// Zoom keeping the world point under the cursor fixed.
    /// Positive `scroll` zooms in.
    pub fn zoom_at_pixel(&mut self, scroll: f64, cursor_x: f64, cursor_y: f64, width: i32, height: i32, insets: &Insets) {
        let plot = RectI32::plot_area(width, height, insets);
        let (l, rpx) = (plot.left as f64, plot.right as f64);
        let (t, bpx) = (plot.top as f64, plot.bottom as f64);
        let plot_w = (rpx - l).max(1.0); let plot_h = (bpx - t).max(1.0);
        let cx = cursor_x.clamp(l, rpx); let cy = cursor_y.clamp(t, bpx);
        let x_span = self.x_max - self.x_min; let y_span = self.y_max - self.y_min;
        let wx = self.x_min + (cx - l) / plot_w * x_span;
        let wy = self.y_max - (cy - t) / plot_h * y_span;
        let factor = (1.0 - scroll).clamp(0.1, 10.0);
        let nx = x_span * factor; let ny = y_span * factor;
        let rx = (wx - self.x_min) / x_span; let ry = (self.y_max - wy) / y_span;
        self.x_min = wx - rx * nx; self.x_max = self.x_min + nx;
        self.y_max = wy + ry * ny; self.y_min = self.y_max - ny;
    }
}
