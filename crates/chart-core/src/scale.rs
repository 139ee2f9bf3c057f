// File: crates/chart-core/src/scale.rs
// Summary: Linear value <-> pixel transforms for the X and Y axes.

use crate::axis::Axis;
use crate::geometry::RectI32;

/// Maps `[vmin, vmax]` onto the pixel interval `[px0, px1]`.
/// `px1 < px0` is allowed (the Y axis grows upward on screen).
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    pub px0: f32,
    pub px1: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl LinearScale {
    pub fn new(px0: f32, px1: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { px0, px1, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    /// Horizontal scale for `axis` across the plot rect.
    pub fn x(axis: &Axis, plot: &RectI32) -> Self {
        Self::new(plot.left as f32, plot.right as f32, axis.min, axis.max)
    }

    /// Vertical scale for `axis`; `min` sits at the bottom edge.
    pub fn y(axis: &Axis, plot: &RectI32) -> Self {
        Self::new(plot.bottom as f32, plot.top as f32, axis.min, axis.max)
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let t = (v - self.vmin) / (self.vmax - self.vmin);
        self.px0 + (t as f32) * (self.px1 - self.px0)
    }
}
