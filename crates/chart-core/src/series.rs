// File: crates/chart-core/src/series.rs
// Summary: Named XY line series, the unit a legend entry is drawn for.

use skia_safe as skia;

#[derive(Clone, Debug)]
pub struct Series {
    /// Legend label.
    pub name: String,
    pub data_xy: Vec<(f64, f64)>,
    /// Stroke override; `None` takes the theme palette slot for this series.
    pub color: Option<skia::Color>,
}

impl Series {
    pub fn line(name: impl Into<String>, data: Vec<(f64, f64)>) -> Self {
        Self { name: name.into(), data_xy: data, color: None }
    }

    /// Line over an implicit 0-based index: `ys[i]` is plotted at `x = i`.
    pub fn indexed(name: impl Into<String>, ys: impl IntoIterator<Item = f64>) -> Self {
        let data = ys.into_iter().enumerate().map(|(i, y)| (i as f64, y)).collect();
        Self::line(name, data)
    }

    pub fn with_color(mut self, color: skia::Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn len(&self) -> usize { self.data_xy.len() }

    pub fn is_empty(&self) -> bool { self.data_xy.is_empty() }

    /// (min, max) over finite samples for x and y, or `None` if there are none.
    pub fn extents(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut x = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y = (f64::INFINITY, f64::NEG_INFINITY);
        for &(px, py) in &self.data_xy {
            if !px.is_finite() || !py.is_finite() {
                continue;
            }
            x = (x.0.min(px), x.1.max(px));
            y = (y.0.min(py), y.1.max(py));
        }
        if x.0.is_finite() { Some((x, y)) } else { None }
    }

    /// Downsample XY data using LTTB to at most `max_points`.
    pub fn downsample_xy_lttb(&self, max_points: usize) -> Self {
        use crate::downsample::lttb;
        let data = if self.data_xy.len() > max_points && max_points >= 2 {
            lttb(&self.data_xy, max_points)
        } else {
            self.data_xy.clone()
        };
        Series { name: self.name.clone(), data_xy: data, color: self.color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_assigns_frame_positions() {
        let s = Series::indexed("a", [0.5, -1.0, 2.0]);
        assert_eq!(s.data_xy, vec![(0.0, 0.5), (1.0, -1.0), (2.0, 2.0)]);
    }

    #[test]
    fn extents_skip_non_finite() {
        let s = Series::line("a", vec![(0.0, 1.0), (1.0, f64::NAN), (2.0, -3.0)]);
        assert_eq!(s.extents(), Some(((0.0, 2.0), (-3.0, 1.0))));
        assert_eq!(Series::line("b", vec![(0.0, f64::NAN)]).extents(), None);
    }
}
