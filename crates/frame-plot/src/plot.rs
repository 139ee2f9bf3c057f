// File: crates/frame-plot/src/plot.rs
// Summary: Turns a FrameSeries into the pitch/yawca line chart.

use chart_core::{Chart, Series};

use crate::frames::{FrameSeries, COLUMN_LABELS};

pub const X_LABEL: &str = "frame";
pub const Y_LABEL: &str = "rad";

/// One line per column against the frame index, both on the shared `rad` axis.
/// Series names come from `COLUMN_LABELS`, never from the file's header.
pub fn build_chart(frames: &FrameSeries) -> Chart {
    let mut chart = Chart::new();
    chart.add_series(Series::indexed(COLUMN_LABELS[0], frames.pitch()));
    chart.add_series(Series::indexed(COLUMN_LABELS[1], frames.yawca()));
    chart.autoscale_axes(0.0);
    chart.x_axis.label = X_LABEL.to_string();
    chart.y_axis.label = Y_LABEL.to_string();
    chart
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_cover_frames() {
        let frames = FrameSeries::parse_str("p y\n0.1 0.2\n0.15 0.18\n0.3 -0.1\n").unwrap();
        let chart = build_chart(&frames);
        assert_eq!(chart.x_axis.min, 0.0);
        assert_eq!(chart.x_axis.max, 2.0);
        assert!(chart.y_axis.min < -0.1 && chart.y_axis.max > 0.3);
    }
}
