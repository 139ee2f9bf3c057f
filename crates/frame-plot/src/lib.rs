// File: crates/frame-plot/src/lib.rs
// Summary: Library entry point; load the frame table, chart it, show or render it.

pub mod config;
pub mod error;
pub mod frames;
pub mod plot;
pub mod viewer;

use std::path::PathBuf;

pub use config::{DisplayMode, PlotConfig};
pub use error::{ParseError, PlotError, Result};
pub use frames::{FrameRecord, FrameSeries, COLUMN_LABELS};
pub use plot::build_chart;

/// How a successful run presented the chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// An interactive window was shown and has since been closed.
    Displayed,
    /// The chart was written to this PNG.
    Rendered(PathBuf),
}

/// Parse `config.input`, build the pitch/yawca chart, then present it per
/// `config.display`. Any failure aborts the run before a chart is produced.
pub fn run(config: &PlotConfig) -> Result<Outcome> {
    run_with_display(config, viewer::display_available())
}

/// `run` with the display probe result supplied by the caller.
/// With `display_available == false` no window is ever attempted.
pub fn run_with_display(config: &PlotConfig, display_available: bool) -> Result<Outcome> {
    let frames = FrameSeries::load(&config.input)?;
    let chart = build_chart(&frames);
    let png_path = config.resolved_png_path();

    let windowed = match config.display {
        DisplayMode::Png => false,
        DisplayMode::Window if !display_available => {
            return Err(PlotError::NoDisplay("DISPLAY/WAYLAND_DISPLAY unset".into()));
        }
        DisplayMode::Window => true,
        DisplayMode::Auto => {
            if !display_available {
                log::warn!("no display available, rendering to {}", png_path.display());
            }
            display_available
        }
    };

    if windowed {
        match viewer::show_window(chart.clone(), config.render.clone(), &config.resolved_window_title(), &png_path) {
            Ok(()) => return Ok(Outcome::Displayed),
            // The probe passed but the backend could not connect.
            Err(PlotError::NoDisplay(reason)) if config.display == DisplayMode::Auto => {
                log::warn!("{reason}; rendering to {}", png_path.display());
            }
            Err(e) => return Err(e),
        }
    }

    viewer::render_png(&chart, &config.render, &png_path)?;
    Ok(Outcome::Rendered(png_path))
}
