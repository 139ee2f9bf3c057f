// File: crates/frame-plot/src/config.rs
// Summary: Run configuration. Plain typed defaults; nothing is read from flags or files.

use std::path::{Path, PathBuf};

use chart_core::RenderOptions;

/// Where the frame table lives unless told otherwise.
pub const DEFAULT_INPUT: &str = "labeled/0.txt";
/// Directory for PNG output when no explicit path is set.
pub const DEFAULT_OUT_DIR: &str = "target/out";

/// How the finished chart is presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Window when a display is available, PNG otherwise.
    #[default]
    Auto,
    /// Window only; no display is an error.
    Window,
    /// PNG only, never opens a window.
    Png,
}

#[derive(Clone, Debug)]
pub struct PlotConfig {
    pub input: PathBuf,
    pub display: DisplayMode,
    /// PNG destination for headless rendering and the viewer's save key.
    /// `None` derives `target/out/<input stem>_frames.png`.
    pub png_path: Option<PathBuf>,
    pub render: RenderOptions,
    /// Window title; `None` derives one from the input path.
    pub window_title: Option<String>,
}

impl PlotConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            display: DisplayMode::default(),
            png_path: None,
            render: RenderOptions::default(),
            window_title: None,
        }
    }

    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    pub fn with_png_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.png_path = Some(path.into());
        self
    }

    pub fn resolved_png_path(&self) -> PathBuf {
        self.png_path.clone().unwrap_or_else(|| out_name_for(&self.input))
    }

    pub fn resolved_window_title(&self) -> String {
        self.window_title
            .clone()
            .unwrap_or_else(|| format!("frame-plot — {}", self.input.display()))
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT)
    }
}

/// Produce output file name like target/out/<stem>_frames.png
fn out_name_for(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).filter(|s| !s.is_empty()).unwrap_or("chart");
    PathBuf::from(DEFAULT_OUT_DIR).join(format!("{stem}_frames.png"))
}
