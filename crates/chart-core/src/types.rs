// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (sizes, paddings, text sizes).

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 640;

/// Axis title font size.
pub const LABEL_SIZE: f32 = 15.0;
/// Tick label font size.
pub const TICK_SIZE: f32 = 12.0;
/// Legend entry font size.
pub const LEGEND_SIZE: f32 = 13.0;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        // Room for rotated y title + tick labels on the left, x title below.
        Self::new(84, 24, 24, 60)
    }
}
