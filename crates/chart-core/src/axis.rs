// File: crates/chart-core/src/axis.rs
// Summary: Axis model with a title label and a visible value range.

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max }
    }

    /// Unlabeled unit range; what an empty chart shows.
    pub fn unit(label: impl Into<String>) -> Self {
        Self::new(label, 0.0, 1.0)
    }
}

impl Default for Axis {
    fn default() -> Self {
        Self::unit("")
    }
}
