// File: crates/frame-plot/src/error.rs
// Summary: Error taxonomy; every message names the stage that failed.

use std::path::PathBuf;
use thiserror::Error;

/// Why the input table could not be turned into a `FrameSeries`.
#[derive(Error, Debug)]
pub enum ParseError {
    /// No non-blank line, so there is no header to discard.
    #[error("no header line found")]
    MissingHeader,

    #[error("header has {found} columns, expected 2")]
    HeaderWidth { found: usize },

    #[error("line {line}: expected 2 values, found {found}")]
    RowWidth { line: u64, found: usize },

    #[error("line {line}, column {column}: '{token}' is not a number")]
    InvalidNumber { line: u64, column: usize, token: String },

    /// Reader-level failure (invalid UTF-8, I/O while streaming rows).
    #[error("unreadable table: {0}")]
    Table(#[from] csv::Error),
}

/// The main error type for a frame-plot run.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("file access: input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("file access: cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing: {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("rendering: {0}")]
    Render(String),

    #[error("display: {0}")]
    Display(String),

    /// No window could be opened at all (no server, or the backend refused).
    #[error("display: no display available: {0}")]
    NoDisplay(String),
}

impl PlotError {
    /// Pipeline stage that failed, as shown to the user.
    pub fn stage(&self) -> &'static str {
        match self {
            PlotError::FileNotFound { .. } | PlotError::Io { .. } => "file access",
            PlotError::Parse { .. } => "parsing",
            PlotError::Render(_) => "rendering",
            PlotError::Display(_) | PlotError::NoDisplay(_) => "display",
        }
    }

    /// Wrap a chart-core failure, keeping its context chain in the message.
    pub(crate) fn render(err: anyhow::Error) -> Self {
        PlotError::Render(format!("{err:#}"))
    }
}

/// A specialized Result type for frame-plot operations.
pub type Result<T> = std::result::Result<T, PlotError>;
