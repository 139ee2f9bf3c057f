// File: crates/frame-plot/src/frames.rs
// Summary: FrameSeries model and loader for the whitespace-delimited pitch/yaw table.
//
// Format: one header line (discarded), then one `pitch yaw` pair per frame.
// The source header never names the columns; they are always `pitch` and
// `yawca`. `yawca` is kept verbatim from the recording tool's naming.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{ParseError, PlotError, Result};

/// Column labels applied to every loaded table, in column order.
pub const COLUMN_LABELS: [&str; 2] = ["pitch", "yawca"];

/// One frame's orientation sample, in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRecord {
    pub pitch: f64,
    pub yawca: f64,
}

/// Ordered per-frame samples. The frame index is the position in the
/// sequence; it is not stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSeries {
    records: Vec<FrameRecord>,
    source_header: Vec<String>,
}

impl FrameSeries {
    pub fn from_records(records: Vec<FrameRecord>) -> Self {
        Self { records, source_header: COLUMN_LABELS.iter().map(|s| s.to_string()).collect() }
    }

    /// Load the table at `path`. The file is closed before this returns,
    /// whether parsing succeeded or not.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PlotError::FileNotFound { path: path.to_path_buf() },
            _ => PlotError::Io { path: path.to_path_buf(), source: e },
        })?;
        let series = Self::from_reader(BufReader::new(file)).map_err(|source| match source {
            // A read failure mid-stream is a file access problem, not bad content.
            ParseError::Table(e) if e.is_io_error() => {
                let source = match e.into_kind() {
                    csv::ErrorKind::Io(io) => io,
                    other => std::io::Error::other(format!("{other:?}")),
                };
                PlotError::Io { path: path.to_path_buf(), source }
            }
            source => PlotError::Parse { path: path.to_path_buf(), source },
        })?;
        log::info!("loaded {} frames from {}", series.len(), path.display());
        if series.source_header != COLUMN_LABELS {
            log::debug!("source header {:?} replaced by {:?}", series.source_header, COLUMN_LABELS);
        }
        Ok(series)
    }

    pub fn from_reader<R: Read>(reader: R) -> std::result::Result<Self, ParseError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b' ')
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut source_header: Option<Vec<String>> = None;
        let mut records = Vec::new();
        let mut rec = StringRecord::new();
        while rdr.read_record(&mut rec)? {
            let tokens: Vec<&str> = rec.iter().flat_map(str::split_whitespace).collect();
            if tokens.is_empty() {
                continue;
            }
            let line = rec.position().map_or(0, |p| p.line());

            if source_header.is_none() {
                if tokens.len() != 2 {
                    return Err(ParseError::HeaderWidth { found: tokens.len() });
                }
                source_header = Some(tokens.iter().map(|t| t.to_string()).collect());
                continue;
            }

            if tokens.len() != 2 {
                return Err(ParseError::RowWidth { line, found: tokens.len() });
            }
            let value = |column: usize| -> std::result::Result<f64, ParseError> {
                tokens[column].parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                    line,
                    column: column + 1,
                    token: tokens[column].to_string(),
                })
            };
            records.push(FrameRecord { pitch: value(0)?, yawca: value(1)? });
        }

        let source_header = source_header.ok_or(ParseError::MissingHeader)?;
        Ok(Self { records, source_header })
    }

    pub fn parse_str(text: &str) -> std::result::Result<Self, ParseError> {
        Self::from_reader(text.as_bytes())
    }

    /// Write the table back out: `pitch yawca` header, one space-separated
    /// row per frame. Values use the shortest text that parses back exactly.
    pub fn write_table<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "{} {}", COLUMN_LABELS[0], COLUMN_LABELS[1])?;
        for r in &self.records {
            writeln!(out, "{:?} {:?}", r.pitch, r.yawca)?;
        }
        out.flush()
    }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn records(&self) -> &[FrameRecord] { &self.records }

    pub fn iter(&self) -> std::slice::Iter<'_, FrameRecord> { self.records.iter() }

    /// Header tokens as found in the file. Informational only.
    pub fn source_header(&self) -> &[String] { &self.source_header }

    pub fn pitch(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.pitch)
    }

    pub fn yawca(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.yawca)
    }
}

impl<'a> IntoIterator for &'a FrameSeries {
    type Item = &'a FrameRecord;
    type IntoIter = std::slice::Iter<'a, FrameRecord>;

    fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}
