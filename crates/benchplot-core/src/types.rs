//! Core types for benchplot-core.
//!
//! This module defines the data shared across extraction, normalization and
//! rendering: the extracted [`Sample`], the per-file [`Source`], and the
//! plotting-ready [`Series`].

/// One `(offset, metric)` observation extracted from a benchmark log line.
///
/// `offset` is the bracketed integer from the log, in seconds (or in units of
/// the report interval when the benchmark reported coarser than 1s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub offset: u64,
    pub metric: f64,
}

impl Sample {
    pub fn new(offset: u64, metric: f64) -> Self {
        Self { offset, metric }
    }
}

/// Outcome of running the extraction pattern over a single line.
///
/// Non-data lines (headers, warnings, blank lines) are expected in real logs,
/// so "no match" is an ordinary value rather than an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineMatch {
    Sample(Sample),
    NoMatch,
}

impl LineMatch {
    pub fn into_sample(self) -> Option<Sample> {
        match self {
            LineMatch::Sample(s) => Some(s),
            LineMatch::NoMatch => None,
        }
    }
}

/// One input file's samples, in input line order, plus display metadata.
///
/// `style` is an opaque token handed through to the renderer (a marker token
/// such as `r*`, or a colour name); the core never interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub label: String,
    pub style: String,
    pub samples: Vec<Sample>,
}

impl Source {
    pub fn new(label: impl Into<String>, style: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            label: label.into(),
            style: style.into(),
            samples,
        }
    }

    pub fn metrics(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.metric).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// A normalized, plotting-ready series: `(displayed_offset, metric)` pairs in
/// the original sample order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub style: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
