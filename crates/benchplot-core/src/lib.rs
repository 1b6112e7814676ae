//! benchplot-core: extraction, normalization and statistics for benchmark
//! logs.
//!
//! This crate holds the pure logic shared by every report. It never opens
//! files itself; the feeds crate hands it lines or parsed JSON, and the
//! render crate draws what it returns.
//!
//! # Pipeline
//!
//! ```text
//! lines ──► extractor ──► Source ─┐
//! lines ──► extractor ──► Source ─┼─► normalizer ──► NormalizedReport ──► render
//! lines ──► extractor ──► Source ─┘        (one shared Unit)
//! ```
//!
//! Extraction is data-parallel per file; normalization waits for every
//! source of the report because the unit is chosen from the global maximum.

pub mod alignment;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fio;
pub mod format;
pub mod normalizer;
pub mod stats;
pub mod types;

pub use error::{Error, Result};
pub use extractor::{extract_batch, extract_line};
pub use normalizer::{normalize, NormalizedReport, ReportInterval, Unit, UnitPolicy};
pub use types::{LineMatch, Sample, Series, Source};
