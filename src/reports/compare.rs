//! Transaction-rate over time, for one log (`tps`) or several (`compare`).

use std::path::{Path, PathBuf};

use anyhow::Context;
use benchplot_core::config::Config;
use benchplot_core::{normalize, Error, NormalizedReport, ReportInterval, UnitPolicy};
use benchplot_feeds::file::default_label;
use benchplot_feeds::{load_all, LogFile};
use benchplot_render::charts::timeseries::{time_series, TimeSeriesLabels};

/// Default chart file of the single-log report.
pub const TPS_OUTPUT: &str = "tps_over_time.svg";

/// Inputs of a comparison chart.
#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub files: Vec<PathBuf>,
    /// Legend per file; missing entries fall back to the file stem.
    pub legends: Vec<String>,
    pub title: String,
    pub y_label: String,
    pub output: PathBuf,
    pub theme: Option<String>,
    pub interval: ReportInterval,
}

impl CompareRequest {
    pub fn new(files: Vec<PathBuf>, output: impl Into<PathBuf>) -> Self {
        let labels = TimeSeriesLabels::default();
        Self {
            files,
            legends: Vec::new(),
            title: labels.title.to_string(),
            y_label: labels.y_label.to_string(),
            output: output.into(),
            theme: None,
            interval: ReportInterval::default(),
        }
    }
}

/// Plot one sysbench log with default labels.
pub fn tps(config: &Config, file: &Path, output: &Path, theme: Option<&str>) -> anyhow::Result<NormalizedReport> {
    let req = CompareRequest {
        theme: theme.map(str::to_owned),
        ..CompareRequest::new(vec![file.to_path_buf()], output)
    };
    compare(config, &req)
}

/// Load every log, normalize them onto one time unit, and draw them on one
/// chart. Sources take marker tokens from the configured list in order, so
/// the list length caps the number of files.
pub fn compare(config: &Config, req: &CompareRequest) -> anyhow::Result<NormalizedReport> {
    let tokens = &config.markers.tokens;
    if req.files.len() > tokens.len() {
        return Err(Error::TooManySources {
            given: req.files.len(),
            limit: tokens.len(),
        }
        .into());
    }

    let feeds: Vec<LogFile> = req
        .files
        .iter()
        .zip(tokens)
        .enumerate()
        .map(|(i, (path, token))| {
            let label = req
                .legends
                .get(i)
                .cloned()
                .unwrap_or_else(|| default_label(path));
            LogFile::new(path, label, token.as_str())
        })
        .collect();

    let sources = load_all(&feeds).context("loading sysbench logs")?;
    let report = normalize(&sources, req.interval, UnitPolicy::TransactionRate);
    if report.is_empty() {
        return Err(Error::EmptyReport.into());
    }
    tracing::debug!(unit = %report.unit, series = report.series.len(), "normalized report");

    let canvas = super::canvas(config, req.theme.as_deref())?;
    let labels = TimeSeriesLabels {
        title: &req.title,
        y_label: &req.y_label,
    };
    time_series(&req.output, &canvas, labels, &report)
        .with_context(|| format!("writing {}", req.output.display()))?;
    Ok(report)
}
