//! TPS distribution report: summary statistics plus seven charts.

use std::path::PathBuf;

use anyhow::Context;
use benchplot_core::config::Config;
use benchplot_core::stats::Summary;
use benchplot_feeds::file::default_label;
use benchplot_feeds::{load_all, TpsValuesFile};
use benchplot_render::charts::distribution::{render_all, Dataset};

#[derive(Debug, Clone)]
pub struct VarianceRequest {
    /// One or two `(file, legend)` pairs. A missing legend falls back to
    /// the file stem.
    pub inputs: Vec<(PathBuf, Option<String>)>,
    pub color1: Option<String>,
    pub color2: Option<String>,
    pub output_dir: PathBuf,
    pub theme: Option<String>,
}

/// Statistics of one input, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledSummary {
    pub label: String,
    pub summary: Summary,
}

impl LabelledSummary {
    pub fn report(&self) -> String {
        self.summary.report(&self.label)
    }
}

pub fn variance(config: &Config, req: &VarianceRequest) -> anyhow::Result<Vec<LabelledSummary>> {
    let feeds: Vec<TpsValuesFile> = req
        .inputs
        .iter()
        .map(|(path, _)| TpsValuesFile { path: path.clone() })
        .collect();
    let values = load_all(&feeds).context("loading sysbench logs")?;

    let colors = [
        req.color1.as_deref().unwrap_or(&config.variance.color1),
        req.color2.as_deref().unwrap_or(&config.variance.color2),
    ];

    let mut datasets = Vec::with_capacity(values.len());
    let mut summaries = Vec::with_capacity(values.len());
    for (((path, legend), values), color) in req.inputs.iter().zip(values).zip(colors) {
        let label = legend.clone().unwrap_or_else(|| default_label(path));
        let summary = Summary::of(&values).with_context(|| format!("no tps values in {}", path.display()))?;
        summaries.push(LabelledSummary {
            label: label.clone(),
            summary,
        });
        datasets.push(Dataset::new(label, super::color(color)?, values));
    }

    std::fs::create_dir_all(&req.output_dir)
        .with_context(|| format!("creating {}", req.output_dir.display()))?;
    let canvas = super::canvas(config, req.theme.as_deref())?;
    render_all(&req.output_dir, &canvas, &datasets, config.plot.histogram_bins)
        .with_context(|| format!("writing charts to {}", req.output_dir.display()))?;

    Ok(summaries)
}
