//! fio steady-state report for one results directory, optionally compared
//! against a second.

use std::path::PathBuf;

use anyhow::Context;
use benchplot_core::config::Config;
use benchplot_core::fio::{normalize_steady_state, SteadyStateReport};
use benchplot_core::format::parse_shorthand_bandwidth;
use benchplot_core::Error;
use benchplot_feeds::{load_all, SteadyStateDir};
use benchplot_render::charts::steady_state::{
    steady_state as render, steady_state_animated as render_animated, RunStyle, SteadyStateOptions,
};
use benchplot_render::Drift;

/// Default chart file.
pub const STEADY_STATE_OUTPUT: &str = "steady_state_iops.svg";

#[derive(Debug, Clone, Default)]
pub struct SteadyStateRequest {
    pub dir: PathBuf,
    pub compare: Option<PathBuf>,
    pub title_prefix: String,
    pub iops_max: Option<f64>,
    /// Bandwidth axis limit as written on the command line, e.g. `1.8GB/s`.
    pub bw_max: Option<String>,
    pub red_drift: Option<i32>,
    pub green_drift: Option<i32>,
    pub blue_drift: Option<i32>,
    /// Write an animated SVG that reveals `dir` over `compare`.
    pub animate: bool,
    pub output: PathBuf,
    pub theme: Option<String>,
}

pub fn steady_state(config: &Config, req: &SteadyStateRequest) -> anyhow::Result<SteadyStateReport> {
    anyhow::ensure!(
        !req.animate || req.compare.is_some(),
        "an animated steady-state chart needs a second directory to compare against"
    );
    let bw_max = req
        .bw_max
        .as_deref()
        .map(|raw| parse_shorthand_bandwidth(raw).with_context(|| format!("invalid bandwidth {raw:?}")))
        .transpose()?;

    let feeds: Vec<SteadyStateDir> = std::iter::once(&req.dir)
        .chain(req.compare.as_ref())
        .map(SteadyStateDir::new)
        .collect();
    let sets = load_all(&feeds).context("loading fio steady-state results")?;

    let report = normalize_steady_state(&sets);
    let has_points = report
        .sets
        .iter()
        .flat_map(|(_, plots)| plots)
        .any(|p| !p.series.is_empty());
    if !has_points {
        return Err(Error::EmptyReport.into());
    }

    let ss = &config.steady_state;
    let options = SteadyStateOptions {
        title_prefix: req.title_prefix.clone(),
        iops_max: req.iops_max,
        bw_max,
        drift: Drift {
            red: req.red_drift.unwrap_or(ss.red_drift),
            green: req.green_drift.unwrap_or(ss.green_drift),
            blue: req.blue_drift.unwrap_or(ss.blue_drift),
        },
        primary: RunStyle {
            marker_size: ss.dir1_marker_size,
            alpha: ss.dir1_alpha,
        },
        compare: RunStyle {
            marker_size: ss.dir2_marker_size,
            alpha: ss.dir2_alpha,
        },
    };

    let canvas = super::canvas(config, req.theme.as_deref())?;
    let rendered = if req.animate {
        render_animated(&req.output, &canvas, &options, &report)
    } else {
        render(&req.output, &canvas, &options, &report)
    };
    rendered.with_context(|| format!("writing {}", req.output.display()))?;
    Ok(report)
}
