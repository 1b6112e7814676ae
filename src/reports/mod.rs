//! Report drivers, one per CLI subcommand.
//!
//! A driver loads its inputs through `benchplot-feeds`, runs the core
//! pipeline, and writes charts through `benchplot-render`. Drivers never
//! print; they return what the CLI needs to show.

pub mod alignment;
pub mod compare;
pub mod steady_state;
pub mod variance;

pub use alignment::{alignment, AlignmentRequest};
pub use compare::{compare, tps, CompareRequest};
pub use steady_state::{steady_state, SteadyStateRequest};
pub use variance::{variance, VarianceRequest};

use anyhow::Context;
use benchplot_core::config::Config;
use benchplot_render::{parse_color, Canvas, RGBColor};

fn canvas(config: &Config, theme: Option<&str>) -> anyhow::Result<Canvas> {
    Canvas::from_config(&config.plot, theme).context("resolving chart theme")
}

fn color(name: &str) -> anyhow::Result<RGBColor> {
    parse_color(name).with_context(|| format!("unknown colour {name:?}"))
}
