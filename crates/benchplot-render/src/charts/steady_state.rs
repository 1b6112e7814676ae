//! fio steady-state chart: IOPS on the left axis, bandwidth on the right.
//!
//! When a second directory is compared, its series are drawn first in
//! drifted colours so the primary directory stays on top. The animated
//! variant shows the compared directory alone before revealing the primary
//! one.

use std::path::Path;

use benchplot_core::fio::{Criterion, Metric, SteadyStatePlot, SteadyStateReport};
use benchplot_core::format::human_readable_bandwidth;
use benchplot_core::{Error, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::RGBColor;
use tracing::{info, warn};

use super::{draw_legend, draw_markers, draw_mesh, finish, headroom, DrawResult};
use crate::palette::{drift_color, steady_state_base, Drift, Marker, MarkerShape};
use crate::Canvas;

/// Marker size multiplier and opacity for one directory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStyle {
    pub marker_size: f64,
    pub alpha: f64,
}

/// Everything the steady-state chart needs besides the data.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStateOptions {
    pub title_prefix: String,
    /// Upper bound of the IOPS axis; fitted to the data when unset.
    pub iops_max: Option<f64>,
    /// Upper bound of the bandwidth axis; fitted to the data when unset.
    pub bw_max: Option<f64>,
    pub drift: Drift,
    pub primary: RunStyle,
    pub compare: RunStyle,
}

impl Default for SteadyStateOptions {
    fn default() -> Self {
        Self {
            title_prefix: String::new(),
            iops_max: None,
            bw_max: None,
            drift: Drift {
                red: -100,
                green: 80,
                blue: -50,
            },
            primary: RunStyle {
                marker_size: 1.0,
                alpha: 1.0,
            },
            compare: RunStyle {
                marker_size: 1.0,
                alpha: 0.4,
            },
        }
    }
}

impl SteadyStateOptions {
    pub fn title(&self) -> String {
        format!("{} Steady-State IOPS and Bandwidth Over Time", self.title_prefix)
            .trim()
            .to_string()
    }
}

/// Render the report's sets onto one dual-axis chart.
pub fn steady_state(path: &Path, canvas: &Canvas, options: &SteadyStateOptions, report: &SteadyStateReport) -> Result<()> {
    finish(path, draw(path, canvas, options, report))
}

/// Seconds the animated chart shows the compared directory alone.
pub const REVEAL_AFTER_SECS: f64 = 1.25;

/// Write an SVG that first shows only the compared directories and, after
/// [`REVEAL_AFTER_SECS`], the full chart with the primary directory on top.
/// Both frames share the same axes.
pub fn steady_state_animated(
    path: &Path,
    canvas: &Canvas,
    options: &SteadyStateOptions,
    report: &SteadyStateReport,
) -> Result<()> {
    let render_err = |e: Box<dyn std::error::Error>| Error::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let intro = render_frame(canvas, options, report, false).map_err(render_err)?;
    let full = render_frame(canvas, options, report, true).map_err(render_err)?;
    std::fs::write(path, animate(canvas, &intro, &full)).map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), "animated chart written");
    Ok(())
}

fn render_frame(
    canvas: &Canvas,
    options: &SteadyStateOptions,
    report: &SteadyStateReport,
    with_primary: bool,
) -> std::result::Result<String, Box<dyn std::error::Error>> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (canvas.width, canvas.height)).into_drawing_area();
        draw_on(&root, canvas, options, report, with_primary)?;
        root.present()?;
    }
    Ok(buf)
}

/// Stack two rendered frames; SMIL `set` swaps their visibility once.
fn animate(canvas: &Canvas, intro: &str, full: &str) -> String {
    let (w, h) = (canvas.width, canvas.height);
    format!(
        concat!(
            "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
            "<g>\n<set attributeName=\"visibility\" to=\"hidden\" begin=\"{t}s\" fill=\"freeze\"/>\n{intro}</g>\n",
            "<g visibility=\"hidden\">\n<set attributeName=\"visibility\" to=\"visible\" begin=\"{t}s\" fill=\"freeze\"/>\n{full}</g>\n",
            "</svg>\n",
        ),
        w = w,
        h = h,
        t = REVEAL_AFTER_SECS,
        intro = intro,
        full = full,
    )
}

/// One series ready to draw.
struct Layer<'a> {
    /// Index of the directory in the report; 0 is the primary one.
    set: usize,
    plot: &'a SteadyStatePlot,
    label: String,
    color: RGBColor,
    radius: i32,
    alpha: f64,
}

fn layers<'a>(canvas: &Canvas, options: &SteadyStateOptions, report: &'a SteadyStateReport) -> Vec<Layer<'a>> {
    let comparing = report.sets.len() > 1;
    let mut out = Vec::new();

    // Later sets first so the first directory is drawn on top.
    for (idx, (name, plots)) in report.sets.iter().enumerate().rev() {
        let (style, drift) = if idx == 0 {
            (options.primary, Drift::default())
        } else {
            (options.compare, options.drift)
        };
        for plot in plots {
            let base = steady_state_base(&plot.series.style).unwrap_or_else(|| {
                warn!(key = %plot.series.style, "no palette entry, using grey");
                RGBColor(0x80, 0x80, 0x80)
            });
            let scale = match (plot.metric, plot.criterion) {
                (Metric::Iops, Criterion::Mean) => 1.0,
                (Metric::Iops, Criterion::Slope) | (Metric::Bandwidth, Criterion::Mean) => 0.5,
                (Metric::Bandwidth, Criterion::Slope) => 0.25,
            };
            let alpha = match plot.criterion {
                Criterion::Mean => style.alpha,
                Criterion::Slope => style.alpha * 0.5,
            };
            let label = if comparing {
                format!("{} ({name})", plot.series.label)
            } else {
                plot.series.label.clone()
            };
            out.push(Layer {
                set: idx,
                plot,
                label,
                color: drift_color(base, drift),
                radius: (f64::from(canvas.marker_size) * 2.0 * style.marker_size * scale).round().max(1.0) as i32,
                alpha: alpha.clamp(0.0, 1.0),
            });
        }
    }
    out
}

fn axis_max<'a>(plots: impl Iterator<Item = &'a SteadyStatePlot>, metric: Metric) -> (f64, f64) {
    plots
        .filter(|p| p.metric == metric)
        .flat_map(|p| p.series.points.iter())
        .fold((0.0f64, 0.0f64), |(x, y), &(px, py)| (x.max(px), y.max(py)))
}

fn draw(path: &Path, canvas: &Canvas, options: &SteadyStateOptions, report: &SteadyStateReport) -> DrawResult {
    let root = SVGBackend::new(path, (canvas.width, canvas.height)).into_drawing_area();
    draw_on(&root, canvas, options, report, true)?;
    root.present()?;
    Ok(())
}

/// Draw the chart onto `root`. Axes always cover every directory; the
/// primary directory's series are left out unless `with_primary`.
fn draw_on(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    canvas: &Canvas,
    options: &SteadyStateOptions,
    report: &SteadyStateReport,
    with_primary: bool,
) -> DrawResult {
    root.fill(&canvas.theme.background)?;

    let all_plots = || report.sets.iter().flat_map(|(_, plots)| plots.iter());
    let (iops_x, iops_y) = axis_max(all_plots(), Metric::Iops);
    let (bw_x, bw_y) = axis_max(all_plots(), Metric::Bandwidth);
    let x_max = headroom(iops_x.max(bw_x));
    let iops_top = options.iops_max.filter(|m| *m > 0.0).unwrap_or_else(|| headroom(iops_y));
    let bw_top = options.bw_max.filter(|m| *m > 0.0).unwrap_or_else(|| headroom(bw_y));

    let bandwidth_label = |v: &f64| human_readable_bandwidth(*v);
    let mut chart = ChartBuilder::on(root)
        .caption(options.title(), canvas.font(30.0))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .right_y_label_area_size(120)
        .build_cartesian_2d(0.0..x_max, 0.0..iops_top)?
        .set_secondary_coord(0.0..x_max, 0.0..bw_top);

    draw_mesh(&mut chart, canvas, report.unit.label(), "IOPS", None)?;
    chart
        .configure_secondary_axes()
        .y_desc("Bandwidth")
        .y_label_formatter(&bandwidth_label)
        .label_style(canvas.font(15.0))
        .axis_desc_style(canvas.font(18.0))
        .axis_style(canvas.theme.foreground)
        .draw()?;

    for layer in layers(canvas, options, report)
        .into_iter()
        .filter(|l| with_primary || l.set > 0)
    {
        let points = &layer.plot.series.points;
        match layer.plot.metric {
            Metric::Iops => {
                let marker = Marker {
                    color: layer.color,
                    shape: MarkerShape::Circle,
                };
                draw_markers(&mut chart, points, marker, layer.radius, layer.alpha, &layer.label)?;
            }
            Metric::Bandwidth => {
                let style = ShapeStyle::from(layer.color.mix(layer.alpha)).stroke_width(1);
                let radius = layer.radius + 1;
                chart
                    .draw_secondary_series(points.iter().map(|&p| Cross::new(p, radius, style)))?
                    .label(layer.label.as_str())
                    .legend(move |(x, y)| Cross::new((x + 10, y), radius + 2, style));
            }
        }
    }

    draw_legend(&mut chart, canvas)?;
    Ok(())
}
