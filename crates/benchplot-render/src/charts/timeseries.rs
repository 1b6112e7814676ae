//! Metric-over-time scatter chart for one or more normalized sources.

use std::path::Path;

use benchplot_core::{NormalizedReport, Result};
use plotters::prelude::*;
use plotters::style::RGBColor;
use tracing::warn;

use super::{draw_legend, draw_markers, draw_mesh, finish, headroom, span, DrawResult};
use crate::palette::{Marker, MarkerShape};
use crate::Canvas;

/// Labels of a time-series chart. The x label comes from the report unit.
#[derive(Debug, Clone, Copy)]
pub struct TimeSeriesLabels<'a> {
    pub title: &'a str,
    pub y_label: &'a str,
}

impl Default for TimeSeriesLabels<'_> {
    fn default() -> Self {
        Self {
            title: "Transactions Per Second (TPS) Over Time",
            y_label: "TPS",
        }
    }
}

/// Scatter every series of the report on a shared time axis. The y axis
/// starts at zero unless the canvas says otherwise.
pub fn time_series(
    path: &Path,
    canvas: &Canvas,
    labels: TimeSeriesLabels<'_>,
    report: &NormalizedReport,
) -> Result<()> {
    finish(path, draw(path, canvas, labels, report))
}

fn draw(path: &Path, canvas: &Canvas, labels: TimeSeriesLabels<'_>, report: &NormalizedReport) -> DrawResult {
    let root = SVGBackend::new(path, (canvas.width, canvas.height)).into_drawing_area();
    root.fill(&canvas.theme.background)?;

    let points = report.series.iter().flat_map(|s| s.points.iter());
    let (x_max, y_min, y_max) = points.fold((0.0f64, f64::INFINITY, 0.0f64), |(x, lo, hi), &(px, py)| {
        (x.max(px), lo.min(py), hi.max(py))
    });
    let y_lo = if canvas.y_from_zero || !y_min.is_finite() {
        0.0
    } else {
        y_min * 0.95
    };
    let (y_lo, y_hi) = span(y_lo, headroom(y_max));

    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, canvas.font(30.0))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..headroom(x_max), y_lo..y_hi)?;

    draw_mesh(&mut chart, canvas, report.time_label(), labels.y_label, None)?;

    for series in &report.series {
        let marker = Marker::parse(&series.style).unwrap_or_else(|| {
            warn!(style = %series.style, label = %series.label, "unknown marker token, using white circles");
            Marker {
                color: RGBColor(255, 255, 255),
                shape: MarkerShape::Circle,
            }
        });
        draw_markers(&mut chart, &series.points, marker, canvas.marker_size as i32, 1.0, &series.label)?;
    }

    draw_legend(&mut chart, canvas)?;
    root.present()?;
    Ok(())
}
