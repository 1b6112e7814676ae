//! Chart implementations, one module per report family.

pub mod alignment;
pub mod distribution;
pub mod steady_state;
pub mod timeseries;

use std::path::Path;

use benchplot_core::{Error, Result};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use tracing::info;

use crate::palette::{Marker, MarkerShape};
use crate::Canvas;

pub(crate) type SvgChart<'a, 'b> =
    ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub(crate) type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Map a drawing failure onto the library error and log the written file.
pub(crate) fn finish(path: &Path, result: DrawResult) -> Result<()> {
    result.map_err(|e| Error::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    info!(path = %path.display(), "chart written");
    Ok(())
}

/// Upper bound with some headroom. Never collapses to an empty range.
pub(crate) fn headroom(max: f64) -> f64 {
    if max > 0.0 && max.is_finite() {
        max * 1.05
    } else {
        1.0
    }
}

/// Widen a degenerate `lo..hi` range so plotters has something to draw.
pub(crate) fn span(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

/// Axes, grid and tick labels in the canvas theme.
pub(crate) fn draw_mesh<'b>(
    chart: &'b mut SvgChart<'_, '_>,
    canvas: &Canvas,
    x_desc: &str,
    y_desc: &str,
    x_labels: Option<&'b dyn Fn(&f64) -> String>,
) -> DrawResult {
    let theme = canvas.theme;
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(canvas.font(15.0))
        .axis_desc_style(canvas.font(18.0))
        .axis_style(theme.foreground)
        .bold_line_style(theme.grid)
        .light_line_style(theme.grid.mix(0.3));
    if let Some(formatter) = x_labels {
        mesh.x_label_formatter(formatter);
    }
    mesh.draw()?;
    Ok(())
}

/// Legend box in the upper right corner.
pub(crate) fn draw_legend<'a, 'b: 'a>(chart: &mut SvgChart<'a, 'b>, canvas: &Canvas) -> DrawResult {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .margin(10)
        .background_style(canvas.theme.legend_background.mix(0.8))
        .border_style(canvas.theme.legend_border)
        .label_font(canvas.legend_font())
        .draw()?;
    Ok(())
}

/// Tick formatter for categorical axes where category `i` sits at `x = i`.
pub(crate) fn category_label(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Draw one scatter series with the given marker and attach its legend entry.
pub(crate) fn draw_markers<'a, 'b: 'a>(
    chart: &mut SvgChart<'a, 'b>,
    points: &[(f64, f64)],
    marker: Marker,
    size: i32,
    alpha: f64,
    label: &str,
) -> DrawResult {
    let style = ShapeStyle::from(marker.color.mix(alpha)).filled();
    let size = size.max(1);
    let points = points.iter().copied();

    match marker.shape {
        MarkerShape::Circle => chart
            .draw_series(points.map(|p| Circle::new(p, size, style)))?
            .label(label)
            .legend(move |(x, y)| Circle::new((x + 10, y), size + 2, style)),
        MarkerShape::Dot => chart
            .draw_series(points.map(|p| Circle::new(p, 1, style)))?
            .label(label)
            .legend(move |(x, y)| Circle::new((x + 10, y), 2, style)),
        MarkerShape::Triangle => chart
            .draw_series(points.map(|p| TriangleMarker::new(p, size + 1, style)))?
            .label(label)
            .legend(move |(x, y)| TriangleMarker::new((x + 10, y), size + 3, style)),
        MarkerShape::Cross => chart
            .draw_series(points.map(|p| Cross::new(p, size + 1, style)))?
            .label(label)
            .legend(move |(x, y)| Cross::new((x + 10, y), size + 3, style)),
        MarkerShape::Star => chart
            .draw_series(points.map(|p| {
                EmptyElement::at(p)
                    + Cross::new((0, 0), size + 1, style)
                    + PathElement::new(vec![(0, -size - 2), (0, size + 2)], style)
                    + PathElement::new(vec![(-size - 2, 0), (size + 2, 0)], style)
            }))?
            .label(label)
            .legend(move |(x, y)| {
                EmptyElement::at((x + 10, y))
                    + Cross::new((0, 0), size + 3, style)
                    + PathElement::new(vec![(0, -size - 4), (0, size + 4)], style)
            }),
    };
    Ok(())
}
