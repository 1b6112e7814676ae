//! IO block-size and alignment histograms, block size on the left and
//! alignment on the right: grouped bars, or a 3D view with one row of bars
//! per input.

use std::path::Path;

use benchplot_core::alignment::{bar_groups, bars_3d, union_keys, AlignmentHistograms, HistogramKind};
use benchplot_core::format::format_size;
use benchplot_core::Result;
use plotters::prelude::*;
use plotters::style::RGBColor;
use tracing::debug;

use super::{category_label, draw_legend, draw_mesh, finish, headroom, DrawResult};

const PLACEHOLDER_COLOR: RGBColor = RGBColor(128, 128, 128);
/// Depth of one input row in the 3D view, in rows.
const ROW_DEPTH: f64 = 0.8;
/// Width of one bar in the 3D view, in buckets.
const BAR_WIDTH: f64 = 0.6;
use crate::Canvas;

/// One input file of the comparison.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentInput<'a> {
    pub label: &'a str,
    pub color: RGBColor,
    pub histograms: &'a AlignmentHistograms,
}

/// Draw the block-size panel on the left and the alignment panel on the
/// right. A histogram missing from every input leaves its panel empty.
pub fn alignment(path: &Path, canvas: &Canvas, inputs: &[AlignmentInput<'_>]) -> Result<()> {
    finish(path, draw(path, canvas, inputs))
}

/// Same two panels as [`alignment`], drawn as 3D bars: buckets along x,
/// inputs along the depth axis, counts upwards.
pub fn alignment_3d(path: &Path, canvas: &Canvas, inputs: &[AlignmentInput<'_>]) -> Result<()> {
    finish(path, draw_3d(path, canvas, inputs))
}

fn draw(path: &Path, canvas: &Canvas, inputs: &[AlignmentInput<'_>]) -> DrawResult {
    let root = SVGBackend::new(path, (canvas.width, canvas.height)).into_drawing_area();
    root.fill(&canvas.theme.background)?;

    let panels = root.split_evenly((1, 2));
    for (panel, kind) in panels.iter().zip(HistogramKind::ALL) {
        draw_panel(panel, canvas, kind, inputs)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, plotters::coord::Shift>,
    canvas: &Canvas,
    kind: HistogramKind,
    inputs: &[AlignmentInput<'_>],
) -> DrawResult {
    let present: Vec<(&AlignmentInput<'_>, _)> = inputs
        .iter()
        .filter_map(|i| i.histograms.get(kind).map(|h| (i, h)))
        .collect();
    let buckets: Vec<_> = present.iter().map(|(_, h)| *h).collect();
    let keys = union_keys(buckets.iter().copied());
    let groups = bar_groups(&keys, &buckets);
    debug!(histogram = kind.json_key(), buckets = keys.len(), inputs = present.len(), "alignment panel");

    let labels: Vec<String> = groups.iter().map(|(label, _)| label.clone()).collect();
    let formatter = |x: &f64| category_label(&labels, *x);
    let y_max = groups
        .iter()
        .flat_map(|(_, counts)| counts.iter().copied())
        .max()
        .unwrap_or(0) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(kind.title(), canvas.font(26.0))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(-0.5..(groups.len().max(1) as f64 - 0.5), 0.0..headroom(y_max))?;

    draw_mesh(&mut chart, canvas, kind.axis_label(), "Count", Some(&formatter))?;

    let width = 0.8 / present.len().max(1) as f64;
    for (slot, (input, _)) in present.iter().enumerate() {
        let color = input.color;
        let offset = -0.4 + width * slot as f64;
        chart
            .draw_series(groups.iter().enumerate().map(|(i, (_, counts))| {
                let x0 = i as f64 + offset;
                Rectangle::new([(x0, 0.0), (x0 + width, counts[slot] as f64)], color.filled())
            }))?
            .label(input.label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    if !present.is_empty() {
        draw_legend(&mut chart, canvas)?;
    }
    Ok(())
}

fn draw_3d(path: &Path, canvas: &Canvas, inputs: &[AlignmentInput<'_>]) -> DrawResult {
    let root = SVGBackend::new(path, (canvas.width, canvas.height)).into_drawing_area();
    root.fill(&canvas.theme.background)?;

    let panels = root.split_evenly((1, 2));
    for (panel, kind) in panels.iter().zip(HistogramKind::ALL) {
        draw_panel_3d(panel, canvas, kind, inputs)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel_3d(
    area: &DrawingArea<SVGBackend<'_>, plotters::coord::Shift>,
    canvas: &Canvas,
    kind: HistogramKind,
    inputs: &[AlignmentInput<'_>],
) -> DrawResult {
    let histograms: Vec<_> = inputs.iter().map(|i| i.histograms.get(kind)).collect();
    let keys = union_keys(histograms.iter().flatten().copied());
    let bars = bars_3d(&keys, &histograms);
    debug!(histogram = kind.json_key(), buckets = keys.len(), bars = bars.len(), "alignment 3d panel");

    let bucket_labels: Vec<String> = keys.iter().map(|k| format_size(*k)).collect();
    let input_labels: Vec<String> = inputs.iter().map(|i| i.label.to_string()).collect();
    let x_formatter = |x: &f64| category_label(&bucket_labels, *x);
    let z_formatter = |z: &f64| category_label(&input_labels, *z);

    let y_max = headroom(bars.iter().map(|b| b.count).max().unwrap_or(0) as f64);
    let placeholder_height = y_max * 0.02;
    let x_hi = keys.len().max(1) as f64 - 0.5;
    let z_hi = inputs.len().max(1) as f64 - 0.5;

    let mut chart = ChartBuilder::on(area)
        .caption(kind.title(), canvas.font(26.0))
        .margin(20)
        .build_cartesian_3d(-0.5..x_hi, 0.0..y_max, -0.5..z_hi)?;
    chart.with_projection(|mut p| {
        p.pitch = 0.35;
        p.yaw = 0.9;
        p.scale = 0.8;
        p.into_matrix()
    });

    chart
        .configure_axes()
        .x_labels(keys.len().max(1))
        .z_labels(inputs.len().max(1))
        .label_style(canvas.font(13.0))
        .axis_panel_style(canvas.theme.grid.mix(0.1))
        .bold_grid_style(canvas.theme.grid.mix(0.4))
        .x_formatter(&x_formatter)
        .z_formatter(&z_formatter)
        .draw()?;

    let edge = canvas.theme.foreground.mix(0.3);
    chart.draw_series(bars.iter().map(|bar| {
        let x0 = bar.bucket as f64 - BAR_WIDTH / 2.0;
        let z0 = bar.input as f64 - ROW_DEPTH / 2.0;
        let (height, face) = if bar.placeholder {
            (placeholder_height, PLACEHOLDER_COLOR.mix(0.5))
        } else {
            (bar.count as f64, inputs[bar.input].color.mix(bar.alpha))
        };
        Cubiod::new([(x0, 0.0, z0), (x0 + BAR_WIDTH, height, z0 + ROW_DEPTH)], face.filled(), edge)
    }))?;

    // Legend entries only, one per input.
    for input in inputs {
        let color = input.color;
        chart
            .draw_series(std::iter::empty::<Cubiod<f64, f64, f64>>())?
            .label(input.label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }
    if !inputs.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .margin(10)
            .background_style(canvas.theme.legend_background.mix(0.8))
            .border_style(canvas.theme.legend_border)
            .label_font(canvas.legend_font())
            .draw()?;
    }
    Ok(())
}
