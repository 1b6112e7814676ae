//! Distribution charts for the variance report: histogram, box plot, KDE
//! density, normal curve and their combinations.
//!
//! Each chart takes one or two [`Dataset`]s. Histograms of several datasets
//! share bin edges so their bars line up.

use std::path::Path;

use benchplot_core::stats::{
    gaussian_kde, histogram, histogram_density, normal_curve, shared_bin_edges, BoxStats, Summary,
};
use benchplot_core::{Error, Result};
use plotters::prelude::*;
use plotters::style::RGBColor;

use super::{category_label, draw_legend, draw_mesh, finish, headroom, span, DrawResult, SvgChart};
use crate::Canvas;

const TPS_AXIS: &str = "Transactions Per Second (TPS)";
const CURVE_POINTS: usize = 100;
const KDE_POINTS: usize = 200;

/// One labelled set of metric values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub color: RGBColor,
    pub values: Vec<f64>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, color: RGBColor, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            color,
            values,
        }
    }
}

/// File names of the distribution charts, in the order [`render_all`]
/// writes them.
pub const CHART_FILES: [&str; 7] = [
    "histogram.svg",
    "box_plot.svg",
    "density_plot.svg",
    "combined_hist_density.svg",
    "bell_curve.svg",
    "combined_hist_bell_curve.svg",
    "variance_bar.svg",
];

/// Write every distribution chart into `dir`.
pub fn render_all(dir: &Path, canvas: &Canvas, datasets: &[Dataset], bins: usize) -> Result<()> {
    let [hist, boxes, density, hist_density, bell, hist_bell, variance] = CHART_FILES.map(|f| dir.join(f));
    histogram_chart(&hist, canvas, datasets, bins)?;
    box_plot(&boxes, canvas, datasets)?;
    density_plot(&density, canvas, datasets)?;
    combined_hist_density(&hist_density, canvas, datasets, bins)?;
    bell_curve(&bell, canvas, datasets)?;
    combined_hist_bell_curve(&hist_bell, canvas, datasets, bins)?;
    variance_bars(&variance, canvas, datasets)
}

// ---------------------------------------------------------------------------
// Public charts
// ---------------------------------------------------------------------------

/// Overlaid frequency histograms on shared bins.
pub fn histogram_chart(path: &Path, canvas: &Canvas, datasets: &[Dataset], bins: usize) -> Result<()> {
    let bars = Bars::counts(datasets, bins)?;
    finish(
        path,
        draw_single(
            path,
            canvas,
            "Distribution of TPS Values",
            "Frequency",
            |chart| draw_bars(chart, &bars, 0.5, ""),
            bars.x_range(),
            (0.0, headroom(bars.y_max)),
        ),
    )
}

/// One box per dataset with whiskers at 1.5 IQR and outliers as points.
pub fn box_plot(path: &Path, canvas: &Canvas, datasets: &[Dataset]) -> Result<()> {
    let boxes = datasets
        .iter()
        .map(|d| BoxStats::of(&d.values))
        .collect::<Result<Vec<_>>>()?;
    finish(path, draw_boxes(path, canvas, datasets, &boxes))
}

/// Filled kernel density estimate per dataset.
pub fn density_plot(path: &Path, canvas: &Canvas, datasets: &[Dataset]) -> Result<()> {
    let curves = kde_curves(datasets)?;
    let (x_range, y_max) = curve_bounds(&curves);
    finish(
        path,
        draw_single(
            path,
            canvas,
            "Density Plot of TPS Values",
            "Density",
            |chart| {
                for (d, curve) in datasets.iter().zip(&curves) {
                    draw_area(chart, curve, d.color, &d.label)?;
                }
                Ok(())
            },
            x_range,
            (0.0, headroom(y_max)),
        ),
    )
}

/// Density-normalised histograms with KDE lines on top.
pub fn combined_hist_density(path: &Path, canvas: &Canvas, datasets: &[Dataset], bins: usize) -> Result<()> {
    let bars = Bars::density(datasets, bins)?;
    let curves = kde_curves(datasets)?;
    let (curve_x, curve_y) = curve_bounds(&curves);
    let (bar_lo, bar_hi) = bars.x_range();
    let x_range = span(bar_lo.min(curve_x.0), bar_hi.max(curve_x.1));
    let y_max = bars.y_max.max(curve_y);

    finish(
        path,
        draw_single(
            path,
            canvas,
            "Combined Histogram and Density Plot of TPS Values",
            "Frequency/Density",
            |chart| {
                draw_bars(chart, &bars, 0.3, "Histogram ")?;
                for (d, curve) in datasets.iter().zip(&curves) {
                    draw_line(chart, curve, d.color, 2, &format!("Density {}", d.label))?;
                }
                Ok(())
            },
            x_range,
            (0.0, headroom(y_max)),
        ),
    )
}

/// Normal curve fitted to each dataset, density in percent.
pub fn bell_curve(path: &Path, canvas: &Canvas, datasets: &[Dataset]) -> Result<()> {
    let curves = bell_curves(datasets)?;
    let (x_range, y_max) = curve_bounds(&curves);
    finish(
        path,
        draw_single(
            path,
            canvas,
            "Bell Curve (Normal Distribution) of TPS Values",
            "Probability Density (%)",
            |chart| {
                for (d, curve) in datasets.iter().zip(&curves) {
                    draw_line(chart, curve, d.color, 2, &format!("Bell Curve {}", d.label))?;
                }
                Ok(())
            },
            x_range,
            (0.0, headroom(y_max)),
        ),
    )
}

/// Frequency histogram on the left axis, normal curves on the right axis,
/// with vertical markers at the mean and at one standard deviation either
/// side.
pub fn combined_hist_bell_curve(path: &Path, canvas: &Canvas, datasets: &[Dataset], bins: usize) -> Result<()> {
    let bars = Bars::counts(datasets, bins)?;
    let curves = bell_curves(datasets)?;
    let summaries = datasets
        .iter()
        .map(|d| Summary::of(&d.values))
        .collect::<Result<Vec<_>>>()?;
    finish(path, draw_hist_bell(path, canvas, datasets, &bars, &curves, &summaries))
}

/// Bar per dataset showing its population variance.
pub fn variance_bars(path: &Path, canvas: &Canvas, datasets: &[Dataset]) -> Result<()> {
    let variances = datasets
        .iter()
        .map(|d| Summary::of(&d.values).map(|s| s.variance))
        .collect::<Result<Vec<_>>>()?;
    finish(path, draw_variance(path, canvas, datasets, &variances))
}

// ---------------------------------------------------------------------------
// Shared histogram geometry
// ---------------------------------------------------------------------------

/// Bin edges plus one height column per dataset.
struct Bars {
    edges: Vec<f64>,
    heights: Vec<(String, RGBColor, Vec<f64>)>,
    y_max: f64,
}

impl Bars {
    fn counts(datasets: &[Dataset], bins: usize) -> Result<Self> {
        Self::build(datasets, bins, |values, edges| {
            histogram(values, edges).into_iter().map(|c| c as f64).collect()
        })
    }

    fn density(datasets: &[Dataset], bins: usize) -> Result<Self> {
        Self::build(datasets, bins, histogram_density)
    }

    fn build(datasets: &[Dataset], bins: usize, heights_of: impl Fn(&[f64], &[f64]) -> Vec<f64>) -> Result<Self> {
        if datasets.iter().any(|d| d.values.is_empty()) {
            return Err(Error::EmptySamples);
        }
        let sets: Vec<&[f64]> = datasets.iter().map(|d| d.values.as_slice()).collect();
        let edges = shared_bin_edges(&sets, bins.max(1))?;
        let heights: Vec<(String, RGBColor, Vec<f64>)> = datasets
            .iter()
            .map(|d| (d.label.clone(), d.color, heights_of(&d.values, &edges)))
            .collect();
        let y_max = heights
            .iter()
            .flat_map(|(_, _, h)| h.iter().copied())
            .fold(0.0, f64::max);
        Ok(Self { edges, heights, y_max })
    }

    fn x_range(&self) -> (f64, f64) {
        let lo = self.edges.first().copied().unwrap_or(0.0);
        let hi = self.edges.last().copied().unwrap_or(1.0);
        span(lo, hi)
    }
}

fn kde_curves(datasets: &[Dataset]) -> Result<Vec<Vec<(f64, f64)>>> {
    datasets.iter().map(|d| gaussian_kde(&d.values, KDE_POINTS)).collect()
}

fn bell_curves(datasets: &[Dataset]) -> Result<Vec<Vec<(f64, f64)>>> {
    datasets.iter().map(|d| normal_curve(&d.values, CURVE_POINTS)).collect()
}

/// x range and y maximum over several curves.
fn curve_bounds(curves: &[Vec<(f64, f64)>]) -> ((f64, f64), f64) {
    let mut points = curves.iter().flatten().peekable();
    if points.peek().is_none() {
        return ((0.0, 1.0), 0.0);
    }
    let (lo, hi, y) = points.fold((f64::INFINITY, f64::NEG_INFINITY, 0.0f64), |(lo, hi, y), &(px, py)| {
        (lo.min(px), hi.max(px), y.max(py))
    });
    (span(lo, hi), y)
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw_single(
    path: &Path,
    canvas: &Canvas,
    title: &str,
    y_label: &str,
    body: impl FnOnce(&mut SvgChart<'_, '_>) -> DrawResult,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> DrawResult {
    let root = SVGBackend::new(path, (canvas.width, canvas.height)).into_drawing_area();
    root.fill(&canvas.theme.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, canvas.font(30.0))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    draw_mesh(&mut chart, canvas, TPS_AXIS, y_label, None)?;
    body(&mut chart)?;
    draw_legend(&mut chart, canvas)?;
    root.present()?;
    Ok(())
}

fn draw_bars(chart: &mut SvgChart<'_, '_>, bars: &Bars, alpha: f64, prefix: &str) -> DrawResult {
    for (label, color, heights) in &bars.heights {
        let fill = color.mix(alpha).filled();
        let color = *color;
        chart
            .draw_series(
                bars.edges
                    .windows(2)
                    .zip(heights)
                    .filter(|(_, h)| **h > 0.0)
                    .map(|(w, &h)| Rectangle::new([(w[0], 0.0), (w[1], h)], fill)),
            )?
            .label(format!("{prefix}{label}"))
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.mix(alpha).filled()));
        chart.draw_series(
            bars.edges
                .windows(2)
                .zip(heights)
                .filter(|(_, h)| **h > 0.0)
                .map(|(w, &h)| Rectangle::new([(w[0], 0.0), (w[1], h)], BLACK.stroke_width(1))),
        )?;
    }
    Ok(())
}

fn draw_line(chart: &mut SvgChart<'_, '_>, curve: &[(f64, f64)], color: RGBColor, width: u32, label: &str) -> DrawResult {
    chart
        .draw_series(LineSeries::new(curve.iter().copied(), color.stroke_width(width)))?
        .label(label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width)));
    Ok(())
}

fn draw_area(chart: &mut SvgChart<'_, '_>, curve: &[(f64, f64)], color: RGBColor, label: &str) -> DrawResult {
    chart
        .draw_series(AreaSeries::new(curve.iter().copied(), 0.0, color.mix(0.3)).border_style(color.stroke_width(2)))?
        .label(label)
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.mix(0.3).filled()));
    Ok(())
}

/// Dotted vertical line across the whole y range; `width` sets the dot radius.
fn draw_dotted_vline(chart: &mut SvgChart<'_, '_>, x: f64, y_max: f64, color: RGBColor, width: u32) -> DrawResult {
    let style = color.mix(0.8).filled();
    let radius = width as i32;
    chart.draw_series(DottedLineSeries::new(
        [(x, 0.0), (x, y_max)],
        0,
        3 + 3 * radius,
        move |c| Circle::new(c, radius, style),
    ))?;
    Ok(())
}

fn draw_boxes(path: &Path, canvas: &Canvas, datasets: &[Dataset], boxes: &[BoxStats]) -> DrawResult {
    let root = SVGBackend::new(path, (canvas.width, canvas.height)).into_drawing_area();
    root.fill(&canvas.theme.background)?;

    let (lo, hi) = datasets
        .iter()
        .flat_map(|d| d.values.iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let pad = (hi - lo).abs() * 0.05;
    let (y_lo, y_hi) = span(lo - pad, hi + pad);
    let labels: Vec<String> = datasets.iter().map(|d| d.label.clone()).collect();
    let formatter = |x: &f64| category_label(&labels, *x);

    let mut chart = ChartBuilder::on(&root)
        .caption("Box Plot of TPS Values", canvas.font(30.0))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(-0.5..(datasets.len() as f64 - 0.5), y_lo..y_hi)?;

    draw_mesh(&mut chart, canvas, "", TPS_AXIS, Some(&formatter))?;

    let edge = canvas.theme.foreground;
    for (i, (d, b)) in datasets.iter().zip(boxes).enumerate() {
        let x = i as f64;
        let (left, right) = (x - 0.25, x + 0.25);
        chart.draw_series([
            Rectangle::new([(left, b.q1), (right, b.q3)], d.color.mix(0.8).filled()),
            Rectangle::new([(left, b.q1), (right, b.q3)], edge.stroke_width(1)),
        ])?;
        chart.draw_series([
            PathElement::new(vec![(left, b.median), (right, b.median)], edge.stroke_width(2)),
            PathElement::new(vec![(x, b.q3), (x, b.whisker_high)], edge.stroke_width(1)),
            PathElement::new(vec![(x, b.q1), (x, b.whisker_low)], edge.stroke_width(1)),
            PathElement::new(vec![(x - 0.1, b.whisker_high), (x + 0.1, b.whisker_high)], edge.stroke_width(1)),
            PathElement::new(vec![(x - 0.1, b.whisker_low), (x + 0.1, b.whisker_low)], edge.stroke_width(1)),
        ])?;
        chart.draw_series(b.outliers.iter().map(|&v| Circle::new((x, v), 4, edge.stroke_width(1))))?;
    }

    root.present()?;
    Ok(())
}

fn draw_hist_bell(
    path: &Path,
    canvas: &Canvas,
    datasets: &[Dataset],
    bars: &Bars,
    curves: &[Vec<(f64, f64)>],
    summaries: &[Summary],
) -> DrawResult {
    let root = SVGBackend::new(path, (canvas.width, canvas.height)).into_drawing_area();
    root.fill(&canvas.theme.background)?;

    let (curve_x, curve_y) = curve_bounds(curves);
    let (bar_lo, bar_hi) = bars.x_range();
    let (x_lo, x_hi) = span(bar_lo.min(curve_x.0), bar_hi.max(curve_x.1));
    let y_max = headroom(bars.y_max);
    let y2_max = headroom(curve_y);

    let mut chart = ChartBuilder::on(&root)
        .caption("Combined Histogram and Bell Curve of TPS Values", canvas.font(30.0))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .right_y_label_area_size(90)
        .build_cartesian_2d(x_lo..x_hi, 0.0..y_max)?
        .set_secondary_coord(x_lo..x_hi, 0.0..y2_max);

    draw_mesh(&mut chart, canvas, TPS_AXIS, "Frequency", None)?;
    chart
        .configure_secondary_axes()
        .y_desc("Probability Density (%)")
        .label_style(canvas.font(15.0))
        .axis_desc_style(canvas.font(18.0))
        .axis_style(canvas.theme.foreground)
        .draw()?;

    draw_bars(&mut chart, bars, 0.5, "")?;

    for ((d, curve), s) in datasets.iter().zip(curves).zip(summaries) {
        let color = d.color;
        chart
            .draw_secondary_series(DashedLineSeries::new(curve.iter().copied(), 10, 6, color.stroke_width(2)))?
            .label(format!("Bell Curve {}", d.label))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        draw_dotted_vline(&mut chart, s.mean, y_max, color, 2)?;
        if s.std_dev > 0.0 {
            draw_dotted_vline(&mut chart, s.mean - s.std_dev, y_max, color, 1)?;
            draw_dotted_vline(&mut chart, s.mean + s.std_dev, y_max, color, 1)?;
        }
    }

    draw_legend(&mut chart, canvas)?;
    root.present()?;
    Ok(())
}

fn draw_variance(path: &Path, canvas: &Canvas, datasets: &[Dataset], variances: &[f64]) -> DrawResult {
    let root = SVGBackend::new(path, (canvas.width, canvas.height)).into_drawing_area();
    root.fill(&canvas.theme.background)?;

    let labels: Vec<String> = datasets.iter().map(|d| d.label.clone()).collect();
    let formatter = |x: &f64| category_label(&labels, *x);
    let y_max = headroom(variances.iter().copied().fold(0.0, f64::max));

    let mut chart = ChartBuilder::on(&root)
        .caption("Variance of TPS Values", canvas.font(30.0))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(110)
        .build_cartesian_2d(-0.5..(datasets.len() as f64 - 0.5), 0.0..y_max)?;

    draw_mesh(&mut chart, canvas, "", "Variance", Some(&formatter))?;

    chart.draw_series(datasets.iter().zip(variances).enumerate().map(|(i, (d, &v))| {
        let x = i as f64;
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, v)], d.color.filled())
    }))?;

    root.present()?;
    Ok(())
}
