//! Descriptive statistics over metric values: summary moments, histogram
//! bins, box-plot quartiles, a Gaussian KDE and a fitted normal curve.
//!
//! Variance and standard deviation are population statistics (divide by
//! `n`), matching how distribution reports have always been printed.

use std::f64::consts::PI;
use std::fmt::Write as _;

use crate::error::{Error, Result};

/// Summary moments of one set of metric values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    pub fn of(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptySamples);
        }
        let sorted = sorted(values);
        let mean = mean(values);
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

        Ok(Self {
            count: values.len(),
            mean,
            median: percentile_sorted(&sorted, 0.5),
            std_dev: variance.sqrt(),
            variance,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }

    /// Human-readable statistics block for `label`.
    pub fn report(&self, label: &str) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{label} Statistics:");
        let _ = writeln!(out, "Mean TPS: {:.2}", self.mean);
        let _ = writeln!(out, "Median TPS: {:.2}", self.median);
        let _ = writeln!(out, "Standard Deviation of TPS: {:.2}", self.std_dev);
        let _ = writeln!(out, "Variance of TPS: {:.2}", self.variance);
        out
    }
}

/// Five-number summary plus outliers, as drawn by a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value within `q1 - 1.5 * IQR`.
    pub whisker_low: f64,
    /// Largest value within `q3 + 1.5 * IQR`.
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn of(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptySamples);
        }
        let sorted = sorted(values);
        let q1 = percentile_sorted(&sorted, 0.25);
        let median = percentile_sorted(&sorted, 0.5);
        let q3 = percentile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let inside = sorted.iter().copied().filter(|v| (lo_fence..=hi_fence).contains(v));
        let whisker_low = inside.clone().next().unwrap_or(q1);
        let whisker_high = inside.last().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(lo_fence..=hi_fence).contains(v))
            .collect();

        Ok(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// `n` evenly spaced points from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Shared bin edges for comparing several value sets: `bins` equal-width
/// bins spanning the combined minimum and maximum.
pub fn shared_bin_edges(sets: &[&[f64]], bins: usize) -> Result<Vec<f64>> {
    let (lo, hi) = sets
        .iter()
        .flat_map(|s| s.iter().copied())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or(Error::EmptySamples)?;
    Ok(linspace(lo, hi, bins + 1))
}

/// Count values per bin. Bins are half-open `[a, b)` except the last, which
/// also includes its right edge. Values outside the edges are ignored.
pub fn histogram(values: &[f64], edges: &[f64]) -> Vec<u64> {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0u64; bins];
    if bins == 0 {
        return counts;
    }
    let (first, last) = (edges[0], edges[bins]);

    for &v in values {
        if v < first || v > last {
            continue;
        }
        // partition_point gives the number of edges <= v.
        let idx = edges.partition_point(|&e| e <= v).saturating_sub(1).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}

/// Histogram normalised so the bar areas integrate to 1.
pub fn histogram_density(values: &[f64], edges: &[f64]) -> Vec<f64> {
    let counts = histogram(values, edges);
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts
        .iter()
        .zip(edges.windows(2))
        .map(|(&c, w)| {
            let width = w[1] - w[0];
            if width > 0.0 {
                c as f64 / (total as f64 * width)
            } else {
                0.0
            }
        })
        .collect()
}

/// Probability density of `N(mean, std_dev)` at `x`.
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * PI).sqrt())
}

/// Normal curve fitted to `values` over `mean ± 3σ`, with the density scaled
/// to percent.
///
/// Returns an empty curve when the values have no spread.
pub fn normal_curve(values: &[f64], points: usize) -> Result<Vec<(f64, f64)>> {
    let summary = Summary::of(values)?;
    if summary.std_dev <= 0.0 {
        return Ok(Vec::new());
    }
    let (m, s) = (summary.mean, summary.std_dev);
    Ok(linspace(m - 3.0 * s, m + 3.0 * s, points)
        .into_iter()
        .map(|x| (x, normal_pdf(x, m, s) * 100.0))
        .collect())
}

/// Scott's rule bandwidth: `n^(-1/5)` times the sample standard deviation.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let m = mean(values);
    let sample_var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    let h = sample_var.sqrt() * (n as f64).powf(-0.2);
    (h.is_finite() && h > 0.0).then_some(h)
}

/// Gaussian kernel density estimate evaluated on `grid_points` positions
/// spanning three bandwidths beyond the data on either side.
///
/// Returns an empty curve when the bandwidth is degenerate (fewer than two
/// values, or no spread).
pub fn gaussian_kde(values: &[f64], grid_points: usize) -> Result<Vec<(f64, f64)>> {
    let summary = Summary::of(values)?;
    let Some(h) = scott_bandwidth(values) else {
        tracing::warn!(count = values.len(), "kde skipped: values have no spread");
        return Ok(Vec::new());
    };

    let norm = 1.0 / (values.len() as f64 * h * (2.0 * PI).sqrt());
    Ok(linspace(summary.min - 3.0 * h, summary.max + 3.0 * h, grid_points)
        .into_iter()
        .map(|x| {
            let density = values
                .iter()
                .map(|v| {
                    let z = (x - v) / h;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            (x, density)
        })
        .collect())
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Linear-interpolated percentile of already sorted, non-empty values.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * p;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
