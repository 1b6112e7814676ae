//! Domain-specific assertion macros for benchplot harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* series or file broke the expectation.

// ---------------------------------------------------------------------------
// Normalized report assertions
// ---------------------------------------------------------------------------

/// Assert the display unit chosen for a normalized report.
///
/// ```rust
/// assert_unit!(report, Unit::Hours);
/// ```
#[macro_export]
macro_rules! assert_unit {
    ($report:expr, $unit:expr) => {{
        let report: &benchplot_core::NormalizedReport = &$report;
        let expected: benchplot_core::Unit = $unit;
        if report.unit != expected {
            panic!(
                "assert_unit! failed:\n  expected: {:?}\n  actual:   {:?}\n  max x per series: {:?}",
                expected,
                report.unit,
                report
                    .series
                    .iter()
                    .map(|s| s.points.iter().map(|p| p.0).fold(0.0_f64, f64::max))
                    .collect::<Vec<_>>()
            );
        }
    }};
}

/// Assert the exact `(x, metric)` points of one series, compared with a
/// small tolerance on x because offsets are divided by the unit.
#[macro_export]
macro_rules! assert_points {
    ($series:expr, $expected:expr) => {{
        let series: &benchplot_core::Series = &$series;
        let expected: &[(f64, f64)] = &$expected;
        if series.points.len() != expected.len() {
            panic!(
                "assert_points! failed for {:?}: expected {} points, got {}\n  actual: {:?}",
                series.label,
                expected.len(),
                series.points.len(),
                series.points
            );
        }
        for (i, (actual, wanted)) in series.points.iter().zip(expected.iter()).enumerate() {
            if (actual.0 - wanted.0).abs() > 1e-9 || actual.1 != wanted.1 {
                panic!(
                    "assert_points! failed for {:?} at index {}:\n  expected: {:?}\n  actual:   {:?}",
                    series.label, i, wanted, actual
                );
            }
        }
    }};
}

/// Assert the labels of a report's series, in order.
#[macro_export]
macro_rules! assert_series_order {
    ($report:expr, [$($label:expr),* $(,)?]) => {{
        let report: &benchplot_core::NormalizedReport = &$report;
        let actual: Vec<&str> = report.series.iter().map(|s| s.label.as_str()).collect();
        let expected: Vec<&str> = vec![$($label),*];
        pretty_assertions::assert_eq!(actual, expected, "series are not in input order");
    }};
}

// ---------------------------------------------------------------------------
// Output file assertions
// ---------------------------------------------------------------------------

/// Assert that a file exists and is an SVG document, returning its text.
#[macro_export]
macro_rules! assert_svg {
    ($path:expr) => {{
        let owned = $path;
        let path: &std::path::Path = owned.as_ref();
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("assert_svg! failed: cannot read {}: {e}", path.display()));
        if !text.contains("<svg") {
            panic!(
                "assert_svg! failed: {} is not an SVG document.\n  starts with: {:?}",
                path.display(),
                text.chars().take(80).collect::<String>()
            );
        }
        text
    }};
}
