//! Line extractor: turns raw sysbench output lines into [`Sample`] values.
//!
//! A data line looks like
//!
//! ```text
//! [ 10s ] thds: 64 tps: 5123.45 qps: 102469.00 (r/w/o: ...) lat (ms,95%): 21.89
//! ```
//!
//! The bracketed integer is the offset and the number after `tps:` is the
//! metric. Everything else in the log (headers, warnings, the final summary)
//! is skipped without error.

use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;

use crate::types::{LineMatch, Sample};

static TPS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\s*(\d+)s\s*\].*?tps:\s*([\d.]+)").expect("TPS line pattern must compile")
});

static TPS_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"tps: (\d+\.\d+)").expect("TPS value pattern must compile"));

/// Extract a sample from a single line.
///
/// Only the first occurrence of the pattern is used. A capture that matches
/// the character class but is not a valid number (`1.2.3`, an offset wider
/// than `u64`) is reported as [`LineMatch::NoMatch`].
pub fn extract_line(line: &str) -> LineMatch {
    let Some(caps) = TPS_LINE.captures(line) else {
        return LineMatch::NoMatch;
    };

    let offset = caps[1].parse::<u64>();
    let metric = caps[2].parse::<f64>();
    match (offset, metric) {
        (Ok(offset), Ok(metric)) => LineMatch::Sample(Sample::new(offset, metric)),
        _ => {
            tracing::trace!(line, "tps pattern matched but captures are not numeric");
            LineMatch::NoMatch
        }
    }
}

/// Extract samples from every line of a log, in parallel.
///
/// Lines are fanned out over the rayon pool (sized to the available hardware
/// parallelism). `collect` on an indexed parallel iterator gathers results by
/// position, so the returned samples keep input line order regardless of
/// which worker finished first. Non-matching lines are filtered after the
/// gather.
pub fn extract_batch<S>(lines: &[S]) -> Vec<Sample>
where
    S: AsRef<str> + Sync,
{
    let matches: Vec<LineMatch> = lines
        .par_iter()
        .map(|line| extract_line(line.as_ref()))
        .collect();

    matches.into_iter().filter_map(LineMatch::into_sample).collect()
}

/// Extract a bare TPS value from a line, ignoring any timestamp.
///
/// This is the stricter `tps: <int>.<frac>` form used for distribution
/// reports, where only the metric values matter.
pub fn extract_tps_value(line: &str) -> Option<f64> {
    TPS_VALUE
        .captures(line)
        .and_then(|caps| caps[1].parse::<f64>().ok())
}

/// Collect every bare TPS value from a log, in line order.
pub fn extract_tps_values<S: AsRef<str>>(lines: &[S]) -> Vec<f64> {
    lines
        .iter()
        .filter_map(|line| extract_tps_value(line.as_ref()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
