//! Series normalizer: scales raw offsets into one display unit shared by
//! every source of a report.
//!
//! The unit is picked once, from the maximum scaled offset over *all*
//! sources, so series drawn on the same axis stay comparable. Two named
//! policies exist because the transaction-rate and steady-state reports have
//! always used different thresholds; they are kept apart rather than merged.

use std::fmt;

use crate::error::{Error, Result};
use crate::types::{Series, Source};

/// Display unit of a report's time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Seconds,
    Minutes,
    Hours,
}

impl Unit {
    /// Number of seconds in one unit.
    pub fn divisor(self) -> f64 {
        match self {
            Unit::Seconds => 1.0,
            Unit::Minutes => 60.0,
            Unit::Hours => 3600.0,
        }
    }

    /// Axis label handed to the renderer.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Seconds => "Time (seconds)",
            Unit::Minutes => "Time (minutes)",
            Unit::Hours => "Time (hours)",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Seconds => write!(f, "seconds"),
            Unit::Minutes => write!(f, "minutes"),
            Unit::Hours => write!(f, "hours"),
        }
    }
}

/// Threshold rule that maps a report's maximum offset (in seconds) to a
/// [`Unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitPolicy {
    /// sysbench TPS logs: hours when the maximum exceeds 7200s, otherwise
    /// seconds. Exactly 7200 stays in seconds. No minutes tier.
    TransactionRate,
    /// fio steady-state series: hours from 3600s, minutes from 60s,
    /// otherwise seconds. Both thresholds are inclusive.
    SteadyState,
}

impl UnitPolicy {
    const TRANSACTION_RATE_HOURS_AFTER: f64 = 2.0 * 3600.0;

    pub fn select(self, max_offset: f64) -> Unit {
        match self {
            UnitPolicy::TransactionRate => {
                if max_offset > Self::TRANSACTION_RATE_HOURS_AFTER {
                    Unit::Hours
                } else {
                    Unit::Seconds
                }
            }
            UnitPolicy::SteadyState => {
                if max_offset >= 3600.0 {
                    Unit::Hours
                } else if max_offset >= 60.0 {
                    Unit::Minutes
                } else {
                    Unit::Seconds
                }
            }
        }
    }
}

/// Multiplier converting logged offsets into seconds, for logs written with
/// `--report-interval N`. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportInterval(u64);

impl ReportInterval {
    pub fn new(seconds: u64) -> Result<Self> {
        if seconds == 0 {
            return Err(Error::InvalidInterval(seconds));
        }
        Ok(Self(seconds))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Default for ReportInterval {
    fn default() -> Self {
        Self(1)
    }
}

/// Output of [`normalize`]: one shared unit and one series per input source,
/// in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReport {
    pub unit: Unit,
    pub series: Vec<Series>,
}

impl NormalizedReport {
    /// `true` when no source contributed a single point.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(Series::is_empty)
    }

    pub fn time_label(&self) -> &'static str {
        self.unit.label()
    }
}

/// Normalize every source of a report onto one shared time unit.
///
/// Each offset is first scaled by the report interval; the unit is then
/// chosen from the largest scaled offset across all sources (an empty
/// source contributes 0), and every offset is divided by that unit. Points
/// are never dropped or reordered.
pub fn normalize(sources: &[Source], interval: ReportInterval, policy: UnitPolicy) -> NormalizedReport {
    let raw: Vec<Vec<(f64, f64)>> = sources
        .iter()
        .map(|src| {
            src.samples
                .iter()
                .map(|s| (s.offset as f64, s.metric))
                .collect()
        })
        .collect();

    let (unit, scaled) = rescale(&raw, interval.get() as f64, policy);

    let series = sources
        .iter()
        .zip(scaled)
        .map(|(src, points)| Series {
            label: src.label.clone(),
            style: src.style.clone(),
            points,
        })
        .collect();

    NormalizedReport { unit, series }
}

/// The transform behind [`normalize`], over raw `(offset, metric)` pairs.
///
/// Used directly for series whose time axis is not a logged offset (fio
/// steady-state samples are indexed 1..=n).
pub fn rescale(series: &[Vec<(f64, f64)>], interval: f64, policy: UnitPolicy) -> (Unit, Vec<Vec<(f64, f64)>>) {
    let max_offset = series
        .iter()
        .flat_map(|points| points.iter().map(|(t, _)| t * interval))
        .fold(0.0_f64, f64::max);

    let unit = policy.select(max_offset);
    let divisor = unit.divisor();
    tracing::debug!(max_offset, %unit, "selected report time unit");

    let scaled = series
        .iter()
        .map(|points| {
            points
                .iter()
                .map(|&(t, metric)| (t * interval / divisor, metric))
                .collect()
        })
        .collect();

    (unit, scaled)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
