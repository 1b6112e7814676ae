//! fio steady-state output model.
//!
//! fio's `--steadystate` jobs record the per-interval IOPS and bandwidth it
//! used to judge convergence under `jobs[].steadystate.data`. A run is laid
//! out as two jobs: job 0 uses the mean criterion, job 1 the slope
//! criterion. A results directory may hold an IOPS-driven run
//! (`ss_iops.json`), a bandwidth-driven run (`ss_bw.json`), or both.

use serde::Deserialize;

use crate::normalizer::{rescale, Unit, UnitPolicy};
use crate::types::Series;

/// Top level of fio's `--output-format=json`.
#[derive(Debug, Clone, Deserialize)]
pub struct FioOutput {
    #[serde(default)]
    pub jobs: Vec<FioJob>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FioJob {
    #[serde(default)]
    pub jobname: String,
    pub steadystate: Option<SteadyState>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SteadyState {
    pub data: SteadyStateData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SteadyStateData {
    #[serde(default)]
    pub iops: Vec<f64>,
    #[serde(default)]
    pub bw: Vec<f64>,
}

/// Which steady-state run a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunKind {
    Iops,
    Bandwidth,
}

impl RunKind {
    pub const ALL: [RunKind; 2] = [RunKind::Iops, RunKind::Bandwidth];

    pub fn file_name(self) -> &'static str {
        match self {
            RunKind::Iops => "ss_iops.json",
            RunKind::Bandwidth => "ss_bw.json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Mean,
    Slope,
}

/// Which y axis a series belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Iops,
    Bandwidth,
}

/// One steady-state measurement series, before time normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStateSeries {
    pub run: RunKind,
    pub criterion: Criterion,
    pub metric: Metric,
    pub values: Vec<f64>,
}

impl SteadyStateSeries {
    /// Legend label, e.g. `Mean IOPS` or `Slope Bandwidth (KB/s) (BW)`.
    pub fn label(&self) -> String {
        let criterion = match self.criterion {
            Criterion::Mean => "Mean",
            Criterion::Slope => "Slope",
        };
        let metric = match self.metric {
            Metric::Iops => "IOPS",
            Metric::Bandwidth => "Bandwidth (KB/s)",
        };
        match self.run {
            RunKind::Iops => format!("{criterion} {metric}"),
            RunKind::Bandwidth => format!("{criterion} {metric} (BW)"),
        }
    }

    /// Palette key the renderer resolves to a colour.
    pub fn palette_key(&self) -> &'static str {
        match (self.metric, self.criterion, self.run) {
            (Metric::Iops, Criterion::Mean, RunKind::Iops) => "red",
            (Metric::Iops, Criterion::Slope, RunKind::Iops) => "contrast_yellow",
            (Metric::Iops, Criterion::Mean, RunKind::Bandwidth) => "green",
            (Metric::Iops, Criterion::Slope, RunKind::Bandwidth) => "yellow",
            (Metric::Bandwidth, Criterion::Mean, RunKind::Iops) => "blue",
            (Metric::Bandwidth, Criterion::Slope, RunKind::Iops) => "contrast_blue",
            (Metric::Bandwidth, _, RunKind::Bandwidth) => "grey",
        }
    }
}

impl FioOutput {
    /// Split a run into its mean/slope × IOPS/bandwidth series. Jobs without
    /// steady-state data, or beyond the first two, are ignored.
    pub fn steady_state_series(&self, run: RunKind) -> Vec<SteadyStateSeries> {
        let criteria = [Criterion::Mean, Criterion::Slope];
        let mut out = Vec::new();
        for (job, criterion) in self.jobs.iter().zip(criteria) {
            let Some(ss) = &job.steadystate else {
                continue;
            };
            out.push(SteadyStateSeries {
                run,
                criterion,
                metric: Metric::Iops,
                values: ss.data.iops.clone(),
            });
            out.push(SteadyStateSeries {
                run,
                criterion,
                metric: Metric::Bandwidth,
                values: ss.data.bw.clone(),
            });
        }
        out
    }
}

/// Every steady-state series found in one results directory.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStateSet {
    /// Directory base name, used as a legend suffix when comparing.
    pub name: String,
    pub series: Vec<SteadyStateSeries>,
}

/// A normalized steady-state series, tagged with the axis it plots on.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStatePlot {
    pub metric: Metric,
    pub criterion: Criterion,
    pub series: Series,
}

/// Steady-state sets on one shared time unit.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStateReport {
    pub unit: Unit,
    /// One entry per input set, in input order.
    pub sets: Vec<(String, Vec<SteadyStatePlot>)>,
}

/// Put every series of every set on a shared time axis. The x value of the
/// i-th sample is `i + 1` seconds before unit conversion.
pub fn normalize_steady_state(sets: &[SteadyStateSet]) -> SteadyStateReport {
    let raw: Vec<Vec<(f64, f64)>> = sets
        .iter()
        .flat_map(|set| set.series.iter())
        .map(|s| {
            s.values
                .iter()
                .enumerate()
                .map(|(i, &v)| ((i + 1) as f64, v))
                .collect()
        })
        .collect();

    let (unit, scaled) = rescale(&raw, 1.0, UnitPolicy::SteadyState);
    let mut scaled = scaled.into_iter();

    let sets = sets
        .iter()
        .map(|set| {
            let plots = set
                .series
                .iter()
                .map(|s| SteadyStatePlot {
                    metric: s.metric,
                    criterion: s.criterion,
                    series: Series {
                        label: s.label(),
                        style: s.palette_key().to_string(),
                        points: scaled.next().unwrap_or_default(),
                    },
                })
                .collect();
            (set.name.clone(), plots)
        })
        .collect();

    SteadyStateReport { unit, sets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "fio version": "fio-3.36",
        "jobs": [
            {"jobname": "ss_mean", "steadystate": {"ss": "iops:2%", "data": {"iops": [100, 110, 105], "bw": [400, 440, 420]}}},
            {"jobname": "ss_slope", "steadystate": {"data": {"iops": [90, 95], "bw": [360, 380]}}}
        ]
    }"#;

    #[test]
    fn parses_mean_and_slope_jobs() {
        let out: FioOutput = serde_json::from_str(SAMPLE).unwrap();
        let series = out.steady_state_series(RunKind::Iops);
        let labels: Vec<String> = series.iter().map(SteadyStateSeries::label).collect();
        assert_eq!(
            labels,
            ["Mean IOPS", "Mean Bandwidth (KB/s)", "Slope IOPS", "Slope Bandwidth (KB/s)"]
        );
        assert_eq!(series[0].values, vec![100.0, 110.0, 105.0]);
    }

    #[test]
    fn bandwidth_run_labels_are_suffixed() {
        let out: FioOutput = serde_json::from_str(SAMPLE).unwrap();
        let series = out.steady_state_series(RunKind::Bandwidth);
        assert_eq!(series[0].label(), "Mean IOPS (BW)");
        assert_eq!(series[0].palette_key(), "green");
    }

    #[test]
    fn time_axis_is_one_based_index() {
        let out: FioOutput = serde_json::from_str(SAMPLE).unwrap();
        let set = SteadyStateSet {
            name: "run-a".into(),
            series: out.steady_state_series(RunKind::Iops),
        };
        let report = normalize_steady_state(&[set]);
        assert_eq!(report.unit, Unit::Seconds);
        let (name, plots) = &report.sets[0];
        assert_eq!(name, "run-a");
        assert_eq!(plots[0].series.points, vec![(1.0, 100.0), (2.0, 110.0), (3.0, 105.0)]);
        assert_eq!(plots[2].series.points, vec![(1.0, 90.0), (2.0, 95.0)]);
    }

    #[test]
    fn longest_set_drives_shared_unit() {
        let short = SteadyStateSet {
            name: "short".into(),
            series: vec![SteadyStateSeries {
                run: RunKind::Iops,
                criterion: Criterion::Mean,
                metric: Metric::Iops,
                values: vec![1.0; 10],
            }],
        };
        let long = SteadyStateSet {
            name: "long".into(),
            series: vec![SteadyStateSeries {
                run: RunKind::Iops,
                criterion: Criterion::Mean,
                metric: Metric::Iops,
                values: vec![1.0; 120],
            }],
        };
        let report = normalize_steady_state(&[short, long]);
        assert_eq!(report.unit, Unit::Minutes);
        assert_eq!(report.sets[0].1[0].series.points[9].0, 10.0 / 60.0);
        assert_eq!(report.sets[1].1[0].series.points[119].0, 2.0);
    }
}
