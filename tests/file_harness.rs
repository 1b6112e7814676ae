#![allow(unused)]
//! File feed integration harness.
//!
//! # What this covers
//!
//! - **Multi-file loading**: `load_all` returns one output per feed in feed
//!   order, whatever order the pool finishes them in.
//! - **Missing inputs**: a missing log aborts the whole report with an I/O
//!   error naming the path; there is no partial result.
//! - **fio results directories**: one or both steady-state files are picked
//!   up; a directory with neither is an error.
//! - **Alignment JSON**: histograms present in the document are loaded,
//!   absent ones are `None`.
//!
//! # What this does NOT cover
//!
//! - Reading from stdin (`-`), which needs a child process
//!
//! # Running
//!
//! ```sh
//! cargo test --test file_harness
//! ```

mod common;
use common::*;

use std::path::PathBuf;

use benchplot_core::alignment::HistogramKind;
use benchplot_core::fio::{normalize_steady_state, RunKind};
use benchplot_core::{Error, Sample, Unit};
use benchplot_feeds::{load_all, AlignmentFile, LogFile, SteadyStateDir, TpsValuesFile};
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// sysbench logs
// ---------------------------------------------------------------------------

#[test]
fn many_logs_keep_feed_order() {
    let logs: Vec<(String, String)> = (0..16u64)
        .map(|i| {
            let log = SysbenchLog::new().sample(1, i as f64).sample(2, i as f64 + 0.5).build();
            (format!("run{i:02}.log"), log)
        })
        .collect();
    let named: Vec<(&str, String)> = logs.iter().map(|(n, l)| (n.as_str(), l.clone())).collect();
    let (_dir, paths) = log_dir(&named);

    let feeds: Vec<LogFile> = paths
        .iter()
        .enumerate()
        .map(|(i, p)| LogFile::new(p, format!("run{i:02}"), "r*"))
        .collect();
    let sources = load_all(&feeds).unwrap();

    for (i, source) in sources.iter().enumerate() {
        assert_eq!(source.label, format!("run{i:02}"));
        assert_eq!(source.samples[0], Sample::new(1, i as f64));
    }
}

#[test]
fn missing_log_fails_the_report() {
    let (dir, mut paths) = log_dir(&[("present.log", SysbenchLog::new().sample(1, 1.0).build())]);
    let missing = dir.path().join("missing.log");
    paths.push(missing.clone());

    let feeds: Vec<LogFile> = paths.iter().map(|p| LogFile::new(p, "x", "r*")).collect();
    match load_all(&feeds) {
        Err(Error::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected Io error for {}, got {other:?}", missing.display()),
    }
}

#[test]
fn log_without_samples_loads_empty() {
    let (_dir, paths) = log_dir(&[("empty.log", String::new())]);
    let source = load_all(&[LogFile::new(&paths[0], "empty", "r*")]).unwrap().remove(0);
    assert!(source.is_empty());
}

#[test]
fn tps_values_skip_integer_rates() {
    let log = SysbenchLog::new().sample(1, 12.5).noise("[ 2s ] tps: 12").build();
    let (_dir, paths) = log_dir(&[("run.log", log)]);
    let values = load_all(&[TpsValuesFile { path: paths[0].clone() }]).unwrap();
    assert_eq!(values, vec![vec![12.5]]);
}

// ---------------------------------------------------------------------------
// fio results directories
// ---------------------------------------------------------------------------

#[test]
fn steady_state_dir_with_both_runs() {
    let parent = tempfile::tempdir().unwrap();
    let dir = fio_dir(
        parent.path(),
        "baseline",
        &[("ss_iops.json", FIO_STEADY_STATE), ("ss_bw.json", FIO_STEADY_STATE)],
    );

    let sets = load_all(&[SteadyStateDir::new(&dir)]).unwrap();
    assert_eq!(sets[0].name, "baseline");
    // Two jobs × two metrics, per run file.
    assert_eq!(sets[0].series.len(), 8);
    assert_eq!(
        sets[0].series.iter().filter(|s| s.run == RunKind::Bandwidth).count(),
        4
    );

    let report = normalize_steady_state(&sets);
    assert_eq!(report.unit, Unit::Seconds);
    let labels: Vec<String> = report.sets[0].1.iter().map(|p| p.series.label.clone()).collect();
    assert!(labels.contains(&"Mean IOPS".to_string()), "{labels:?}");
    assert!(labels.contains(&"Slope Bandwidth (KB/s) (BW)".to_string()), "{labels:?}");
}

#[test]
fn compared_dirs_keep_input_order() {
    let parent = tempfile::tempdir().unwrap();
    let a = fio_dir(parent.path(), "a", &[("ss_iops.json", FIO_STEADY_STATE)]);
    let b = fio_dir(parent.path(), "b", &[("ss_bw.json", FIO_STEADY_STATE)]);

    let sets = load_all(&[SteadyStateDir::new(&a), SteadyStateDir::new(&b)]).unwrap();
    let names: Vec<&str> = sets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn empty_results_dir_is_an_error() {
    let parent = tempfile::tempdir().unwrap();
    let dir = fio_dir(parent.path(), "nothing", &[]);
    let err = load_all(&[SteadyStateDir::new(&dir)]).unwrap_err();
    assert!(matches!(err, Error::NoSteadyState { path } if path == dir));
}

// ---------------------------------------------------------------------------
// Alignment JSON
// ---------------------------------------------------------------------------

#[test]
fn alignment_files_load_both_histograms() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "nvme0n1.json", ALIGNMENT_BASELINE);

    let histograms = load_all(&[AlignmentFile::new(&path)]).unwrap().remove(0);
    let block = histograms.get(HistogramKind::BlockSize).unwrap();
    assert_eq!(block.get(&12), Some(&5021));
    assert_eq!(histograms.get(HistogramKind::Alignment).unwrap().len(), 2);
}

#[test]
fn alignment_file_without_block_sizes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "algn_only.json", r#"{"Algn size": {"12": 3}}"#);

    let histograms = load_all(&[AlignmentFile::new(&path)]).unwrap().remove(0);
    assert!(histograms.get(HistogramKind::BlockSize).is_none());
    assert!(histograms.get(HistogramKind::Alignment).is_some());
}

#[test]
fn malformed_alignment_json_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "broken.json", "{\"Block size\": ");
    match load_all(&[AlignmentFile::new(&path)]) {
        Err(Error::Json { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Json error, got {other:?}"),
    }
}
