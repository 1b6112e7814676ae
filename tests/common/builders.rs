//! Builders for sysbench logs and results directories on disk.
//!
//! Harnesses describe inputs as values and let these helpers write them into
//! a `tempfile::TempDir`, which lives as long as the returned guard.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use benchplot_core::{Sample, Source};
use tempfile::TempDir;

/// Fluent builder for sysbench-shaped log text.
///
/// ```rust
/// let log = SysbenchLog::new().threads(16).sample(1, 10.0).noise("FATAL: x").build();
/// ```
#[derive(Debug, Clone)]
pub struct SysbenchLog {
    threads: u32,
    lines: Vec<String>,
}

impl Default for SysbenchLog {
    fn default() -> Self {
        Self::new()
    }
}

impl SysbenchLog {
    pub fn new() -> Self {
        Self {
            threads: 8,
            lines: vec![
                "sysbench 1.0.20 (using bundled LuaJIT 2.1.0-beta2)".to_string(),
                "Threads started!".to_string(),
            ],
        }
    }

    pub fn threads(mut self, threads: u32) -> Self {
        self.threads = threads;
        self
    }

    /// Append one report line.
    pub fn sample(mut self, offset: u64, tps: f64) -> Self {
        self.lines.push(format!(
            "[ {offset}s ] thds: {} tps: {tps:.2} qps: {:.2} (r/w/o: 0.00/0.00/0.00) lat (ms,95%): 10.00 err/s: 0.00 reconn/s: 0.00",
            self.threads,
            tps * 20.0
        ));
        self
    }

    /// Append one report line per `(offset, tps)` pair.
    pub fn samples(self, samples: &[(u64, f64)]) -> Self {
        samples.iter().fold(self, |log, &(o, t)| log.sample(o, t))
    }

    /// Append a line that is not a report line.
    pub fn noise(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn build(self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let _ = writeln!(out, "{line}");
        }
        out
    }
}

/// Write `contents` to `dir/name` and return the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture file");
    path
}

/// Write each `(name, log)` pair into one fresh temp directory.
pub fn log_dir(logs: &[(&str, String)]) -> (TempDir, Vec<PathBuf>) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let paths = logs
        .iter()
        .map(|(name, contents)| write_file(dir.path(), name, contents))
        .collect();
    (dir, paths)
}

/// A fio results directory holding the given runs, e.g.
/// `&[("ss_iops.json", FIO_STEADY_STATE)]`.
pub fn fio_dir(parent: &Path, name: &str, runs: &[(&str, &str)]) -> PathBuf {
    let dir = parent.join(name);
    std::fs::create_dir_all(&dir).expect("create fio results dir");
    for (file, contents) in runs {
        write_file(&dir, file, contents);
    }
    dir
}

/// A source whose metric is `offset * 2`, handy when only offsets matter.
pub fn source_at(label: &str, offsets: &[u64]) -> Source {
    Source::new(
        label,
        "r*",
        offsets.iter().map(|&o| Sample::new(o, o as f64 * 2.0)).collect(),
    )
}

/// A config file that leaves every default alone, so CLI runs never touch
/// the real `~/.config`.
pub fn empty_config(dir: &Path) -> PathBuf {
    write_file(dir, "config.toml", "")
}
