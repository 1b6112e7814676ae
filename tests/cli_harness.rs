#![allow(unused)]
//! End-to-end CLI harness.
//!
//! # What this covers
//!
//! - **Subcommands**: `compare`, `tps` (including stdin), `variance`,
//!   `alignment --3d` and `compare --list-themes` run against real files and
//!   print what they wrote.
//! - **Exit codes**: "nothing to plot" and invalid arguments exit non-zero
//!   with a message on stderr.
//!
//! Every run gets `--config` and `XDG_CONFIG_HOME` pointed into a temp
//! directory, so the user's own config is never read or created.
//!
//! # What this does NOT cover
//!
//! - Chart content (see `reports_harness`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test cli_harness
//! ```

mod common;
use common::*;

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;

fn benchplot(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_benchplot"));
    cmd.env("XDG_CONFIG_HOME", home)
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(empty_config(home))
        .current_dir(home);
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn compare_writes_chart() {
    let (dir, paths) = log_dir(&[
        ("a.log", SysbenchLog::new().samples(SYSBENCH_SHORT_SAMPLES).build()),
        ("b.log", SysbenchLog::new().sample(1, 900.0).sample(2, 910.0).build()),
    ]);
    let output = benchplot(dir.path())
        .arg("compare")
        .args(&paths)
        .args(["--legends", "before", "after", "--output", "cmp.svg"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "wrote cmp.svg");
    let svg = assert_svg!(dir.path().join("cmp.svg"));
    assert!(svg.contains("after"));
}

#[test]
fn noise_only_log_exits_non_zero() {
    let (dir, paths) = log_dir(&[("noise.log", NOISE.join("\n"))]);
    let output = benchplot(dir.path()).arg("tps").arg(&paths[0]).output().unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("nothing to plot"), "stderr: {}", stderr(&output));
}

#[test]
fn tps_reads_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = benchplot(dir.path())
        .args(["tps", "-", "--output", "piped.svg"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    let log = SysbenchLog::new().samples(SYSBENCH_SHORT_SAMPLES).build();
    child.stdin.take().unwrap().write_all(log.as_bytes()).unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_svg!(dir.path().join("piped.svg"));
}

#[test]
fn list_themes_needs_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let output = benchplot(dir.path()).args(["compare", "--list-themes"]).output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let themes: Vec<String> = stdout(&output).lines().map(str::to_owned).collect();
    assert_eq!(themes, ["dark_background", "default"]);
}

#[test]
fn variance_prints_statistics() {
    let (dir, paths) = log_dir(&[("a.log", SysbenchLog::new().samples(SYSBENCH_SHORT_SAMPLES).build())]);
    let output = benchplot(dir.path())
        .arg("variance")
        .arg(&paths[0])
        .arg("baseline")
        .args(["--output-dir", "charts"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("baseline Statistics:"), "{text}");
    assert!(text.contains("Mean TPS: 1021.13"), "{text}");
    assert_svg!(dir.path().join("charts").join("histogram.svg"));
}

#[test]
fn variance_second_file_without_legend() {
    let (dir, paths) = log_dir(&[
        ("a.log", SysbenchLog::new().samples(SYSBENCH_SHORT_SAMPLES).build()),
        ("tuned.log", SysbenchLog::new().samples(&[(1, 900.0), (2, 950.0)]).build()),
    ]);
    let output = benchplot(dir.path())
        .arg("variance")
        .arg(&paths[0])
        .arg("baseline")
        .arg(&paths[1])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("baseline Statistics:"), "{text}");
    assert!(text.contains("tuned Statistics:"), "{text}");
}

#[test]
fn zero_report_interval_is_rejected() {
    let (dir, paths) = log_dir(&[("a.log", SysbenchLog::new().sample(1, 1.0).build())]);
    let output = benchplot(dir.path())
        .arg("compare")
        .arg(&paths[0])
        .args(["--report-interval", "0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("report interval"), "stderr: {}", stderr(&output));
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let output = benchplot(dir.path()).args(["tps", "absent.log"]).output().unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("absent.log"), "stderr: {}", stderr(&output));
}

#[test]
fn alignment_3d_of_three_files() {
    let dir = tempfile::tempdir().unwrap();
    let files: Vec<_> = ["a", "b", "c"]
        .iter()
        .map(|name| write_file(dir.path(), &format!("{name}.json"), ALIGNMENT_BASELINE))
        .collect();
    let output = benchplot(dir.path())
        .arg("alignment")
        .args(&files)
        .args(["--3d", "--legend", "first", "--legend", "second", "--output", "iu.svg"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "wrote iu.svg");
    let svg = assert_svg!(dir.path().join("iu.svg"));
    assert!(svg.contains("second"));
    assert!(svg.contains(">\nc\n</text>"), "third input keeps its stem");
}
