//! Line extraction throughput benchmarks.
//!
//! Extraction runs once per log line, and long sysbench runs reach hundreds
//! of thousands of lines, so the regex and the parallel gather dominate the
//! time spent before anything is drawn.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `single_line` | One data line, one noise line, one near miss |
//! | `batch` | `extract_batch` over logs of increasing length |
//! | `tps_values` | Sequential bare-value extraction used by distribution reports |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench extraction_bench
//! open target/criterion/report/index.html
//! ```

use std::hint::black_box;

use benchplot_core::extractor::extract_tps_values;
use benchplot_core::{extract_batch, extract_line};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const DATA_LINE: &str = "[ 10s ] thds: 64 tps: 5123.45 qps: 102469.00 (r/w/o: 71728.30/20493.80/10246.90) lat (ms,95%): 21.89 err/s: 0.00 reconn/s: 0.00";

/// A log of `n` lines: report lines with a header or error every 50 lines.
fn synthetic_log(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            if i % 50 == 0 {
                "FATAL: mysql_stmt_execute() returned error 1213 (Deadlock found)".to_string()
            } else {
                format!(
                    "[ {i}s ] thds: 64 tps: {}.{:02} qps: 102469.00 (r/w/o: 71728.30/20493.80/10246.90) lat (ms,95%): 21.89",
                    5000 + i % 300,
                    i % 100
                )
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Single line
// ---------------------------------------------------------------------------

fn single_line_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_line");
    group.throughput(Throughput::Elements(1));

    let cases = [
        ("data", DATA_LINE),
        ("noise", "Threads started!"),
        ("near_miss", "[ 12s ] thds: 64 qps: 1000.0 lat (ms,95%): 21.89"),
    ];
    for (name, line) in cases {
        group.bench_with_input(BenchmarkId::new("extract_line", name), line, |b, line| {
            b.iter(|| black_box(extract_line(black_box(line))))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

fn batch_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    for n in [1_000usize, 10_000, 100_000] {
        let log = synthetic_log(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &log, |b, log| {
            b.iter(|| black_box(extract_batch(log)))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Bare TPS values
// ---------------------------------------------------------------------------

fn tps_values_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("tps_values");
    let log = synthetic_log(10_000);
    group.throughput(Throughput::Elements(log.len() as u64));
    group.bench_function("10000_lines", |b| b.iter(|| black_box(extract_tps_values(&log))));
    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion registration
// ---------------------------------------------------------------------------

criterion_group!(extraction_benches, single_line_bench, batch_bench, tps_values_bench);
criterion_main!(extraction_benches);
