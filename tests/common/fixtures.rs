//! Static benchmark output used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of representative lines, taken
//! from the shape of real sysbench runs: a banner, a block of per-interval
//! report lines, then the final summary which must never be mistaken for
//! data.

/// A short sysbench `oltp_read_write` run reporting every second.
pub const SYSBENCH_SHORT: &[&str] = &[
    "sysbench 1.0.20 (using bundled LuaJIT 2.1.0-beta2)",
    "",
    "Running the test with following options:",
    "Number of threads: 8",
    "Report intermediate results every 1 second(s)",
    "Initializing random number generator from current time",
    "",
    "Initializing worker threads...",
    "",
    "Threads started!",
    "",
    "[ 1s ] thds: 8 tps: 1021.87 qps: 20462.25 (r/w/o: 14330.56/4086.46/2045.23) lat (ms,95%): 10.27 err/s: 0.00 reconn/s: 0.00",
    "[ 2s ] thds: 8 tps: 1043.01 qps: 20860.27 (r/w/o: 14602.19/4172.05/2086.03) lat (ms,95%): 9.91 err/s: 0.00 reconn/s: 0.00",
    "[ 3s ] thds: 8 tps: 998.50 qps: 19970.00 (r/w/o: 13979.00/3994.00/1997.00) lat (ms,95%): 10.65 err/s: 0.00 reconn/s: 0.00",
    "[ 4s ] thds: 8 tps: 1010.00 qps: 20200.00 (r/w/o: 14140.00/4040.00/2020.00) lat (ms,95%): 10.46 err/s: 0.00 reconn/s: 0.00",
    "[ 5s ] thds: 8 tps: 1032.25 qps: 20645.00 (r/w/o: 14451.50/4129.00/2064.50) lat (ms,95%): 10.09 err/s: 0.00 reconn/s: 0.00",
    "SQL statistics:",
    "    queries performed:",
    "        read:                            71503",
    "        write:                           20429",
    "    transactions:                        5106   (1020.47 per sec.)",
    "    queries:                             102138 (20413.31 per sec.)",
];

/// Offsets and TPS values of the data lines in [`SYSBENCH_SHORT`].
pub const SYSBENCH_SHORT_SAMPLES: &[(u64, f64)] = &[
    (1, 1021.87),
    (2, 1043.01),
    (3, 998.50),
    (4, 1010.00),
    (5, 1032.25),
];

/// Lines that look close to a data line but must be skipped.
pub const NOISE: &[&str] = &[
    "",
    "Threads started!",
    "tps: 345.6",
    "[ 12s ] thds: 64 qps: 1000.0",
    "[ 12ms ] tps: 1.0",
    "    transactions:                        5106   (1020.47 per sec.)",
    "FATAL: mysql_stmt_execute() returned error 1213 (Deadlock found)",
];

/// fio steady-state output with a mean job and a slope job.
pub const FIO_STEADY_STATE: &str = r#"{
  "fio version": "fio-3.36",
  "jobs": [
    {
      "jobname": "ss_mean",
      "steadystate": {
        "ss": "iops:10%",
        "data": {"iops": [9800, 10050, 10100, 9990], "bw": [39200, 40200, 40400, 39960]}
      }
    },
    {
      "jobname": "ss_slope",
      "steadystate": {
        "ss": "iops_slope:2%",
        "data": {"iops": [9700, 9950, 10020], "bw": [38800, 39800, 40080]}
      }
    }
  ]
}"#;

/// blkalgn output for a workload issuing mostly 4K IO.
pub const ALIGNMENT_BASELINE: &str = r#"{
  "Block size": {"9": 12, "12": 5021, "13": 88},
  "Algn size": {"9": 40, "12": 5081}
}"#;

/// blkalgn output after a tuning change: 16K writes, no block-size entry
/// for 512-byte IO.
pub const ALIGNMENT_TUNED: &str = r#"{
  "Block size": {"12": 310, "14": 4700},
  "Algn size": {"12": 310, "14": 4700}
}"#;
