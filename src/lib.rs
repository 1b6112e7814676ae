//! benchplot: charts from sysbench and fio benchmark output.
//!
//! The binary is a thin clap front end; each subcommand calls one driver in
//! [`reports`], which wires the three library crates together:
//!
//! ```text
//! benchplot-feeds ──► benchplot-core ──► benchplot-render
//!   (read inputs)      (extract, normalize,   (SVG charts)
//!                        statistics)
//! ```
//!
//! Drivers return `anyhow::Result` so errors carry the input or output path
//! being processed when they reach the terminal.

pub mod reports;

pub use benchplot_core::config::Config;
