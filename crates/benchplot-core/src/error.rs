//! Error type shared by the benchplot library crates.

use std::path::PathBuf;

/// Errors surfaced by extraction, loading, statistics and rendering.
///
/// Non-matching log lines are never errors; see
/// [`LineMatch::NoMatch`](crate::LineMatch::NoMatch).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("report interval must be a positive integer, got {0}")]
    InvalidInterval(u64),

    #[error("too many sources: {given} given, the marker palette holds {limit}")]
    TooManySources { given: usize, limit: usize },

    #[error("nothing to plot: no samples were extracted from any input")]
    EmptyReport,

    #[error("cannot compute statistics over an empty sample set")]
    EmptySamples,

    #[error("no steady-state data (ss_iops.json or ss_bw.json) in {}", path.display())]
    NoSteadyState { path: PathBuf },

    #[error("unknown theme {0:?}")]
    UnknownTheme(String),

    #[error("failed to render {}: {message}", path.display())]
    Render { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
