//! benchplot-feeds: input adapters for benchplot.
//!
//! Each feed reads one input (a sysbench log, a fio results directory, an
//! alignment JSON file) and hands parsed data to `benchplot-core`. Feeds of
//! one report are loaded concurrently with [`load_all`], which returns only
//! once every feed has finished.

pub mod alignment;
pub mod file;
pub mod fio;

pub use alignment::AlignmentFile;
pub use file::{LogFile, TpsValuesFile};
pub use fio::SteadyStateDir;

use benchplot_core::Result;
use rayon::prelude::*;

/// Trait implemented by each input source.
pub trait Feed: Send + Sync {
    type Output: Send;

    /// Read and parse the input. A missing or unreadable input is an error.
    fn load(&self) -> Result<Self::Output>;
}

/// Load every feed of a report in parallel.
///
/// Outputs are returned in the order of `feeds`, not in completion order.
/// The first failure aborts the report; there is no partial result.
pub fn load_all<F: Feed>(feeds: &[F]) -> Result<Vec<F::Output>> {
    feeds.par_iter().map(F::load).collect()
}
