//! fio steady-state result directories.

use std::path::{Path, PathBuf};

use benchplot_core::fio::{FioOutput, RunKind, SteadyStateSet};
use benchplot_core::{Error, Result};

use crate::Feed;

/// A directory holding `ss_iops.json` and/or `ss_bw.json`.
#[derive(Debug, Clone)]
pub struct SteadyStateDir {
    pub path: PathBuf,
}

impl SteadyStateDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory base name, used to tell compared runs apart in legends.
    pub fn name(&self) -> String {
        self.path
            .components()
            .next_back()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

fn read_output(path: &Path) -> Result<FioOutput> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| Error::json(path, e))
}

impl Feed for SteadyStateDir {
    type Output = SteadyStateSet;

    fn load(&self) -> Result<SteadyStateSet> {
        let mut series = Vec::new();
        let mut found = false;

        for run in RunKind::ALL {
            let file = self.path.join(run.file_name());
            if !file.exists() {
                tracing::debug!(path = %file.display(), "steady-state file absent, skipping");
                continue;
            }
            found = true;
            series.extend(read_output(&file)?.steady_state_series(run));
        }

        if !found {
            return Err(Error::NoSteadyState {
                path: self.path.clone(),
            });
        }

        Ok(SteadyStateSet {
            name: self.name(),
            series,
        })
    }
}
