//! blkalgn / nvmeiuwaf histogram JSON files.

use std::path::PathBuf;

use benchplot_core::alignment::AlignmentHistograms;
use benchplot_core::{Error, Result};

use crate::Feed;

#[derive(Debug, Clone)]
pub struct AlignmentFile {
    pub path: PathBuf,
}

impl AlignmentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File stem, used as the CSV column source name.
    pub fn stem(&self) -> String {
        crate::file::default_label(&self.path)
    }
}

impl Feed for AlignmentFile {
    type Output = AlignmentHistograms;

    fn load(&self) -> Result<AlignmentHistograms> {
        let bytes = std::fs::read(&self.path).map_err(|e| Error::io(&self.path, e))?;
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| Error::json(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "loaded alignment histograms");
        Ok(AlignmentHistograms::from_json(&value))
    }
}
