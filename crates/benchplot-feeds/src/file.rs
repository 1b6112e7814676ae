//! sysbench log files.
//!
//! The path `-` reads from stdin, so output can be piped straight from a
//! running benchmark.

use std::io::Read;
use std::path::{Path, PathBuf};

use benchplot_core::extractor::{extract_batch, extract_tps_values};
use benchplot_core::{Error, Result, Source};

use crate::Feed;

/// Path that selects stdin instead of a file.
pub const STDIN_PATH: &str = "-";

/// Read a text input into lines. Invalid UTF-8 is replaced rather than
/// rejected, since only ASCII digits and labels matter for extraction.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let mut bytes = Vec::new();
    if path.as_os_str() == STDIN_PATH {
        std::io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .map_err(|e| Error::io(path, e))?;
    } else {
        bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    }

    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_owned)
        .collect())
}

/// Default legend label for an input: its file stem.
pub fn default_label(path: &Path) -> String {
    if path.as_os_str() == STDIN_PATH {
        return "stdin".to_string();
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One sysbench log, extracted into a [`Source`].
#[derive(Debug, Clone)]
pub struct LogFile {
    pub path: PathBuf,
    pub label: String,
    pub style: String,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            style: style.into(),
        }
    }
}

impl Feed for LogFile {
    type Output = Source;

    fn load(&self) -> Result<Source> {
        let lines = read_lines(&self.path)?;
        let samples = extract_batch(&lines);
        tracing::debug!(
            path = %self.path.display(),
            lines = lines.len(),
            samples = samples.len(),
            "extracted tps samples"
        );
        if samples.is_empty() {
            tracing::warn!(path = %self.path.display(), "no tps samples found");
        }
        Ok(Source::new(self.label.clone(), self.style.clone(), samples))
    }
}

/// Bare TPS values of one log, for distribution reports.
#[derive(Debug, Clone)]
pub struct TpsValuesFile {
    pub path: PathBuf,
}

impl Feed for TpsValuesFile {
    type Output = Vec<f64>;

    fn load(&self) -> Result<Vec<f64>> {
        let lines = read_lines(&self.path)?;
        let values = extract_tps_values(&lines);
        tracing::debug!(path = %self.path.display(), values = values.len(), "extracted tps values");
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchplot_core::Sample;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn log_file_extracts_samples_in_order() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "sysbench 1.0.20").unwrap();
        writeln!(f, "[ 1s ] thds: 8 tps: 10.0 qps: 200.0").unwrap();
        writeln!(f, "[ 2s ] thds: 8 tps: 20.5 qps: 410.0").unwrap();
        writeln!(f, "SQL statistics:").unwrap();

        let source = LogFile::new(f.path(), "run", "r*").load().unwrap();
        assert_eq!(source.label, "run");
        assert_eq!(source.samples, vec![Sample::new(1, 10.0), Sample::new(2, 20.5)]);
    }

    #[test]
    fn missing_file_is_io_error_with_path() {
        let err = LogFile::new("/nonexistent/sysbench.log", "x", "r*").load().unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, PathBuf::from("/nonexistent/sysbench.log")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"\xff\xfe garbage\n[ 3s ] tps: 1.5\n").unwrap();
        let source = LogFile::new(f.path(), "x", "r*").load().unwrap();
        assert_eq!(source.samples, vec![Sample::new(3, 1.5)]);
    }

    #[test]
    fn default_label_is_file_stem() {
        assert_eq!(default_label(Path::new("/tmp/baseline.txt")), "baseline");
        assert_eq!(default_label(Path::new("-")), "stdin");
    }
}
