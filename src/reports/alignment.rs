//! IO block-size and alignment histograms from blkalgn / nvmeiuwaf JSON,
//! with optional CSV export.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use benchplot_core::alignment::{write_csv, HistogramKind, MAX_ALIGNMENT_INPUTS};
use benchplot_core::config::Config;
use benchplot_feeds::{load_all, AlignmentFile};
use benchplot_render::charts::alignment::{alignment as render, alignment_3d as render_3d, AlignmentInput};

/// Default chart file.
pub const ALIGNMENT_OUTPUT: &str = "alignment.svg";

#[derive(Debug, Clone, Default)]
pub struct AlignmentRequest {
    /// One to six JSON files.
    pub inputs: Vec<PathBuf>,
    /// Legend per input, in input order. Missing legends fall back to the
    /// file stems.
    pub legends: Vec<String>,
    /// Colour per input, in input order. Missing colours come from
    /// `[alignment] colors`, or `colors_3d` for the 3D view.
    pub colors: Vec<String>,
    /// Draw 3D bars instead of grouped bars.
    pub three_d: bool,
    pub output: PathBuf,
    /// Write `<prefix>_io_block_size.csv` and `<prefix>_alignment.csv`.
    pub csv_prefix: Option<String>,
    pub theme: Option<String>,
}

/// Render the chart and, when asked, the CSV files. Returns every file
/// written, chart first.
pub fn alignment(config: &Config, req: &AlignmentRequest) -> anyhow::Result<Vec<PathBuf>> {
    anyhow::ensure!(
        (1..=MAX_ALIGNMENT_INPUTS).contains(&req.inputs.len()),
        "alignment takes one to {MAX_ALIGNMENT_INPUTS} JSON files, got {}",
        req.inputs.len()
    );
    let palette = if req.three_d {
        &config.alignment.colors_3d
    } else {
        &config.alignment.colors
    };
    anyhow::ensure!(
        !palette.is_empty() || req.colors.len() >= req.inputs.len(),
        "no colour for alignment input {}: [alignment] colour list is empty",
        req.colors.len() + 1
    );

    let feeds: Vec<AlignmentFile> = req.inputs.iter().map(AlignmentFile::new).collect();
    let histograms = load_all(&feeds).context("loading alignment histograms")?;
    let stems: Vec<String> = feeds.iter().map(AlignmentFile::stem).collect();

    let inputs = histograms
        .iter()
        .zip(&stems)
        .enumerate()
        .map(|(i, (histograms, stem))| -> anyhow::Result<AlignmentInput> {
            let color = match req.colors.get(i) {
                Some(color) => color,
                None => &palette[i % palette.len()],
            };
            Ok(AlignmentInput {
                label: req.legends.get(i).unwrap_or(stem),
                color: super::color(color)?,
                histograms,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let canvas = super::canvas(config, req.theme.as_deref())?;
    let rendered = if req.three_d {
        render_3d(&req.output, &canvas, &inputs)
    } else {
        render(&req.output, &canvas, &inputs)
    };
    rendered.with_context(|| format!("writing {}", req.output.display()))?;
    let mut written = vec![req.output.clone()];

    if let Some(prefix) = &req.csv_prefix {
        for kind in HistogramKind::ALL {
            let path = PathBuf::from(format!("{prefix}_{}", kind.csv_suffix()));
            let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
            let columns: Vec<(&str, _)> = stems
                .iter()
                .zip(&histograms)
                .map(|(stem, h)| (stem.as_str(), h.get(kind)))
                .collect();
            write_csv(BufWriter::new(file), kind, &columns)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "csv written");
            written.push(path);
        }
    }

    Ok(written)
}
