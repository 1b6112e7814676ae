//! IO block-size and alignment histograms.
//!
//! The tracing tools (blkalgn, nvmeiuwaf) emit JSON objects keyed by
//! histogram name, each mapping a log2 size bucket to a count:
//!
//! ```json
//! {"Block size": {"12": 5021, "13": 88}, "Algn size": {"12": 5109}}
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use serde_json::Value;

use crate::error::Result;
use crate::format::format_size;

/// log2 bucket → count.
pub type Buckets = BTreeMap<u32, u64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistogramKind {
    BlockSize,
    Alignment,
}

impl HistogramKind {
    pub const ALL: [HistogramKind; 2] = [HistogramKind::BlockSize, HistogramKind::Alignment];

    /// Key of this histogram in the tool's JSON output.
    pub fn json_key(self) -> &'static str {
        match self {
            HistogramKind::BlockSize => "Block size",
            HistogramKind::Alignment => "Algn size",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            HistogramKind::BlockSize => "Block Size Distribution",
            HistogramKind::Alignment => "Alignment Size Distribution",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            HistogramKind::BlockSize => "Block Size",
            HistogramKind::Alignment => "Alignment Size",
        }
    }

    fn csv_data_type(self) -> &'static str {
        match self {
            HistogramKind::BlockSize => "IO Block Size",
            HistogramKind::Alignment => "Alignment",
        }
    }

    /// File name suffix for CSV export.
    pub fn csv_suffix(self) -> &'static str {
        match self {
            HistogramKind::BlockSize => "io_block_size.csv",
            HistogramKind::Alignment => "alignment.csv",
        }
    }
}

/// Histograms present in one JSON document. A histogram absent from the
/// document is `None`; non-numeric keys or counts are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentHistograms {
    pub block_size: Option<Buckets>,
    pub alignment: Option<Buckets>,
}

impl AlignmentHistograms {
    pub fn from_json(value: &Value) -> Self {
        Self {
            block_size: buckets(value, HistogramKind::BlockSize),
            alignment: buckets(value, HistogramKind::Alignment),
        }
    }

    pub fn get(&self, kind: HistogramKind) -> Option<&Buckets> {
        match kind {
            HistogramKind::BlockSize => self.block_size.as_ref(),
            HistogramKind::Alignment => self.alignment.as_ref(),
        }
    }
}

fn buckets(value: &Value, kind: HistogramKind) -> Option<Buckets> {
    let obj = value.get(kind.json_key())?.as_object()?;
    Some(
        obj.iter()
            .filter_map(|(k, v)| Some((k.parse::<u32>().ok()?, v.as_u64()?)))
            .collect(),
    )
}

/// Sorted union of the bucket keys of every given histogram.
pub fn union_keys<'a>(histograms: impl IntoIterator<Item = &'a Buckets>) -> Vec<u32> {
    histograms
        .into_iter()
        .flat_map(|h| h.keys().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Bar groups for a chart: one label per bucket and one count column per
/// input, missing buckets as 0.
pub fn bar_groups(keys: &[u32], inputs: &[&Buckets]) -> Vec<(String, Vec<u64>)> {
    keys.iter()
        .map(|k| {
            let counts = inputs.iter().map(|h| h.get(k).copied().unwrap_or(0)).collect();
            (format_size(*k), counts)
        })
        .collect()
}

/// Most inputs one alignment report compares.
pub const MAX_ALIGNMENT_INPUTS: usize = 6;

/// Buckets exported to CSV: 512 bytes (2^9) up to 1 GiB (2^30).
pub const CSV_BUCKETS: std::ops::RangeInclusive<u32> = 9..=30;

/// Write one histogram of several sources as CSV, one count column per
/// `(name, buckets)` pair. Every bucket in [`CSV_BUCKETS`] gets a row;
/// sizes are written in bytes. Fewer than two sources are padded with an
/// empty-named column of zeros.
pub fn write_csv<W: Write>(writer: W, kind: HistogramKind, columns: &[(&str, Option<&Buckets>)]) -> Result<()> {
    let mut columns = columns.to_vec();
    while columns.len() < 2 {
        columns.push(("", None));
    }

    let mut out = csv::Writer::from_writer(writer);
    let data_type = kind.csv_data_type();
    let header = std::iter::once("Size (bytes)".to_string())
        .chain(columns.iter().map(|(name, _)| format!("{data_type} Count - {name}")));
    out.write_record(header)?;

    let count = |h: Option<&Buckets>, k: u32| h.and_then(|h| h.get(&k)).copied().unwrap_or(0);
    for k in CSV_BUCKETS {
        let row = std::iter::once((1u64 << k).to_string())
            .chain(columns.iter().map(|(_, h)| count(*h, k).to_string()));
        out.write_record(row)?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Buckets below this log2 key (16K) get a placeholder bar when empty.
pub const PLACEHOLDER_BELOW: u32 = 14;

/// One bar of the 3D view.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar3d {
    /// Index into the bucket keys.
    pub bucket: usize,
    /// Index of the input the bar belongs to.
    pub input: usize,
    pub count: u64,
    pub alpha: f64,
    /// Empty small-IO bucket, drawn as a short grey bar.
    pub placeholder: bool,
}

/// Bars of the 3D view over `keys`, input-major. Alpha falls as the count
/// approaches the largest count of any input; an input without the
/// histogram counts as all zero. Empty buckets of 16K and up are left out.
pub fn bars_3d(keys: &[u32], inputs: &[Option<&Buckets>]) -> Vec<Bar3d> {
    let count_of = |h: Option<&Buckets>, k: u32| h.and_then(|h| h.get(&k)).copied().unwrap_or(0);
    let max = inputs
        .iter()
        .flat_map(|h| keys.iter().map(move |&k| count_of(*h, k)))
        .max()
        .unwrap_or(0);

    let mut bars = Vec::new();
    for (input, h) in inputs.iter().enumerate() {
        for (bucket, &k) in keys.iter().enumerate() {
            let count = count_of(*h, k);
            if count == 0 && k >= PLACEHOLDER_BELOW {
                continue;
            }
            let alpha = if max == 0 {
                1.0
            } else {
                ((max - count) as f64 / max as f64).clamp(0.1, 1.0)
            };
            bars.push(Bar3d {
                bucket,
                input,
                count,
                alpha,
                placeholder: count == 0,
            });
        }
    }
    bars
}
