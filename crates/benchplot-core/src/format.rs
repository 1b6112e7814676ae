//! Human-readable sizes and bandwidths for axis labels and CLI input.

use std::sync::LazyLock;

use regex::Regex;

static SHORTHAND_BANDWIDTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9.]+)([a-zA-Z/]+)").expect("bandwidth shorthand pattern must compile")
});

/// Format a bandwidth value with one decimal and the largest fitting unit.
pub fn human_readable_bandwidth(x: f64) -> String {
    if x >= 1e9 {
        format!("{:.1} GB/s", x * 1e-9)
    } else if x >= 1e6 {
        format!("{:.1} MB/s", x * 1e-6)
    } else if x >= 1e3 {
        format!("{:.1} KB/s", x * 1e-3)
    } else {
        format!("{x:.1} B/s")
    }
}

/// Parse a bandwidth such as `1.8GB/s` or `500KB/s` into bytes per second.
///
/// A bare number is taken as B/s. Unknown units yield `None`.
pub fn parse_shorthand_bandwidth(value: &str) -> Option<f64> {
    let value = value.trim();
    let Some(caps) = SHORTHAND_BANDWIDTH.captures(value) else {
        return value.parse().ok();
    };
    let num: f64 = caps[1].parse().ok()?;
    let scale = match &caps[2] {
        "B/s" => 1.0,
        "KB/s" => 1e3,
        "MB/s" => 1e6,
        "GB/s" => 1e9,
        _ => return None,
    };
    Some(num * scale)
}

/// Render a log2 size bucket (`12` → `4K`).
pub fn format_size(log2: u32) -> String {
    match log2 {
        0..=9 => format!("{} bytes", 1u64 << log2),
        10..=19 => format!("{}K", 1u64 << (log2 - 10)),
        20..=29 => format!("{}M", 1u64 << (log2 - 20)),
        _ => format!("{}G", 1u64 << (log2 - 30)),
    }
}
