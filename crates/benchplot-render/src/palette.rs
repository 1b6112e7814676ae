//! Colour names, marker tokens and colour drift.
//!
//! A marker token is a colour letter followed by a shape, e.g. `r*` (red
//! stars) or `bo` (blue circles). A bare colour name is also accepted and
//! draws circles.

use plotters::style::RGBColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Triangle,
    Cross,
    Star,
    Dot,
}

/// A resolved marker: colour plus shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub color: RGBColor,
    pub shape: MarkerShape,
}

impl Marker {
    pub fn parse(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let first = chars.next()?;
        let rest = chars.as_str();

        if let (Some(color), Some(shape)) = (letter_color(first), shape(rest)) {
            return Some(Self { color, shape });
        }
        parse_color(token).map(|color| Self {
            color,
            shape: MarkerShape::Circle,
        })
    }
}

fn shape(s: &str) -> Option<MarkerShape> {
    match s {
        "*" => Some(MarkerShape::Star),
        "^" => Some(MarkerShape::Triangle),
        "o" | "" => Some(MarkerShape::Circle),
        "x" | "+" => Some(MarkerShape::Cross),
        "." => Some(MarkerShape::Dot),
        _ => None,
    }
}

/// Single-letter colour codes.
fn letter_color(c: char) -> Option<RGBColor> {
    match c {
        'w' => Some(RGBColor(255, 255, 255)),
        'k' => Some(RGBColor(0, 0, 0)),
        'r' => Some(RGBColor(255, 0, 0)),
        'g' => Some(RGBColor(0, 128, 0)),
        'b' => Some(RGBColor(0, 0, 255)),
        'c' => Some(RGBColor(0, 191, 191)),
        'm' => Some(RGBColor(191, 0, 191)),
        'y' => Some(RGBColor(191, 191, 0)),
        _ => None,
    }
}

/// Parse a colour name into an [`RGBColor`].
///
/// Accepts:
/// - Named colours (case-insensitive): `red`, `cyan`, `orange`, `grey`, ...
/// - Palette keys used by steady-state charts: `contrast_red`, ...
/// - Hex RGB: `#rrggbb`
pub fn parse_color(s: &str) -> Option<RGBColor> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(RGBColor(0, 0, 0)),
        "white" => Some(RGBColor(255, 255, 255)),
        "red" => Some(RGBColor(255, 0, 0)),
        "green" => Some(RGBColor(0, 128, 0)),
        "lime" => Some(RGBColor(0, 255, 0)),
        "blue" => Some(RGBColor(0, 0, 255)),
        "cyan" => Some(RGBColor(0, 255, 255)),
        "magenta" => Some(RGBColor(255, 0, 255)),
        "yellow" => Some(RGBColor(255, 255, 0)),
        "orange" => Some(RGBColor(255, 165, 0)),
        "purple" => Some(RGBColor(128, 0, 128)),
        "gray" | "grey" => Some(RGBColor(128, 128, 128)),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(RGBColor(r, g, b))
        }
        s => steady_state_base(s),
    }
}

/// Base palette for steady-state series, keyed by the series palette key.
pub fn steady_state_base(key: &str) -> Option<RGBColor> {
    match key {
        "red" => Some(RGBColor(0xFF, 0x00, 0x00)),
        "green" => Some(RGBColor(0x00, 0xFF, 0x00)),
        "blue" => Some(RGBColor(0x00, 0x00, 0xFF)),
        "yellow" => Some(RGBColor(0xFF, 0xFF, 0x00)),
        "grey" => Some(RGBColor(0x80, 0x80, 0x80)),
        "contrast_red" => Some(RGBColor(0xE4, 0x00, 0x2B)),
        "contrast_yellow" => Some(RGBColor(0xFF, 0xC7, 0x2C)),
        "contrast_blue" => Some(RGBColor(0x00, 0x57, 0xB8)),
        _ => None,
    }
}

/// Per-channel offset applied to tell a second run apart from the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Drift {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

/// Shift each channel by the drift, clamped to `0..=255`.
pub fn drift_color(color: RGBColor, drift: Drift) -> RGBColor {
    let shift = |c: u8, d: i32| (i32::from(c) + d).clamp(0, 255) as u8;
    RGBColor(
        shift(color.0, drift.red),
        shift(color.1, drift.green),
        shift(color.2, drift.blue),
    )
}
