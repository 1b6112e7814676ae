//! Chart colour themes.
//!
//! Themes are defined as TOML files embedded in the binary via
//! [`include_str!`], so rendering works without any files on disk. Resolve a
//! theme once with [`Theme::by_name`] and pass it to every chart of a report.

use benchplot_core::{Error, Result};
use config::{Config, File, FileFormat};
use plotters::style::RGBColor;
use serde::Deserialize;

use crate::palette::parse_color;

const DARK_BACKGROUND_THEME_SRC: &str = include_str!("themes/dark_background.toml");
const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");

/// Names accepted by [`Theme::by_name`], default first.
pub const THEMES: &[&str] = &["dark_background", "default"];

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawChart {
    background: String,
    foreground: String,
    grid: String,
}

#[derive(Debug, Deserialize)]
struct RawLegend {
    background: String,
    text: String,
    border: String,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    chart: RawChart,
    legend: RawLegend,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Resolved chart colours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: RGBColor,
    /// Text, axes and captions.
    pub foreground: RGBColor,
    pub grid: RGBColor,
    pub legend_background: RGBColor,
    pub legend_text: RGBColor,
    pub legend_border: RGBColor,
}

impl Theme {
    /// Look up an embedded theme by name.
    pub fn by_name(name: &str) -> Result<Self> {
        let src = match name {
            "dark_background" | "dark" => DARK_BACKGROUND_THEME_SRC,
            "default" | "light" => DEFAULT_THEME_SRC,
            other => return Err(Error::UnknownTheme(other.to_string())),
        };
        Self::from_toml_str(src)
    }

    /// Parse a theme from a TOML string. Colours that cannot be parsed make
    /// the whole theme invalid.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        let color = |s: &str| parse_color(s).ok_or_else(|| Error::UnknownTheme(format!("bad colour {s:?}")));

        Ok(Self {
            background: color(&raw.chart.background)?,
            foreground: color(&raw.chart.foreground)?,
            grid: color(&raw.chart.grid)?,
            legend_background: color(&raw.legend.background)?,
            legend_text: color(&raw.legend.text)?,
            legend_border: color(&raw.legend.border)?,
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_toml_str(DARK_BACKGROUND_THEME_SRC)
            .expect("embedded dark_background theme must be valid TOML")
    }
}

/// Names of the embedded themes, for `--list-themes`.
pub fn list_themes() -> &'static [&'static str] {
    THEMES
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
