//! benchplot-render: SVG charts for benchplot reports.
//!
//! Every chart function takes an output path, a [`Canvas`] and already
//! normalized data from `benchplot-core`, and writes a single SVG file.
//! Drawing failures surface as [`benchplot_core::Error::Render`] carrying the
//! output path.

pub mod charts;
pub mod palette;
pub mod theme;

use benchplot_core::config::PlotConfig;
use benchplot_core::Result;
use plotters::style::{IntoFont, TextStyle};

pub use plotters::style::RGBColor;

pub use palette::{drift_color, parse_color, Drift, Marker, MarkerShape};
pub use theme::{list_themes, Theme};

/// Size, theme and marker size shared by every chart of one report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub theme: Theme,
    pub marker_size: u32,
    /// Start time-series y axes at zero rather than at the smallest value.
    pub y_from_zero: bool,
}

impl Canvas {
    pub fn new(width: u32, height: u32, theme: Theme) -> Self {
        Self {
            width,
            height,
            theme,
            marker_size: 2,
            y_from_zero: true,
        }
    }

    /// Canvas from the `[plot]` config section. `theme` overrides the
    /// configured theme name when given.
    pub fn from_config(plot: &PlotConfig, theme: Option<&str>) -> Result<Self> {
        let theme = Theme::by_name(theme.unwrap_or(&plot.theme))?;
        Ok(Self {
            width: plot.width,
            height: plot.height,
            theme,
            marker_size: plot.marker_size,
            y_from_zero: plot.y_from_zero,
        })
    }

    pub(crate) fn font(&self, size: f64) -> TextStyle<'static> {
        ("sans-serif", size).into_font().color(&self.theme.foreground)
    }

    pub(crate) fn legend_font(&self) -> TextStyle<'static> {
        ("sans-serif", 15.0).into_font().color(&self.theme.legend_text)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(3000, 1200, Theme::default())
    }
}
