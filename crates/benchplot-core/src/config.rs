//! Configuration types for benchplot.
//!
//! [`Config::load`] reads `~/.config/benchplot/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::Result;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[plot]
width          = 3000
height         = 1200
theme          = "dark_background"
marker_size    = 2
histogram_bins = 30
y_from_zero    = true

[markers]
tokens = [
    "w*", "r*", "g*", "b*", "c*", "m*", "y*",
    "w^", "r^", "g^", "b^", "c^", "m^", "y^",
    "wo", "ro", "go", "bo", "co", "mo", "yo",
]

[variance]
color1 = "cyan"
color2 = "orange"

[steady_state]
red_drift        = -100
green_drift      = 80
blue_drift       = -50
dir1_marker_size = 1.0
dir2_marker_size = 1.0
dir1_alpha       = 1.0
dir2_alpha       = 0.4

[alignment]
colors    = ["green", "red", "blue", "cyan", "magenta", "yellow"]
colors_3d = ["blue", "green", "red", "cyan", "magenta", "yellow"]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/benchplot/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub plot: PlotConfig,
    #[serde(default)]
    pub markers: MarkersConfig,
    #[serde(default)]
    pub variance: VarianceConfig,
    #[serde(default)]
    pub steady_state: SteadyStateConfig,
    #[serde(default)]
    pub alignment: AlignmentConfig,
}

/// `[plot]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_marker_size")]
    pub marker_size: u32,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    #[serde(default = "default_y_from_zero")]
    pub y_from_zero: bool,
}

fn default_width() -> u32 { 3000 }
fn default_height() -> u32 { 1200 }
fn default_theme() -> String { "dark_background".to_string() }
fn default_marker_size() -> u32 { 2 }
fn default_histogram_bins() -> usize { 30 }
fn default_y_from_zero() -> bool { true }

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            theme: default_theme(),
            marker_size: default_marker_size(),
            histogram_bins: default_histogram_bins(),
            y_from_zero: default_y_from_zero(),
        }
    }
}

/// `[markers]` section: marker tokens assigned to compared sources in order.
/// The number of tokens caps how many files one comparison can take.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkersConfig {
    #[serde(default = "default_marker_tokens")]
    pub tokens: Vec<String>,
}

fn default_marker_tokens() -> Vec<String> {
    const COLOURS: [&str; 7] = ["w", "r", "g", "b", "c", "m", "y"];
    ["*", "^", "o"]
        .iter()
        .flat_map(|shape| COLOURS.iter().map(move |colour| format!("{colour}{shape}")))
        .collect()
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            tokens: default_marker_tokens(),
        }
    }
}

/// `[variance]` section: colours for the first and second dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct VarianceConfig {
    #[serde(default = "default_variance_color1")]
    pub color1: String,
    #[serde(default = "default_variance_color2")]
    pub color2: String,
}

fn default_variance_color1() -> String { "cyan".to_string() }
fn default_variance_color2() -> String { "orange".to_string() }

impl Default for VarianceConfig {
    fn default() -> Self {
        Self {
            color1: default_variance_color1(),
            color2: default_variance_color2(),
        }
    }
}

/// `[steady_state]` section: colour drift and marker styling used when
/// comparing two fio result directories.
#[derive(Debug, Clone, Deserialize)]
pub struct SteadyStateConfig {
    #[serde(default = "default_red_drift")]
    pub red_drift: i32,
    #[serde(default = "default_green_drift")]
    pub green_drift: i32,
    #[serde(default = "default_blue_drift")]
    pub blue_drift: i32,
    #[serde(default = "default_dir_marker_size")]
    pub dir1_marker_size: f64,
    #[serde(default = "default_dir_marker_size")]
    pub dir2_marker_size: f64,
    #[serde(default = "default_dir1_alpha")]
    pub dir1_alpha: f64,
    #[serde(default = "default_dir2_alpha")]
    pub dir2_alpha: f64,
}

fn default_red_drift() -> i32 { -100 }
fn default_green_drift() -> i32 { 80 }
fn default_blue_drift() -> i32 { -50 }
fn default_dir_marker_size() -> f64 { 1.0 }
fn default_dir1_alpha() -> f64 { 1.0 }
fn default_dir2_alpha() -> f64 { 0.4 }

impl Default for SteadyStateConfig {
    fn default() -> Self {
        Self {
            red_drift: default_red_drift(),
            green_drift: default_green_drift(),
            blue_drift: default_blue_drift(),
            dir1_marker_size: default_dir_marker_size(),
            dir2_marker_size: default_dir_marker_size(),
            dir1_alpha: default_dir1_alpha(),
            dir2_alpha: default_dir2_alpha(),
        }
    }
}

/// `[alignment]` section: colours per input, in input order, for the
/// grouped chart and the 3D view. Shorter lists repeat.
#[derive(Debug, Clone, Deserialize)]
pub struct AlignmentConfig {
    #[serde(default = "default_alignment_colors")]
    pub colors: Vec<String>,
    #[serde(default = "default_alignment_colors_3d")]
    pub colors_3d: Vec<String>,
}

fn default_alignment_colors() -> Vec<String> {
    ["green", "red", "blue", "cyan", "magenta", "yellow"].map(String::from).to_vec()
}

fn default_alignment_colors_3d() -> Vec<String> {
    ["blue", "green", "red", "cyan", "magenta", "yellow"].map(String::from).to_vec()
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            colors: default_alignment_colors(),
            colors_3d: default_alignment_colors_3d(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/benchplot/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| crate::Error::io(parent, e))?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())
                .map_err(|e| crate::Error::io(&path, e))?;
        }

        Self::load_from(path)
    }

    /// Layer a specific TOML file over the built-in defaults. A missing file
    /// leaves the defaults untouched.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("benchplot")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
