//! Tool configuration.
//!
//! Directory layout and output settings shared by both tools. Defaults
//! match the solver's layout: results in `../solutions`, exported charts
//! in `../solutions/charts`. A JSON file can override any subset of fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Configuration for chart rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Directory holding the solver's result files.
    pub solutions_dir: PathBuf,
    /// Directory receiving exported charts.
    pub charts_dir: PathBuf,
    /// Directory receiving display previews.
    pub preview_dir: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Whether charts are displayed after construction.
    pub display: bool,
    /// Whether schedule validation findings are fatal.
    pub strict: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            solutions_dir: PathBuf::from("../solutions"),
            charts_dir: PathBuf::from("../solutions/charts"),
            preview_dir: std::env::temp_dir().join("jssp-charts"),
            width: 1280,
            height: 720,
            display: true,
            strict: false,
        }
    }
}

impl ChartConfig {
    /// Loads a configuration from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> ChartResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ChartError::from_read(e, path))?;
        Self::from_json(&contents).map_err(|e| {
            ChartError::invalid_argument(format!("config file {}: {e}", path.display()))
        })
    }

    /// Parses a configuration from JSON text.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    /// Sets the solutions directory.
    pub fn with_solutions_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.solutions_dir = dir.into();
        self
    }

    /// Sets the charts directory.
    pub fn with_charts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.charts_dir = dir.into();
        self
    }

    /// Sets the preview directory.
    pub fn with_preview_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.preview_dir = dir.into();
        self
    }

    /// Enables or disables display.
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    /// Enables or disables strict validation.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Image size in pixels.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
