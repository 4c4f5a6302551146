//! Rendering backends.
//!
//! A [`Surface`] turns a [`Figure`] into visible output. Two surfaces exist:
//!
//! - [`PlottersSurface`]: draws with the `plotters` crate. `show` writes an
//!   SVG preview and logs its location; `save` exports to the requested file.
//! - [`RecordingSurface`]: keeps the figures it receives, for tests and dumps.

mod render;

pub use render::{Layout, PlottersSurface};

use std::path::{Path, PathBuf};

use crate::error::{ChartError, ChartResult};
use crate::figure::Figure;

/// Something figures can be displayed on and exported from.
pub trait Surface {
    /// Displays `figure`. `name` identifies the chart (used for preview files).
    fn show(&mut self, figure: &Figure, name: &str) -> ChartResult<()>;

    /// Exports `figure` to `path`; the image format follows the extension.
    fn save(&mut self, figure: &Figure, path: &Path) -> ChartResult<()>;
}

/// Export formats, inferred from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Raster formats encoded by the bitmap backend (png, jpeg, bmp).
    Bitmap,
    Svg,
}

impl ImageFormat {
    /// Infers the format from the extension of `path` (case-insensitive).
    pub fn from_path(path: &Path) -> ChartResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png" | "jpg" | "jpeg" | "bmp") => Ok(Self::Bitmap),
            Some("svg") => Ok(Self::Svg),
            Some(other) => Err(ChartError::invalid_argument(format!(
                "unsupported image format '.{other}' for {}",
                path.display()
            ))),
            None => Err(ChartError::invalid_argument(format!(
                "cannot infer an image format for {} (no extension)",
                path.display()
            ))),
        }
    }
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// `(name, figure)` per `show` call.
    pub shown: Vec<(String, Figure)>,
    /// `(path, figure)` per `save` call.
    pub saved: Vec<(PathBuf, Figure)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for RecordingSurface {
    fn show(&mut self, figure: &Figure, name: &str) -> ChartResult<()> {
        self.shown.push((name.to_string(), figure.clone()));
        Ok(())
    }

    fn save(&mut self, figure: &Figure, path: &Path) -> ChartResult<()> {
        ImageFormat::from_path(path)?;
        self.saved.push((path.to_path_buf(), figure.clone()));
        Ok(())
    }
}
