//! Backend-independent chart description.
//!
//! A [`Figure`] is the ordered list of plotting calls that make up a chart.
//! Draw operations consume the figure and return it extended, so a chart is
//! built as a chain of calls with no hidden "current figure" state:
//!
//! ```
//! use jssp_charts::figure::{Figure, Rgb};
//!
//! let figure = Figure::new()
//!     .title("Example")
//!     .xlim(0.0, 10.0)
//!     .broken_bar(0.0, 5.0, 10.0, 6.0, Rgb::RED)
//!     .vline(10.0, Rgb::RED);
//! assert_eq!(figure.commands().len(), 4);
//! ```
//!
//! Backends replay the commands in order; later commands draw over earlier ones.

mod color;

pub use color::{Palette, Rgb};

use serde::{Deserialize, Serialize};

/// One plotting-capability call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "args", rename_all = "snake_case")]
pub enum DrawCommand {
    Title(String),
    XLabel(String),
    YLabel(String),
    XLim { min: f64, max: f64 },
    YLim { min: f64, max: f64 },
    /// Tick positions on the y axis with their labels.
    YTicks { positions: Vec<f64>, labels: Vec<String> },
    Grid(bool),
    /// Filled horizontal interval `[start, end]` spanning `[y, y + height]`.
    BrokenBar {
        start: f64,
        end: f64,
        y: f64,
        height: f64,
        color: Rgb,
    },
    /// Text anchored at its lower-left corner.
    Text { x: f64, y: f64, text: String, color: Rgb },
    /// Vertical reference line across the whole y range.
    VLine { x: f64, color: Rgb },
    LegendTitle(String),
    /// Marker-only series.
    Scatter {
        name: String,
        x: Vec<f64>,
        y: Vec<f64>,
        color: Rgb,
    },
}

/// An ordered list of draw commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    commands: Vec<DrawCommand>,
}

impl Figure {
    /// Creates an empty figure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a raw command.
    pub fn push(mut self, command: DrawCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn title(self, title: impl Into<String>) -> Self {
        self.push(DrawCommand::Title(title.into()))
    }

    pub fn xlabel(self, label: impl Into<String>) -> Self {
        self.push(DrawCommand::XLabel(label.into()))
    }

    pub fn ylabel(self, label: impl Into<String>) -> Self {
        self.push(DrawCommand::YLabel(label.into()))
    }

    pub fn xlim(self, min: f64, max: f64) -> Self {
        self.push(DrawCommand::XLim { min, max })
    }

    pub fn ylim(self, min: f64, max: f64) -> Self {
        self.push(DrawCommand::YLim { min, max })
    }

    pub fn yticks(self, positions: Vec<f64>, labels: Vec<String>) -> Self {
        self.push(DrawCommand::YTicks { positions, labels })
    }

    pub fn grid(self, on: bool) -> Self {
        self.push(DrawCommand::Grid(on))
    }

    pub fn broken_bar(self, start: f64, end: f64, y: f64, height: f64, color: Rgb) -> Self {
        self.push(DrawCommand::BrokenBar {
            start,
            end,
            y,
            height,
            color,
        })
    }

    pub fn text(self, x: f64, y: f64, text: impl Into<String>, color: Rgb) -> Self {
        self.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            color,
        })
    }

    pub fn vline(self, x: f64, color: Rgb) -> Self {
        self.push(DrawCommand::VLine { x, color })
    }

    pub fn legend_title(self, title: impl Into<String>) -> Self {
        self.push(DrawCommand::LegendTitle(title.into()))
    }

    /// Adds a marker-only series of `(index, value)` points.
    pub fn scatter(
        self,
        name: impl Into<String>,
        points: impl IntoIterator<Item = (usize, i64)>,
        color: Rgb,
    ) -> Self {
        let (x, y) = points
            .into_iter()
            .map(|(i, v)| (i as f64, v as f64))
            .unzip();
        self.push(DrawCommand::Scatter {
            name: name.into(),
            x,
            y,
            color,
        })
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Last title set on the figure.
    pub fn title_text(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Title(t) => Some(t.as_str()),
            _ => None,
        })
    }

    /// Effective x range: the last `XLim`.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::XLim { min, max } => Some((*min, *max)),
            _ => None,
        })
    }

    /// Effective y range: the last `YLim`.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::YLim { min, max } => Some((*min, *max)),
            _ => None,
        })
    }

    /// Bounding box of all drawn data, `((x_min, x_max), (y_min, y_max))`.
    pub fn data_bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for c in &self.commands {
            match c {
                DrawCommand::BrokenBar {
                    start,
                    end,
                    y,
                    height,
                    ..
                } => {
                    xs.extend([*start, *end]);
                    ys.extend([*y, *y + *height]);
                }
                DrawCommand::Text { x, y, .. } => {
                    xs.push(*x);
                    ys.push(*y);
                }
                DrawCommand::VLine { x, .. } => xs.push(*x),
                DrawCommand::Scatter { x, y, .. } => {
                    xs.extend(x.iter().copied());
                    ys.extend(y.iter().copied());
                }
                _ => {}
            }
        }
        let span = |v: &[f64]| {
            v.iter()
                .copied()
                .fold(None, |acc: Option<(f64, f64)>, x| match acc {
                    None => Some((x, x)),
                    Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
                })
        };
        Some((span(&xs)?, span(&ys)?))
    }

    /// Serializes the command list as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
