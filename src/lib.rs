//! Charts for job-shop scheduling solver output.
//!
//! Reads the text files a JSSP solver writes (per-machine solutions and
//! per-algorithm convergence histories) and turns them into figures:
//!
//! - **Gantt chart**: one row per machine, one colored bar per operation,
//!   a job color legend and the makespan marker.
//! - **Scatter chart**: best objective value per recorded iteration for
//!   several algorithm runs on one axes.
//!
//! # Modules
//!
//! - **`models`**: `Schedule`, `MachineRow`, `Operation`, `HistorySeries`
//! - **`parse`**: solution and history file readers
//! - **`validation`**: job-shop invariants of a parsed schedule
//! - **`figure`**: backend-independent draw commands and palettes
//! - **`gantt`** / **`scatter`**: figure construction per chart type
//! - **`backend`**: `Surface` trait and its `plotters` implementation
//! - **`config`**, **`cli`**: configuration and the two command-line tools
//!
//! # Pipeline
//!
//! ```text
//! file ──parse──▶ Schedule / HistorySeries ──build──▶ Figure ──Surface──▶ image
//! ```
//!
//! Figures are plain values, so everything up to the surface is
//! deterministic and testable without a display.

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod figure;
pub mod gantt;
pub mod models;
pub mod parse;
pub mod scatter;
pub mod text;
pub mod validation;

pub use error::{ChartError, ChartResult};
