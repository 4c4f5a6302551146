//! Gantt chart of a single schedule.
//!
//! # Layout
//!
//! Machine `k` (1-indexed) occupies the band `[10k, 10k + 6]`. Each
//! operation draws its colored busy bar and then a white idle filler up to
//! the idle limit. With [`IdleFill::ToMakespan`] every filler runs to the
//! makespan and the next operation's bar covers most of it again, so only
//! the last filler of a row stays visible.
//!
//! Below the machine rows, a legend strip at `[0, 4]` splits
//! `[0, maxMakespan]` into `n` equal segments, one per job color, labeled
//! `1..n`, closed by a red marker line at the makespan.

use std::path::PathBuf;

use clap::ValueEnum;
use log::{debug, log_enabled, warn, Level};
use serde::{Deserialize, Serialize};

use crate::backend::Surface;
use crate::config::ChartConfig;
use crate::error::{ChartError, ChartResult};
use crate::figure::{Figure, Palette, Rgb};
use crate::models::Schedule;
use crate::parse::read_schedule;
use crate::validation::validate_schedule;

/// Height of one machine band.
const ROW_PITCH: f64 = 10.0;
/// Height of a machine bar within its band.
const BAR_HEIGHT: f64 = 6.0;
/// Height of the legend strip.
const LEGEND_HEIGHT: f64 = 4.0;
/// Background color used for idle fillers.
const IDLE_COLOR: Rgb = Rgb::WHITE;
/// Color of the makespan marker and annotation.
const MARKER_COLOR: Rgb = Rgb::RED;

/// Where an operation's idle filler ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IdleFill {
    /// Every filler runs to the makespan.
    #[default]
    ToMakespan,
    /// Each filler ends where the next operation on the machine starts;
    /// the last one runs to the makespan.
    ToNextStart,
}

/// A Gantt rendering request.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttRequest {
    /// Instance name, e.g. `ta01`.
    pub instance: String,
    /// Solution name, e.g. `hillclimber`.
    pub file_name: String,
    /// Chart title.
    pub title: Option<String>,
    /// File name under the charts directory to export to.
    pub save_path: Option<String>,
    pub idle_fill: IdleFill,
}

impl GanttRequest {
    /// Creates a request for `{instance}_{file_name}_solution.txt`.
    pub fn new(instance: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            file_name: file_name.into(),
            title: None,
            save_path: None,
            idle_fill: IdleFill::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_save_path(mut self, save_path: impl Into<String>) -> Self {
        self.save_path = Some(save_path.into());
        self
    }

    pub fn with_idle_fill(mut self, idle_fill: IdleFill) -> Self {
        self.idle_fill = idle_fill;
        self
    }

    /// Checks that the identifying arguments are present.
    pub fn validate(&self) -> ChartResult<()> {
        if self.instance.is_empty() {
            return Err(ChartError::invalid_argument("instance must not be empty"));
        }
        if self.file_name.is_empty() {
            return Err(ChartError::invalid_argument("file name must not be empty"));
        }
        Ok(())
    }

    /// Path of the schedule file.
    pub fn solution_path(&self, config: &ChartConfig) -> PathBuf {
        config
            .solutions_dir
            .join(format!("{}_{}_solution.txt", self.instance, self.file_name))
    }

    /// Export path, if a save path was requested.
    pub fn chart_path(&self, config: &ChartConfig) -> Option<PathBuf> {
        self.save_path
            .as_ref()
            .filter(|p| !p.is_empty())
            .map(|p| config.charts_dir.join(p))
    }

    /// Name used for the displayed chart.
    pub fn chart_name(&self) -> String {
        format!("{}_{}_gantt", self.instance, self.file_name)
    }
}

/// Loads, checks and builds the Gantt figure for a request, without any output.
pub fn load_gantt(request: &GanttRequest, config: &ChartConfig) -> ChartResult<Figure> {
    request.validate()?;
    let schedule = read_schedule(&request.solution_path(config))?;

    if let Err(errors) = validate_schedule(&schedule) {
        if config.strict {
            return Err(ChartError::InvalidSchedule(errors));
        }
        for e in &errors {
            warn!("{}", e.message);
        }
    }
    if log_enabled!(Level::Debug) {
        log_schedule_summary(&schedule);
    }

    Ok(build_gantt_figure(
        &schedule,
        request.title.as_deref(),
        request.idle_fill,
    ))
}

fn log_schedule_summary(schedule: &Schedule) {
    let latest_end = schedule.makespan();
    if latest_end != schedule.max_makespan {
        debug!(
            "Latest operation ends at {}, reported makespan is {}",
            latest_end, schedule.max_makespan
        );
    }
    for row in &schedule.rows {
        if let Some(util) = schedule.utilization(row.machine) {
            debug!("{} utilization {:.1}%", row.label(), util * 100.0);
        }
    }
    for job in 0..schedule.jobs {
        if let Some(end) = schedule.job_completion_time(job) {
            debug!(
                "Job {} completes at {} after {} operations",
                job + 1,
                end,
                schedule.operations_for_job(job).len()
            );
        }
    }
}

/// Renders a Gantt chart: builds the figure, exports it when requested,
/// then displays it.
pub fn run_gantt(
    request: &GanttRequest,
    config: &ChartConfig,
    surface: &mut dyn Surface,
) -> ChartResult<Figure> {
    let figure = load_gantt(request, config)?;
    if let Some(path) = request.chart_path(config) {
        surface.save(&figure, &path)?;
    }
    if config.display {
        surface.show(&figure, &request.chart_name())?;
    }
    Ok(figure)
}

/// Python-style rounding: halves go to the even neighbour.
fn round_half_even(value: f64) -> f64 {
    let rounded = value.round();
    if (value - value.trunc()).abs() == 0.5 && rounded % 2.0 != 0.0 {
        rounded - value.signum()
    } else {
        rounded
    }
}

/// Legend segments `(start, end)`: `n` equal job segments followed by the
/// trailing (empty) segment up to the makespan.
pub fn legend_segments(jobs: usize, max_makespan: i64) -> Vec<(f64, f64)> {
    let makespan = max_makespan as f64;
    let brake = makespan / jobs as f64;
    let mut segments: Vec<(f64, f64)> = (0..jobs)
        .map(|i| (brake * i as f64, brake * (i + 1) as f64))
        .collect();
    segments.push((brake * jobs as f64, makespan));
    segments
}

/// Builds the Gantt figure of a parsed schedule.
///
/// Requires `schedule.jobs > 0`, which the parser guarantees.
pub fn build_gantt_figure(
    schedule: &Schedule,
    title: Option<&str>,
    idle_fill: IdleFill,
) -> Figure {
    let n = schedule.jobs;
    let m = schedule.machines;
    let makespan = schedule.max_makespan as f64;
    let palette = Palette::hsv(n + 1);

    let mut figure = Figure::new();
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        figure = figure.title(title);
    }

    figure = figure
        .ylim(0.0, (m + 2) as f64 * ROW_PITCH)
        .xlim(0.0, round_half_even(makespan * 1.05))
        .xlabel("Time units since the beginning")
        .ylabel("Machine")
        .yticks(
            (0..m).map(|i| 13.0 + ROW_PITCH * i as f64).collect(),
            (1..=m).map(|i| format!("M{i}")).collect(),
        )
        .grid(false);

    for row in &schedule.rows {
        let y = ROW_PITCH * row.machine as f64;
        for (k, op) in row.operations.iter().enumerate() {
            let idle_end = match idle_fill {
                IdleFill::ToMakespan => makespan,
                IdleFill::ToNextStart => row
                    .operations
                    .get(k + 1)
                    .map(|next| next.start as f64)
                    .unwrap_or(makespan),
            };
            figure = figure
                .broken_bar(
                    op.start as f64,
                    op.end as f64,
                    y,
                    BAR_HEIGHT,
                    palette.color(op.job),
                )
                .broken_bar(op.end as f64, idle_end, y, BAR_HEIGHT, IDLE_COLOR);
        }
    }

    let brake = makespan / n as f64;
    let segments = legend_segments(n, schedule.max_makespan);
    for (i, &(start, end)) in segments[..n].iter().enumerate() {
        figure = figure
            .broken_bar(start, end, 0.0, LEGEND_HEIGHT, palette.color(i))
            .text(brake * (i as f64 + 0.5), 0.0, format!("{}", i + 1), Rgb::BLACK);
    }
    let (start, end) = segments[n];
    figure = figure
        .broken_bar(start, end, 0.0, LEGEND_HEIGHT, IDLE_COLOR)
        .vline(makespan, MARKER_COLOR);

    figure.text(
        makespan - brake * (n as f64 - 1.0),
        15.0 + ROW_PITCH * m as f64,
        format!("Max Makespan: {}", schedule.max_makespan),
        MARKER_COLOR,
    )
}
