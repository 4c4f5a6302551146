//! Convergence scatter plot of one or more algorithm runs.
//!
//! Every history becomes one marker-only series on a shared figure, with
//! the recorded iteration index on x and the objective value on y.
//!
//! # File conventions
//!
//! | Mode | Path | Legend name | Values |
//! |------|------|-------------|--------|
//! | Story | `{instance}_{lower(series)}_history.txt` | `capitalize(series)` | line 1 |
//! | Named | `{instance}_{series}.txt` | line 1 | line 2 |

use std::path::PathBuf;

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::backend::Surface;
use crate::config::ChartConfig;
use crate::error::{ChartError, ChartResult};
use crate::figure::{Figure, Palette};
use crate::models::HistorySeries;
use crate::parse::read_history;
use crate::text::capitalize;

/// How history files are named and laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryMode {
    /// `{instance}_{series}_history.txt`, values only.
    #[default]
    Story,
    /// `{instance}_{series}.txt`, display name then values.
    Named,
}

impl HistoryMode {
    /// File name of `series` for `instance` under this convention.
    pub fn file_name(&self, instance: &str, series: &str) -> String {
        match self {
            HistoryMode::Story => format!("{instance}_{}_history.txt", series.to_lowercase()),
            HistoryMode::Named => format!("{instance}_{series}.txt"),
        }
    }
}

/// A scatter rendering request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterRequest {
    /// Instance name, e.g. `ta01`.
    pub instance_name: String,
    /// Series identifiers (algorithm or run labels), plotted in order.
    pub series: Vec<String>,
    pub mode: HistoryMode,
}

impl ScatterRequest {
    pub fn new(instance_name: impl Into<String>, series: Vec<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            series,
            mode: HistoryMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: HistoryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.instance_name.is_empty() {
            return Err(ChartError::invalid_argument("instance name must not be empty"));
        }
        Ok(())
    }

    /// Path of each series' history file, in request order.
    pub fn history_paths(&self, config: &ChartConfig) -> Vec<PathBuf> {
        self.series
            .iter()
            .map(|s| config.solutions_dir.join(self.mode.file_name(&self.instance_name, s)))
            .collect()
    }

    /// Name used for the displayed chart.
    pub fn chart_name(&self) -> String {
        format!("{}_scatter", self.instance_name)
    }
}

/// Loads every history of a request. Fails on the first unreadable file.
pub fn load_series(
    request: &ScatterRequest,
    config: &ChartConfig,
) -> ChartResult<Vec<HistorySeries>> {
    request.validate()?;
    request
        .series
        .iter()
        .zip(request.history_paths(config))
        .map(|(label, path)| {
            let series = read_history(&path, request.mode, label)?;
            debug!(
                "{}: {} values, best {:?}, {} improvements",
                series.display_name,
                series.len(),
                series.best(),
                series.improvements()
            );
            Ok(series)
        })
        .collect()
}

/// Builds the scatter figure of the given series.
pub fn build_scatter_figure(instance_name: &str, series: &[HistorySeries]) -> Figure {
    let palette = Palette::qualitative();
    let figure = Figure::new()
        .title(format!("JSSP - Instance: {}", capitalize(instance_name)))
        .legend_title("Algorithms:");
    series.iter().enumerate().fold(figure, |figure, (i, s)| {
        figure.scatter(s.display_name.clone(), s.points(), palette.color(i))
    })
}

/// Renders a scatter chart: loads all series, builds the figure and displays it.
pub fn run_scatter(
    request: &ScatterRequest,
    config: &ChartConfig,
    surface: &mut dyn Surface,
) -> ChartResult<Figure> {
    let series = load_series(request, config)?;
    let figure = build_scatter_figure(&request.instance_name, &series);
    if config.display {
        surface.show(&figure, &request.chart_name())?;
    }
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingSurface;
    use crate::figure::DrawCommand;
    use std::path::Path;

    fn config(dir: &Path) -> ChartConfig {
        ChartConfig::default().with_solutions_dir(dir)
    }

    fn series_names(figure: &Figure) -> Vec<String> {
        figure
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Scatter { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            HistoryMode::Story.file_name("ta01", "HillClimber"),
            "ta01_hillclimber_history.txt"
        );
        assert_eq!(HistoryMode::Named.file_name("ta01", "Run_7"), "ta01_Run_7.txt");
    }

    #[test]
    fn test_story_example() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("ta01_hillclimber_history.txt"),
            "100 90 85 80 \n",
        )
        .unwrap();
        let request = ScatterRequest::new("ta01", vec!["hillclimber".to_string()]);

        let mut surface = RecordingSurface::new();
        let figure = run_scatter(&request, &config(dir.path()), &mut surface).unwrap();

        assert_eq!(figure.title_text(), Some("JSSP - Instance: Ta01"));
        assert!(figure
            .commands()
            .contains(&DrawCommand::LegendTitle("Algorithms:".to_string())));
        match &figure.commands()[2] {
            DrawCommand::Scatter { name, x, y, .. } => {
                assert_eq!(name, "Hillclimber");
                assert_eq!(x, &vec![0.0, 1.0, 2.0, 3.0]);
                assert_eq!(y, &vec![100.0, 90.0, 85.0, 80.0]);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(surface.shown.len(), 1);
        assert_eq!(surface.shown[0].0, "ta01_scatter");
        assert!(surface.saved.is_empty());
    }

    #[test]
    fn test_named_mode() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("ta01_sa_run1.txt"),
            "SA (cooling 0.99)\n90 80\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("ta01_ga_run1.txt"), "GA pop=50\n95 70\n").unwrap();
        let request = ScatterRequest::new(
            "ta01",
            vec!["sa_run1".to_string(), "ga_run1".to_string()],
        )
        .with_mode(HistoryMode::Named);

        let series = load_series(&request, &config(dir.path())).unwrap();
        let figure = build_scatter_figure("ta01", &series);
        assert_eq!(series_names(&figure), vec!["SA (cooling 0.99)", "GA pop=50"]);
    }

    #[test]
    fn test_series_keep_request_order_and_colors() {
        let series = vec![
            HistorySeries::new("B", vec![3]),
            HistorySeries::new("A", vec![2]),
        ];
        let figure = build_scatter_figure("ta01", &series);
        assert_eq!(series_names(&figure), vec!["B", "A"]);
        let colors: Vec<_> = figure
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Scatter { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn test_zero_series_gives_empty_chart() {
        let dir = tempfile::tempdir().unwrap();
        let request = ScatterRequest::new("ta01", Vec::new());
        let mut surface = RecordingSurface::new();
        let figure = run_scatter(&request, &config(dir.path()), &mut surface).unwrap();
        assert!(series_names(&figure).is_empty());
        assert_eq!(surface.shown.len(), 1);
    }

    #[test]
    fn test_missing_file_shows_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let request = ScatterRequest::new("ta02", vec!["missing".to_string()]);
        let mut surface = RecordingSurface::new();
        let err = run_scatter(&request, &config(dir.path()), &mut surface).unwrap_err();
        match err {
            ChartError::FileNotFound { path } => {
                assert!(path.ends_with("ta02_missing_history.txt"))
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(surface.shown.is_empty());
    }

    #[test]
    fn test_malformed_history() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ta01_rs_history.txt"), "100 ninety\n").unwrap();
        let request = ScatterRequest::new("ta01", vec!["rs".to_string()]);
        assert!(matches!(
            load_series(&request, &config(dir.path())),
            Err(ChartError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_instance_rejected() {
        let request = ScatterRequest::new("", vec!["rs".to_string()]);
        assert!(matches!(
            load_series(&request, &ChartConfig::default()),
            Err(ChartError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_figure_is_deterministic() {
        let series = vec![HistorySeries::new("Tabu", vec![10, 9, 8])];
        assert_eq!(
            build_scatter_figure("ta01", &series),
            build_scatter_figure("ta01", &series)
        );
    }
}
