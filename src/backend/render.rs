//! `plotters` rendering of figures.

use std::path::{Path, PathBuf};

use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{ImageFormat, Surface};
use crate::config::ChartConfig;
use crate::error::{ChartError, ChartResult};
use crate::figure::{DrawCommand, Figure, Rgb};

const FONT: &str = "sans-serif";

/// Axis setup resolved from a figure's commands.
///
/// Later commands override earlier ones. Ranges without an explicit limit
/// are derived from the drawn data, padded by 5% on each side.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub y_ticks: Option<(Vec<f64>, Vec<String>)>,
    pub grid: bool,
    pub legend_title: Option<String>,
}

impl Layout {
    pub fn from_figure(figure: &Figure) -> Self {
        let mut layout = Self {
            title: None,
            x_label: None,
            y_label: None,
            x_range: (0.0, 1.0),
            y_range: (0.0, 1.0),
            y_ticks: None,
            grid: true,
            legend_title: None,
        };
        for command in figure.commands() {
            match command {
                DrawCommand::Title(t) => layout.title = Some(t.clone()),
                DrawCommand::XLabel(l) => layout.x_label = Some(l.clone()),
                DrawCommand::YLabel(l) => layout.y_label = Some(l.clone()),
                DrawCommand::YTicks { positions, labels } => {
                    layout.y_ticks = Some((positions.clone(), labels.clone()))
                }
                DrawCommand::Grid(on) => layout.grid = *on,
                DrawCommand::LegendTitle(t) => layout.legend_title = Some(t.clone()),
                _ => {}
            }
        }

        let bounds = figure.data_bounds();
        layout.x_range = figure
            .x_range()
            .or_else(|| bounds.map(|(x, _)| padded(x)))
            .map(non_degenerate)
            .unwrap_or((0.0, 1.0));
        layout.y_range = figure
            .y_range()
            .or_else(|| bounds.map(|(_, y)| padded(y)))
            .map(non_degenerate)
            .unwrap_or((0.0, 1.0));
        layout
    }
}

fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

fn non_degenerate((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 1.0, lo + 1.0)
    }
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

/// Surface drawing with `plotters`.
#[derive(Debug, Clone)]
pub struct PlottersSurface {
    size: (u32, u32),
    preview_dir: PathBuf,
}

impl PlottersSurface {
    pub fn new(size: (u32, u32), preview_dir: impl Into<PathBuf>) -> Self {
        Self {
            size,
            preview_dir: preview_dir.into(),
        }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.size(), config.preview_dir.clone())
    }

    fn render(&self, figure: &Figure, path: &Path) -> ChartResult<()> {
        let format = ImageFormat::from_path(path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let result = match format {
            ImageFormat::Svg => {
                draw_figure(SVGBackend::new(path, self.size).into_drawing_area(), figure)
                    .map_err(|e| e.to_string())
            }
            ImageFormat::Bitmap => {
                draw_figure(BitMapBackend::new(path, self.size).into_drawing_area(), figure)
                    .map_err(|e| e.to_string())
            }
        };
        result.map_err(ChartError::Render)
    }
}

impl Surface for PlottersSurface {
    fn show(&mut self, figure: &Figure, name: &str) -> ChartResult<()> {
        let path = self.preview_dir.join(format!("{name}.svg"));
        self.render(figure, &path)?;
        info!("Chart '{}' displayed at {}", name, path.display());
        Ok(())
    }

    fn save(&mut self, figure: &Figure, path: &Path) -> ChartResult<()> {
        self.render(figure, path)?;
        info!("Chart saved to {}", path.display());
        Ok(())
    }
}

/// Replays the figure's commands onto a drawing area.
fn draw_figure<DB>(
    root: DrawingArea<DB, Shift>,
    figure: &Figure,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let layout = Layout::from_figure(figure);
    let (x0, x1) = layout.x_range;
    let (y0, y1) = layout.y_range;

    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60);
    if let Some(title) = &layout.title {
        builder.caption(title, (FONT, 24));
    }
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    {
        let mut mesh = chart.configure_mesh();
        if !layout.grid {
            mesh.disable_mesh();
        }
        if let Some(label) = &layout.x_label {
            mesh.x_desc(label.as_str());
        }
        if let Some(label) = &layout.y_label {
            mesh.y_desc(label.as_str());
        }
        if layout.y_ticks.is_some() {
            mesh.y_labels(0);
        }
        mesh.draw()?;
    }

    // Fixed tick labels are placed by hand; plotters picks its own key points.
    if let Some((positions, labels)) = &layout.y_ticks {
        for (&y, label) in positions.iter().zip(labels) {
            let (px, py) = chart.backend_coord(&(x0, y));
            root.draw(&Text::new(
                label.clone(),
                (px - 8, py),
                TextStyle::from((FONT, 14).into_font())
                    .pos(Pos::new(HPos::Right, VPos::Center)),
            ))?;
        }
    }

    let mut has_series = false;
    for command in figure.commands() {
        match command {
            DrawCommand::BrokenBar {
                start,
                end,
                y,
                height,
                color,
            } => {
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(*start, *y), (*end, *y + *height)],
                    rgb(*color).filled(),
                )))?;
            }
            DrawCommand::Text { x, y, text, color } => {
                let style = (FONT, 15)
                    .into_font()
                    .color(&rgb(*color))
                    .pos(Pos::new(HPos::Left, VPos::Bottom));
                chart.draw_series(std::iter::once(Text::new(text.clone(), (*x, *y), style)))?;
            }
            DrawCommand::VLine { x, color } => {
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(*x, y0), (*x, y1)],
                    rgb(*color).stroke_width(1),
                )))?;
            }
            DrawCommand::Scatter { name, x, y, color } => {
                let color = rgb(*color);
                chart
                    .draw_series(
                        x.iter()
                            .zip(y)
                            .map(|(&x, &y)| Circle::new((x, y), 3, color.filled())),
                    )?
                    .label(name.as_str())
                    .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
                has_series = true;
            }
            _ => {}
        }
    }

    if has_series {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    if let Some(title) = &layout.legend_title {
        let (px, py) = chart.backend_coord(&(x1, y1));
        root.draw(&Text::new(
            title.clone(),
            (px - 10, py - 4),
            TextStyle::from((FONT, 15).into_font()).pos(Pos::new(HPos::Right, VPos::Bottom)),
        ))?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gantt::{build_gantt_figure, IdleFill};
    use crate::models::{HistorySeries, MachineRow, Operation, Schedule};
    use crate::scatter::build_scatter_figure;

    fn gantt_figure() -> Figure {
        let schedule = Schedule::new(
            2,
            2,
            10,
            vec![
                MachineRow::new(1, vec![Operation::new(0, 0, 5), Operation::new(1, 5, 10)]),
                MachineRow::new(2, vec![Operation::new(1, 0, 5), Operation::new(0, 5, 9)]),
            ],
        );
        build_gantt_figure(&schedule, Some("ta01"), IdleFill::ToMakespan)
    }

    fn file_len(path: &Path) -> u64 {
        std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
    }

    #[test]
    fn test_layout_uses_explicit_limits() {
        let figure = Figure::new()
            .title("Gantt")
            .xlim(0.0, 11.0)
            .ylim(0.0, 30.0)
            .grid(false)
            .broken_bar(0.0, 50.0, 10.0, 6.0, Rgb::RED);
        let layout = Layout::from_figure(&figure);
        assert_eq!(layout.title.as_deref(), Some("Gantt"));
        assert_eq!(layout.x_range, (0.0, 11.0));
        assert_eq!(layout.y_range, (0.0, 30.0));
        assert!(!layout.grid);
    }

    #[test]
    fn test_layout_derives_ranges_from_data() {
        let figure = Figure::new().scatter("s", [(0, 100), (1, 80)], Rgb::BLACK);
        let layout = Layout::from_figure(&figure);
        let (x0, x1) = layout.x_range;
        let (y0, y1) = layout.y_range;
        assert!((x0 - -0.05).abs() < 1e-9 && (x1 - 1.05).abs() < 1e-9);
        assert!((y0 - 79.0).abs() < 1e-9 && (y1 - 101.0).abs() < 1e-9);
    }

    #[test]
    fn test_layout_degenerate_ranges() {
        let single = Figure::new().scatter("s", [(0, 42)], Rgb::BLACK);
        let layout = Layout::from_figure(&single);
        assert_eq!(layout.x_range, (-1.0, 1.0));
        assert_eq!(layout.y_range, (41.0, 43.0));

        let empty = Layout::from_figure(&Figure::new().title("empty"));
        assert_eq!(empty.x_range, (0.0, 1.0));
        assert_eq!(empty.y_range, (0.0, 1.0));
        assert!(empty.grid);
    }

    #[test]
    fn test_layout_ticks_and_legend_title() {
        let figure = Figure::new()
            .yticks(vec![13.0], vec!["M1".to_string()])
            .legend_title("Algorithms:");
        let layout = Layout::from_figure(&figure);
        assert_eq!(
            layout.y_ticks,
            Some((vec![13.0], vec!["M1".to_string()]))
        );
        assert_eq!(layout.legend_title.as_deref(), Some("Algorithms:"));
    }

    #[test]
    fn test_render_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = PlottersSurface::new((320, 240), dir.path());
        let err = surface
            .save(&Figure::new(), &dir.path().join("chart.pdf"))
            .unwrap_err();
        assert!(matches!(err, ChartError::InvalidArgument(_)));
    }

    #[test]
    fn test_save_gantt_creates_charts_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = PlottersSurface::new((640, 480), dir.path().join("preview"));
        let figure = gantt_figure();

        for name in ["ta01.svg", "ta01.png"] {
            let path = dir.path().join("charts").join(name);
            surface.save(&figure, &path).unwrap();
            assert!(file_len(&path) > 0, "{name} is empty");
        }
    }

    #[test]
    fn test_show_writes_svg_preview() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = PlottersSurface::new((640, 480), dir.path());

        surface.show(&gantt_figure(), "ta01_hc_gantt").unwrap();
        assert!(file_len(&dir.path().join("ta01_hc_gantt.svg")) > 0);
    }

    #[test]
    fn test_show_scatter_without_points() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = PlottersSurface::new((640, 480), dir.path());

        surface
            .show(&build_scatter_figure("ta01", &[]), "no_series")
            .unwrap();
        assert!(file_len(&dir.path().join("no_series.svg")) > 0);

        let empty = vec![HistorySeries::new("Tabu", Vec::new())];
        surface
            .show(&build_scatter_figure("ta01", &empty), "empty_series")
            .unwrap();
        assert!(file_len(&dir.path().join("empty_series.svg")) > 0);
    }
}
