//! Command-line front ends of the two tools.
//!
//! The binaries only forward their argument vector to [`gantt_main`] or
//! [`scatter_main`]; everything else, including logging setup and error
//! reporting, lives here so it can be exercised from tests.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, LevelFilter};

use crate::backend::PlottersSurface;
use crate::config::ChartConfig;
use crate::error::{ChartError, ChartResult};
use crate::figure::Figure;
use crate::gantt::{run_gantt, GanttRequest, IdleFill};
use crate::scatter::{run_scatter, HistoryMode, ScatterRequest};

/// Options shared by both tools.
#[derive(Debug, Clone, clap::Args)]
pub struct CommonArgs {
    /// Directory containing the solver's result files [default: ../solutions].
    #[arg(long)]
    pub solutions_dir: Option<PathBuf>,

    /// Directory receiving display previews [default: system temp dir].
    #[arg(long)]
    pub preview_dir: Option<PathBuf>,

    /// JSON configuration file; command-line flags take precedence over it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Build the chart without displaying it.
    #[arg(long)]
    pub no_display: bool,

    /// Print the chart's draw commands as JSON on stdout.
    #[arg(long)]
    pub dump: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Renders the Gantt chart of a solver solution.
#[derive(Debug, Parser)]
#[command(name = "jssp-gantt", author, version, long_about = None)]
pub struct GanttArgs {
    /// Instance name, e.g. ta01.
    pub instance: String,

    /// Solution name; the chart reads `{instance}_{file_name}_solution.txt`.
    pub file_name: String,

    /// Title of the chart.
    pub title: Option<String>,

    /// File name under the charts directory to save the chart to.
    /// The image format follows the extension (png, jpg, bmp or svg).
    pub save_path: Option<String>,

    /// Directory receiving saved charts [default: ../solutions/charts].
    #[arg(long)]
    pub charts_dir: Option<PathBuf>,

    /// Where the idle filler after each operation ends.
    #[arg(long, value_enum, default_value_t = IdleFill::ToMakespan)]
    pub idle_fill: IdleFill,

    /// Fail on schedules that break the job-shop invariants instead of warning.
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Overlays convergence histories of algorithm runs.
#[derive(Debug, Parser)]
#[command(name = "jssp-scatter", author, version, long_about = None)]
pub struct ScatterArgs {
    /// Instance name, e.g. ta01.
    pub instance_name: String,

    /// Series to plot (algorithm or run labels).
    pub series: Vec<String>,

    /// History file convention.
    #[arg(long, value_enum, default_value_t = HistoryMode::Story)]
    pub mode: HistoryMode,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl CommonArgs {
    /// Builds the configuration: defaults, then the config file, then flags.
    pub fn resolve_config(&self) -> ChartResult<ChartConfig> {
        let mut config = match &self.config {
            Some(path) => ChartConfig::load(path)?,
            None => ChartConfig::default(),
        };
        if let Some(dir) = &self.solutions_dir {
            config = config.with_solutions_dir(dir);
        }
        if let Some(dir) = &self.preview_dir {
            config = config.with_preview_dir(dir);
        }
        if self.no_display {
            config = config.with_display(false);
        }
        Ok(config)
    }
}

/// Configures `env_logger`: warnings by default, debug output when verbose.
pub fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    // A second initialisation (e.g. from tests) keeps the first logger.
    let _ = env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "{:<5} {}", record.level(), record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .try_init();
    info!("Logging successfully configured");
}

/// Parses arguments; `Ok(None)` means help or version was printed.
fn parse_args<P, I, T>(args: I) -> ChartResult<Option<P>>
where
    P: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match P::try_parse_from(args) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            Ok(None)
        }
        Err(e) => Err(ChartError::invalid_argument(e.to_string().trim_end())),
    }
}

fn dump(figure: &Figure) -> ChartResult<()> {
    let json = figure
        .to_json()
        .map_err(|e| ChartError::Render(e.to_string()))?;
    println!("{json}");
    Ok(())
}

/// Runs the Gantt tool for already-parsed arguments.
pub fn run_gantt_cli(args: &GanttArgs) -> ChartResult<Figure> {
    let mut config = args.common.resolve_config()?;
    if let Some(dir) = &args.charts_dir {
        config = config.with_charts_dir(dir);
    }
    if args.strict {
        config = config.with_strict(true);
    }

    let mut request =
        GanttRequest::new(&args.instance, &args.file_name).with_idle_fill(args.idle_fill);
    if let Some(title) = &args.title {
        request = request.with_title(title);
    }
    if let Some(save_path) = &args.save_path {
        request = request.with_save_path(save_path);
    }

    let mut surface = PlottersSurface::from_config(&config);
    let figure = run_gantt(&request, &config, &mut surface)?;
    if args.common.dump {
        dump(&figure)?;
    }
    Ok(figure)
}

/// Runs the scatter tool for already-parsed arguments.
pub fn run_scatter_cli(args: &ScatterArgs) -> ChartResult<Figure> {
    let config = args.common.resolve_config()?;
    let request =
        ScatterRequest::new(&args.instance_name, args.series.clone()).with_mode(args.mode);

    let mut surface = PlottersSurface::from_config(&config);
    let figure = run_scatter(&request, &config, &mut surface)?;
    if args.common.dump {
        dump(&figure)?;
    }
    Ok(figure)
}

fn fail(e: ChartError) -> ExitCode {
    error!("Execution failed, error: {}", e);
    ExitCode::FAILURE
}

/// Entry point of `jssp-gantt`.
pub fn gantt_main<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: GanttArgs = match parse_args(args) {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    configure_logging(args.common.verbose);

    match run_gantt_cli(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

/// Entry point of `jssp-scatter`.
pub fn scatter_main<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: ScatterArgs = match parse_args(args) {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    configure_logging(args.common.verbose);

    match run_scatter_cli(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}
