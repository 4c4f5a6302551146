//! HistorySeries parser.
//!
//! Story files hold the integer sequence on line 1; the legend name comes
//! from the series argument. Named files hold the legend name on line 1 and
//! the sequence on line 2.

use std::path::Path;

use log::debug;

use super::{read_file, LineCursor};
use crate::error::ChartResult;
use crate::models::HistorySeries;
use crate::scatter::HistoryMode;
use crate::text::capitalize;

/// Reads and parses a history file.
pub fn read_history(path: &Path, mode: HistoryMode, series: &str) -> ChartResult<HistorySeries> {
    let contents = read_file(path)?;
    parse_history(path, &contents, mode, series)
}

/// Parses history file contents.
///
/// `series` is the argument the file was selected by; story mode derives
/// the display name from it.
pub fn parse_history(
    path: &Path,
    contents: &str,
    mode: HistoryMode,
    series: &str,
) -> ChartResult<HistorySeries> {
    let mut cursor = LineCursor::new(path, contents);

    let display_name = match mode {
        HistoryMode::Story => capitalize(&series.to_lowercase()),
        HistoryMode::Named => cursor.next_line("series name")?.1.to_string(),
    };

    let (line_no, line) = cursor.next_line("history values")?;
    let values: Vec<i64> = cursor.numbers(line_no, line)?;

    debug!(
        "Parsed {}: series '{}' with {} values",
        path.display(),
        display_name,
        values.len()
    );

    Ok(HistorySeries::new(display_name, values))
}
