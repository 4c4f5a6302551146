//! Parsers for the solver's plain-text output files.
//!
//! Both formats are line oriented with whitespace-separated integers.
//! Parsers work on the full file contents; files are read completely
//! and closed before parsing starts.
//!
//! Errors carry the path and the 1-based line number of the offending line.

mod history;
mod schedule;

pub use history::{parse_history, read_history};
pub use schedule::{parse_schedule, read_schedule};

use std::path::Path;
use std::str::FromStr;

use crate::error::{ChartError, ChartResult};

/// Reads a whole file, mapping a missing file to `FileNotFound`.
pub(crate) fn read_file(path: &Path) -> ChartResult<String> {
    std::fs::read_to_string(path).map_err(|e| ChartError::from_read(e, path))
}

/// Line cursor that remembers line numbers for error reporting.
struct LineCursor<'a> {
    path: &'a Path,
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    last: usize,
}

impl<'a> LineCursor<'a> {
    fn new(path: &'a Path, contents: &'a str) -> Self {
        Self {
            path,
            lines: contents.lines().enumerate(),
            last: 0,
        }
    }

    /// Next line with its 1-based number. `what` names the expected content.
    fn next_line(&mut self, what: &str) -> ChartResult<(usize, &'a str)> {
        match self.lines.next() {
            Some((i, line)) => {
                self.last = i + 1;
                Ok((i + 1, line))
            }
            None => Err(self.error(self.last + 1, format!("missing {what}"))),
        }
    }

    fn error(&self, line: usize, message: impl Into<String>) -> ChartError {
        ChartError::parse(self.path, line, message)
    }

    /// Parses every whitespace-separated token of `line` as `T`.
    fn numbers<T: FromStr>(&self, line_no: usize, line: &str) -> ChartResult<Vec<T>> {
        line.split_whitespace()
            .map(|token| {
                token.parse::<T>().map_err(|_| {
                    self.error(line_no, format!("expected an integer, found '{token}'"))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_reports_missing_line_number() {
        let path = Path::new("x.txt");
        let mut cursor = LineCursor::new(path, "1 2\n");
        assert_eq!(cursor.next_line("header").unwrap(), (1, "1 2"));
        match cursor.next_line("makespan line") {
            Err(ChartError::Parse { line, message, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(message, "missing makespan line");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_numbers_rejects_garbage() {
        let path = Path::new("x.txt");
        let cursor = LineCursor::new(path, "");
        assert_eq!(cursor.numbers::<i64>(1, " 3  -4 5 ").unwrap(), vec![3, -4, 5]);
        assert!(cursor.numbers::<i64>(1, "3 x 5").is_err());
        assert!(cursor.numbers::<usize>(1, "-1").is_err());
    }

    #[test]
    fn test_read_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, ChartError::FileNotFound { .. }));
    }
}
