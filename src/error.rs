//! Error taxonomy shared by both chart tools.
//!
//! Every failure is fatal: nothing is retried and there is no degraded
//! rendering mode. The CLI reports the error and exits non-zero.

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationError;

/// Result alias used throughout the crate.
pub type ChartResult<T> = Result<T, ChartError>;

/// Errors raised while loading input files or producing charts.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The input file does not exist.
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// Wrong line count or a malformed integer.
    #[error("Failed to parse {} at line {line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        message: String,
    },

    /// A required argument is missing or a value is not supported.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Schedule invariants do not hold (strict mode only).
    #[error("Schedule is invalid ({} violation(s)): {}", .0.len(), first_message(.0))]
    InvalidSchedule(Vec<ValidationError>),

    #[error("IO error, more details: {0}")]
    Io(#[from] std::io::Error),

    /// The plotting backend failed to draw or export.
    #[error("Rendering failed: {0}")]
    Render(String),
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("")
}

impl ChartError {
    /// Creates a parse error for `path` at the 1-based `line`.
    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Creates an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Maps an I/O error from reading `path`, singling out missing files.
    pub(crate) fn from_read(error: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path: path.into() }
        } else {
            Self::Io(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_parse_error_message() {
        let e = ChartError::parse("a.txt", 3, "expected an integer, found 'x'");
        assert_eq!(
            e.to_string(),
            "Failed to parse a.txt at line 3: expected an integer, found 'x'"
        );
    }

    #[test]
    fn test_not_found_mapping() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e = ChartError::from_read(io, "ta02_missing_history.txt");
        assert!(matches!(e, ChartError::FileNotFound { .. }));
        assert!(e.to_string().contains("ta02_missing_history.txt"));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(
            ChartError::from_read(io, "x"),
            ChartError::Io(_)
        ));
    }

    #[test]
    fn test_invalid_schedule_message() {
        let e = ChartError::InvalidSchedule(vec![ValidationError::new(
            ValidationErrorKind::DuplicateJob,
            "Machine M1 runs job 0 twice",
        )]);
        assert_eq!(
            e.to_string(),
            "Schedule is invalid (1 violation(s)): Machine M1 runs job 0 twice"
        );
    }
}
