//! Structural validation of parsed schedules.
//!
//! The parser only checks the file shape. These checks cover what a
//! correct solver output must also satisfy:
//! - One row per machine, one operation per job on each row
//! - Job ids on each row form a permutation of `[0, n)`
//! - `0 <= start <= end <= maxMakespan` for every operation
//! - Operations on a machine do not overlap in execution order
//!
//! All findings are collected; validation does not stop at the first one.

use crate::models::Schedule;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Number of rows differs from the machine count.
    RowCountMismatch,
    /// A row does not hold exactly one operation per job.
    OperationCountMismatch,
    /// A job id is not in `[0, n)`.
    JobOutOfRange,
    /// A job appears more than once on a machine.
    DuplicateJob,
    /// A job never runs on a machine.
    MissingJob,
    /// An operation starts before time zero.
    NegativeStart,
    /// An operation ends before it starts.
    InvertedInterval,
    /// An operation ends after the reported makespan.
    BeyondMakespan,
    /// An operation starts before the previous one on the same machine ends.
    MachineOverlap,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a parsed schedule.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_schedule(schedule: &Schedule) -> ValidationResult {
    let mut errors = Vec::new();

    if schedule.rows.len() != schedule.machines {
        errors.push(ValidationError::new(
            ValidationErrorKind::RowCountMismatch,
            format!(
                "Expected {} machine rows, found {}",
                schedule.machines,
                schedule.rows.len()
            ),
        ));
    }

    for row in &schedule.rows {
        let label = row.label();

        if row.operations.len() != schedule.jobs {
            errors.push(ValidationError::new(
                ValidationErrorKind::OperationCountMismatch,
                format!(
                    "Machine {label} has {} operations, expected {}",
                    row.operations.len(),
                    schedule.jobs
                ),
            ));
        }

        // Job permutation
        let mut seen = vec![false; schedule.jobs];
        for op in &row.operations {
            match seen.get_mut(op.job) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::JobOutOfRange,
                    format!(
                        "Machine {label} runs job {} outside [0, {})",
                        op.job, schedule.jobs
                    ),
                )),
                Some(true) => errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateJob,
                    format!("Machine {label} runs job {} twice", op.job),
                )),
                Some(flag) => *flag = true,
            }
        }
        for (job, _) in seen.iter().enumerate().filter(|(_, s)| !**s) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingJob,
                format!("Machine {label} never runs job {job}"),
            ));
        }

        // Time bounds
        for op in &row.operations {
            if op.start < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeStart,
                    format!("Job {} on {label} starts at {}", op.job, op.start),
                ));
            }
            if op.start > op.end {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvertedInterval,
                    format!(
                        "Job {} on {label} ends at {} before its start {}",
                        op.job, op.end, op.start
                    ),
                ));
            }
            if op.end > schedule.max_makespan {
                errors.push(ValidationError::new(
                    ValidationErrorKind::BeyondMakespan,
                    format!(
                        "Job {} on {label} ends at {} after the makespan {}",
                        op.job, op.end, schedule.max_makespan
                    ),
                ));
            }
        }

        for pair in row.operations.windows(2) {
            if pair[1].start < pair[0].end {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MachineOverlap,
                    format!(
                        "Job {} on {label} starts at {} before job {} ends at {}",
                        pair[1].job, pair[1].start, pair[0].job, pair[0].end
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
