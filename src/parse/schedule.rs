//! ScheduleFile parser.
//!
//! ```text
//! n m
//! maxMakespan
//! job start end job start end ...   <- machine 1, 3*n integers
//! ...                               <- m machine lines in total
//! ```

use std::path::Path;

use log::debug;

use super::{read_file, LineCursor};
use crate::error::{ChartError, ChartResult};
use crate::models::{MachineRow, Operation, Schedule};

const MAX_PREALLOCATED_ROWS: usize = 1024;

/// Reads and parses a schedule file.
pub fn read_schedule(path: &Path) -> ChartResult<Schedule> {
    let contents = read_file(path)?;
    parse_schedule(path, &contents)
}

/// Parses schedule file contents. `path` is only used in error messages.
///
/// Lines after the last machine line are ignored.
pub fn parse_schedule(path: &Path, contents: &str) -> ChartResult<Schedule> {
    let mut cursor = LineCursor::new(path, contents);

    let (line_no, line) = cursor.next_line("job and machine counts")?;
    let header: Vec<usize> = cursor.numbers(line_no, line)?;
    let (jobs, machines) = match header.as_slice() {
        [n, m] => (*n, *m),
        _ => {
            return Err(cursor.error(
                line_no,
                format!("expected 2 integers (jobs machines), found {}", header.len()),
            ))
        }
    };
    if jobs == 0 {
        return Err(cursor.error(line_no, "job count must be positive"));
    }
    let values_per_line = jobs
        .checked_mul(3)
        .ok_or_else(|| cursor.error(line_no, format!("job count {jobs} is too large")))?;

    let (line_no, line) = cursor.next_line("makespan line")?;
    let max_makespan = match cursor.numbers::<i64>(line_no, line)?.as_slice() {
        [value] => *value,
        values => {
            return Err(cursor.error(
                line_no,
                format!("expected 1 integer (makespan), found {}", values.len()),
            ))
        }
    };

    // Capacity is bounded since the machine count is untrusted input.
    let mut rows = Vec::with_capacity(machines.min(MAX_PREALLOCATED_ROWS));
    for machine in 1..=machines {
        let (line_no, line) =
            cursor.next_line(&format!("schedule line for machine M{machine}"))?;
        let values: Vec<i64> = cursor.numbers(line_no, line)?;
        if values.len() != values_per_line {
            return Err(cursor.error(
                line_no,
                format!(
                    "expected {} integers ({} triples) for machine M{}, found {}",
                    values_per_line,
                    jobs,
                    machine,
                    values.len()
                ),
            ));
        }

        let operations = values
            .chunks_exact(3)
            .map(|triple| {
                let job = usize::try_from(triple[0]).map_err(|_| {
                    cursor.error(line_no, format!("negative job id {}", triple[0]))
                })?;
                Ok(Operation::new(job, triple[1], triple[2]))
            })
            .collect::<ChartResult<Vec<_>>>()?;

        rows.push(MachineRow::new(machine, operations));
    }

    debug!(
        "Parsed {}: {} jobs, {} machines, makespan {}",
        path.display(),
        jobs,
        machines,
        max_makespan
    );

    Ok(Schedule::new(jobs, machines, max_makespan, rows))
}
