//! Schedule (solution) model.
//!
//! A schedule lists, for every machine, the operations it runs in
//! execution order. Each operation is a `(job, start, end)` triple in the
//! solver's integer time units.

use serde::{Deserialize, Serialize};

/// A complete job-shop schedule as written by the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Number of jobs (`n`).
    pub jobs: usize,
    /// Number of machines (`m`).
    pub machines: usize,
    /// Makespan reported by the solver.
    pub max_makespan: i64,
    /// One row per machine, in file order.
    pub rows: Vec<MachineRow>,
}

/// The operations of one machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineRow {
    /// 1-indexed machine number (`M1..Mm`).
    pub machine: usize,
    /// Operations in execution order.
    pub operations: Vec<Operation>,
}

/// A single operation: job `job` occupies the machine during `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// 0-based job id.
    pub job: usize,
    pub start: i64,
    pub end: i64,
}

impl Operation {
    /// Creates a new operation.
    pub fn new(job: usize, start: i64, end: i64) -> Self {
        Self { job, start, end }
    }

    /// Processing time (end - start).
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

impl MachineRow {
    /// Creates a row for the 1-indexed `machine`.
    pub fn new(machine: usize, operations: Vec<Operation>) -> Self {
        Self {
            machine,
            operations,
        }
    }

    /// Display label of the row (`M1`, `M2`, ...).
    pub fn label(&self) -> String {
        format!("M{}", self.machine)
    }

    /// Sum of operation durations on this machine.
    pub fn busy_time(&self) -> i64 {
        self.operations.iter().map(Operation::duration).sum()
    }
}

impl Schedule {
    /// Creates a schedule from its header values and rows.
    pub fn new(jobs: usize, machines: usize, max_makespan: i64, rows: Vec<MachineRow>) -> Self {
        Self {
            jobs,
            machines,
            max_makespan,
            rows,
        }
    }

    /// Latest operation end across all machines.
    ///
    /// Independent of the `max_makespan` header; the two agree for
    /// well-formed solver output.
    pub fn makespan(&self) -> i64 {
        self.rows
            .iter()
            .flat_map(|r| r.operations.iter())
            .map(|o| o.end)
            .max()
            .unwrap_or(0)
    }

    /// Row of the 1-indexed `machine`.
    pub fn row(&self, machine: usize) -> Option<&MachineRow> {
        self.rows.iter().find(|r| r.machine == machine)
    }

    /// Busy time of the 1-indexed `machine`.
    pub fn busy_time(&self, machine: usize) -> Option<i64> {
        self.row(machine).map(MachineRow::busy_time)
    }

    /// Machine utilization: busy time / reported makespan.
    ///
    /// Returns `None` if the makespan is not positive or the machine is unknown.
    pub fn utilization(&self, machine: usize) -> Option<f64> {
        if self.max_makespan <= 0 {
            return None;
        }
        self.busy_time(machine)
            .map(|busy| busy as f64 / self.max_makespan as f64)
    }

    /// All operations of `job`, paired with their 1-indexed machine.
    pub fn operations_for_job(&self, job: usize) -> Vec<(usize, &Operation)> {
        self.rows
            .iter()
            .flat_map(|r| {
                r.operations
                    .iter()
                    .filter(move |o| o.job == job)
                    .map(move |o| (r.machine, o))
            })
            .collect()
    }

    /// Completion time of `job` (latest end of its operations).
    pub fn job_completion_time(&self, job: usize) -> Option<i64> {
        self.operations_for_job(job)
            .iter()
            .map(|(_, o)| o.end)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> Schedule {
        Schedule::new(
            2,
            2,
            12,
            vec![
                MachineRow::new(1, vec![Operation::new(0, 0, 5), Operation::new(1, 5, 10)]),
                MachineRow::new(2, vec![Operation::new(1, 0, 4), Operation::new(0, 5, 12)]),
            ],
        )
    }

    #[test]
    fn test_schedule_makespan() {
        let s = sample_schedule();
        assert_eq!(s.makespan(), 12);
    }

    #[test]
    fn test_operation_duration() {
        let o = Operation::new(3, 4, 9);
        assert_eq!(o.duration(), 5);
    }

    #[test]
    fn test_row_label() {
        let s = sample_schedule();
        assert_eq!(s.rows[0].label(), "M1");
        assert_eq!(s.rows[1].label(), "M2");
    }

    #[test]
    fn test_busy_time_and_utilization() {
        let s = sample_schedule();
        assert_eq!(s.busy_time(1), Some(10));
        assert_eq!(s.busy_time(2), Some(11));
        assert_eq!(s.busy_time(3), None);

        // M1: 10 / 12
        let util = s.utilization(1).unwrap();
        assert!((util - 10.0 / 12.0).abs() < 1e-10);
        assert!(s.utilization(3).is_none());
    }

    #[test]
    fn test_utilization_zero_makespan() {
        let s = Schedule::new(1, 1, 0, vec![MachineRow::new(1, vec![Operation::new(0, 0, 0)])]);
        assert!(s.utilization(1).is_none());
    }

    #[test]
    fn test_operations_for_job() {
        let s = sample_schedule();
        let ops = s.operations_for_job(0);
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].0, 1);
        assert_eq!(ops[1].0, 2);
        assert_eq!(ops[1].1.start, 5);
    }

    #[test]
    fn test_job_completion_time() {
        let s = sample_schedule();
        assert_eq!(s.job_completion_time(0), Some(12));
        assert_eq!(s.job_completion_time(1), Some(10));
        assert_eq!(s.job_completion_time(7), None);
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::new(0, 0, 0, Vec::new());
        assert_eq!(s.makespan(), 0);
        assert!(s.row(1).is_none());
    }
}
