//! Solver output models.
//!
//! In-memory forms of the two files the external JSSP solver writes:
//! the final schedule of a run and the convergence history of a run.
//! Both are read once per invocation and never mutated afterwards.
//!
//! | Model | Solver file | Chart |
//! |-------|-------------|-------|
//! | Schedule | `{instance}_{name}_solution.txt` | Gantt |
//! | HistorySeries | `{instance}_{name}_history.txt` | Scatter |

mod history;
mod schedule;

pub use history::HistorySeries;
pub use schedule::{MachineRow, Operation, Schedule};
