//! Convergence history model.
//!
//! The solver appends the objective value (makespan) every time a run
//! improves on its best candidate, so a history is usually strictly
//! decreasing. Nothing here depends on that.

use serde::{Deserialize, Serialize};

/// One algorithm run's history, ready to be plotted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySeries {
    /// Legend entry for the series.
    pub display_name: String,
    /// Objective value per recorded iteration, in file order.
    pub values: Vec<i64>,
}

impl HistorySeries {
    /// Creates a new series.
    pub fn new(display_name: impl Into<String>, values: Vec<i64>) -> Self {
        Self {
            display_name: display_name.into(),
            values,
        }
    }

    /// Number of recorded values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Best (smallest) recorded value.
    pub fn best(&self) -> Option<i64> {
        self.values.iter().copied().min()
    }

    /// Number of strict decreases between consecutive values.
    pub fn improvements(&self) -> usize {
        self.values.windows(2).filter(|w| w[1] < w[0]).count()
    }

    /// Plotted points: implicit index on x, value on y.
    pub fn points(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.values.iter().copied().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_and_improvements() {
        let s = HistorySeries::new("Hillclimber", vec![100, 90, 90, 85, 80]);
        assert_eq!(s.best(), Some(80));
        assert_eq!(s.improvements(), 3);
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn test_points_use_implicit_index() {
        let s = HistorySeries::new("Tabu", vec![100, 90, 85, 80]);
        let points: Vec<_> = s.points().collect();
        assert_eq!(points, vec![(0, 100), (1, 90), (2, 85), (3, 80)]);
    }

    #[test]
    fn test_empty_series() {
        let s = HistorySeries::new("Empty", Vec::new());
        assert!(s.is_empty());
        assert_eq!(s.best(), None);
        assert_eq!(s.improvements(), 0);
    }
}
