//! Solve result types.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Tour;

/// Which solver produced a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Held-Karp dynamic programming; the tour is optimal.
    Exact,
    /// Multi-start nearest neighbor with 2-opt; the tour is near-optimal.
    Heuristic,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Heuristic => f.write_str("heuristic"),
        }
    }
}

/// Bookkeeping collected while solving.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveStats {
    /// Wall time spent in the solver.
    pub elapsed: Duration,
    /// Start cities tried (1 for the exact solver).
    pub candidates: usize,
    /// Accepted 2-opt moves across all candidates.
    pub improving_moves: usize,
    /// `true` if the deadline stopped a search before it converged.
    pub deadline_reached: bool,
}

/// A solver's raw output, before assembly.
#[derive(Debug, Clone)]
pub struct SolverOutput {
    /// Winning tour.
    pub tour: Tour,
    /// Solver bookkeeping.
    pub stats: SolveStats,
}

/// The externally visible result of one solve.
///
/// # Examples
///
/// ```
/// use u_tsp::engine::TspEngine;
/// use u_tsp::deadline::Deadline;
/// use u_tsp::models::Algorithm;
///
/// let engine = TspEngine::default();
/// let result = engine
///     .solve(
///         vec!["A".into(), "B".into(), "C".into()],
///         &[
///             vec![0.0, 10.0, 15.0],
///             vec![10.0, 0.0, 20.0],
///             vec![15.0, 20.0, 0.0],
///         ],
///         &Deadline::none(),
///         None,
///     )
///     .expect("valid input");
/// assert_eq!(result.total_distance, 45.0);
/// assert_eq!(result.algorithm, Algorithm::Exact);
/// assert_eq!(result.path.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    /// Visiting order as city indices.
    pub tour: Tour,
    /// Visiting order as city names.
    pub path: Vec<String>,
    /// Cycle length, recomputed from the matrix.
    pub total_distance: f64,
    /// Solver that produced the tour.
    pub algorithm: Algorithm,
    /// Gap to a certified lower bound, when one is known. No bound is
    /// computed today, so this is always `None`.
    pub bound_gap_percent: Option<f64>,
    /// Solver bookkeeping.
    pub stats: SolveStats,
}

impl SolveResult {
    /// Returns `true` if the tour is certified optimal.
    pub fn is_optimal(&self) -> bool {
        self.algorithm == Algorithm::Exact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_display() {
        assert_eq!(Algorithm::Exact.to_string(), "exact");
        assert_eq!(Algorithm::Heuristic.to_string(), "heuristic");
    }

    #[test]
    fn test_algorithm_serde() {
        let json = serde_json::to_string(&Algorithm::Heuristic).expect("serialize");
        assert_eq!(json, "\"heuristic\"");
    }

    #[test]
    fn test_stats_default() {
        let stats = SolveStats::default();
        assert_eq!(stats.candidates, 0);
        assert!(!stats.deadline_reached);
    }
}
