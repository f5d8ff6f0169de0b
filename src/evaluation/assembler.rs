//! Result assembly.

use tracing::error;

use crate::error::Result;
use crate::models::{Algorithm, Problem, SolveResult, SolverOutput};

use super::TourEvaluator;

/// Turns a solver's index tour into the externally visible result.
///
/// The tour must be a permutation of every city; anything else is reported
/// as [`SolveError::Internal`](crate::error::SolveError::Internal) instead of
/// being returned as a result. The total distance is always recomputed from
/// the matrix.
pub struct ResultAssembler<'a> {
    problem: &'a Problem,
}

impl<'a> ResultAssembler<'a> {
    /// Creates an assembler for the given problem.
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    /// Builds the result for `output`, produced by `algorithm`.
    pub fn assemble(&self, output: SolverOutput, algorithm: Algorithm) -> Result<SolveResult> {
        let evaluator = TourEvaluator::new(self.problem.distances());
        let total_distance = evaluator
            .checked_distance(output.tour.cities())
            .inspect_err(|e| error!(%algorithm, error = %e, "solver returned an invalid tour"))?;

        let path = output
            .tour
            .cities()
            .iter()
            .map(|&i| self.problem.city_name(i).to_string())
            .collect();

        Ok(SolveResult {
            tour: output.tour,
            path,
            total_distance,
            algorithm,
            bound_gap_percent: None,
            stats: output.stats,
        })
    }
}
