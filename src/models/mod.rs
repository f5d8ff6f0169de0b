//! Domain model types for TSP instances.
//!
//! Provides the core abstractions: a validated problem (city names plus
//! distance matrix), tours as index permutations, and the result of a solve.

mod problem;
mod solution;
mod tour;

pub use problem::Problem;
pub use solution::{Algorithm, SolveResult, SolveStats, SolverOutput};
pub use tour::Tour;
