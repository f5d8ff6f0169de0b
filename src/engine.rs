//! The per-request solving pipeline.
//!
//! Validator → Dispatcher → {Held-Karp | multi-start 2-opt} → ResultAssembler.

use tracing::{debug, info_span, warn};

use crate::config::SolverConfig;
use crate::deadline::Deadline;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::evaluation::ResultAssembler;
use crate::exact::held_karp;
use crate::heuristic::multi_start;
use crate::models::{Algorithm, Problem, SolveResult};
use crate::validation::Validator;

/// Runs the full pipeline for one request.
///
/// The engine holds only immutable configuration and can be shared freely
/// across threads.
///
/// # Examples
///
/// ```
/// use u_tsp::config::SolverConfig;
/// use u_tsp::deadline::Deadline;
/// use u_tsp::engine::TspEngine;
///
/// let engine = TspEngine::new(SolverConfig::default().with_exact_threshold(2));
/// let result = engine
///     .solve(
///         vec!["A".into(), "B".into(), "C".into(), "D".into()],
///         &[
///             vec![0.0, 10.0, 15.0, 20.0],
///             vec![10.0, 0.0, 35.0, 25.0],
///             vec![15.0, 35.0, 0.0, 30.0],
///             vec![20.0, 25.0, 30.0, 0.0],
///         ],
///         &Deadline::none(),
///         None,
///     )
///     .expect("valid input");
/// assert_eq!(result.total_distance, 80.0);
/// assert!(!result.is_optimal());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TspEngine {
    config: SolverConfig,
}

impl TspEngine {
    /// Creates an engine with the given limits.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The engine's limits.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Validates the input, then solves it.
    pub fn solve(
        &self,
        cities: Vec<String>,
        rows: &[Vec<f64>],
        deadline: &Deadline,
        seed: Option<u64>,
    ) -> Result<SolveResult> {
        let problem = Validator::new()
            .with_max_cities(self.config.max_cities)
            .validate(cities, rows)
            .inspect_err(|e| debug!(kind = e.kind(), error = %e, "input rejected"))?;
        self.solve_problem(&problem, deadline, seed)
    }

    /// Solves an already validated problem.
    pub fn solve_problem(
        &self,
        problem: &Problem,
        deadline: &Deadline,
        seed: Option<u64>,
    ) -> Result<SolveResult> {
        let n = problem.num_cities();
        let algorithm = Dispatcher::new(&self.config).route(n, deadline);
        let _span = info_span!("solve", cities = n, %algorithm).entered();

        let output = match algorithm {
            Algorithm::Exact => held_karp(problem.distances(), self.config.exact_memory_budget)?,
            Algorithm::Heuristic => multi_start(problem.distances(), &self.config, deadline, seed),
        };
        if output.stats.deadline_reached {
            warn!(
                elapsed_ms = output.stats.elapsed.as_millis() as u64,
                "deadline reached, returning best tour found so far"
            );
        }

        let result = ResultAssembler::new(problem).assemble(output, algorithm)?;
        debug!(
            total_distance = result.total_distance,
            elapsed_us = result.stats.elapsed.as_micros() as u64,
            candidates = result.stats.candidates,
            "solved"
        );
        Ok(result)
    }
}
