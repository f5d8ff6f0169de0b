//! Solver configuration.

use serde::{Deserialize, Serialize};

/// Tunable limits for the solving pipeline.
///
/// # Examples
///
/// ```
/// use u_tsp::config::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_exact_threshold(10)
///     .with_max_two_opt_passes(200);
/// assert_eq!(config.exact_threshold, 10);
/// assert!(config.parallel);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Largest instance routed to the exact solver.
    pub exact_threshold: usize,
    /// Memory budget for the Held-Karp table, in bytes.
    pub exact_memory_budget: usize,
    /// Worst-case nanoseconds per DP relaxation step, used to decide whether
    /// the exact path fits in the remaining deadline.
    pub exact_ns_per_step: u64,
    /// Start-city cap above which a seeded random sample is used.
    pub max_start_cities: usize,
    /// Upper bound on full 2-opt passes per candidate tour.
    pub max_two_opt_passes: usize,
    /// Run multi-start candidates on the rayon pool.
    pub parallel: bool,
    /// Largest instance accepted at all. `None` means unlimited.
    pub max_cities: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            exact_threshold: 13,
            exact_memory_budget: 256 * 1024 * 1024,
            exact_ns_per_step: 4,
            max_start_cities: 128,
            max_two_opt_passes: 1000,
            parallel: true,
            max_cities: None,
        }
    }
}

impl SolverConfig {
    /// Sets the largest instance size solved exactly.
    pub fn with_exact_threshold(mut self, n: usize) -> Self {
        self.exact_threshold = n;
        self
    }

    /// Sets the Held-Karp memory budget in bytes.
    pub fn with_exact_memory_budget(mut self, bytes: usize) -> Self {
        self.exact_memory_budget = bytes;
        self
    }

    /// Sets the per-step cost estimate used by deadline routing.
    pub fn with_exact_ns_per_step(mut self, ns: u64) -> Self {
        self.exact_ns_per_step = ns;
        self
    }

    /// Sets the start-city sampling cap.
    pub fn with_max_start_cities(mut self, n: usize) -> Self {
        self.max_start_cities = n.max(1);
        self
    }

    /// Sets the 2-opt pass cap.
    pub fn with_max_two_opt_passes(mut self, n: usize) -> Self {
        self.max_two_opt_passes = n;
        self
    }

    /// Runs multi-start candidates sequentially.
    pub fn without_parallelism(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Sets the largest accepted instance size.
    pub fn with_max_cities(mut self, n: Option<usize>) -> Self {
        self.max_cities = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.exact_threshold, 13);
        assert_eq!(config.max_two_opt_passes, 1000);
        assert!(config.max_cities.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SolverConfig =
            serde_json::from_str(r#"{ "exact_threshold": 8, "parallel": false }"#).expect("parse");
        assert_eq!(config.exact_threshold, 8);
        assert!(!config.parallel);
        assert_eq!(config.max_start_cities, 128);
    }

    #[test]
    fn test_start_cap_never_zero() {
        let config = SolverConfig::default().with_max_start_cities(0);
        assert_eq!(config.max_start_cities, 1);
    }
}
