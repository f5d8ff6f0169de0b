//! Strategy routing between the exact and heuristic solvers.

use std::time::Duration;

use crate::config::SolverConfig;
use crate::deadline::Deadline;
use crate::models::Algorithm;

/// Chooses a solver for an instance of a given size.
///
/// Instances up to `exact_threshold` cities go to Held-Karp, unless a bounded
/// deadline leaves less time than the exact solver's worst case at that size.
/// Everything else goes to the heuristic.
///
/// # Examples
///
/// ```
/// use u_tsp::config::SolverConfig;
/// use u_tsp::deadline::Deadline;
/// use u_tsp::dispatch::Dispatcher;
/// use u_tsp::models::Algorithm;
///
/// let config = SolverConfig::default();
/// let dispatcher = Dispatcher::new(&config);
/// assert_eq!(dispatcher.route(8, &Deadline::none()), Algorithm::Exact);
/// assert_eq!(dispatcher.route(40, &Deadline::none()), Algorithm::Heuristic);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    config: &'a SolverConfig,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher over the given limits.
    pub fn new(config: &'a SolverConfig) -> Self {
        Self { config }
    }

    /// Picks the solver for `n` cities under `deadline`.
    pub fn route(&self, n: usize, deadline: &Deadline) -> Algorithm {
        if n > self.config.exact_threshold {
            return Algorithm::Heuristic;
        }
        match deadline.remaining() {
            Some(remaining) if remaining < self.exact_worst_case(n) => Algorithm::Heuristic,
            Some(remaining) if remaining.is_zero() => Algorithm::Heuristic,
            _ => Algorithm::Exact,
        }
    }

    /// Worst-case Held-Karp running time estimate for `n` cities.
    ///
    /// `(n-1)² · 2^(n-1)` relaxation steps at `exact_ns_per_step` each,
    /// saturating at [`Duration::MAX`].
    pub fn exact_worst_case(&self, n: usize) -> Duration {
        if n <= 2 {
            return Duration::ZERO;
        }
        let m = (n - 1) as u32;
        let steps = 1u64
            .checked_shl(m)
            .and_then(|masks| masks.checked_mul(u64::from(m) * u64::from(m)))
            .and_then(|s| s.checked_mul(self.config.exact_ns_per_step));
        match steps {
            Some(ns) => Duration::from_nanos(ns),
            None => Duration::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio_util::sync::CancellationToken;

    #[test]
    fn test_threshold() {
        let config = SolverConfig::default().with_exact_threshold(5);
        let d = Dispatcher::new(&config);
        assert_eq!(d.route(2, &Deadline::none()), Algorithm::Exact);
        assert_eq!(d.route(5, &Deadline::none()), Algorithm::Exact);
        assert_eq!(d.route(6, &Deadline::none()), Algorithm::Heuristic);
    }

    #[test]
    fn test_generous_deadline_keeps_exact() {
        let config = SolverConfig::default();
        let d = Dispatcher::new(&config);
        let deadline = Deadline::after(Duration::from_secs(3600));
        assert_eq!(d.route(13, &deadline), Algorithm::Exact);
    }

    #[test]
    fn test_tight_deadline_reroutes() {
        // 1 ms per step makes 12 cities need about 4 minutes.
        let config = SolverConfig::default().with_exact_ns_per_step(1_000_000);
        let d = Dispatcher::new(&config);
        let deadline = Deadline::after(Duration::from_secs(1));
        assert_eq!(d.route(12, &deadline), Algorithm::Heuristic);
        assert_eq!(d.route(2, &deadline), Algorithm::Exact);
    }

    #[test]
    fn test_expired_deadline_reroutes() {
        let config = SolverConfig::default();
        let d = Dispatcher::new(&config);
        let deadline = Deadline::at(Instant::now());
        assert_eq!(d.route(5, &deadline), Algorithm::Heuristic);
        assert_eq!(d.route(2, &deadline), Algorithm::Heuristic);
    }

    #[test]
    fn test_cancelled_token_reroutes() {
        let config = SolverConfig::default();
        let d = Dispatcher::new(&config);
        let token = CancellationToken::new();
        let deadline = Deadline::none().with_token(token.clone());
        assert_eq!(d.route(5, &deadline), Algorithm::Exact);
        token.cancel();
        assert_eq!(d.route(5, &deadline), Algorithm::Heuristic);
    }

    #[test]
    fn test_worst_case_estimate() {
        let config = SolverConfig::default().with_exact_ns_per_step(1);
        let d = Dispatcher::new(&config);
        assert_eq!(d.exact_worst_case(2), Duration::ZERO);
        // 3 cities: 2² · 2² = 16 steps
        assert_eq!(d.exact_worst_case(3), Duration::from_nanos(16));
        assert_eq!(d.exact_worst_case(200), Duration::MAX);
    }
}
