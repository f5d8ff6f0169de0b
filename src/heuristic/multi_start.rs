//! Multi-start nearest neighbor + 2-opt.
//!
//! # Algorithm
//!
//! For every candidate start city, build a nearest-neighbor tour and improve
//! it with 2-opt. Candidates are independent and run on the rayon pool; the
//! results are collected in start order and reduced by (length, start index),
//! so the winner never depends on scheduling.
//!
//! # Anytime behavior
//!
//! Each 2-opt run checks the deadline between passes. Once it expires every
//! remaining candidate returns its current tour, so the solve finishes with
//! the best complete tour found so far instead of failing.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::debug;

use crate::config::SolverConfig;
use crate::constructive::nearest_neighbor;
use crate::deadline::Deadline;
use crate::distance::DistanceMatrix;
use crate::evaluation::tour_distance;
use crate::local_search::two_opt_improve;
use crate::models::{SolveStats, SolverOutput, Tour};

/// One improved candidate tour.
#[derive(Debug, Clone)]
struct Candidate {
    start: usize,
    tour: Tour,
    distance: f64,
    construction_distance: f64,
    moves: usize,
    deadline_reached: bool,
}

/// Chooses the start cities to try.
///
/// All `n` cities are used unless `n` exceeds `cap` and a `seed` is given, in
/// which case a seeded random sample of `cap` distinct cities is drawn. The
/// result is sorted ascending.
///
/// # Examples
///
/// ```
/// use u_tsp::heuristic::start_cities;
///
/// assert_eq!(start_cities(4, 2, None), vec![0, 1, 2, 3]);
/// let sample = start_cities(100, 8, Some(7));
/// assert_eq!(sample.len(), 8);
/// assert_eq!(sample, start_cities(100, 8, Some(7)));
/// ```
pub fn start_cities(n: usize, cap: usize, seed: Option<u64>) -> Vec<usize> {
    match seed {
        Some(seed) if n > cap && cap > 0 => {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut starts = rand::seq::index::sample(&mut rng, n, cap).into_vec();
            starts.sort_unstable();
            starts
        }
        _ => (0..n).collect(),
    }
}

/// Solves the instance heuristically.
///
/// Never fails: with an expired deadline the result is the best
/// nearest-neighbor tour. The returned tour starts at city 0.
///
/// # Examples
///
/// ```
/// use u_tsp::config::SolverConfig;
/// use u_tsp::deadline::Deadline;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::evaluation::tour_distance;
/// use u_tsp::heuristic::multi_start;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]);
/// let out = multi_start(&dm, &SolverConfig::default(), &Deadline::none(), None);
/// assert_eq!(out.tour.cities()[0], 0);
/// assert!((tour_distance(out.tour.cities(), &dm) - 4.0).abs() < 1e-10);
/// ```
pub fn multi_start(
    distances: &DistanceMatrix,
    config: &SolverConfig,
    deadline: &Deadline,
    seed: Option<u64>,
) -> SolverOutput {
    let started = Instant::now();
    let starts = start_cities(distances.size(), config.max_start_cities, seed);

    let run = |&start: &usize| run_candidate(start, distances, config.max_two_opt_passes, deadline);
    let candidates: Vec<Candidate> = if config.parallel {
        starts.par_iter().map(run).collect()
    } else {
        starts.iter().map(run).collect()
    };

    let mut stats = SolveStats {
        candidates: candidates.len(),
        ..SolveStats::default()
    };
    let mut best: Option<Candidate> = None;
    for candidate in candidates {
        stats.improving_moves += candidate.moves;
        stats.deadline_reached |= candidate.deadline_reached;
        if best.as_ref().is_none_or(|b| candidate.distance < b.distance) {
            best = Some(candidate);
        }
    }
    stats.elapsed = started.elapsed();

    match best {
        Some(best) => {
            debug!(
                candidates = stats.candidates,
                best_start = best.start,
                construction = best.construction_distance,
                improved = best.distance,
                moves = stats.improving_moves,
                deadline_reached = stats.deadline_reached,
                "multi-start finished"
            );
            SolverOutput {
                tour: best.tour,
                stats,
            }
        }
        None => SolverOutput {
            tour: Tour::new(Vec::new()),
            stats,
        },
    }
}

fn run_candidate(
    start: usize,
    distances: &DistanceMatrix,
    max_passes: usize,
    deadline: &Deadline,
) -> Candidate {
    let initial = nearest_neighbor(start, distances);
    let construction_distance = tour_distance(initial.cities(), distances);
    let outcome = two_opt_improve(initial, distances, max_passes, deadline);

    let mut tour = outcome.tour;
    tour.rotate_to_start(0);
    let distance = tour_distance(tour.cities(), distances);

    Candidate {
        start,
        tour,
        distance,
        construction_distance,
        moves: outcome.moves,
        deadline_reached: outcome.deadline_reached,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn scattered() -> DistanceMatrix {
        DistanceMatrix::from_points(&[
            (5.0, 5.0),
            (0.0, 0.0),
            (10.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (3.0, 7.0),
            (8.0, 2.0),
            (6.0, 9.0),
            (1.0, 4.0),
            (9.0, 6.0),
        ])
    }

    #[test]
    fn test_start_cities_full_without_seed() {
        assert_eq!(start_cities(5, 2, None), vec![0, 1, 2, 3, 4]);
        assert_eq!(start_cities(3, 10, Some(1)), vec![0, 1, 2]);
    }

    #[test]
    fn test_start_cities_sampled() {
        let starts = start_cities(50, 10, Some(42));
        assert_eq!(starts.len(), 10);
        assert!(starts.windows(2).all(|w| w[0] < w[1]));
        assert!(starts.iter().all(|&s| s < 50));
        assert_eq!(starts, start_cities(50, 10, Some(42)));
    }

    #[test]
    fn test_valid_tour_starting_at_zero() {
        let dm = scattered();
        let out = multi_start(&dm, &SolverConfig::default(), &Deadline::none(), None);
        assert!(out.tour.is_permutation_of(10));
        assert_eq!(out.tour.cities()[0], 0);
        assert_eq!(out.stats.candidates, 10);
        assert!(!out.stats.deadline_reached);
    }

    #[test]
    fn test_not_worse_than_any_construction() {
        let dm = scattered();
        let out = multi_start(&dm, &SolverConfig::default(), &Deadline::none(), None);
        let best = tour_distance(out.tour.cities(), &dm);
        for start in 0..10 {
            let nn = nearest_neighbor(start, &dm);
            assert!(best <= tour_distance(nn.cities(), &dm) + 1e-10);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dm = scattered();
        let par = multi_start(&dm, &SolverConfig::default(), &Deadline::none(), None);
        let seq = multi_start(
            &dm,
            &SolverConfig::default().without_parallelism(),
            &Deadline::none(),
            None,
        );
        assert_eq!(par.tour, seq.tour);
        assert_eq!(par.stats.improving_moves, seq.stats.improving_moves);
    }

    #[test]
    fn test_expired_deadline_still_returns_tour() {
        let dm = scattered();
        let deadline = Deadline::after(Duration::ZERO);
        let out = multi_start(&dm, &SolverConfig::default(), &deadline, None);
        assert!(out.tour.is_permutation_of(10));
        assert!(out.stats.deadline_reached);
        assert_eq!(out.stats.improving_moves, 0);
    }

    fn random_instance(n: usize, seed: u64) -> DistanceMatrix {
        use rand::Rng;
        let mut rng = StdRng::seed_from_u64(seed);
        let points: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
            .collect();
        DistanceMatrix::from_points(&points)
    }

    fn best_construction(dm: &DistanceMatrix) -> f64 {
        (0..dm.size())
            .map(|start| tour_distance(nearest_neighbor(start, dm).cities(), dm))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn test_deadline_expiring_mid_search() {
        let dm = random_instance(200, 3);
        let deadline = Deadline::after(Duration::from_millis(1));
        let out = multi_start(&dm, &SolverConfig::default(), &deadline, None);
        assert!(out.tour.is_permutation_of(200));
        assert_eq!(out.tour.cities()[0], 0);
        assert!(out.stats.deadline_reached);
        assert_eq!(out.stats.candidates, 200);
        assert!(tour_distance(out.tour.cities(), &dm) <= best_construction(&dm) + 1e-9);
    }

    #[test]
    fn test_cancellation_mid_search() {
        use tokio_util::sync::CancellationToken;

        let dm = random_instance(200, 4);
        let token = CancellationToken::new();
        let deadline = Deadline::none().with_token(token.clone());
        let canceller = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(1));
            token.cancel();
        });
        let out = multi_start(&dm, &SolverConfig::default(), &deadline, None);
        canceller.join().expect("canceller thread");

        assert!(out.tour.is_permutation_of(200));
        assert!(out.stats.deadline_reached);
        assert!(tour_distance(out.tour.cities(), &dm) <= best_construction(&dm) + 1e-9);
    }

    #[test]
    fn test_sampled_starts_with_seed() {
        let dm = scattered();
        let config = SolverConfig::default().with_max_start_cities(3);
        let a = multi_start(&dm, &config, &Deadline::none(), Some(9));
        let b = multi_start(&dm, &config, &Deadline::none(), Some(9));
        assert_eq!(a.stats.candidates, 3);
        assert_eq!(a.tour, b.tour);
        assert!(a.tour.is_permutation_of(10));
    }
}
