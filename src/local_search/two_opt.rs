//! 2-opt improvement on a closed tour.
//!
//! # Algorithm
//!
//! For each pair of tour positions `i < j`, consider the edges
//! `(t[i], t[i+1])` and `(t[j], t[j+1])` (with `t[n]` = `t[0]`) and compute
//! the change in length from reversing the segment between them:
//!
//! ```text
//! delta = d(t[i], t[j]) + d(t[i+1], t[j+1]) - d(t[i], t[i+1]) - d(t[j], t[j+1])
//! ```
//!
//! If delta < 0, reverse the segment `[i+1..=j]` and keep scanning from the
//! next pair (first-improvement strategy). A pass is one full lexicographic
//! scan; passes repeat until one applies no move.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::deadline::Deadline;
use crate::distance::DistanceMatrix;
use crate::evaluation::tour_distance;
use crate::models::Tour;

/// Moves must shorten the tour by more than this to be accepted.
const IMPROVEMENT_EPS: f64 = 1e-10;

/// Result of running 2-opt on one tour.
#[derive(Debug, Clone)]
pub struct TwoOptOutcome {
    /// Improved tour.
    pub tour: Tour,
    /// Length of the improved tour, re-summed from the matrix.
    pub distance: f64,
    /// Passes started.
    pub passes: usize,
    /// Moves accepted.
    pub moves: usize,
    /// `true` if the last pass found no improving move.
    pub converged: bool,
    /// `true` if the deadline stopped the search.
    pub deadline_reached: bool,
}

/// Applies 2-opt improvement to a closed tour.
///
/// Runs full passes until a pass applies no move, `max_passes` passes have
/// run, or `deadline` expires. The deadline is checked before each pass and
/// never inside one, so the returned tour is always a complete permutation.
///
/// # Arguments
///
/// * `tour`: Initial visiting order
/// * `distances`: Symmetric distance matrix
/// * `max_passes`: Cap on full passes
/// * `deadline`: When to stop early and return the best tour so far
///
/// # Examples
///
/// ```
/// use u_tsp::deadline::Deadline;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::two_opt_improve;
/// use u_tsp::models::Tour;
///
/// // Unit square, visited in a crossing order
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let outcome = two_opt_improve(Tour::new(vec![0, 2, 1, 3]), &dm, 100, &Deadline::none());
/// assert!((outcome.distance - 4.0).abs() < 1e-10);
/// assert!(outcome.converged);
/// ```
pub fn two_opt_improve(
    mut tour: Tour,
    distances: &DistanceMatrix,
    max_passes: usize,
    deadline: &Deadline,
) -> TwoOptOutcome {
    let mut current_cost = tour_distance(tour.cities(), distances);
    let mut passes = 0;
    let mut moves = 0;
    let mut converged = false;
    let mut deadline_reached = false;

    if tour.cities().len() < 4 {
        // No pair of non-adjacent edges exists.
        converged = true;
    }

    while !converged && passes < max_passes {
        if deadline.is_expired() {
            deadline_reached = true;
            break;
        }
        passes += 1;
        let (pass_moves, pass_delta) = two_opt_pass(tour.cities_mut(), distances);
        moves += pass_moves;
        current_cost += pass_delta;
        converged = pass_moves == 0;
    }

    let distance = tour_distance(tour.cities(), distances);
    debug_assert!(
        (distance - current_cost).abs() <= 1e-6 * distance.max(1.0),
        "2-opt running cost {current_cost} drifted from re-summed {distance}"
    );

    TwoOptOutcome {
        tour,
        distance,
        passes,
        moves,
        converged,
        deadline_reached,
    }
}

/// Runs one lexicographic 2-opt pass in place.
///
/// Returns the number of accepted moves and the summed length change, which
/// is strictly negative whenever a move was accepted.
pub fn two_opt_pass(tour: &mut [usize], distances: &DistanceMatrix) -> (usize, f64) {
    let n = tour.len();
    if n < 4 {
        return (0, 0.0);
    }

    let mut moves = 0;
    let mut total_delta = 0.0;

    for i in 0..n - 1 {
        for j in i + 2..n {
            // Edges (t[0], t[1]) and (t[n-1], t[0]) share city t[0].
            if i == 0 && j == n - 1 {
                continue;
            }
            let delta = two_opt_delta(tour, distances, i, j);
            if delta < -IMPROVEMENT_EPS {
                tour[i + 1..=j].reverse();
                total_delta += delta;
                moves += 1;
            }
        }
    }

    (moves, total_delta)
}

/// Computes the length change from reversing positions `i+1..=j`.
///
/// Before: ... - t[i] - t[i+1] - ... - t[j] - t[j+1] - ...
/// After:  ... - t[i] - t[j] - ... - t[i+1] - t[j+1] - ...
#[inline]
pub fn two_opt_delta(tour: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let n = tour.len();
    let a = tour[i];
    let b = tour[i + 1];
    let c = tour[j];
    let d = tour[(j + 1) % n];

    let old_cost = distances.get(a, b) + distances.get(c, d);
    let new_cost = distances.get(a, c) + distances.get(b, d);

    new_cost - old_cost
}
