//! Nearest-neighbor constructive heuristic.
//!
//! Builds a tour greedily: starting from a given city, always visit the
//! nearest unvisited city, then close the cycle back to the start.
//!
//! # Complexity
//!
//! O(n²) where n = number of cities.
//!
//! # Reference
//!
//! This is the simplest constructive heuristic for TSP. While tour quality is
//! typically 15-25% above optimal, it provides a fast baseline for 2-opt.

use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// Constructs a tour using the nearest-neighbor heuristic.
///
/// Ties between equally near cities go to the lowest index, so the result is
/// fully determined by `start` and the matrix.
///
/// # Arguments
///
/// * `start`: City the tour begins at
/// * `distances`: Distance matrix
///
/// # Panics
///
/// Panics if `start` is out of bounds for a non-empty matrix.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::constructive::nearest_neighbor;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
/// let tour = nearest_neighbor(0, &dm);
/// assert_eq!(tour.cities(), &[0, 2, 3, 1]);
/// ```
pub fn nearest_neighbor(start: usize, distances: &DistanceMatrix) -> Tour {
    let n = distances.size();
    if n == 0 {
        return Tour::new(Vec::new());
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let mut current = start;
    visited[current] = true;
    order.push(current);

    for _ in 1..n {
        let row = distances.row(current);
        let mut best: Option<(usize, f64)> = None;
        for (j, &d) in row.iter().enumerate() {
            if visited[j] {
                continue;
            }
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((j, d));
            }
        }

        // Every remaining city is unvisited, so `best` is always set here.
        let Some((next, _)) = best else { break };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    Tour::new(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::tour_distance;

    fn line() -> DistanceMatrix {
        DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)])
    }

    #[test]
    fn test_nn_visits_in_order_on_a_line() {
        let dm = line();
        let tour = nearest_neighbor(0, &dm);
        assert_eq!(tour.cities(), &[0, 1, 2, 3]);
        // 1 + 1 + 1 + 3
        assert!((tour_distance(tour.cities(), &dm) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_nn_from_middle() {
        let dm = line();
        // From 2: 1 and 3 both at distance 1, lowest index wins
        let tour = nearest_neighbor(2, &dm);
        assert_eq!(tour.cities(), &[2, 1, 0, 3]);
    }

    #[test]
    fn test_nn_chooses_nearest() {
        let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (10.0, 0.0), (1.0, 0.0)]);
        let tour = nearest_neighbor(0, &dm);
        assert_eq!(tour.cities(), &[0, 2, 1]);
    }

    #[test]
    fn test_nn_is_permutation() {
        let dm = DistanceMatrix::from_points(&[
            (5.0, 5.0),
            (0.0, 0.0),
            (10.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
        ]);
        for start in 0..5 {
            let tour = nearest_neighbor(start, &dm);
            assert!(tour.is_permutation_of(5));
            assert_eq!(tour.cities()[0], start);
        }
    }

    #[test]
    fn test_nn_empty_and_single() {
        assert!(nearest_neighbor(0, &DistanceMatrix::new(0)).cities().is_empty());
        assert_eq!(nearest_neighbor(0, &DistanceMatrix::new(1)).cities(), &[0]);
    }
}
