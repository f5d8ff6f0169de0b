//! Tour evaluator that computes cycle length and checks tour validity.

use crate::distance::DistanceMatrix;
use crate::error::{Result, SolveError};

/// Evaluates tours against a distance matrix.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::evaluation::TourEvaluator;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
/// let evaluator = TourEvaluator::new(&dm);
/// // 3 + 4 + 5
/// assert!((evaluator.tour_distance(&[0, 1, 2]) - 12.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TourEvaluator<'a> {
    distances: &'a DistanceMatrix,
}

impl<'a> TourEvaluator<'a> {
    /// Creates a new evaluator for the given matrix.
    pub fn new(distances: &'a DistanceMatrix) -> Self {
        Self { distances }
    }

    /// Length of the closed cycle `tour[0] → … → tour[n-1] → tour[0]`.
    ///
    /// Summed from scratch in visiting order, so the result is reproducible
    /// bit for bit.
    pub fn tour_distance(&self, tour: &[usize]) -> f64 {
        tour_distance(tour, self.distances)
    }

    /// Checks that `tour` is a permutation of every city, then returns its
    /// length.
    pub fn checked_distance(&self, tour: &[usize]) -> Result<f64> {
        let n = self.distances.size();
        if tour.len() != n {
            return Err(SolveError::internal(format!(
                "tour visits {} cities, expected {n}",
                tour.len()
            )));
        }
        let mut seen = vec![false; n];
        for &city in tour {
            if city >= n {
                return Err(SolveError::internal(format!(
                    "tour contains out-of-range city {city}"
                )));
            }
            if seen[city] {
                return Err(SolveError::internal(format!(
                    "tour visits city {city} twice"
                )));
            }
            seen[city] = true;
        }
        let total = self.tour_distance(tour);
        if !total.is_finite() {
            return Err(SolveError::internal("tour length is not finite"));
        }
        Ok(total)
    }
}

/// Computes the total distance of a closed tour.
pub fn tour_distance(tour: &[usize], distances: &DistanceMatrix) -> f64 {
    if tour.len() < 2 {
        return 0.0;
    }
    let mut dist = 0.0;
    for w in tour.windows(2) {
        dist += distances.get(w[0], w[1]);
    }
    dist += distances.get(tour[tour.len() - 1], tour[0]);
    dist
}
