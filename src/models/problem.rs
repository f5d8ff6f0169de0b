//! Validated problem instance.

use crate::distance::DistanceMatrix;

/// A TSP instance that passed validation.
///
/// Only the [`Validator`](crate::validation::Validator) builds one, so every
/// `Problem` holds at least two uniquely named cities and a square, symmetric
/// matrix with a zero diagonal and positive finite off-diagonal entries.
///
/// # Examples
///
/// ```
/// use u_tsp::validation::Validator;
///
/// let problem = Validator::new()
///     .validate(
///         vec!["A".into(), "B".into()],
///         &[vec![0.0, 4.0], vec![4.0, 0.0]],
///     )
///     .expect("valid");
/// assert_eq!(problem.num_cities(), 2);
/// assert_eq!(problem.city_name(1), "B");
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    cities: Vec<String>,
    distances: DistanceMatrix,
}

impl Problem {
    pub(crate) fn new(cities: Vec<String>, distances: DistanceMatrix) -> Self {
        Self { cities, distances }
    }

    /// Name of city `index`.
    pub fn city_name(&self, index: usize) -> &str {
        &self.cities[index]
    }

    /// The accepted distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Number of cities.
    pub fn num_cities(&self) -> usize {
        self.cities.len()
    }
}
