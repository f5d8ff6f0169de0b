//! Tour type.

use serde::{Deserialize, Serialize};

/// Visiting order of a Hamiltonian cycle, as city indices.
///
/// The return edge from the last city to the first is implied, not stored.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Tour;
///
/// let mut tour = Tour::new(vec![2, 0, 1]);
/// assert!(tour.is_permutation_of(3));
/// tour.rotate_to_start(0);
/// assert_eq!(tour.cities(), &[0, 1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Wraps a visiting order.
    pub fn new(cities: Vec<usize>) -> Self {
        Self(cities)
    }

    /// City indices in visiting order.
    pub fn cities(&self) -> &[usize] {
        &self.0
    }

    /// Mutable access for in-place improvement.
    pub fn cities_mut(&mut self) -> &mut [usize] {
        &mut self.0
    }

    /// Returns `true` if this tour visits each of `0..n` exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.0.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &c in &self.0 {
            if c >= n || seen[c] {
                return false;
            }
            seen[c] = true;
        }
        true
    }

    /// Rotates the cycle so that `city` comes first. Cost is unchanged.
    ///
    /// Does nothing if `city` is not in the tour.
    pub fn rotate_to_start(&mut self, city: usize) {
        if let Some(pos) = self.0.iter().position(|&c| c == city) {
            self.0.rotate_left(pos);
        }
    }
}
