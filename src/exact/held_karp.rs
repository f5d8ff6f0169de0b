//! Held-Karp dynamic programming for exact TSP.
//!
//! # Algorithm
//!
//! City 0 is fixed as the origin. For every subset `S` of `{1, …, n-1}` and
//! every `j ∈ S`, `cost(S, j)` is the length of the shortest path that starts
//! at city 0, visits exactly the cities of `S`, and ends at `j`:
//!
//! ```text
//! cost({j}, j) = d(0, j)
//! cost(S, j)   = min over k ∈ S\{j} of cost(S\{j}, k) + d(k, j)
//! optimum      = min over j of cost(Full, j) + d(j, 0)
//! ```
//!
//! Subsets are bitmasks (bit `c-1` for city `c`). Because `S\{j}` is
//! numerically smaller than `S`, one ascending sweep over the masks fills the
//! table. Ties go to the smallest predecessor `k` and the smallest final `j`.
//!
//! # Complexity
//!
//! O(n² · 2ⁿ) time, O(n · 2ⁿ) memory. The table is a flat arena indexed by
//! `mask * (n-1) + (j-1)`.
//!
//! # Reference
//!
//! Held, M. & Karp, R.M. (1962). "A dynamic programming approach to sequencing
//! problems", *Journal of SIAM* 10(1), 196-210.

use std::mem::size_of;
use std::time::Instant;

use tracing::debug;

use crate::distance::DistanceMatrix;
use crate::error::{Result, SolveError};
use crate::models::{SolveStats, SolverOutput, Tour};

/// Parent pointer type. Instances large enough to overflow it cannot fit in
/// any memory budget.
type Parent = u8;

/// Marks a base state `({j}, j)` whose predecessor is the origin.
const NO_PARENT: Parent = Parent::MAX;

/// Bytes needed by the DP table for `n` cities.
///
/// Returns `None` if the size overflows `usize` or `n - 1` exceeds the mask
/// width.
///
/// # Examples
///
/// ```
/// use u_tsp::exact::table_bytes;
///
/// // 2^3 masks × 3 end cities × (8-byte cost + 1-byte parent)
/// assert_eq!(table_bytes(4), Some(8 * 3 * 9));
/// assert_eq!(table_bytes(200), None);
/// ```
pub fn table_bytes(n: usize) -> Option<usize> {
    if n < 2 {
        return Some(0);
    }
    let m = n - 1;
    if m >= Parent::MAX as usize {
        return None;
    }
    let masks = 1usize.checked_shl(u32::try_from(m).ok()?)?;
    masks
        .checked_mul(m)?
        .checked_mul(size_of::<f64>() + size_of::<Parent>())
}

/// Solves the instance exactly with Held-Karp.
///
/// Fails with [`SolveError::ResourceLimitExceeded`] before allocating anything
/// if the table would exceed `memory_budget` bytes or its size overflows `usize`.
/// Two-city instances are answered directly.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::exact::held_karp;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 10.0, 15.0, 20.0],
///     vec![10.0, 0.0, 35.0, 25.0],
///     vec![15.0, 35.0, 0.0, 30.0],
///     vec![20.0, 25.0, 30.0, 0.0],
/// ])
/// .expect("square");
/// let output = held_karp(&dm, 1 << 20).expect("fits");
/// assert_eq!(output.tour.cities(), &[0, 2, 3, 1]);
/// ```
pub fn held_karp(distances: &DistanceMatrix, memory_budget: usize) -> Result<SolverOutput> {
    let started = Instant::now();
    let n = distances.size();

    if n <= 2 {
        return Ok(SolverOutput {
            tour: Tour::new((0..n).collect()),
            stats: SolveStats {
                elapsed: started.elapsed(),
                candidates: 1,
                ..SolveStats::default()
            },
        });
    }

    let required = match table_bytes(n) {
        Some(bytes) if bytes <= memory_budget => bytes,
        required => {
            return Err(SolveError::ResourceLimitExceeded {
                cities: n,
                required: required.unwrap_or(usize::MAX),
                budget: memory_budget,
            });
        }
    };

    let m = n - 1;
    let full = (1usize << m) - 1;
    let states = (full + 1) * m;
    debug!(cities = n, states, bytes = required, "held-karp table");

    let mut cost = vec![f64::INFINITY; states];
    let mut parent = vec![NO_PARENT; states];

    for mask in 1..=full {
        for j in 1..n {
            let bit_j = 1usize << (j - 1);
            if mask & bit_j == 0 {
                continue;
            }
            let idx = mask * m + (j - 1);
            let prev = mask ^ bit_j;

            if prev == 0 {
                cost[idx] = distances.get(0, j);
                continue;
            }

            let mut best = f64::INFINITY;
            let mut best_k = NO_PARENT;
            for k in 1..n {
                if prev & (1usize << (k - 1)) == 0 {
                    continue;
                }
                let cand = cost[prev * m + (k - 1)] + distances.get(k, j);
                if cand < best {
                    best = cand;
                    best_k = k as Parent;
                }
            }
            cost[idx] = best;
            parent[idx] = best_k;
        }
    }

    let mut best_total = f64::INFINITY;
    let mut last = 0;
    for j in 1..n {
        let total = cost[full * m + (j - 1)] + distances.get(j, 0);
        if total < best_total {
            best_total = total;
            last = j;
        }
    }
    if last == 0 {
        return Err(SolveError::internal("held-karp found no finite tour"));
    }

    let mut path = Vec::with_capacity(n);
    let mut mask = full;
    let mut j = last;
    loop {
        path.push(j);
        let p = parent[mask * m + (j - 1)];
        mask ^= 1usize << (j - 1);
        if p == NO_PARENT {
            break;
        }
        j = p as usize;
    }
    if mask != 0 {
        return Err(SolveError::internal(format!(
            "held-karp reconstruction left cities unvisited (mask {mask:#b})"
        )));
    }
    path.push(0);
    path.reverse();

    debug!(cities = n, cost = best_total, "held-karp optimum");

    Ok(SolverOutput {
        tour: Tour::new(path),
        stats: SolveStats {
            elapsed: started.elapsed(),
            candidates: 1,
            ..SolveStats::default()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::tour_distance;

    fn four_cities() -> DistanceMatrix {
        DistanceMatrix::from_rows(&[
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ])
        .expect("square")
    }

    #[test]
    fn test_two_cities_short_circuit() {
        let dm = DistanceMatrix::from_rows(&[vec![0.0, 7.0], vec![7.0, 0.0]]).expect("square");
        let out = held_karp(&dm, 0).expect("no table needed");
        assert_eq!(out.tour.cities(), &[0, 1]);
        assert_eq!(tour_distance(out.tour.cities(), &dm), 14.0);
    }

    #[test]
    fn test_triangle() {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 10.0, 15.0],
            vec![10.0, 0.0, 20.0],
            vec![15.0, 20.0, 0.0],
        ])
        .expect("square");
        let out = held_karp(&dm, 1 << 20).expect("fits");
        assert_eq!(tour_distance(out.tour.cities(), &dm), 45.0);
        // Both directions tie; the smallest final city wins.
        assert_eq!(out.tour.cities(), &[0, 2, 1]);
    }

    #[test]
    fn test_four_cities_optimum_and_tie_break() {
        let dm = four_cities();
        let out = held_karp(&dm, 1 << 20).expect("fits");
        // 0-1-3-2 and its reverse 0-2-3-1 both cost 80; the reverse ends at 1.
        assert_eq!(out.tour.cities(), &[0, 2, 3, 1]);
        assert_eq!(tour_distance(out.tour.cities(), &dm), 80.0);
        assert_eq!(out.stats.candidates, 1);
    }

    #[test]
    fn test_square_points() {
        let dm = DistanceMatrix::from_points(&[
            (0.0, 0.0),
            (1.0, 1.0),
            (1.0, 0.0),
            (0.0, 1.0),
        ]);
        let out = held_karp(&dm, 1 << 20).expect("fits");
        assert!(out.tour.is_permutation_of(4));
        assert!((tour_distance(out.tour.cities(), &dm) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_memory_budget_enforced() {
        let dm = DistanceMatrix::from_points(&[(0.0, 0.0); 10]);
        let needed = table_bytes(10).expect("small");
        let err = held_karp(&dm, needed - 1).unwrap_err();
        assert_eq!(
            err,
            SolveError::ResourceLimitExceeded {
                cities: 10,
                required: needed,
                budget: needed - 1
            }
        );
        assert!(held_karp(&dm, needed).is_ok());
    }

    #[test]
    fn test_unrepresentable_table_rejected_under_any_budget() {
        let points: Vec<(f64, f64)> = (0..70).map(|i| (f64::from(i), 0.0)).collect();
        let dm = DistanceMatrix::from_points(&points);
        let err = held_karp(&dm, usize::MAX).unwrap_err();
        assert_eq!(
            err,
            SolveError::ResourceLimitExceeded {
                cities: 70,
                required: usize::MAX,
                budget: usize::MAX
            }
        );
    }

    #[test]
    fn test_table_bytes_overflow() {
        assert_eq!(table_bytes(0), Some(0));
        assert_eq!(table_bytes(2), Some(2 * 9));
        assert_eq!(table_bytes(70), None);
    }

    #[test]
    fn test_deterministic() {
        let dm = DistanceMatrix::from_points(&[
            (0.0, 0.0),
            (4.0, 1.0),
            (2.0, 5.0),
            (7.0, 3.0),
            (1.0, 8.0),
            (6.0, 6.0),
            (3.0, 2.0),
        ]);
        let a = held_karp(&dm, 1 << 24).expect("fits");
        let b = held_karp(&dm, 1 << 24).expect("fits");
        assert_eq!(a.tour, b.tour);
    }
}
