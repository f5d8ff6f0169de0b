//! Exact solvers.
//!
//! - [`held_karp`]: Held-Karp subset DP, O(n² · 2ⁿ), provably optimal

mod held_karp;

pub use held_karp::{held_karp, table_bytes};
