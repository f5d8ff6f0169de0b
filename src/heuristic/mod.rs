//! Heuristic solvers for instances too large to solve exactly.
//!
//! - [`multi_start`]: Nearest neighbor from many starts, each improved by 2-opt

mod multi_start;

pub use multi_start::{multi_start, start_cities};
