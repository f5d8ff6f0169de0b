//! Local search operators for improving tours.
//!
//! - [`two_opt_improve`]: 2-opt segment reversal on a closed tour

mod two_opt;

pub use two_opt::{two_opt_delta, two_opt_improve, two_opt_pass, TwoOptOutcome};
