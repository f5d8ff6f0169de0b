//! Tour evaluation and result assembly.

mod assembler;
mod evaluator;

pub use assembler::ResultAssembler;
pub use evaluator::{tour_distance, TourEvaluator};
