//! # u-tsp
//!
//! Traveling salesperson solving engine. Small instances are solved to
//! optimality with Held-Karp dynamic programming; larger ones run
//! nearest-neighbor construction from many start cities, each improved
//! by 2-opt.
//!
//! ## Modules
//!
//! - [`validation`]: Input checks producing a [`models::Problem`]
//! - [`distance`]: Dense distance matrix
//! - [`dispatch`]: Exact vs. heuristic routing by size and time budget
//! - [`exact`]: Held-Karp
//! - [`constructive`]: Nearest neighbor
//! - [`local_search`]: 2-opt
//! - [`heuristic`]: Multi-start driver
//! - [`evaluation`]: Tour cost and result assembly
//! - [`engine`]: The full solving pipeline
//! - [`server`]: HTTP service

pub mod config;
pub mod constructive;
pub mod deadline;
pub mod dispatch;
pub mod distance;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod exact;
pub mod heuristic;
pub mod local_search;
pub mod models;
pub mod server;
pub mod validation;

pub use config::SolverConfig;
pub use deadline::Deadline;
pub use engine::TspEngine;
pub use error::{Result, SolveError};
pub use models::{Algorithm, SolveResult, Tour};
