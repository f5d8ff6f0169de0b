//! Request validation.
//!
//! - [`Validator`]: Turns raw city names and matrix rows into a [`Problem`](crate::models::Problem)

mod validator;

pub use validator::Validator;
