//! Error types for the solving pipeline.
//!
//! Input errors are raised by the [`Validator`](crate::validation::Validator)
//! and are the caller's fault. [`SolveError::ResourceLimitExceeded`] and
//! [`SolveError::Internal`] are server-side conditions.

use thiserror::Error;

/// Errors raised while validating or solving a TSP instance.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// Fewer than two cities were supplied.
    #[error("at least 2 cities are required, got {count}")]
    TooFewCities {
        /// Number of cities supplied.
        count: usize,
    },
    /// More cities than the configured limit were supplied.
    #[error("at most {max} cities are supported, got {count}")]
    TooManyCities {
        /// Number of cities supplied.
        count: usize,
        /// Configured upper limit.
        max: usize,
    },
    /// A city name is empty or whitespace only.
    #[error("city {index} has an empty name")]
    EmptyCityName {
        /// Position of the offending city.
        index: usize,
    },
    /// Two cities share the same name.
    #[error("city name '{name}' appears more than once (positions {first} and {second})")]
    DuplicateCityName {
        /// The repeated name.
        name: String,
        /// First position holding the name.
        first: usize,
        /// Second position holding the name.
        second: usize,
    },
    /// The matrix is not `N×N` for `N` cities.
    #[error("distance matrix must be {expected}x{expected}: {detail}")]
    ShapeMismatch {
        /// Number of cities.
        expected: usize,
        /// What was wrong with the shape.
        detail: String,
    },
    /// A diagonal entry is not exactly zero.
    #[error("distance from city {index} to itself must be 0, got {value}")]
    InvalidDiagonal {
        /// Row/column of the diagonal entry.
        index: usize,
        /// Offending value.
        value: f64,
    },
    /// An off-diagonal entry is not a finite positive number.
    #[error("distance from city {from} to city {to} must be a finite positive number, got {value}")]
    InvalidDistance {
        /// Row index.
        from: usize,
        /// Column index.
        to: usize,
        /// Offending value.
        value: f64,
    },
    /// `matrix[i][j] != matrix[j][i]`.
    #[error("distance matrix is not symmetric: [{i}][{j}] = {forward} but [{j}][{i}] = {backward}")]
    AsymmetricMatrix {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
        /// `matrix[i][j]`.
        forward: f64,
        /// `matrix[j][i]`.
        backward: f64,
    },
    /// The exact solver's table would not fit in its memory budget.
    #[error("exact solver for {cities} cities needs {required} bytes, budget is {budget} bytes")]
    ResourceLimitExceeded {
        /// Instance size.
        cities: usize,
        /// Bytes the DP table would need (saturated on overflow).
        required: usize,
        /// Configured budget in bytes.
        budget: usize,
    },
    /// A solver produced an inconsistent result.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SolveError>;

impl SolveError {
    /// Creates an [`SolveError::Internal`] from any message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Machine-readable name of this error, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TooFewCities { .. } => "TooFewCities",
            Self::TooManyCities { .. } => "TooManyCities",
            Self::EmptyCityName { .. } => "EmptyCityName",
            Self::DuplicateCityName { .. } => "DuplicateCityName",
            Self::ShapeMismatch { .. } => "ShapeMismatch",
            Self::InvalidDiagonal { .. } => "InvalidDiagonal",
            Self::InvalidDistance { .. } => "InvalidDistance",
            Self::AsymmetricMatrix { .. } => "AsymmetricMatrix",
            Self::ResourceLimitExceeded { .. } => "ResourceLimitExceeded",
            Self::Internal(_) => "Internal",
        }
    }

    /// Returns `true` if the error was caused by the request contents.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            Self::ResourceLimitExceeded { .. } | Self::Internal(_)
        )
    }
}
