//! Input validator.

use std::collections::HashMap;

use crate::distance::DistanceMatrix;
use crate::error::{Result, SolveError};
use crate::models::Problem;

/// Checks the structural and numeric well-formedness of a request.
///
/// Checks run in a fixed order and the first failure is returned:
///
/// 1. at least two cities (and at most `max_cities`, when set)
/// 2. every name non-blank, no name repeated
/// 3. matrix is `N×N`
/// 4. diagonal entries are exactly zero
/// 5. off-diagonal entries are finite and strictly positive
/// 6. matrix is exactly symmetric
///
/// # Examples
///
/// ```
/// use u_tsp::validation::Validator;
///
/// let err = Validator::new()
///     .validate(
///         vec!["A".into(), "B".into()],
///         &[vec![0.0, 1.0], vec![2.0, 0.0]],
///     )
///     .unwrap_err();
/// assert_eq!(err.kind(), "AsymmetricMatrix");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    max_cities: Option<usize>,
}

impl Validator {
    /// Creates a validator with no upper limit on instance size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects instances with more than `max` cities.
    pub fn with_max_cities(mut self, max: Option<usize>) -> Self {
        self.max_cities = max;
        self
    }

    /// Validates `cities` against `rows` and returns the accepted problem.
    pub fn validate(&self, cities: Vec<String>, rows: &[Vec<f64>]) -> Result<Problem> {
        let n = cities.len();
        if n < 2 {
            return Err(SolveError::TooFewCities { count: n });
        }
        if let Some(max) = self.max_cities {
            if n > max {
                return Err(SolveError::TooManyCities { count: n, max });
            }
        }
        check_names(&cities)?;
        let distances = check_shape(n, rows)?;
        check_diagonal(&distances)?;
        check_off_diagonal(&distances)?;
        check_symmetry(&distances)?;
        Ok(Problem::new(cities, distances))
    }
}

fn check_names(cities: &[String]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(cities.len());
    for (index, name) in cities.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(SolveError::EmptyCityName { index });
        }
        if let Some(&first) = seen.get(name.as_str()) {
            return Err(SolveError::DuplicateCityName {
                name: name.clone(),
                first,
                second: index,
            });
        }
        seen.insert(name.as_str(), index);
    }
    Ok(())
}

fn check_shape(n: usize, rows: &[Vec<f64>]) -> Result<DistanceMatrix> {
    if rows.len() != n {
        return Err(SolveError::ShapeMismatch {
            expected: n,
            detail: format!("got {} rows", rows.len()),
        });
    }
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
        return Err(SolveError::ShapeMismatch {
            expected: n,
            detail: format!("row {i} has {} entries", row.len()),
        });
    }
    DistanceMatrix::from_rows(rows).ok_or_else(|| SolveError::ShapeMismatch {
        expected: n,
        detail: "matrix is not square".to_string(),
    })
}

fn check_diagonal(dm: &DistanceMatrix) -> Result<()> {
    for index in 0..dm.size() {
        let value = dm.get(index, index);
        if value != 0.0 {
            return Err(SolveError::InvalidDiagonal { index, value });
        }
    }
    Ok(())
}

fn check_off_diagonal(dm: &DistanceMatrix) -> Result<()> {
    for from in 0..dm.size() {
        for (to, &value) in dm.row(from).iter().enumerate() {
            if from != to && !(value.is_finite() && value > 0.0) {
                return Err(SolveError::InvalidDistance { from, to, value });
            }
        }
    }
    Ok(())
}

fn check_symmetry(dm: &DistanceMatrix) -> Result<()> {
    for i in 0..dm.size() {
        for j in (i + 1)..dm.size() {
            let (forward, backward) = (dm.get(i, j), dm.get(j, i));
            if forward != backward {
                return Err(SolveError::AsymmetricMatrix {
                    i,
                    j,
                    forward,
                    backward,
                });
            }
        }
    }
    Ok(())
}
