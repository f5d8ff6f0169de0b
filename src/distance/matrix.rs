//! Dense distance matrix.

/// A dense n×n distance matrix stored in row-major order.
///
/// Built either from explicit rows (the request path) or from planar points
/// (Euclidean distances, used for generated instances).
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.row(2).len(), dm.size());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// An all-zero matrix over `size` cities.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Euclidean distances between planar points. Both triangles receive the
    /// same value, so the result is exactly symmetric.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let mut dm = Self::new(points.len());
        for (i, &(xi, yi)) in points.iter().enumerate() {
            for (j, &(xj, yj)) in points.iter().enumerate().skip(i + 1) {
                let d = (xi - xj).hypot(yi - yj);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Flattens nested rows.
    ///
    /// Returns `None` unless every row has exactly `rows.len()` entries.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        let data = rows.iter().flatten().copied().collect();
        Some(Self { data, size })
    }

    /// Distance from city `from` to city `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Overwrites one directed entry.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of cities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distances out of city `from`, indexed by destination.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }
}
