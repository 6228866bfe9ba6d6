//! Pairwise distance computation with optional matrix precomputation.

use serde::{Deserialize, Serialize};

use crate::model::Point;

/// How pairwise Euclidean distances are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CostModel {
    /// Each distance is rounded to the nearest integer, the TSPLIB
    /// convention. This is the default: integer costs make reported tour
    /// lengths comparable across solvers.
    #[default]
    RoundedEuclidean,
    /// Raw `f64` distances.
    Euclidean,
}

/// Symmetric city-to-city distances under a [`CostModel`].
///
/// Below the matrix threshold the full n×n matrix is precomputed once and
/// queries are O(1) lookups; above it (or when the allocation fails)
/// distances are computed on demand from the coordinates, keeping memory
/// at O(n). Both paths return identical values.
///
/// # Examples
///
/// ```
/// use tourkit::distance::{CostModel, DistanceProvider};
/// use tourkit::model::Point;
///
/// let points = vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
/// let provider = DistanceProvider::new(points, CostModel::RoundedEuclidean, 2000);
/// assert_eq!(provider.distance(0, 1), 5.0);
/// assert_eq!(provider.distance(1, 0), 5.0);
/// assert_eq!(provider.distance(0, 0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceProvider {
    points: Vec<Point>,
    cost_model: CostModel,
    matrix: Option<Vec<f64>>,
}

impl DistanceProvider {
    /// Creates a provider over the given points.
    ///
    /// The full matrix is precomputed when `points.len() <
    /// matrix_threshold`. If that allocation fails the provider logs a
    /// warning and serves distances on demand instead.
    pub fn new(points: Vec<Point>, cost_model: CostModel, matrix_threshold: usize) -> Self {
        let n = points.len();
        let matrix = if n < matrix_threshold {
            let built = build_matrix(&points, cost_model);
            if built.is_none() {
                log::warn!(
                    "distance matrix allocation failed for {n} cities; \
                     computing distances on demand"
                );
            }
            built
        } else {
            None
        };
        Self {
            points,
            cost_model,
            matrix,
        }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the provider holds no cities.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The city coordinates, indexed by city.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The active cost model.
    pub fn cost_model(&self) -> CostModel {
        self.cost_model
    }

    /// Returns `true` if queries are served from a precomputed matrix.
    pub fn has_matrix(&self) -> bool {
        self.matrix.is_some()
    }

    /// Distance from city `from` to city `to`.
    ///
    /// Symmetric, and `0.0` when `from == to`. Two distinct cities at
    /// identical coordinates also yield `0.0`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        match &self.matrix {
            Some(data) => data[from * self.points.len() + to],
            None => pair_cost(&self.points[from], &self.points[to], self.cost_model),
        }
    }

    /// Returns the nearest candidate to `from`, ties broken by the lower
    /// city index.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest_among(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates.iter().copied().min_by(|&a, &b| {
            self.distance(from, a)
                .partial_cmp(&self.distance(from, b))
                .expect("distance should not be NaN")
                .then(a.cmp(&b))
        })
    }

    /// Total length of the closed tour visiting `order`, including the
    /// edge from the last city back to the first.
    ///
    /// Orders with fewer than two cities have length `0.0`.
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        for w in order.windows(2) {
            total += self.distance(w[0], w[1]);
        }
        total + self.distance(order[order.len() - 1], order[0])
    }
}

fn pair_cost(a: &Point, b: &Point, cost_model: CostModel) -> f64 {
    let d = a.distance_to(b);
    match cost_model {
        CostModel::RoundedEuclidean => d.round(),
        CostModel::Euclidean => d,
    }
}

fn build_matrix(points: &[Point], cost_model: CostModel) -> Option<Vec<f64>> {
    let n = points.len();
    let len = n.checked_mul(n)?;
    let mut data: Vec<f64> = Vec::new();
    data.try_reserve_exact(len).ok()?;
    data.resize(len, 0.0);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = pair_cost(&points[i], &points[j], cost_model);
            data[i * n + j] = d;
            data[j * n + i] = d;
        }
    }
    Some(data)
}
