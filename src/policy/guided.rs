//! Guided local search.
//!
//! # Algorithm
//!
//! Runs plain descent on an augmented objective. Each undirected edge
//! carries an integer penalty, and move evaluation sees
//!
//! ```text
//! cost(i, j) = d(i, j) + lambda * penalty(i, j)
//! ```
//!
//! At every local optimum the tour edges maximizing the utility
//! `d(e) / (1 + penalty(e))` get their penalty incremented, which lifts
//! the augmented cost of the features the optimum relies on and lets
//! descent move again. `lambda` is derived once, at the first optimum,
//! as `alpha * tour_length / n`.
//!
//! True tour lengths stay untouched: the augmentation only shapes which
//! moves look improving, and the engine tracks the best real tour
//! separately.
//!
//! # Reference
//!
//! Voudouris, C., & Tsang, E. (1999). Guided local search and its
//! application to the traveling salesman problem. European Journal of
//! Operational Research 113(2), 469-499.

use std::collections::HashMap;

use crate::distance::DistanceProvider;
use crate::local_search::{Move, EPS};
use crate::model::Tour;
use crate::policy::{edge_key, AcceptancePolicy, PolicyDirective, PolicyKind};

/// Descent over penalty-augmented edge costs.
///
/// Never converges on its own; the search runs until the time budget
/// expires (degenerate zero-length instances excepted). Penalties live
/// for a single solve.
#[derive(Debug)]
pub struct GuidedLocalSearch {
    alpha: f64,
    lambda: f64,
    penalties: HashMap<(usize, usize), u32>,
}

impl GuidedLocalSearch {
    /// Creates the policy with the given `lambda` scaling factor
    /// (`alpha` in the literature, typically 0.1 to 0.5).
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            lambda: 0.0,
            penalties: HashMap::new(),
        }
    }

    fn penalty(&self, i: usize, j: usize) -> u32 {
        self.penalties.get(&edge_key(i, j)).copied().unwrap_or(0)
    }
}

impl AcceptancePolicy for GuidedLocalSearch {
    fn kind(&self) -> PolicyKind {
        PolicyKind::GuidedLocalSearch
    }

    fn edge_cost(&self, i: usize, j: usize, base: f64) -> f64 {
        base + self.lambda * f64::from(self.penalty(i, j))
    }

    fn accept(&mut self, augmented_gain: f64, _real_gain: f64, _mv: &Move) -> bool {
        augmented_gain > EPS
    }

    fn on_local_optimum(&mut self, tour: &Tour, provider: &DistanceProvider) -> PolicyDirective {
        let n = tour.len();
        let length = provider.tour_length(tour.order());
        if length <= EPS {
            // All cities coincide; there is nothing to guide.
            return PolicyDirective::Stop;
        }
        if self.lambda == 0.0 {
            self.lambda = self.alpha * length / n as f64;
            log::debug!("gls: lambda = {:.4} (length {length:.1})", self.lambda);
        }

        // Penalize every tour edge of maximal utility.
        let mut max_utility = f64::NEG_INFINITY;
        for p in 0..n {
            let u = tour.city_at(p);
            let v = tour.city_at((p + 1) % n);
            let utility = provider.distance(u, v) / f64::from(1 + self.penalty(u, v));
            if utility > max_utility {
                max_utility = utility;
            }
        }
        for p in 0..n {
            let u = tour.city_at(p);
            let v = tour.city_at((p + 1) % n);
            let utility = provider.distance(u, v) / f64::from(1 + self.penalty(u, v));
            if utility >= max_utility - EPS {
                *self.penalties.entry(edge_key(u, v)).or_insert(0) += 1;
            }
        }

        PolicyDirective::Continue
    }
}
