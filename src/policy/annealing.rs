//! Simulated annealing acceptance.
//!
//! # Algorithm
//!
//! Improving moves are always taken. A worsening move with gain `g < 0`
//! is taken with the Metropolis probability `exp(g / T)`, and the
//! temperature `T` cools geometrically as moves are applied. Sideways
//! moves (zero gain) are rejected so the scan cannot cycle through
//! equal-length tours.
//!
//! Acceptance draws come from a seeded generator, so runs are
//! reproducible for a fixed seed.
//!
//! # Reference
//!
//! Kirkpatrick, S., Gelatt, C. D., & Vecchi, M. P. (1983). Optimization
//! by simulated annealing. Science 220(4598), 671-680.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distance::DistanceProvider;
use crate::local_search::{Move, EPS};
use crate::model::Tour;
use crate::policy::{AcceptancePolicy, PolicyDirective, PolicyKind};

/// Metropolis acceptance over the candidate scan, with geometric
/// cooling.
///
/// The temperature also ticks down once per move-free pass, so a frozen
/// search reaches `min_temperature` and stops instead of spinning until
/// the budget expires.
#[derive(Debug)]
pub struct SimulatedAnnealing {
    temperature: f64,
    min_temperature: f64,
    cooling_rate: f64,
    rng: StdRng,
}

impl SimulatedAnnealing {
    /// Creates the policy.
    ///
    /// # Arguments
    ///
    /// * `initial_temperature` - Starting temperature, in tour-length
    ///   units
    /// * `min_temperature` - Freezing point; at or below it worsening
    ///   moves are rejected and the next optimum stops the search
    /// * `cooling_rate` - Geometric factor in `(0, 1)` applied per
    ///   accepted move
    /// * `seed` - Seed for the acceptance draws
    pub fn new(
        initial_temperature: f64,
        min_temperature: f64,
        cooling_rate: f64,
        seed: u64,
    ) -> Self {
        Self {
            temperature: initial_temperature,
            min_temperature,
            cooling_rate,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn frozen(&self) -> bool {
        self.temperature <= self.min_temperature
    }
}

impl AcceptancePolicy for SimulatedAnnealing {
    fn kind(&self) -> PolicyKind {
        PolicyKind::SimulatedAnnealing
    }

    fn prunes_nonimproving(&self) -> bool {
        // Worsening candidates must reach the Metropolis test.
        false
    }

    fn accept(&mut self, augmented_gain: f64, _real_gain: f64, _mv: &Move) -> bool {
        if augmented_gain > EPS {
            return true;
        }
        if augmented_gain >= -EPS || self.frozen() {
            return false;
        }
        let p: f64 = self.rng.random();
        p < (augmented_gain / self.temperature).exp()
    }

    fn on_move_applied(&mut self, _mv: &Move, _real_gain: f64) {
        self.temperature *= self.cooling_rate;
    }

    fn on_local_optimum(&mut self, _tour: &Tour, _provider: &DistanceProvider) -> PolicyDirective {
        self.temperature *= self.cooling_rate;
        if self.frozen() {
            PolicyDirective::Stop
        } else {
            PolicyDirective::Continue
        }
    }
}
