//! Acceptance policies steering the local search engine.
//!
//! A policy decides which candidate moves the engine applies and what
//! happens when a pass finds nothing to apply, without coupling to the
//! move operators themselves. The engine talks to policies through
//! lightweight hooks: an edge-cost view used during move evaluation, the
//! accept test, and lifecycle notifications (search start, move applied,
//! local optimum).
//!
//! Provided policies:
//! - [`PlainDescent`] — accepts strict improvements, stops at the first
//!   local optimum
//! - [`GuidedLocalSearch`] — penalizes long tour edges at each local
//!   optimum so the augmented landscape keeps moving
//! - [`SimulatedAnnealing`] — Metropolis acceptance with geometric
//!   cooling, seeded and deterministic
//! - [`TabuSearch`] — short-term memory over removed edges with
//!   aspiration and an escape pass
//!
//! All policies are deterministic given a fixed configuration and seed.

mod annealing;
mod descent;
mod guided;
mod tabu;

pub use annealing::SimulatedAnnealing;
pub use descent::PlainDescent;
pub use guided::GuidedLocalSearch;
pub use tabu::TabuSearch;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceProvider;
use crate::local_search::Move;
use crate::model::Tour;

/// Normalizes an undirected edge for map keys.
pub(crate) fn edge_key(i: usize, j: usize) -> (usize, usize) {
    if i < j {
        (i, j)
    } else {
        (j, i)
    }
}

/// Identifies an acceptance policy in configuration and solve metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyKind {
    PlainDescent,
    GuidedLocalSearch,
    SimulatedAnnealing,
    TabuSearch,
}

/// What the engine should do after a pass applied no moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDirective {
    /// The search is done; report the best tour.
    Stop,
    /// The policy changed its state (penalties, temperature, tabu
    /// status); run another pass.
    Continue,
}

/// Move acceptance and search control, decoupled from the operators.
///
/// The engine evaluates every candidate move twice: once under the true
/// distances (the *real* gain, which tracks tour length) and once under
/// [`edge_cost`](AcceptancePolicy::edge_cost) (the *augmented* gain,
/// which is what acceptance reasons about). For policies without cost
/// augmentation the two coincide.
pub trait AcceptancePolicy {
    /// Which policy this is, for metadata and logging.
    fn kind(&self) -> PolicyKind;

    /// Called once before the first pass over `tour`.
    fn on_search_start(&mut self, _tour: &Tour, _provider: &DistanceProvider) {}

    /// The cost of edge `(i, j)` as seen by move evaluation. `base` is
    /// the true distance; the default view is unaugmented.
    fn edge_cost(&self, _i: usize, _j: usize, base: f64) -> f64 {
        base
    }

    /// Whether the engine may cut a candidate scan short once gains are
    /// provably non-positive. Policies that must see worsening
    /// candidates return `false`.
    fn prunes_nonimproving(&self) -> bool {
        true
    }

    /// Whether the engine should apply this candidate move.
    fn accept(&mut self, augmented_gain: f64, real_gain: f64, mv: &Move) -> bool;

    /// Called after the engine applied `mv`; `real_gain` is the true
    /// length reduction (negative for worsening moves).
    fn on_move_applied(&mut self, _mv: &Move, _real_gain: f64) {}

    /// Called when a full pass applied no move. `tour` is the current
    /// local optimum.
    fn on_local_optimum(&mut self, tour: &Tour, provider: &DistanceProvider) -> PolicyDirective;
}
