//! Plain descent acceptance.

use crate::distance::DistanceProvider;
use crate::local_search::{Move, EPS};
use crate::model::Tour;
use crate::policy::{AcceptancePolicy, PolicyDirective, PolicyKind};

/// First-improvement hill climbing: accept strict improvements, stop at
/// the first local optimum.
///
/// The workhorse policy for large instances, where a single descent to a
/// 2-opt local optimum is all the time budget allows.
#[derive(Debug, Default)]
pub struct PlainDescent;

impl AcceptancePolicy for PlainDescent {
    fn kind(&self) -> PolicyKind {
        PolicyKind::PlainDescent
    }

    fn accept(&mut self, augmented_gain: f64, _real_gain: f64, _mv: &Move) -> bool {
        augmented_gain > EPS
    }

    fn on_local_optimum(&mut self, _tour: &Tour, _provider: &DistanceProvider) -> PolicyDirective {
        PolicyDirective::Stop
    }
}
