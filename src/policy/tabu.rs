//! Tabu search acceptance.
//!
//! # Algorithm
//!
//! Descent with short-term memory: edges removed by recent moves are
//! tabu, and a candidate that would re-add a tabu edge is rejected. The
//! memory is a bounded queue, so an edge's tabu status expires once
//! enough newer removals displace it. Two exceptions keep the search
//! moving:
//!
//! - *Aspiration*: a tabu move that would produce a new overall best
//!   tour is always allowed.
//! - *Escape*: after a pass with no accepted move, one pass runs in
//!   escape mode, taking the first non-tabu move of any sign; descent
//!   then resumes. A second barren pass ends the search.
//!
//! # Reference
//!
//! Glover, F. (1989). Tabu search, part I. ORSA Journal on Computing
//! 1(3), 190-206.

use std::collections::{HashSet, VecDeque};

use crate::distance::DistanceProvider;
use crate::local_search::{Move, EPS};
use crate::model::Tour;
use crate::policy::{edge_key, AcceptancePolicy, PolicyDirective, PolicyKind};

/// Edge-based tabu memory with aspiration and a one-pass escape.
#[derive(Debug)]
pub struct TabuSearch {
    capacity: usize,
    recent: VecDeque<(usize, usize)>,
    blocked: HashSet<(usize, usize)>,
    current_length: f64,
    best_length: f64,
    escaping: bool,
}

impl TabuSearch {
    /// Creates the policy with room for `capacity` tabu edges.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            recent: VecDeque::with_capacity(capacity),
            blocked: HashSet::new(),
            current_length: 0.0,
            best_length: f64::INFINITY,
            escaping: false,
        }
    }

    fn is_tabu(&self, mv: &Move) -> bool {
        mv.added_edges()
            .iter()
            .any(|&(i, j)| self.blocked.contains(&edge_key(i, j)))
    }

    fn remember(&mut self, i: usize, j: usize) {
        if self.capacity == 0 {
            return;
        }
        let key = edge_key(i, j);
        if self.blocked.insert(key) {
            self.recent.push_back(key);
            while self.recent.len() > self.capacity {
                if let Some(expired) = self.recent.pop_front() {
                    self.blocked.remove(&expired);
                }
            }
        }
    }
}

impl AcceptancePolicy for TabuSearch {
    fn kind(&self) -> PolicyKind {
        PolicyKind::TabuSearch
    }

    fn on_search_start(&mut self, tour: &Tour, provider: &DistanceProvider) {
        let length = provider.tour_length(tour.order());
        self.current_length = length;
        self.best_length = length;
        self.recent.clear();
        self.blocked.clear();
        self.escaping = false;
    }

    fn prunes_nonimproving(&self) -> bool {
        // An escape pass must see worsening candidates.
        !self.escaping
    }

    fn accept(&mut self, augmented_gain: f64, real_gain: f64, mv: &Move) -> bool {
        if self.is_tabu(mv) {
            // Aspiration: only a new overall best unblocks a tabu move.
            return self.current_length - real_gain < self.best_length - EPS;
        }
        if self.escaping {
            return true;
        }
        augmented_gain > EPS
    }

    fn on_move_applied(&mut self, mv: &Move, real_gain: f64) {
        for (i, j) in mv.removed_edges() {
            self.remember(i, j);
        }
        self.current_length -= real_gain;
        if self.current_length < self.best_length {
            self.best_length = self.current_length;
        }
        self.escaping = false;
    }

    fn on_local_optimum(&mut self, _tour: &Tour, _provider: &DistanceProvider) -> PolicyDirective {
        if self.escaping {
            // Even the escape pass applied nothing.
            return PolicyDirective::Stop;
        }
        self.escaping = true;
        PolicyDirective::Continue
    }
}
