//! Local-search driver.
//!
//! # Algorithm
//!
//! Repeats full passes over the tour until the acceptance policy stops
//! the search or the deadline expires. A pass visits every city once as
//! an anchor, scans its candidate moves (2-opt, plus Or-opt when
//! enabled), and applies whatever the policy accepts. A pass that
//! applies no move is a local optimum of the policy's cost surface; the
//! policy then decides whether to stop or reshape the surface and
//! continue.
//!
//! The engine tracks the best tour seen by real length, so policies
//! that accept worsening moves can still hand back their best visit.
//!
//! # Complexity
//!
//! O(n·K) per pass for the scans; an applied move costs at most O(n).

use std::time::Instant;

use crate::distance::DistanceProvider;
use crate::local_search::{or_opt, two_opt, Candidate, Move, MoveSelection, EPS};
use crate::model::Tour;
use crate::neighbor::NeighborIndex;
use crate::policy::{AcceptancePolicy, PolicyDirective};

/// Why a [`SearchEngine::run`] call returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The policy declared the search finished at a local optimum.
    Converged,
    /// The deadline expired before the policy stopped.
    TimedOut,
}

/// Result of one local-search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best tour found, by real length.
    pub tour: Tour,
    /// Length of `tour`, recomputed from the distance provider.
    pub length: f64,
    pub stop: StopReason,
    /// Completed improvement passes.
    pub passes: u64,
    /// Moves applied across all passes.
    pub moves_applied: u64,
}

/// Pass-based local search over neighbor-list candidates.
pub struct SearchEngine<'a> {
    provider: &'a DistanceProvider,
    neighbors: &'a NeighborIndex,
    move_selection: MoveSelection,
    use_or_opt: bool,
    deadline: Instant,
}

impl<'a> SearchEngine<'a> {
    pub fn new(
        provider: &'a DistanceProvider,
        neighbors: &'a NeighborIndex,
        move_selection: MoveSelection,
        use_or_opt: bool,
        deadline: Instant,
    ) -> Self {
        Self {
            provider,
            neighbors,
            move_selection,
            use_or_opt,
            deadline,
        }
    }

    /// Improves `tour` under `policy` until it stops the search or the
    /// deadline passes. Tours with fewer than 4 cities have no
    /// improving move and converge immediately.
    pub fn run(&self, mut tour: Tour, policy: &mut dyn AcceptancePolicy) -> SearchOutcome {
        let n = tour.len();
        let mut length = self.provider.tour_length(tour.order());
        if n < 4 {
            return SearchOutcome {
                tour,
                length,
                stop: StopReason::Converged,
                passes: 0,
                moves_applied: 0,
            };
        }

        log::debug!(
            "search start: {n} cities, length {length:.1}, policy {:?}",
            policy.kind()
        );
        policy.on_search_start(&tour, self.provider);

        let mut best_order: Vec<usize> = tour.order().to_vec();
        let mut best_length = length;
        let mut passes: u64 = 0;
        let mut moves_applied: u64 = 0;
        let mut stop = StopReason::Converged;

        'search: loop {
            if Instant::now() >= self.deadline {
                stop = StopReason::TimedOut;
                break 'search;
            }
            passes += 1;
            let mut applied_in_pass: u64 = 0;

            for anchor in 0..n {
                let Some(candidate) = self.scan(&tour, policy, anchor) else {
                    continue;
                };
                Self::apply(&mut tour, &candidate.mv);
                length -= candidate.real_gain;
                moves_applied += 1;
                applied_in_pass += 1;
                policy.on_move_applied(&candidate.mv, candidate.real_gain);

                if length < best_length - EPS {
                    best_length = length;
                    best_order.clear();
                    best_order.extend_from_slice(tour.order());
                }
                if Instant::now() >= self.deadline {
                    stop = StopReason::TimedOut;
                    break 'search;
                }
            }

            log::trace!("pass {passes}: {applied_in_pass} moves, length {length:.1}");
            if applied_in_pass == 0 {
                match policy.on_local_optimum(&tour, self.provider) {
                    PolicyDirective::Stop => break 'search,
                    PolicyDirective::Continue => {}
                }
            }
        }

        if best_length < length - EPS {
            tour = Tour::new(best_order);
        }
        // Incremental gains accumulate rounding drift over long runs.
        let length = self.provider.tour_length(tour.order());
        log::debug!(
            "search done: length {length:.1} after {passes} passes, {moves_applied} moves ({stop:?})"
        );
        SearchOutcome {
            tour,
            length,
            stop,
            passes,
            moves_applied,
        }
    }

    fn scan(
        &self,
        tour: &Tour,
        policy: &mut dyn AcceptancePolicy,
        anchor: usize,
    ) -> Option<Candidate> {
        match self.move_selection {
            MoveSelection::FirstImprovement => two_opt::find_move(
                tour,
                self.provider,
                self.neighbors,
                policy,
                anchor,
                self.move_selection,
            )
            .or_else(|| {
                self.use_or_opt
                    .then(|| {
                        or_opt::find_move(
                            tour,
                            self.provider,
                            self.neighbors,
                            policy,
                            anchor,
                            self.move_selection,
                        )
                    })
                    .flatten()
            }),
            MoveSelection::BestImprovement => {
                let two = two_opt::find_move(
                    tour,
                    self.provider,
                    self.neighbors,
                    policy,
                    anchor,
                    self.move_selection,
                );
                let or = if self.use_or_opt {
                    or_opt::find_move(
                        tour,
                        self.provider,
                        self.neighbors,
                        policy,
                        anchor,
                        self.move_selection,
                    )
                } else {
                    None
                };
                match (two, or) {
                    (Some(a), Some(b)) => {
                        Some(if b.augmented_gain > a.augmented_gain { b } else { a })
                    }
                    (two, None) => two,
                    (None, or) => or,
                }
            }
        }
    }

    fn apply(tour: &mut Tour, mv: &Move) {
        match *mv {
            Move::TwoOpt { a, b, c, d } => two_opt::apply(tour, a, b, c, d),
            Move::OrOpt {
                first, len, after, ..
            } => or_opt::apply(tour, first, len, after),
        }
    }
}
