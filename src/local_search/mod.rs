//! Local search operators and the improvement engine.
//!
//! - **2-opt** — Edge-pair exchange with shorter-arc reversal
//! - **Or-opt** — Relocation of short city chains
//! - [`SearchEngine`] — Pass loop driving both operators under an
//!   [`AcceptancePolicy`](crate::policy::AcceptancePolicy)
//!
//! Candidate moves are drawn from the per-city neighbor lists, so a full
//! pass costs O(n·K) evaluations instead of O(n²).

pub(crate) mod or_opt;
pub(crate) mod two_opt;

mod engine;

pub use engine::{SearchEngine, SearchOutcome, StopReason};

/// Gains and deltas below this magnitude count as zero. Keeps f64 noise
/// from being mistaken for improvement.
pub(crate) const EPS: f64 = 1e-10;

/// How a pass picks among a city's accepted candidate moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSelection {
    /// Apply the first accepted candidate immediately.
    FirstImprovement,
    /// Evaluate every candidate of the current city, apply the best
    /// accepted one.
    BestImprovement,
}

/// A candidate local-search move, described by the cities involved.
///
/// Naming follows the 2-opt gain formula: removing edges `(a, b)` and
/// `(c, d)` and adding `(a, c)` and `(b, d)` changes the length by
/// `d(a,b) + d(c,d) - d(a,c) - d(b,d)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Replace edges `(a, b)` and `(c, d)` with `(a, c)` and `(b, d)`,
    /// reversing the tour arc between `b` and `c`.
    TwoOpt { a: usize, b: usize, c: usize, d: usize },
    /// Relocate the chain `first..=last` (`len` consecutive cities) so it
    /// follows `after`, keeping its orientation. `prev`/`next` are the
    /// chain's current tour neighbors and `after_next` is the successor
    /// of `after`, recorded so the edge sets below need no tour access.
    OrOpt {
        first: usize,
        last: usize,
        len: usize,
        prev: usize,
        next: usize,
        after: usize,
        after_next: usize,
    },
}

impl Move {
    /// Undirected edges this move removes from the tour.
    pub fn removed_edges(&self) -> Vec<(usize, usize)> {
        match *self {
            Move::TwoOpt { a, b, c, d } => vec![(a, b), (c, d)],
            Move::OrOpt {
                first,
                last,
                prev,
                next,
                after,
                after_next,
                ..
            } => vec![(prev, first), (last, next), (after, after_next)],
        }
    }

    /// Undirected edges this move adds to the tour.
    pub fn added_edges(&self) -> Vec<(usize, usize)> {
        match *self {
            Move::TwoOpt { a, b, c, d } => vec![(a, c), (b, d)],
            Move::OrOpt {
                first,
                last,
                prev,
                next,
                after,
                after_next,
                ..
            } => vec![(prev, next), (after, first), (last, after_next)],
        }
    }
}

/// An accepted candidate with its gains under both cost views.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    pub mv: Move,
    /// Gain under the policy-augmented edge costs.
    pub augmented_gain: f64,
    /// Gain under the true distances; what the tour length changes by.
    pub real_gain: f64,
}
