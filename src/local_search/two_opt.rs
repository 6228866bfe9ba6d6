//! 2-opt moves over neighbor lists.
//!
//! # Algorithm
//!
//! For an anchor city `a` with tour successor `b`, each candidate `c`
//! from `a`'s neighbor list (with tour successor `d`) proposes removing
//! edges (a, b) and (c, d) and adding (a, c) and (b, d). The gain is
//!
//! ```text
//! gain = d(a,b) + d(c,d) - d(a,c) - d(b,d)
//! ```
//!
//! Because the candidate list is sorted nearest-first, the partial gain
//! `d(a,b) - d(a,c)` only decreases along the scan; once it is
//! non-positive (under both the true and the policy-augmented costs) no
//! later candidate can improve and the scan stops early.
//!
//! Applying the move reverses the tour arc between `b` and `c`. Its
//! complement arc yields the same cycle, so whichever is shorter gets
//! reversed, bounding the work at n/2 position updates.
//!
//! # Complexity
//!
//! O(K) per anchor scan, O(n·K) per pass, plus O(n/2) per applied move.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman
//! problems", *Operations Research* 6(6), 791-812. Candidate-list
//! pruning follows Johnson & McGeoch (1997).

use crate::distance::DistanceProvider;
use crate::local_search::{Candidate, Move, MoveSelection, EPS};
use crate::model::Tour;
use crate::neighbor::NeighborIndex;
use crate::policy::AcceptancePolicy;

/// Scans the 2-opt candidates of `anchor` and returns an accepted move,
/// or `None` if the policy accepted nothing.
///
/// Under `FirstImprovement` the first accepted candidate is returned;
/// under `BestImprovement` the whole list is scanned and the accepted
/// candidate with the largest augmented gain wins.
pub(crate) fn find_move(
    tour: &Tour,
    provider: &DistanceProvider,
    neighbors: &NeighborIndex,
    policy: &mut dyn AcceptancePolicy,
    anchor: usize,
    selection: MoveSelection,
) -> Option<Candidate> {
    let a = anchor;
    let b = tour.successor(a);
    if a == b {
        return None;
    }
    let d_ab = provider.distance(a, b);
    let aug_ab = policy.edge_cost(a, b, d_ab);
    let prune = policy.prunes_nonimproving();

    let mut best: Option<Candidate> = None;
    for &c in neighbors.neighbors(a) {
        let d_ac = provider.distance(a, c);
        let aug_ac = policy.edge_cost(a, c, d_ac);
        let partial = d_ab - d_ac;
        let aug_partial = aug_ab - aug_ac;
        if prune && partial <= EPS && aug_partial <= EPS {
            break;
        }

        let d = tour.successor(c);
        // Skip degenerate pairs sharing a city.
        if c == b || d == a {
            continue;
        }

        let d_cd = provider.distance(c, d);
        let d_bd = provider.distance(b, d);
        let real_gain = partial + d_cd - d_bd;
        let augmented_gain = aug_partial + policy.edge_cost(c, d, d_cd) - policy.edge_cost(b, d, d_bd);

        let mv = Move::TwoOpt { a, b, c, d };
        if !policy.accept(augmented_gain, real_gain, &mv) {
            continue;
        }
        let candidate = Candidate {
            mv,
            augmented_gain,
            real_gain,
        };
        match selection {
            MoveSelection::FirstImprovement => return Some(candidate),
            MoveSelection::BestImprovement => {
                if best
                    .map(|cur| candidate.augmented_gain > cur.augmented_gain)
                    .unwrap_or(true)
                {
                    best = Some(candidate);
                }
            }
        }
    }
    best
}

/// Applies a 2-opt move, reversing the shorter of the two arcs.
pub(crate) fn apply(tour: &mut Tour, a: usize, b: usize, c: usize, d: usize) {
    let n = tour.len();
    let pos_b = tour.position_of(b);
    let pos_c = tour.position_of(c);
    if tour.segment_len(pos_b, pos_c) <= n / 2 {
        tour.reverse_segment(pos_b, pos_c);
    } else {
        tour.reverse_segment(tour.position_of(d), tour.position_of(a));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostModel;
    use crate::model::Point;
    use crate::policy::PlainDescent;

    fn setup(points: Vec<Point>) -> (DistanceProvider, NeighborIndex) {
        let provider = DistanceProvider::new(points, CostModel::Euclidean, 2000);
        let index = NeighborIndex::build(&provider, 12);
        (provider, index)
    }

    /// Unit square with the crossing tour 0-2-1-3.
    fn crossed_square() -> (DistanceProvider, NeighborIndex, Tour) {
        let (provider, index) = setup(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ]);
        (provider, index, Tour::new(vec![0, 2, 1, 3]))
    }

    #[test]
    fn test_finds_uncrossing_move() {
        let (provider, index, tour) = crossed_square();
        let mut policy = PlainDescent;
        let found = (0..4).any(|anchor| {
            find_move(
                &tour,
                &provider,
                &index,
                &mut policy,
                anchor,
                MoveSelection::FirstImprovement,
            )
            .is_some()
        });
        assert!(found);
    }

    #[test]
    fn test_gain_matches_length_change() {
        let (provider, index, mut tour) = crossed_square();
        let mut policy = PlainDescent;
        let before = provider.tour_length(tour.order());
        let candidate = (0..4)
            .find_map(|anchor| {
                find_move(
                    &tour,
                    &provider,
                    &index,
                    &mut policy,
                    anchor,
                    MoveSelection::BestImprovement,
                )
            })
            .expect("crossing tour has an improving move");
        let Move::TwoOpt { a, b, c, d } = candidate.mv else {
            panic!("2-opt scan produced a non-2-opt move");
        };
        apply(&mut tour, a, b, c, d);
        let after = provider.tour_length(tour.order());
        assert!((before - after - candidate.real_gain).abs() < 1e-9);
        assert!((after - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_optimal_tour_yields_no_move() {
        let (provider, index) = setup(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ]);
        let tour = Tour::new(vec![0, 1, 2, 3]);
        let mut policy = PlainDescent;
        for anchor in 0..4 {
            assert!(find_move(
                &tour,
                &provider,
                &index,
                &mut policy,
                anchor,
                MoveSelection::BestImprovement,
            )
            .is_none());
        }
    }

    #[test]
    fn test_apply_reverses_wrapping_arc() {
        let mut tour = Tour::new(vec![0, 1, 2, 3, 4, 5]);
        // Remove (4, 5) and (1, 2): the b..c arc wraps across the order
        // seam. Reversing it must give the same cycle as reversing the
        // complement d..a arc.
        let mut other = tour.clone();
        apply(&mut tour, 4, 5, 1, 2);
        other.reverse_segment(other.position_of(2), other.position_of(4));
        let succ: Vec<usize> = (0..6).map(|c| tour.successor(c)).collect();
        let pred: Vec<usize> = (0..6).map(|c| other.predecessor(c)).collect();
        assert_eq!(succ, pred);
    }

    #[test]
    fn test_best_improvement_picks_largest_gain() {
        // Line with a detour: several improving candidates exist from
        // anchor 0.
        let (provider, index) = setup(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(5.0, 0.0),
        ]);
        let tour = Tour::new(vec![0, 4, 2, 3, 1, 5]);
        let mut policy = PlainDescent;
        let first = find_move(
            &tour,
            &provider,
            &index,
            &mut policy,
            0,
            MoveSelection::FirstImprovement,
        );
        let best = find_move(
            &tour,
            &provider,
            &index,
            &mut policy,
            0,
            MoveSelection::BestImprovement,
        );
        let (Some(first), Some(best)) = (first, best) else {
            panic!("both selections should find a move");
        };
        assert!(best.augmented_gain >= first.augmented_gain - EPS);
    }
}
