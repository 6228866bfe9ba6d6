//! Or-opt moves over neighbor lists.
//!
//! # Algorithm
//!
//! Tries relocating chains of 1, 2, or 3 consecutive cities to follow
//! one of the chain head's neighbors, keeping the chain's orientation.
//! For a chain `first..=last` with tour neighbors `prev` and `next`,
//! inserting after a city `after` (tour successor `after_next`) trades
//! edges:
//!
//! ```text
//! gain = d(prev,first) + d(last,next) + d(after,after_next)
//!      - d(prev,next) - d(after,first) - d(last,after_next)
//! ```
//!
//! This catches the "misplaced city" pattern that 2-opt cannot fix
//! without a long detour through intermediate states.
//!
//! # Complexity
//!
//! O(3·K) per anchor scan, O(n·K) per pass; an applied relocation costs
//! O(n) to rebuild positions.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and
//! Their Relation to the Logistics of Blood Banking". PhD thesis.

use crate::distance::DistanceProvider;
use crate::local_search::{Candidate, Move, MoveSelection};
use crate::model::Tour;
use crate::neighbor::NeighborIndex;
use crate::policy::AcceptancePolicy;

const MAX_CHAIN: usize = 3;

/// Scans chain relocations anchored at `anchor` (the chain head) and
/// returns an accepted move, or `None` if the policy accepted nothing.
pub(crate) fn find_move(
    tour: &Tour,
    provider: &DistanceProvider,
    neighbors: &NeighborIndex,
    policy: &mut dyn AcceptancePolicy,
    anchor: usize,
    selection: MoveSelection,
) -> Option<Candidate> {
    let n = tour.len();
    let first = anchor;
    let start_pos = tour.position_of(first);
    let prev = tour.predecessor(first);

    let mut best: Option<Candidate> = None;
    let mut last = first;
    for len in 1..=MAX_CHAIN {
        // At least two cities must stay outside the chain.
        if len + 2 > n {
            break;
        }
        if len > 1 {
            last = tour.successor(last);
        }
        let next = tour.successor(last);

        let d_pf = provider.distance(prev, first);
        let d_ln = provider.distance(last, next);
        let aug_removed = policy.edge_cost(prev, first, d_pf) + policy.edge_cost(last, next, d_ln);

        let in_chain = |city: usize| (tour.position_of(city) + n - start_pos) % n < len;

        for &after in neighbors.neighbors(first) {
            if after == prev || in_chain(after) {
                continue;
            }
            let after_next = tour.successor(after);

            let d_aa = provider.distance(after, after_next);
            let d_pn = provider.distance(prev, next);
            let d_af = provider.distance(after, first);
            let d_la = provider.distance(last, after_next);
            let real_gain = d_pf + d_ln + d_aa - d_pn - d_af - d_la;
            let augmented_gain = aug_removed + policy.edge_cost(after, after_next, d_aa)
                - policy.edge_cost(prev, next, d_pn)
                - policy.edge_cost(after, first, d_af)
                - policy.edge_cost(last, after_next, d_la);

            let mv = Move::OrOpt {
                first,
                last,
                len,
                prev,
                next,
                after,
                after_next,
            };
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
    }
    best
}

/// Applies a chain relocation.
pub(crate) fn apply(tour: &mut Tour, first: usize, len: usize, after: usize) {
    let start_pos = tour.position_of(first);
    tour.relocate_segment(start_pos, len, after, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostModel;
    use crate::model::Point;
    use crate::policy::PlainDescent;

    fn line_setup(n: usize) -> (DistanceProvider, NeighborIndex) {
        let points: Vec<Point> = (0..n).map(|i| Point::new(i as f64, 0.0)).collect();
        let provider = DistanceProvider::new(points, CostModel::Euclidean, 2000);
        let index = NeighborIndex::build(&provider, 12);
        (provider, index)
    }

    #[test]
    fn test_relocates_misplaced_city() {
        let (provider, index) = line_setup(6);
        // City 1 sits between 4 and 5 instead of between 0 and 2.
        let mut tour = Tour::new(vec![0, 2, 3, 4, 1, 5]);
        let before = provider.tour_length(tour.order());

        let mut policy = PlainDescent;
        let candidate = find_move(
            &tour,
            &provider,
            &index,
            &mut policy,
            1,
            MoveSelection::BestImprovement,
        )
        .expect("misplaced city has an improving relocation");
        let Move::OrOpt {
            first, len, after, ..
        } = candidate.mv
        else {
            panic!("or-opt scan produced a non-or-opt move");
        };
        apply(&mut tour, first, len, after);

        let after_len = provider.tour_length(tour.order());
        assert!((before - after_len - candidate.real_gain).abs() < 1e-9);
        assert!((after_len - 10.0).abs() < 1e-10);
        assert_eq!(tour.order_from(0), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_relocates_two_city_chain() {
        let (provider, index) = line_setup(7);
        // Chain [1, 2] parked between 5 and 6.
        let mut tour = Tour::new(vec![0, 3, 4, 5, 1, 2, 6]);
        let before = provider.tour_length(tour.order());

        let mut policy = PlainDescent;
        let candidate = find_move(
            &tour,
            &provider,
            &index,
            &mut policy,
            1,
            MoveSelection::BestImprovement,
        )
        .expect("misplaced chain has an improving relocation");
        let Move::OrOpt {
            first, len, after, ..
        } = candidate.mv
        else {
            panic!("or-opt scan produced a non-or-opt move");
        };
        assert_eq!((first, len, after), (1, 2, 0));
        apply(&mut tour, first, len, after);

        let after_len = provider.tour_length(tour.order());
        assert!((before - after_len - candidate.real_gain).abs() < 1e-9);
        assert_eq!(tour.order_from(0), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_ordered_line_has_no_move() {
        let (provider, index) = line_setup(6);
        let tour = Tour::new(vec![0, 1, 2, 3, 4, 5]);
        let mut policy = PlainDescent;
        for anchor in 0..6 {
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
    fn test_gain_consistency_on_scrambled_tour() {
        let (provider, index) = line_setup(8);
        let mut tour = Tour::new(vec![0, 5, 2, 7, 4, 1, 6, 3]);
        let mut policy = PlainDescent;
        for anchor in 0..8 {
            if let Some(candidate) = find_move(
                &tour,
                &provider,
                &index,
                &mut policy,
                anchor,
                MoveSelection::FirstImprovement,
            ) {
                let before = provider.tour_length(tour.order());
                let Move::OrOpt {
                    first, len, after, ..
                } = candidate.mv
                else {
                    panic!("or-opt scan produced a non-or-opt move");
                };
                apply(&mut tour, first, len, after);
                let after_len = provider.tour_length(tour.order());
                assert!((before - after_len - candidate.real_gain).abs() < 1e-9);
                return;
            }
        }
        panic!("scrambled tour should admit at least one relocation");
    }

    #[test]
    fn test_tiny_tours_yield_no_move() {
        for n in 2..=3 {
            let (provider, index) = line_setup(n);
            let order: Vec<usize> = (0..n).collect();
            let tour = Tour::new(order);
            let mut policy = PlainDescent;
            for anchor in 0..n {
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
    }
}
