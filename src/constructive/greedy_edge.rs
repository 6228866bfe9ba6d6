//! Greedy-edge tour construction.
//!
//! Collects candidate edges from the neighbor lists, sorts them by cost,
//! and accepts each edge whose endpoints both still have degree < 2 and
//! lie in different path fragments. Candidate lists are K-bounded, so the
//! accepted edges usually leave several disjoint paths; a stitching phase
//! then joins the nearest fragment endpoints until one path remains, and
//! its two ends close the cycle.
//!
//! # Complexity
//!
//! O(n·K log(n·K)) for the edge sort, near-inverse-Ackermann union-find
//! per accepted edge, plus the endpoint stitching scan.
//!
//! # Reference
//!
//! Bentley, J. L. (1992). Fast algorithms for geometric traveling
//! salesman problems. ORSA Journal on Computing. Greedy edge matching
//! typically lands 10-15% above optimal, noticeably better than
//! nearest-neighbor, at the price of the edge sort.

use crate::distance::DistanceProvider;
use crate::model::Tour;
use crate::neighbor::NeighborIndex;

/// Union-find over path fragments, with path compression and union by
/// rank.
struct FragmentSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl FragmentSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    /// Merges the fragments of `a` and `b`. Returns `false` if they were
    /// already the same fragment.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        if self.rank[root_a] > self.rank[root_b] {
            self.parent[root_b] = root_a;
        } else if self.rank[root_a] < self.rank[root_b] {
            self.parent[root_a] = root_b;
        } else {
            self.parent[root_b] = root_a;
            self.rank[root_a] += 1;
        }
        true
    }
}

/// Constructs a tour by accepting the cheapest candidate edges first.
///
/// Deterministic: edges are ordered by `(cost, i, j)` and the stitching
/// phase breaks ties the same way, so identical input yields an identical
/// tour.
///
/// # Arguments
///
/// * `provider` - Distance source
/// * `neighbors` - Per-city candidate lists the edge pool is drawn from
///
/// # Examples
///
/// ```
/// use tourkit::constructive::greedy_edge;
/// use tourkit::distance::{CostModel, DistanceProvider};
/// use tourkit::model::Point;
/// use tourkit::neighbor::NeighborIndex;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ];
/// let provider = DistanceProvider::new(points, CostModel::Euclidean, 2000);
/// let index = NeighborIndex::build(&provider, 12);
///
/// let tour = greedy_edge(&provider, &index);
/// assert_eq!(provider.tour_length(tour.order()), 4.0);
/// ```
pub fn greedy_edge(provider: &DistanceProvider, neighbors: &NeighborIndex) -> Tour {
    let n = provider.len();
    if n <= 3 {
        // Every permutation is the same cycle.
        return Tour::new((0..n).collect());
    }

    // Candidate pool: each city's list, deduplicated as i < j pairs.
    let mut edges: Vec<(f64, usize, usize)> = Vec::with_capacity(n * neighbors.k());
    for i in 0..n {
        for &j in neighbors.neighbors(i) {
            let (a, b) = if i < j { (i, j) } else { (j, i) };
            edges.push((provider.distance(a, b), a, b));
        }
    }
    edges.sort_unstable_by(|x, y| {
        x.0.partial_cmp(&y.0)
            .expect("distance should not be NaN")
            .then(x.1.cmp(&y.1))
            .then(x.2.cmp(&y.2))
    });
    edges.dedup_by(|x, y| x.1 == y.1 && x.2 == y.2);

    let mut degree = vec![0u8; n];
    let mut adjacent: Vec<[Option<usize>; 2]> = vec![[None, None]; n];
    let mut sets = FragmentSets::new(n);

    for &(_, a, b) in &edges {
        if degree[a] >= 2 || degree[b] >= 2 {
            continue;
        }
        // Rejecting same-fragment edges keeps every fragment an open path.
        if !sets.union(a, b) {
            continue;
        }
        link(&mut adjacent, &mut degree, a, b);
    }

    // Stitch the remaining fragments: always join the nearest endpoint
    // pair of two different fragments.
    loop {
        let endpoints: Vec<usize> = (0..n).filter(|&c| degree[c] < 2).collect();
        let mut best: Option<(f64, usize, usize)> = None;
        for (idx, &u) in endpoints.iter().enumerate() {
            for &v in &endpoints[idx + 1..] {
                if sets.find(u) == sets.find(v) {
                    continue;
                }
                let d = provider.distance(u, v);
                let better = match best {
                    None => true,
                    Some((bd, bu, bv)) => (d, u, v) < (bd, bu, bv),
                };
                if better {
                    best = Some((d, u, v));
                }
            }
        }
        match best {
            Some((_, u, v)) => {
                sets.union(u, v);
                link(&mut adjacent, &mut degree, u, v);
            }
            None => break,
        }
    }

    // One open path remains; its two ends close the cycle.
    let ends: Vec<usize> = (0..n).filter(|&c| degree[c] == 1).collect();
    link(&mut adjacent, &mut degree, ends[0], ends[1]);

    Tour::new(walk_cycle(&adjacent, n))
}

fn link(adjacent: &mut [[Option<usize>; 2]], degree: &mut [u8], a: usize, b: usize) {
    let slot_a = usize::from(adjacent[a][0].is_some());
    let slot_b = usize::from(adjacent[b][0].is_some());
    adjacent[a][slot_a] = Some(b);
    adjacent[b][slot_b] = Some(a);
    degree[a] += 1;
    degree[b] += 1;
}

fn walk_cycle(adjacent: &[[Option<usize>; 2]], n: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(n);
    let mut previous = usize::MAX;
    let mut current = 0;
    for _ in 0..n {
        order.push(current);
        let first = adjacent[current][0].expect("cycle is complete");
        let second = adjacent[current][1].expect("cycle is complete");
        let next = if first != previous { first } else { second };
        previous = current;
        current = next;
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostModel;

    use crate::model::Point;

    fn setup(points: Vec<Point>, k: usize) -> (DistanceProvider, NeighborIndex) {
        let provider = DistanceProvider::new(points, CostModel::Euclidean, 2000);
        let index = NeighborIndex::build(&provider, k);
        (provider, index)
    }

    fn assert_permutation(tour: &Tour, n: usize) {
        let mut seen = vec![false; n];
        assert_eq!(tour.len(), n);
        for &c in tour.order() {
            assert!(!seen[c]);
            seen[c] = true;
        }
    }

    #[test]
    fn test_square_yields_perimeter() {
        let (provider, index) = setup(
            vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 1.0),
                Point::new(1.0, 1.0),
                Point::new(1.0, 0.0),
            ],
            12,
        );
        let tour = greedy_edge(&provider, &index);
        assert_permutation(&tour, 4);
        assert!((provider.tour_length(tour.order()) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_all_cities_present() {
        let points: Vec<Point> = (0..20)
            .map(|i| Point::new((i % 5) as f64 * 3.0, (i / 5) as f64 * 2.0))
            .collect();
        let (provider, index) = setup(points, 4);
        let tour = greedy_edge(&provider, &index);
        assert_permutation(&tour, 20);
    }

    #[test]
    fn test_fragments_get_stitched() {
        // Four far-apart pairs with K = 1: the candidate pool only holds
        // the intra-pair edges, so the stitching phase must connect the
        // four fragments and close the cycle.
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(11.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(21.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(31.0, 0.0),
        ];
        let (provider, index) = setup(points, 1);
        let tour = greedy_edge(&provider, &index);
        assert_permutation(&tour, 8);
        // Nearest-endpoint stitching walks the pairs left to right.
        assert!((provider.tour_length(tour.order()) - 62.0).abs() < 1e-10);
    }

    #[test]
    fn test_deterministic() {
        let points: Vec<Point> = (0..15)
            .map(|i| {
                let i = i as f64;
                Point::new((i * 7.3) % 11.0, (i * 3.1) % 13.0)
            })
            .collect();
        let (provider, index) = setup(points.clone(), 5);
        let a = greedy_edge(&provider, &index);
        let (provider2, index2) = setup(points, 5);
        let b = greedy_edge(&provider2, &index2);
        assert_eq!(a.order(), b.order());
    }

    #[test]
    fn test_small_instances() {
        for n in 0..=3 {
            let points: Vec<Point> = (0..n).map(|i| Point::new(i as f64, 0.0)).collect();
            let (provider, index) = setup(points, 12);
            let tour = greedy_edge(&provider, &index);
            assert_permutation(&tour, n);
        }
    }

    #[test]
    fn test_line_uses_consecutive_edges() {
        let points: Vec<Point> = (0..6).map(|i| Point::new(i as f64, 0.0)).collect();
        let (provider, index) = setup(points, 3);
        let tour = greedy_edge(&provider, &index);
        // All unit edges are cheapest and form the path 0-1-2-3-4-5; the
        // closing edge 5-0 is forced.
        let expected_len = 5.0 + 5.0;
        assert!((provider.tour_length(tour.order()) - expected_len).abs() < 1e-10);
    }
}
