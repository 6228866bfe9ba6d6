//! Cyclic tour representation with a position map.
//!
//! A tour is stored twice: `order[i]` is the city visited at step `i`, and
//! `position[c]` is the step at which city `c` is visited. Keeping both in
//! sync makes neighbor lookups and move evaluation O(1), which is what the
//! candidate-list local search relies on. Every mutating operation restores
//! the invariant `position[order[i]] == i` before returning.

/// A cyclic permutation of cities `0..n`.
///
/// The tour is conceptually a cycle: the successor of the last city in
/// `order` is the first. Indices into `order` are called *positions* and
/// all segment operations treat them cyclically.
///
/// # Examples
///
/// ```
/// use tourkit::model::Tour;
///
/// let tour = Tour::new(vec![0, 2, 1, 3]);
/// assert_eq!(tour.successor(3), 0);
/// assert_eq!(tour.predecessor(0), 3);
/// assert_eq!(tour.position_of(1), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    order: Vec<usize>,
    position: Vec<usize>,
}

impl Tour {
    /// Builds a tour from a visiting order.
    ///
    /// `order` must be a permutation of `0..order.len()`.
    pub fn new(order: Vec<usize>) -> Self {
        let mut position = vec![0; order.len()];
        for (idx, &city) in order.iter().enumerate() {
            position[city] = idx;
        }
        Self { order, position }
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tour holds no cities.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The visiting order as a slice.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Consumes the tour, returning the visiting order.
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// The visiting order rotated so that `city` comes first.
    pub fn order_from(&self, city: usize) -> Vec<usize> {
        let n = self.order.len();
        let start = self.position[city];
        (0..n).map(|k| self.order[(start + k) % n]).collect()
    }

    /// City visited at position `pos`.
    pub fn city_at(&self, pos: usize) -> usize {
        self.order[pos]
    }

    /// Position at which `city` is visited.
    pub fn position_of(&self, city: usize) -> usize {
        self.position[city]
    }

    /// City visited immediately after `city`, wrapping at the end.
    pub fn successor(&self, city: usize) -> usize {
        let n = self.order.len();
        self.order[(self.position[city] + 1) % n]
    }

    /// City visited immediately before `city`, wrapping at the start.
    pub fn predecessor(&self, city: usize) -> usize {
        let n = self.order.len();
        self.order[(self.position[city] + n - 1) % n]
    }

    /// Number of cities on the forward arc from position `from` to
    /// position `to`, both inclusive.
    pub fn segment_len(&self, from: usize, to: usize) -> usize {
        let n = self.order.len();
        (to + n - from) % n + 1
    }

    /// Reverses the forward arc from position `from` to position `to`,
    /// both inclusive, wrapping across the end of `order` if needed.
    ///
    /// Reversing an arc and reversing its complement produce the same
    /// cycle (up to traversal direction), so callers pick whichever arc
    /// is shorter and pay O(min(arc, n - arc)) swaps.
    pub fn reverse_segment(&mut self, from: usize, to: usize) {
        let n = self.order.len();
        let swaps = self.segment_len(from, to) / 2;
        let mut i = from;
        let mut j = to;
        for _ in 0..swaps {
            self.order.swap(i, j);
            self.position[self.order[i]] = i;
            self.position[self.order[j]] = j;
            i = (i + 1) % n;
            j = (j + n - 1) % n;
        }
    }

    /// Removes the chain of `seg_len` cities starting at position `start`
    /// (cyclically) and reinserts it directly after `after_city`, in
    /// original or reversed orientation.
    ///
    /// `after_city` must not be part of the chain. Positions are rebuilt
    /// wholesale, so the move costs O(n).
    pub fn relocate_segment(
        &mut self,
        start: usize,
        seg_len: usize,
        after_city: usize,
        reversed: bool,
    ) {
        let n = self.order.len();
        let chain: Vec<usize> = (0..seg_len).map(|k| self.order[(start + k) % n]).collect();

        let mut new_order = Vec::with_capacity(n);
        let mut p = (start + seg_len) % n;
        for _ in 0..n - seg_len {
            let city = self.order[p];
            new_order.push(city);
            if city == after_city {
                if reversed {
                    new_order.extend(chain.iter().rev());
                } else {
                    new_order.extend(chain.iter().copied());
                }
            }
            p = (p + 1) % n;
        }

        self.order = new_order;
        for (idx, &city) in self.order.iter().enumerate() {
            self.position[city] = idx;
        }
    }
}
