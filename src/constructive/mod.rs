//! Constructive heuristics for building initial tours.
//!
//! - [`nearest_neighbor`] — Greedy nearest-city walk, O(n·K) typical
//! - [`greedy_edge`] — Cheapest-edge matching (Bentley, 1992), O(n·K log(n·K))

mod greedy_edge;
mod nearest_neighbor;

pub use greedy_edge::greedy_edge;
pub use nearest_neighbor::nearest_neighbor;
