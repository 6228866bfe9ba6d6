//! # tourkit
//!
//! Euclidean TSP solving engine: tour construction heuristics,
//! neighbor-list local search, and pluggable acceptance policies under
//! a wall-clock budget.
//!
//! ## Modules
//!
//! - [`model`] — Core types (Point, Tour)
//! - [`distance`] — Distance provider with optional precomputed matrix
//! - [`neighbor`] — K-nearest neighbor lists for candidate moves
//! - [`constructive`] — Construction heuristics (Nearest Neighbor, Greedy Edge)
//! - [`local_search`] — 2-opt / Or-opt engine over neighbor lists
//! - [`policy`] — Acceptance policies (descent, guided local search, annealing, tabu)
//! - [`strategy`] — Instance-size pipeline dispatch and tunables
//! - [`solver`] — Solve facade with restarts and metadata
//! - [`io`] — Contest and TSPLIB text formats
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use tourkit::model::Point;
//!
//! let cities = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 0.5),
//!     Point::new(0.0, 1.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(1.0, 0.0),
//! ];
//!
//! let result = tourkit::solve(&cities, Duration::from_millis(200)).unwrap();
//! assert_eq!(result.tour.len(), 5);
//! assert_eq!(result.tour[0], 0);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod io;
pub mod local_search;
pub mod model;
pub mod neighbor;
pub mod policy;
pub mod solver;
pub mod strategy;

pub use error::{Result, SolverError};
pub use solver::{solve, solve_with_config, SolveMetadata, SolveResult, Termination};
pub use strategy::{ConstructionKind, Strategy, StrategyConfig};
