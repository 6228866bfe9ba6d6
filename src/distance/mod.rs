//! City-to-city distance computation.
//!
//! Provides symmetric Euclidean distances under a configurable cost model,
//! precomputed as a dense matrix for small instances and computed on
//! demand for large ones.

mod provider;

pub use provider::{CostModel, DistanceProvider};
