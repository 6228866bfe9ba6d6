//! Instance-size dispatch for construction and search settings.
//!
//! Small instances can afford the strongest pipeline: greedy-edge
//! construction, best-improvement scans with Or-opt, and guided local
//! search to climb out of 2-opt optima. Past
//! [`StrategyConfig::large_instance_threshold`] cities the per-pass
//! cost dominates the budget, so large instances switch to
//! nearest-neighbor construction with plain first-improvement descent
//! and no Or-opt.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::distance::CostModel;
use crate::local_search::MoveSelection;
use crate::policy::PolicyKind;

/// Which constructive heuristic seeds the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructionKind {
    NearestNeighbor,
    GreedyEdge,
}

/// Runtime tunables for a solve.
///
/// `Default::default()` matches the behavior of [`solve`](crate::solve);
/// [`solve_with_config`](crate::solve_with_config) accepts adjusted
/// copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Wall-clock budget for the whole solve, construction included.
    pub time_budget: Duration,
    /// Instances below this city count precompute the full distance
    /// matrix; larger ones compute distances on demand.
    pub matrix_threshold: usize,
    /// Neighbor-list size for candidate move generation.
    pub neighbor_k: usize,
    /// Instances above this city count use the lighter pipeline.
    pub large_instance_threshold: usize,
    /// Distance rounding applied to every edge.
    pub cost_model: CostModel,
    /// Independent search starts; the best tour wins.
    pub restarts: usize,
    /// Base seed for stochastic policies; restart `r` derives its own.
    pub seed: u64,
    /// Forces an acceptance policy instead of the size-based choice.
    pub policy: Option<PolicyKind>,
    /// Guided local search penalty scale.
    pub gls_alpha: f64,
    /// Simulated annealing start temperature.
    pub sa_initial_temperature: f64,
    /// Temperature at which annealing is considered frozen.
    pub sa_min_temperature: f64,
    /// Geometric cooling factor applied per accepted move.
    pub sa_cooling_rate: f64,
    /// Edges remembered by tabu search before the oldest expires.
    pub tabu_tenure: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(120),
            matrix_threshold: 2_000,
            neighbor_k: 12,
            large_instance_threshold: 1_000,
            cost_model: CostModel::default(),
            restarts: 1,
            seed: 0,
            policy: None,
            gls_alpha: 0.3,
            sa_initial_temperature: 1_000.0,
            sa_min_temperature: 1e-4,
            sa_cooling_rate: 0.9999,
            tabu_tenure: 24,
        }
    }
}

/// Concrete pipeline picked for one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    pub construction: ConstructionKind,
    pub policy: PolicyKind,
    pub move_selection: MoveSelection,
    pub use_or_opt: bool,
}

impl Strategy {
    /// Picks the pipeline for an `n`-city instance.
    ///
    /// `config.policy` overrides the acceptance policy only; the
    /// construction and scan settings still follow the instance size.
    pub fn select(n: usize, config: &StrategyConfig) -> Self {
        let mut strategy = if n > config.large_instance_threshold {
            Self {
                construction: ConstructionKind::NearestNeighbor,
                policy: PolicyKind::PlainDescent,
                move_selection: MoveSelection::FirstImprovement,
                use_or_opt: false,
            }
        } else {
            Self {
                construction: ConstructionKind::GreedyEdge,
                policy: PolicyKind::GuidedLocalSearch,
                move_selection: MoveSelection::BestImprovement,
                use_or_opt: true,
            }
        };
        if let Some(kind) = config.policy {
            strategy.policy = kind;
        }
        strategy
    }
}
