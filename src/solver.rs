//! Solve facade: validation, strategy dispatch, restarts, and result
//! assembly.
//!
//! [`solve`] and [`solve_with_config`] are the crate entry points. They
//! validate the instance, pick a pipeline with
//! [`Strategy::select`], run the configured number of independent
//! search starts in parallel, and return the best tour with metadata
//! describing what ran.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constructive::{greedy_edge, nearest_neighbor};
use crate::distance::DistanceProvider;
use crate::error::{Result, SolverError};
use crate::local_search::{SearchEngine, SearchOutcome, StopReason};
use crate::model::{Point, Tour};
use crate::neighbor::NeighborIndex;
use crate::policy::{
    AcceptancePolicy, GuidedLocalSearch, PlainDescent, PolicyKind, SimulatedAnnealing, TabuSearch,
};
use crate::strategy::{ConstructionKind, Strategy, StrategyConfig};

/// Why the solve stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The acceptance policy finished before the budget ran out.
    Converged,
    /// The time budget expired.
    TimedOut,
    /// The instance was too small to search (fewer than 3 cities).
    Trivial,
}

impl From<StopReason> for Termination {
    fn from(stop: StopReason) -> Self {
        match stop {
            StopReason::Converged => Termination::Converged,
            StopReason::TimedOut => Termination::TimedOut,
        }
    }
}

/// What ran during a solve, for logs and downstream tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveMetadata {
    pub construction: ConstructionKind,
    pub policy: PolicyKind,
    pub termination: Termination,
    pub elapsed_secs: f64,
    /// Improvement passes completed by the winning restart.
    pub passes: u64,
    /// Moves applied by the winning restart.
    pub moves_applied: u64,
    /// Independent search starts executed.
    pub restarts: usize,
}

/// Best tour found and how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResult {
    /// Visiting order over city indices, starting at city 0.
    pub tour: Vec<usize>,
    /// Tour length under the configured cost model.
    pub length: f64,
    pub metadata: SolveMetadata,
}

/// Solves a Euclidean TSP instance with default settings and the given
/// time budget.
///
/// # Arguments
///
/// * `points` — City coordinates; index in this slice is the city id
/// * `time_budget` — Wall-clock limit for the whole solve
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tourkit::model::Point;
///
/// let corners = vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(0.0, 1.0),
/// ];
/// let result = tourkit::solve(&corners, Duration::from_millis(200)).unwrap();
/// assert_eq!(result.tour[0], 0);
/// assert!((result.length - 4.0).abs() < 1e-10);
/// ```
pub fn solve(points: &[Point], time_budget: Duration) -> Result<SolveResult> {
    let config = StrategyConfig {
        time_budget,
        ..StrategyConfig::default()
    };
    solve_with_config(points, &config)
}

/// Solves a Euclidean TSP instance under explicit settings.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tourkit::model::Point;
/// use tourkit::policy::PolicyKind;
/// use tourkit::StrategyConfig;
///
/// let corners = vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(0.0, 1.0),
/// ];
/// let config = StrategyConfig {
///     time_budget: Duration::from_millis(100),
///     policy: Some(PolicyKind::PlainDescent),
///     ..StrategyConfig::default()
/// };
/// let result = tourkit::solve_with_config(&corners, &config).unwrap();
/// assert_eq!(result.metadata.policy, PolicyKind::PlainDescent);
/// ```
pub fn solve_with_config(points: &[Point], config: &StrategyConfig) -> Result<SolveResult> {
    let started = Instant::now();
    validate(points)?;

    let n = points.len();
    let strategy = Strategy::select(n, config);
    let provider = DistanceProvider::new(points.to_vec(), config.cost_model, config.matrix_threshold);

    if n <= 2 {
        let tour: Vec<usize> = (0..n).collect();
        let length = provider.tour_length(&tour);
        return Ok(SolveResult {
            tour,
            length,
            metadata: SolveMetadata {
                construction: strategy.construction,
                policy: strategy.policy,
                termination: Termination::Trivial,
                elapsed_secs: started.elapsed().as_secs_f64(),
                passes: 0,
                moves_applied: 0,
                restarts: 0,
            },
        });
    }

    let deadline = started + config.time_budget;
    let neighbors = NeighborIndex::build(&provider, config.neighbor_k);
    let restarts = config.restarts.max(1);

    let runs: Vec<(usize, SearchOutcome)> = (0..restarts)
        .into_par_iter()
        .map(|restart| {
            let tour = construct(restart, strategy.construction, &provider, &neighbors);
            let mut policy = build_policy(
                strategy.policy,
                config,
                config.seed.wrapping_add(restart as u64),
            );
            let engine = SearchEngine::new(
                &provider,
                &neighbors,
                strategy.move_selection,
                strategy.use_or_opt,
                deadline,
            );
            (restart, engine.run(tour, policy.as_mut()))
        })
        .collect();

    let (_, outcome) = runs
        .into_iter()
        .min_by(|(ri, a), (rj, b)| {
            a.length
                .partial_cmp(&b.length)
                .expect("tour length should not be NaN")
                .then(ri.cmp(rj))
        })
        .expect("at least one restart runs");

    let elapsed = started.elapsed();
    log::info!(
        "solved {n} cities: length {:.1} in {:.2}s ({} passes, {} moves, {restarts} restarts)",
        outcome.length,
        elapsed.as_secs_f64(),
        outcome.passes,
        outcome.moves_applied,
    );

    Ok(SolveResult {
        tour: outcome.tour.order_from(0),
        length: outcome.length,
        metadata: SolveMetadata {
            construction: strategy.construction,
            policy: strategy.policy,
            termination: outcome.stop.into(),
            elapsed_secs: elapsed.as_secs_f64(),
            passes: outcome.passes,
            moves_applied: outcome.moves_applied,
            restarts,
        },
    })
}

fn validate(points: &[Point]) -> Result<()> {
    if points.is_empty() {
        return Err(SolverError::InvalidInput("instance has no cities".into()));
    }
    for (i, p) in points.iter().enumerate() {
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(SolverError::InvalidInput(format!(
                "city {i} has a non-finite coordinate ({}, {})",
                p.x, p.y
            )));
        }
    }
    Ok(())
}

/// Restart 0 uses the strategy's construction; later restarts seed
/// diversity with nearest-neighbor tours from rotating start cities.
fn construct(
    restart: usize,
    construction: ConstructionKind,
    provider: &DistanceProvider,
    neighbors: &NeighborIndex,
) -> Tour {
    match (restart, construction) {
        (0, ConstructionKind::GreedyEdge) => greedy_edge(provider, neighbors),
        (0, ConstructionKind::NearestNeighbor) => nearest_neighbor(provider, neighbors, 0),
        (r, _) => nearest_neighbor(provider, neighbors, r % provider.len()),
    }
}

fn build_policy(
    kind: PolicyKind,
    config: &StrategyConfig,
    seed: u64,
) -> Box<dyn AcceptancePolicy> {
    match kind {
        PolicyKind::PlainDescent => Box::new(PlainDescent),
        PolicyKind::GuidedLocalSearch => Box::new(GuidedLocalSearch::new(config.gls_alpha)),
        PolicyKind::SimulatedAnnealing => Box::new(SimulatedAnnealing::new(
            config.sa_initial_temperature,
            config.sa_min_temperature,
            config.sa_cooling_rate,
            seed,
        )),
        PolicyKind::TabuSearch => Box::new(TabuSearch::new(config.tabu_tenure)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descent_config(millis: u64) -> StrategyConfig {
        StrategyConfig {
            time_budget: Duration::from_millis(millis),
            policy: Some(PolicyKind::PlainDescent),
            ..StrategyConfig::default()
        }
    }

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_empty_instance_is_rejected() {
        let err = solve(&[], Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput(_)));
    }

    #[test]
    fn test_non_finite_coordinate_is_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let points = vec![Point::new(0.0, 0.0), Point::new(bad, 1.0)];
            let err = solve(&points, Duration::from_secs(1)).unwrap_err();
            assert!(matches!(err, SolverError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_single_city_is_trivial() {
        let result = solve(&[Point::new(3.0, 4.0)], Duration::from_secs(1)).unwrap();
        assert_eq!(result.tour, vec![0]);
        assert_eq!(result.length, 0.0);
        assert_eq!(result.metadata.termination, Termination::Trivial);
    }

    #[test]
    fn test_two_cities_are_trivial() {
        let points = vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
        let result = solve(&points, Duration::from_secs(1)).unwrap();
        assert_eq!(result.tour, vec![0, 1]);
        assert!((result.length - 10.0).abs() < 1e-10);
        assert_eq!(result.metadata.termination, Termination::Trivial);
    }

    #[test]
    fn test_square_converges_to_perimeter() {
        let result = solve_with_config(&unit_square(), &descent_config(500)).unwrap();
        assert_eq!(result.metadata.termination, Termination::Converged);
        assert!((result.length - 4.0).abs() < 1e-10);
        assert_eq!(result.tour[0], 0);
    }

    #[test]
    fn test_tour_is_a_permutation() {
        let points: Vec<Point> = (0..12)
            .map(|i| Point::new(f64::from(i % 4) * 3.0, f64::from(i / 4) * 2.0))
            .collect();
        let result = solve_with_config(&points, &descent_config(500)).unwrap();

        assert_eq!(result.tour[0], 0);
        let mut sorted = result.tour.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_restarts_are_deterministic() {
        let points: Vec<Point> = (0..15)
            .map(|i| Point::new(f64::from(i * 7 % 13), f64::from(i * 5 % 11)))
            .collect();
        let config = StrategyConfig {
            restarts: 4,
            ..descent_config(1_000)
        };
        let a = solve_with_config(&points, &config).unwrap();
        let b = solve_with_config(&points, &config).unwrap();

        assert_eq!(a.tour, b.tour);
        assert_eq!(a.metadata.restarts, 4);
        assert!(a.length <= b.length + 1e-10);
    }

    #[test]
    fn test_large_instance_uses_light_pipeline() {
        let points: Vec<Point> = (0..1_100)
            .map(|i| Point::new(f64::from(i % 34), f64::from(i / 34)))
            .collect();
        let config = StrategyConfig {
            time_budget: Duration::from_millis(300),
            ..StrategyConfig::default()
        };
        let result = solve_with_config(&points, &config).unwrap();

        assert_eq!(
            result.metadata.construction,
            ConstructionKind::NearestNeighbor
        );
        assert_eq!(result.metadata.policy, PolicyKind::PlainDescent);
        assert_eq!(result.tour.len(), 1_100);
    }
}
