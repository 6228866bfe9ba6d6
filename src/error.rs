//! Error types for tourkit operations.

use thiserror::Error;

/// Errors surfaced by instance parsing and solve entry points.
///
/// Convergence and time-budget expiry are *not* errors: both are normal
/// termination states reported in [`SolveMetadata`](crate::solver::SolveMetadata).
#[derive(Debug, Error)]
pub enum SolverError {
    /// Malformed or truncated instance text. `line` is 1-based.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending line.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// Degenerate instance (e.g. zero cities) rejected before any engine work.
    #[error("invalid instance: {0}")]
    InvalidInput(String),
}

/// Result type alias for tourkit operations.
pub type Result<T> = std::result::Result<T, SolverError>;
