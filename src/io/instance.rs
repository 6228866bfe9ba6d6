//! Contest-format instance parsing and solution rendering.
//!
//! The instance format is line-oriented: the first line holds the city
//! count, followed by one `x y` coordinate pair per line. Solutions
//! render as two lines: the rounded tour length with an optimality flag
//! of 1, then the visiting order.

use crate::error::{Result, SolverError};
use crate::model::Point;
use crate::solver::SolveResult;

/// Parses a contest-format instance into city coordinates.
///
/// Trailing blank lines are tolerated; anything else after the declared
/// number of cities is an error.
///
/// # Examples
///
/// ```
/// let points = tourkit::io::parse_instance("3\n0 0\n4 0\n4 3\n").unwrap();
/// assert_eq!(points.len(), 3);
/// assert_eq!(points[2].y, 3.0);
/// ```
pub fn parse_instance(text: &str) -> Result<Vec<Point>> {
    let mut lines = text.lines();
    let header = lines.next().unwrap_or("");
    let expected: usize = header.trim().parse().map_err(|_| SolverError::Parse {
        line: 1,
        message: format!("expected a city count, got {header:?}"),
    })?;

    let mut points = Vec::with_capacity(expected);
    for (idx, raw) in lines.enumerate() {
        let line = idx + 2;
        let text = raw.trim();
        if points.len() == expected {
            if text.is_empty() {
                continue;
            }
            return Err(SolverError::Parse {
                line,
                message: format!("unexpected content after {expected} cities: {text:?}"),
            });
        }
        points.push(parse_coord(line, text)?);
    }

    if points.len() < expected {
        return Err(SolverError::Parse {
            line: points.len() + 2,
            message: format!("expected {expected} cities, found {}", points.len()),
        });
    }
    Ok(points)
}

fn parse_coord(line: usize, text: &str) -> Result<Point> {
    let mut tokens = text.split_whitespace();
    let (Some(x), Some(y), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(SolverError::Parse {
            line,
            message: format!("expected `x y`, got {text:?}"),
        });
    };
    let x: f64 = x.parse().map_err(|_| SolverError::Parse {
        line,
        message: format!("invalid x coordinate {x:?}"),
    })?;
    let y: f64 = y.parse().map_err(|_| SolverError::Parse {
        line,
        message: format!("invalid y coordinate {y:?}"),
    })?;
    Ok(Point::new(x, y))
}

/// Renders a solve result in the contest output format.
///
/// Line 1 is the tour length rounded to an integer followed by the
/// literal flag `1`; line 2 is the visiting order from city 0.
pub fn render_solution(result: &SolveResult) -> String {
    let order = result
        .tour
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} 1\n{}\n", result.length.round() as i64, order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyKind;
    use crate::solver::{SolveMetadata, Termination};
    use crate::strategy::ConstructionKind;

    #[test]
    fn test_parses_simple_instance() {
        let points = parse_instance("3\n0 0\n4.5 0\n4 3\n").unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], Point::new(4.5, 0.0));
    }

    #[test]
    fn test_tolerates_trailing_blank_lines() {
        let points = parse_instance("2\n0 0\n1 1\n\n  \n").unwrap();
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_rejects_bad_city_count() {
        let err = parse_instance("three\n0 0\n").unwrap_err();
        assert!(matches!(err, SolverError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_rejects_wrong_token_count() {
        let err = parse_instance("2\n0 0\n1 1 1\n").unwrap_err();
        assert!(matches!(err, SolverError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_rejects_non_numeric_coordinate() {
        let err = parse_instance("2\n0 0\n1 east\n").unwrap_err();
        assert!(matches!(err, SolverError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_rejects_truncated_instance() {
        let err = parse_instance("3\n0 0\n1 1\n").unwrap_err();
        assert!(matches!(err, SolverError::Parse { line: 4, .. }));
    }

    #[test]
    fn test_rejects_trailing_content() {
        let err = parse_instance("1\n0 0\n1 1\n").unwrap_err();
        assert!(matches!(err, SolverError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_renders_contest_format() {
        let result = SolveResult {
            tour: vec![0, 2, 1],
            length: 5.4,
            metadata: SolveMetadata {
                construction: ConstructionKind::GreedyEdge,
                policy: PolicyKind::PlainDescent,
                termination: Termination::Converged,
                elapsed_secs: 0.01,
                passes: 1,
                moves_applied: 0,
                restarts: 1,
            },
        };
        assert_eq!(render_solution(&result), "5 1\n0 2 1\n");
    }
}
