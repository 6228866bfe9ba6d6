//! TSPLIB EUC_2D conversion.
//!
//! The writer emits the minimal header dialect (`NAME`, `TYPE`,
//! `COMMENT`, `DIMENSION`, `EDGE_WEIGHT_TYPE: EUC_2D`) followed by a
//! `NODE_COORD_SECTION` with tab-indented 1-based coordinate lines and
//! a closing `EOF`. The reader accepts the same dialect back: unknown
//! header keys and sections are ignored, malformed coordinate lines are
//! errors.

use std::io::{self, Write};

use crate::error::{Result, SolverError};
use crate::model::Point;

/// Writes an instance in TSPLIB EUC_2D format.
///
/// # Arguments
///
/// * `w` — Destination (file, buffer, ...)
/// * `name` — `NAME` header value
/// * `comment` — `COMMENT` header value
/// * `points` — City coordinates, written 1-based
pub fn write_instance<W: Write>(
    w: &mut W,
    name: &str,
    comment: &str,
    points: &[Point],
) -> io::Result<()> {
    writeln!(w, "NAME: {name}")?;
    writeln!(w, "TYPE: TSP")?;
    writeln!(w, "COMMENT: {comment}")?;
    writeln!(w, "DIMENSION: {}", points.len())?;
    writeln!(w, "EDGE_WEIGHT_TYPE: EUC_2D")?;
    writeln!(w, "NODE_COORD_SECTION")?;
    for (i, p) in points.iter().enumerate() {
        writeln!(w, "\t{} {} {}", i + 1, p.x, p.y)?;
    }
    writeln!(w, "EOF")
}

enum ReaderState {
    Header,
    Coords,
}

/// Parses a TSPLIB EUC_2D instance back into city coordinates.
///
/// Coordinates are taken from `NODE_COORD_SECTION` in file order; the
/// 1-based ids on each line are not interpreted. A `DIMENSION` header,
/// when present, must match the number of coordinate lines.
pub fn parse_instance(text: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    let mut dimension: Option<usize> = None;
    let mut state = ReaderState::Header;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("EOF") {
            break;
        }

        match state {
            ReaderState::Header => {
                if line.eq_ignore_ascii_case("NODE_COORD_SECTION") {
                    state = ReaderState::Coords;
                } else if let Some((key, value)) = line.split_once(':') {
                    if key.trim().eq_ignore_ascii_case("DIMENSION") {
                        let value = value.trim();
                        dimension = Some(value.parse().map_err(|_| SolverError::Parse {
                            line: line_no,
                            message: format!("invalid DIMENSION {value:?}"),
                        })?);
                    }
                }
                // Bare keywords for other sections fall through untouched.
            }
            ReaderState::Coords => {
                if starts_with_number(line) {
                    points.push(parse_coord(line_no, line)?);
                } else {
                    // A non-numeric line ends the coordinate section.
                    state = ReaderState::Header;
                }
            }
        }
    }

    if let Some(dim) = dimension {
        if dim != points.len() {
            return Err(SolverError::InvalidInput(format!(
                "DIMENSION is {dim} but found {} coordinates",
                points.len()
            )));
        }
    }
    if points.is_empty() {
        return Err(SolverError::InvalidInput(
            "no NODE_COORD_SECTION coordinates found".into(),
        ));
    }
    Ok(points)
}

fn starts_with_number(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|token| token.parse::<f64>().is_ok())
}

fn parse_coord(line: usize, text: &str) -> Result<Point> {
    let mut tokens = text.split_whitespace();
    let (Some(_id), Some(x), Some(y), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(SolverError::Parse {
            line,
            message: format!("expected `id x y`, got {text:?}"),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(4.5, 0.0),
            Point::new(4.0, 3.0),
        ]
    }

    #[test]
    fn test_writes_euc_2d_dialect() {
        let mut out = Vec::new();
        write_instance(&mut out, "tri", "three cities", &sample_points()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "NAME: tri\n\
             TYPE: TSP\n\
             COMMENT: three cities\n\
             DIMENSION: 3\n\
             EDGE_WEIGHT_TYPE: EUC_2D\n\
             NODE_COORD_SECTION\n\
             \t1 0 0\n\
             \t2 4.5 0\n\
             \t3 4 3\n\
             EOF\n"
        );
    }

    #[test]
    fn test_round_trips_written_instances() {
        let mut out = Vec::new();
        write_instance(&mut out, "tri", "comment", &sample_points()).unwrap();
        let parsed = parse_instance(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(parsed, sample_points());
    }

    #[test]
    fn test_reader_ignores_unknown_keys_and_sections() {
        let text = "NAME: x\nCAPACITY: 99\nDIMENSION: 2\nEDGE_WEIGHT_TYPE: EUC_2D\n\
                    NODE_COORD_SECTION\n1 1 2\n2 3 4\nDISPLAY_DATA_SECTION\nEOF\n";
        let parsed = parse_instance(text).unwrap();
        assert_eq!(parsed, vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
    }

    #[test]
    fn test_reader_rejects_bad_coord_line() {
        let text = "NODE_COORD_SECTION\n1 1 2\n2 3\nEOF\n";
        let err = parse_instance(text).unwrap_err();
        assert!(matches!(err, SolverError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_reader_rejects_dimension_mismatch() {
        let text = "DIMENSION: 3\nNODE_COORD_SECTION\n1 1 2\nEOF\n";
        let err = parse_instance(text).unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput(_)));
    }

    #[test]
    fn test_reader_stops_at_eof_marker() {
        let text = "DIMENSION: 1\nNODE_COORD_SECTION\n1 1 2\nEOF\n9 9 9\n";
        let parsed = parse_instance(text).unwrap();
        assert_eq!(parsed, vec![Point::new(1.0, 2.0)]);
    }
}
