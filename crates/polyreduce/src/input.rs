//! JSON point-list parsing.
//!
//! Point series usually arrive as JSON coordinate lists exported from a
//! charting or GPS tool. Three shapes are accepted for a single series:
//!
//! ```text
//! [[0.0, 1.0], [2.0, 3.0]]
//! [{"x": 0.0, "y": 1.0}, {"x": 2.0, "y": 3.0}]
//! {"points": [[0.0, 1.0], [2.0, 3.0]]}
//! ```
//!
//! Pairs and objects may be mixed within one list. A document holding
//! several series is a JSON array of single-series values.
//!
//! Parsing is sans-IO: callers read the text however they like.

use serde::Deserialize;

use crate::types::{Point, Polyline};

/// Errors that can occur while parsing point input.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The input text is empty or whitespace only.
    #[error("empty input")]
    EmptyInput,

    /// The input is not valid JSON or does not have a supported shape.
    #[error("invalid point data: {0}")]
    Json(#[from] serde_json::Error),
}

/// One point as written in the input.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPoint {
    Pair([f64; 2]),
    Object { x: f64, y: f64 },
}

impl From<RawPoint> for Point {
    fn from(raw: RawPoint) -> Self {
        match raw {
            RawPoint::Pair([x, y]) | RawPoint::Object { x, y } => Self::new(x, y),
        }
    }
}

/// One series as written in the input.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeries {
    List(Vec<RawPoint>),
    Wrapped { points: Vec<RawPoint> },
}

impl RawSeries {
    fn into_points(self) -> Vec<Point> {
        match self {
            Self::List(points) | Self::Wrapped { points } => {
                points.into_iter().map(Point::from).collect()
            }
        }
    }
}

/// A whole document: several series, or just one.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Many(Vec<RawSeries>),
    One(RawSeries),
}

/// Parse a single point series.
///
/// # Errors
///
/// Returns [`InputError::EmptyInput`] if `json` is blank.
/// Returns [`InputError::Json`] if `json` is not a supported point list.
pub fn parse_points(json: &str) -> Result<Vec<Point>, InputError> {
    if json.trim().is_empty() {
        return Err(InputError::EmptyInput);
    }
    let series: RawSeries = serde_json::from_str(json)?;
    Ok(series.into_points())
}

/// Parse a document holding one or more point series.
///
/// A single series is returned as a one-element vector. A bare `[]` is
/// read as a document with no series and yields an empty vector, whereas
/// [`parse_points`] reads the same text as one empty series.
///
/// # Errors
///
/// Returns [`InputError::EmptyInput`] if `json` is blank.
/// Returns [`InputError::Json`] if `json` is neither a series nor an array
/// of series.
pub fn parse_polylines(json: &str) -> Result<Vec<Polyline>, InputError> {
    if json.trim().is_empty() {
        return Err(InputError::EmptyInput);
    }
    let document: RawDocument = serde_json::from_str(json)?;
    let polylines = match document {
        RawDocument::Many(series) => series
            .into_iter()
            .map(|s| Polyline::new(s.into_points()))
            .collect(),
        RawDocument::One(series) => vec![Polyline::new(series.into_points())],
    };
    Ok(polylines)
}
