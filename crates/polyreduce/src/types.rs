//! Shared types for the polyreduce simplification engine.

use serde::{Deserialize, Serialize};

/// Anything with a 2D position the engine can measure.
///
/// The engine only reads coordinates and clones the points it keeps; it
/// never constructs new points. Implement this for your own point type to
/// simplify it directly without converting to [`Point`] first.
pub trait Vertex {
    /// Horizontal coordinate.
    fn x(&self) -> f64;
    /// Vertical coordinate.
    fn y(&self) -> f64;
}

impl<V: Vertex + ?Sized> Vertex for &V {
    fn x(&self) -> f64 {
        (**self).x()
    }

    fn y(&self) -> f64 {
        (**self).y()
    }
}

impl Vertex for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }

    fn y(&self) -> f64 {
        self.1
    }
}

impl Vertex for [f64; 2] {
    fn x(&self) -> f64 {
        self[0]
    }

    fn y(&self) -> f64 {
        self[1]
    }
}

impl Vertex for geo::Coord<f64> {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl Vertex for geo::Point<f64> {
    fn x(&self) -> f64 {
        self.0.x
    }

    fn y(&self) -> f64 {
        self.0.y
    }
}

/// A 2D point in the caller's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        crate::distance::square_distance(&self, &other)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

impl Vertex for Point {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<geo::Coord<f64>> for Point {
    fn from(c: geo::Coord<f64>) -> Self {
        Self { x: c.x, y: c.y }
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// A sequence of connected points forming a path, such as a chart series
/// or a GPS track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Create a new polyline from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polyline has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polyline.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polyline and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

impl From<geo::LineString<f64>> for Polyline {
    fn from(line: geo::LineString<f64>) -> Self {
        Self(line.0.into_iter().map(Point::from).collect())
    }
}

impl From<Polyline> for geo::LineString<f64> {
    fn from(polyline: Polyline) -> Self {
        Self::new(polyline.0.into_iter().map(geo::Coord::from).collect())
    }
}

/// Which stages of the engine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    /// Radial-distance pre-filter followed by Douglas-Peucker refinement.
    #[default]
    Fast,
    /// Douglas-Peucker refinement only. Slower on dense input, but every
    /// kept point is chosen by perpendicular deviation alone.
    High,
}

impl Quality {
    /// Returns `true` when the radial pre-filter is skipped.
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

/// Parameters for a simplification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyConfig {
    /// Maximum deviation, in the same units as the point coordinates.
    ///
    /// `None` selects a *squared* tolerance of `1.0` (see
    /// [`square_tolerance`](Self::square_tolerance)).
    pub tolerance: Option<f64>,

    /// Whether to run the radial pre-filter.
    pub quality: Quality,
}

impl SimplifyConfig {
    /// Default tolerance used by [`Default`] and the CLI.
    pub const DEFAULT_TOLERANCE: f64 = 1.0;

    /// Squared tolerance used when none is given.
    pub const DEFAULT_SQUARE_TOLERANCE: f32 = 1.0;

    /// Create a config with an explicit tolerance.
    #[must_use]
    pub const fn new(tolerance: Option<f64>, quality: Quality) -> Self {
        Self { tolerance, quality }
    }

    /// The squared tolerance every distance is compared against.
    ///
    /// Comparisons run at single precision: the tolerance is narrowed to
    /// `f32` and squared there. An absent tolerance yields
    /// [`DEFAULT_SQUARE_TOLERANCE`](Self::DEFAULT_SQUARE_TOLERANCE)
    /// directly, not the square of a default tolerance.
    #[must_use]
    pub fn square_tolerance(&self) -> f32 {
        square_tolerance(self.tolerance)
    }
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            tolerance: Some(Self::DEFAULT_TOLERANCE),
            quality: Quality::default(),
        }
    }
}

/// Squares an optional tolerance at single precision.
///
/// See [`SimplifyConfig::square_tolerance`].
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn square_tolerance(tolerance: Option<f64>) -> f32 {
    tolerance.map_or(SimplifyConfig::DEFAULT_SQUARE_TOLERANCE, |t| {
        let t = t as f32;
        t * t
    })
}
