//! Two-stage polyline simplification.
//!
//! An optional radial-distance pre-filter ([`radial_distance`]) followed by
//! Douglas-Peucker refinement ([`douglas_peucker`]). The pre-filter is
//! skipped for [`Quality::High`].
//!
//! Every entry point returns an order-preserving subsequence of its input;
//! points are cloned, never synthesized.

use crate::douglas_peucker::douglas_peucker;
use crate::radial::radial_distance;
use crate::types::{Polyline, Quality, SimplifyConfig, Vertex, square_tolerance};

/// Simplify a sequence of points.
///
/// `tolerance` is the maximum deviation in coordinate units; `None` means
/// a *squared* tolerance of `1.0`. Sequences of two points or fewer are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use polyreduce::{Quality, simplify};
///
/// let track = [(0.0, 0.0), (1.0, 0.05), (2.0, -0.05), (3.0, 0.0)];
/// let simplified = simplify(&track, Some(0.5), Quality::Fast);
/// assert_eq!(simplified, vec![(0.0, 0.0), (3.0, 0.0)]);
/// ```
#[must_use = "returns the simplified points"]
pub fn simplify<P: Vertex + Clone>(
    points: &[P],
    tolerance: Option<f64>,
    quality: Quality,
) -> Vec<P> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let square_tolerance = square_tolerance(tolerance);

    let refined = if quality.is_high() {
        douglas_peucker(points, square_tolerance)
    } else {
        let filtered = radial_distance(points, square_tolerance);
        log::trace!(
            "radial pre-filter kept {} of {} points",
            filtered.len(),
            points.len(),
        );
        douglas_peucker(&filtered, square_tolerance)
    };

    log::debug!(
        "simplified {} -> {} points (sq tolerance {square_tolerance}, {quality:?})",
        points.len(),
        refined.len(),
    );
    refined
}

/// Simplify a sequence of points using the parameters in `config`.
#[must_use = "returns the simplified points"]
pub fn simplify_with<P: Vertex + Clone>(points: &[P], config: &SimplifyConfig) -> Vec<P> {
    simplify(points, config.tolerance, config.quality)
}

/// Simplify a single polyline.
#[must_use = "returns the simplified polyline"]
pub fn simplify_polyline(polyline: &Polyline, config: &SimplifyConfig) -> Polyline {
    Polyline::new(simplify_with(polyline.points(), config))
}

/// Simplify multiple polylines, each independently.
#[must_use = "returns the simplified polylines"]
pub fn simplify_paths(polylines: &[Polyline], config: &SimplifyConfig) -> Vec<Polyline> {
    polylines
        .iter()
        .map(|pl| simplify_polyline(pl, config))
        .collect()
}
