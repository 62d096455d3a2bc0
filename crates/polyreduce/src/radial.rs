//! Radial-distance pre-filter.
//!
//! A single linear pass that drops every point lying within the tolerance
//! of the most recently *kept* point. It is much cheaper than
//! Douglas-Peucker and, on dense input, removes most of the points before
//! refinement runs.

use crate::distance::{narrow, square_distance};
use crate::types::Vertex;

/// Filter `points` by distance to the last kept point.
///
/// `square_tolerance` is the squared tolerance (see
/// [`square_tolerance`](crate::types::square_tolerance)). The first point is
/// always kept. A point is kept when its squared distance to the last kept
/// point exceeds `square_tolerance`. The final input point is always
/// present in the output: if it was not kept by the pass it is appended,
/// unless it is coordinate-equal to the last kept point.
///
/// Sequences of two points or fewer are returned unchanged.
#[must_use = "returns the filtered points"]
pub fn radial_distance<P: Vertex + Clone>(points: &[P], square_tolerance: f32) -> Vec<P> {
    let [first, .., last] = points else {
        return points.to_vec();
    };
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut kept = vec![first.clone()];
    let mut prev = first;

    for point in &points[1..] {
        if narrow(square_distance(point, prev)) > square_tolerance {
            kept.push(point.clone());
            prev = point;
        }
    }

    if !same_position(prev, last) {
        kept.push(last.clone());
    }

    kept
}

/// Exact coordinate equality.
#[allow(clippy::float_cmp)]
fn same_position<P: Vertex>(a: &P, b: &P) -> bool {
    a.x() == b.x() && a.y() == b.y()
}
