//! Squared distance primitives shared by both simplification stages.
//!
//! Everything here stays in squared space so that neither stage ever
//! needs a square root; the tolerance is squared once up front instead.
//!
//! Products are summed without fused multiply-add so results are
//! bit-for-bit reproducible against the reference point counts.

#![allow(clippy::suboptimal_flops)]

use crate::types::Vertex;

/// Squared Euclidean distance between two points.
#[must_use]
pub fn square_distance<A: Vertex + ?Sized, B: Vertex + ?Sized>(a: &A, b: &B) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    dx * dx + dy * dy
}

/// Squared distance from `point` to the segment `[seg_start, seg_end]`.
///
/// The point is projected onto the line through the segment with
/// `t = ((p - s) . (e - s)) / |e - s|^2`. Past the end (`t > 1`) the
/// segment end is used, inside (`0 < t <= 1`) the projection is used, and
/// otherwise the segment start. A zero-length segment degrades to the
/// distance to `seg_start`.
#[must_use]
pub fn square_segment_distance<P, S>(point: &P, seg_start: &S, seg_end: &S) -> f64
where
    P: Vertex + ?Sized,
    S: Vertex + ?Sized,
{
    let mut nearest_x = seg_start.x();
    let mut nearest_y = seg_start.y();
    let dx = seg_end.x() - nearest_x;
    let dy = seg_end.y() - nearest_y;

    if dx != 0.0 || dy != 0.0 {
        let t = ((point.x() - nearest_x) * dx + (point.y() - nearest_y) * dy) / (dx * dx + dy * dy);
        if t > 1.0 {
            nearest_x = seg_end.x();
            nearest_y = seg_end.y();
        } else if t > 0.0 {
            nearest_x += dx * t;
            nearest_y += dy * t;
        }
    }

    let dx = point.x() - nearest_x;
    let dy = point.y() - nearest_y;
    dx * dx + dy * dy
}

/// Narrows a squared distance to the precision tolerances are compared at.
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn narrow(square: f64) -> f32 {
    square as f32
}
