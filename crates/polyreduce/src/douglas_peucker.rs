//! Douglas-Peucker refinement.
//!
//! Keeps the point that deviates most from the chord between two retained
//! points, then repeats on both halves until every chord is within the
//! tolerance of the points it replaces.
//!
//! Ranges are processed from an explicit work-list rather than by call
//! recursion, so stack usage stays constant on long, steadily deviating
//! input. The set of kept points is the same as the recursive form and is
//! emitted in original index order.

use crate::distance::{narrow, square_segment_distance};
use crate::types::Vertex;

/// Simplify `points` with the Douglas-Peucker algorithm.
///
/// `square_tolerance` is the squared tolerance (see
/// [`square_tolerance`](crate::types::square_tolerance)). The first and last
/// points are always kept. Sequences of two points or fewer are returned
/// unchanged.
#[must_use = "returns the simplified points"]
pub fn douglas_peucker<P: Vertex + Clone>(points: &[P], square_tolerance: f32) -> Vec<P> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let kept = mark_kept(points, square_tolerance);

    points
        .iter()
        .zip(&kept)
        .filter(|&(_, k)| *k)
        .map(|(p, _)| p.clone())
        .collect()
}

/// Flag every index the refinement keeps.
fn mark_kept<P: Vertex>(points: &[P], square_tolerance: f32) -> Vec<bool> {
    let last = points.len() - 1;
    let mut kept = vec![false; points.len()];
    kept[0] = true;
    kept[last] = true;

    let mut ranges = vec![(0, last)];
    while let Some((first, last)) = ranges.pop() {
        let Some((index, square_dist)) = farthest(points, first, last, square_tolerance) else {
            log::trace!("range {first}..={last} within tolerance");
            continue;
        };
        log::trace!("range {first}..={last} keeps {index} (sq dist {square_dist})");

        kept[index] = true;
        if last - index > 1 {
            ranges.push((index, last));
        }
        if index - first > 1 {
            ranges.push((first, index));
        }
    }

    kept
}

/// Index strictly between `first` and `last` farthest from their chord,
/// if that distance exceeds `square_tolerance`.
///
/// Ties go to the lowest index.
fn farthest<P: Vertex>(
    points: &[P],
    first: usize,
    last: usize,
    square_tolerance: f32,
) -> Option<(usize, f32)> {
    let start = &points[first];
    let end = &points[last];

    let mut max_square_dist = square_tolerance;
    let mut max_index = None;

    for (offset, point) in points[first + 1..last].iter().enumerate() {
        let square_dist = narrow(square_segment_distance(point, start, end));
        if square_dist > max_square_dist {
            max_square_dist = square_dist;
            max_index = Some(first + 1 + offset);
        }
    }

    max_index.map(|index| (index, max_square_dist))
}
