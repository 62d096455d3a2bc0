//! Integration tests: engine-wide properties over generated series.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::cast_precision_loss)]

use polyreduce::{Point, Quality, SimplifyConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A jittery walk: x advances steadily, y wanders.
fn random_walk(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut y = 0.0;
    (0..n)
        .map(|i| {
            y += rng.random_range(-2.0..2.0);
            Point::new(i as f64 * 0.5, y)
        })
        .collect()
}

/// A staircase where both coordinates are non-decreasing.
fn monotone_staircase(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut y = 0.0;
    (0..n)
        .map(|i| {
            y += rng.random_range(0.0..3.0);
            Point::new(i as f64 * 0.5, y)
        })
        .collect()
}

/// Whether `sub` can be obtained from `full` by deleting elements.
fn is_subsequence(sub: &[Point], full: &[Point]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|p| rest.any(|q| q == p))
}

const TOLERANCES: [f64; 6] = [0.0, 0.1, 0.5, 1.0, 2.0, 5.0];

#[test]
fn output_is_subsequence_keeping_endpoints() {
    let points = random_walk(2_000, 7);
    for quality in [Quality::Fast, Quality::High] {
        for tolerance in TOLERANCES {
            let out = polyreduce::simplify(&points, Some(tolerance), quality);
            assert!(out.len() >= 2, "{quality:?} {tolerance}");
            assert!(out.len() <= points.len());
            assert_eq!(out.first(), points.first());
            assert_eq!(out.last(), points.last());
            assert!(is_subsequence(&out, &points), "{quality:?} {tolerance}");
        }
    }
}

#[test]
fn high_quality_is_idempotent() {
    let points = random_walk(3_000, 42);
    for tolerance in TOLERANCES {
        let once = polyreduce::simplify(&points, Some(tolerance), Quality::High);
        let twice = polyreduce::simplify(&once, Some(tolerance), Quality::High);
        assert_eq!(once, twice, "tolerance {tolerance}");
    }
}

#[test]
fn fast_is_idempotent_on_monotone_input() {
    let points = monotone_staircase(3_000, 99);
    for tolerance in TOLERANCES {
        let once = polyreduce::simplify(&points, Some(tolerance), Quality::Fast);
        let twice = polyreduce::simplify(&once, Some(tolerance), Quality::Fast);
        assert_eq!(once, twice, "tolerance {tolerance}");
    }
}

#[test]
fn larger_tolerance_keeps_fewer_points() {
    // Hand-checked: deviations of the interior points from each chord are
    // large enough to peel off one point per doubling of the tolerance.
    let points = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(2.0, 0.0),
        Point::new(3.0, 3.0),
        Point::new(4.0, 0.0),
    ];
    for quality in [Quality::Fast, Quality::High] {
        let counts: Vec<usize> = [0.5, 1.0, 2.0, 4.0]
            .into_iter()
            .map(|t| polyreduce::simplify(&points, Some(t), quality).len())
            .collect();
        assert_eq!(counts, vec![5, 4, 3, 2], "{quality:?}");
    }
}

#[test]
fn short_inputs_returned_unchanged() {
    let cases: [&[Point]; 3] = [
        &[],
        &[Point::new(1.0, 1.0)],
        &[Point::new(1.0, 1.0), Point::new(1.0, 1.0)],
    ];
    for points in cases {
        for quality in [Quality::Fast, Quality::High] {
            assert_eq!(polyreduce::simplify(points, Some(100.0), quality), points);
        }
    }
}

#[test]
fn duplicate_points_collapse() {
    let p = Point::new(3.0, -1.0);
    let points = vec![p; 50];
    assert_eq!(polyreduce::simplify(&points, None, Quality::Fast), vec![p]);
    assert_eq!(
        polyreduce::simplify(&points, None, Quality::High),
        vec![p, p]
    );
}

#[test]
fn zero_tolerance_drops_only_collinear_and_repeated_points() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(2.0, 1.0),
    ];
    let out = polyreduce::simplify(&points, Some(0.0), Quality::Fast);
    assert_eq!(
        out,
        vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 1.0)
        ]
    );
}

#[test]
fn diagnostics_agree_with_plain_simplify() {
    let points = random_walk(1_500, 5);
    for quality in [Quality::Fast, Quality::High] {
        let config = SimplifyConfig::new(Some(1.0), quality);
        let plain = polyreduce::simplify_with(&points, &config);
        let (with_diag, diagnostics) =
            polyreduce::simplify_with_diagnostics(&points, &config, &polyreduce::WebClock);
        assert_eq!(plain, with_diag);
        assert_eq!(diagnostics.summary.input_points, points.len());
        assert_eq!(diagnostics.summary.output_points, plain.len());
        assert_eq!(diagnostics.radial.is_some(), quality == Quality::Fast);
    }
}

#[test]
fn concurrent_calls_match_sequential() {
    let points = random_walk(5_000, 11);
    let expected: Vec<Vec<Point>> = TOLERANCES
        .iter()
        .map(|&t| polyreduce::simplify(&points, Some(t), Quality::Fast))
        .collect();

    let results: Vec<Vec<Point>> = std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(TOLERANCES.len());
        for &t in &TOLERANCES {
            let points = &points;
            let handle = scope.spawn(move || polyreduce::simplify(points, Some(t), Quality::Fast));
            handles.push(handle);
        }
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, expected);
}
