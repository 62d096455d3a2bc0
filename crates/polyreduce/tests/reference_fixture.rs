//! Integration test: output counts for the 36,862-point reference track.
//!
//! The fixture is not checked in. Drop it at `tests/data/reference.json`
//! (any shape `polyreduce::parse_points` accepts) and run with
//! `cargo test -- --ignored`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use polyreduce::Quality;

const EXPECTED: [(f64, usize); 7] = [
    (0.0, 36_861),
    (0.1, 1_014),
    (0.5, 243),
    (1.0, 129),
    (2.0, 64),
    (4.0, 37),
    (5.0, 30),
];

#[test]
#[ignore = "requires tests/data/reference.json"]
fn reference_counts() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/reference.json");
    let text = std::fs::read_to_string(&path).expect("reference fixture should be readable");
    let points = polyreduce::parse_points(&text).unwrap();
    assert_eq!(points.len(), 36_862);

    for (tolerance, expected) in EXPECTED {
        let out = polyreduce::simplify(&points, Some(tolerance), Quality::Fast);
        assert_eq!(out.len(), expected, "tolerance {tolerance}");
    }
}
