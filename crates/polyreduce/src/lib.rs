//! polyreduce: Pure polyline simplification engine (sans-IO).
//!
//! Reduces large point series (chart data, GPS tracks) to a visually
//! equivalent subset under a distance tolerance, in two stages:
//! radial-distance pre-filter -> Douglas-Peucker refinement.
//!
//! The engine is generic over any point type implementing [`Vertex`] and
//! only ever selects from its input, so the output is always an
//! order-preserving subsequence that keeps the first and last points.
//!
//! This crate has **no I/O dependencies**: [`input`] parses JSON text the
//! caller has already read, and all file and terminal handling lives in
//! `polyreduce-bench`.

pub mod diagnostics;
pub mod distance;
pub mod douglas_peucker;
pub mod input;
pub mod radial;
pub mod simplify;
pub mod types;

pub use diagnostics::{Clock, SimplifyDiagnostics, WebClock, simplify_with_diagnostics};
pub use distance::{square_distance, square_segment_distance};
pub use douglas_peucker::douglas_peucker;
pub use input::{InputError, parse_points, parse_polylines};
pub use radial::radial_distance;
pub use simplify::{simplify, simplify_paths, simplify_polyline, simplify_with};
pub use types::{Point, Polyline, Quality, SimplifyConfig, Vertex, square_tolerance};
