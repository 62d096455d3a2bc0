//! Simplification diagnostics: timing and point counts for each stage.
//!
//! These diagnostics are permanent instrumentation intended for tolerance
//! tuning. [`simplify_with_diagnostics`] returns exactly what
//! [`simplify_with`](crate::simplify_with) returns, plus the metrics.
//!
//! Time is read through the [`Clock`] trait so callers (and tests) can
//! substitute their own source. [`WebClock`] uses the `web-time` crate,
//! which is `performance.now()` on WASM and `std::time::Instant` on native.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::douglas_peucker::douglas_peucker;
use crate::radial::radial_distance;
use crate::types::{Quality, SimplifyConfig, Vertex};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Source of monotonic timestamps.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant;

    /// Current timestamp.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// [`Clock`] backed by [`web_time::Instant`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WebClock;

impl Clock for WebClock {
    type Instant = web_time::Instant;

    fn now(&self) -> Self::Instant {
        web_time::Instant::now()
    }

    fn elapsed(&self, since: &Self::Instant) -> Duration {
        since.elapsed()
    }
}

/// Diagnostics collected from a single simplification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifyDiagnostics {
    /// Radial-distance pre-filter (absent for [`Quality::High`]).
    pub radial: Option<StageDiagnostics>,
    /// Douglas-Peucker refinement.
    pub refinement: StageDiagnostics,
    /// Total wall-clock duration of the run (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Summary counts across both stages.
    pub summary: SimplifySummary,
}

/// Diagnostics for a single stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics.
    pub metrics: StageMetrics,
}

/// Stage-specific metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Radial-distance pre-filter metrics.
    Radial {
        /// Points entering the stage.
        points_before: usize,
        /// Points leaving the stage.
        points_after: usize,
        /// Reduction ratio: `1.0 - (after / before)`.
        reduction_ratio: f64,
    },
    /// Douglas-Peucker refinement metrics.
    Refinement {
        /// Points entering the stage.
        points_before: usize,
        /// Points leaving the stage.
        points_after: usize,
        /// Reduction ratio: `1.0 - (after / before)`.
        reduction_ratio: f64,
    },
}

/// High-level summary for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifySummary {
    /// Tolerance as configured.
    pub tolerance: Option<f64>,
    /// Squared tolerance distances were compared against.
    pub square_tolerance: f32,
    /// Which stages ran.
    pub quality: Quality,
    /// Points in the input.
    pub input_points: usize,
    /// Points in the output.
    pub output_points: usize,
    /// Reduction ratio: `1.0 - (output / input)`.
    pub reduction_ratio: f64,
}

/// Simplify `points` and record per-stage diagnostics.
///
/// The returned points are identical to those of
/// [`simplify_with`](crate::simplify_with) for the same input and config.
#[must_use = "returns the simplified points and their diagnostics"]
pub fn simplify_with_diagnostics<P, C>(
    points: &[P],
    config: &SimplifyConfig,
    clock: &C,
) -> (Vec<P>, SimplifyDiagnostics)
where
    P: Vertex + Clone,
    C: Clock,
{
    let square_tolerance = config.square_tolerance();
    let run_start = clock.now();

    let (radial, filtered) = if config.quality.is_high() {
        (None, None)
    } else {
        let start = clock.now();
        let filtered = radial_distance(points, square_tolerance);
        let diag = StageDiagnostics {
            duration: clock.elapsed(&start),
            metrics: StageMetrics::Radial {
                points_before: points.len(),
                points_after: filtered.len(),
                reduction_ratio: reduction_ratio(points.len(), filtered.len()),
            },
        };
        (Some(diag), Some(filtered))
    };

    let refine_input = filtered.as_deref().unwrap_or(points);
    let start = clock.now();
    let refined = douglas_peucker(refine_input, square_tolerance);
    let refinement = StageDiagnostics {
        duration: clock.elapsed(&start),
        metrics: StageMetrics::Refinement {
            points_before: refine_input.len(),
            points_after: refined.len(),
            reduction_ratio: reduction_ratio(refine_input.len(), refined.len()),
        },
    };

    let total_duration = clock.elapsed(&run_start);
    let summary = SimplifySummary {
        tolerance: config.tolerance,
        square_tolerance,
        quality: config.quality,
        input_points: points.len(),
        output_points: refined.len(),
        reduction_ratio: reduction_ratio(points.len(), refined.len()),
    };

    (
        refined,
        SimplifyDiagnostics {
            radial,
            refinement,
            total_duration,
            summary,
        },
    )
}

impl SimplifyDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "Simplification Diagnostics Report\n{}",
            "=".repeat(60)
        ));
        let tolerance = self
            .summary
            .tolerance
            .map_or_else(|| "default".to_string(), |t| format!("{t}"));
        lines.push(format!(
            "Tolerance: {tolerance} (squared {})  Quality: {:?}",
            self.summary.square_tolerance, self.summary.quality,
        ));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<24} {:>10} {:>10}  {}",
            "Stage", "Duration", "% Total", "Details"
        ));
        lines.push("-".repeat(80));

        let total_ms = duration_ms(self.total_duration);

        let mut stages: Vec<(&str, &StageDiagnostics)> = Vec::new();
        if let Some(ref radial) = self.radial {
            stages.push(("Radial Pre-filter", radial));
        }
        stages.push(("Refinement", &self.refinement));

        for (name, diag) in &stages {
            let ms = duration_ms(diag.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let details = format_metrics(&diag.metrics);
            lines.push(format!("{name:<24} {ms:>8.3}ms {pct:>9.1}%  {details}"));
        }

        lines.push(String::new());
        lines.push(format!(
            "Points: {} -> {}  ({:.1}% reduction)",
            self.summary.input_points,
            self.summary.output_points,
            self.summary.reduction_ratio * 100.0,
        ));

        lines.join("\n")
    }
}

/// `1.0 - after / before`, or `0.0` for empty input.
#[allow(clippy::cast_precision_loss)]
fn reduction_ratio(before: usize, after: usize) -> f64 {
    if before == 0 {
        0.0
    } else {
        1.0 - after as f64 / before as f64
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Format stage metrics into a compact detail string.
fn format_metrics(metrics: &StageMetrics) -> String {
    match metrics {
        StageMetrics::Radial {
            points_before,
            points_after,
            reduction_ratio,
        }
        | StageMetrics::Refinement {
            points_before,
            points_after,
            reduction_ratio,
        } => format!(
            "{points_before}->{points_after} pts ({:.1}% reduction)",
            reduction_ratio * 100.0,
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::types::Point;

    /// Clock that advances one millisecond per reading.
    #[derive(Default)]
    struct TickClock {
        ticks: Cell<u64>,
    }

    impl Clock for TickClock {
        type Instant = u64;

        fn now(&self) -> u64 {
            let t = self.ticks.get();
            self.ticks.set(t + 1);
            t
        }

        fn elapsed(&self, since: &u64) -> Duration {
            Duration::from_millis(self.now() - since)
        }
    }

    fn wiggle(n: u32) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let x = f64::from(i) * 0.25;
                Point::new(x, (x * 1.7).sin() * 2.0)
            })
            .collect()
    }

    #[test]
    fn duration_ms_converts_correctly() {
        let d = Duration::from_millis(1234);
        let ms = duration_ms(d);
        assert!((ms - 1234.0).abs() < 0.01);
    }

    #[test]
    fn reduction_ratio_handles_empty() {
        assert!(reduction_ratio(0, 0).abs() < f64::EPSILON);
        assert!((reduction_ratio(10, 4) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn output_matches_simplify_with() {
        let points = wiggle(400);
        for config in [
            SimplifyConfig::new(Some(0.3), Quality::Fast),
            SimplifyConfig::new(Some(0.3), Quality::High),
            SimplifyConfig::new(None, Quality::Fast),
        ] {
            let (out, _) = simplify_with_diagnostics(&points, &config, &TickClock::default());
            assert_eq!(out, crate::simplify_with(&points, &config), "{config:?}");
        }
    }

    #[test]
    fn short_input_matches_simplify_with() {
        let points = vec![Point::new(0.0, 0.0), Point::new(0.0, 0.0)];
        let config = SimplifyConfig::default();
        let (out, diag) = simplify_with_diagnostics(&points, &config, &TickClock::default());
        assert_eq!(out, points);
        assert_eq!(diag.summary.output_points, 2);
    }

    #[test]
    fn radial_stage_recorded_only_for_fast() {
        let points = wiggle(100);
        let clock = TickClock::default();

        let fast = SimplifyConfig::new(Some(0.5), Quality::Fast);
        let (_, diag) = simplify_with_diagnostics(&points, &fast, &clock);
        assert!(diag.radial.is_some());

        let high = SimplifyConfig::new(Some(0.5), Quality::High);
        let (_, diag) = simplify_with_diagnostics(&points, &high, &clock);
        assert!(diag.radial.is_none());
        assert!(matches!(
            diag.refinement.metrics,
            StageMetrics::Refinement {
                points_before: 100,
                ..
            }
        ));
    }

    #[test]
    fn counts_chain_between_stages() {
        let points = wiggle(300);
        let config = SimplifyConfig::new(Some(0.2), Quality::Fast);
        let (out, diag) = simplify_with_diagnostics(&points, &config, &TickClock::default());

        let radial_after = match diag.radial {
            Some(StageDiagnostics {
                metrics: StageMetrics::Radial { points_after, .. },
                ..
            }) => Some(points_after),
            _ => None,
        };
        let (refine_before, refined) = match diag.refinement.metrics {
            StageMetrics::Refinement {
                points_before,
                points_after,
                ..
            } => (Some(points_before), points_after),
            StageMetrics::Radial { .. } => (None, 0),
        };
        assert!(radial_after.is_some());
        assert_eq!(radial_after, refine_before);
        assert_eq!(refined, out.len());
        assert_eq!(diag.summary.input_points, 300);
        assert!(diag.total_duration >= diag.refinement.duration);
    }

    #[test]
    fn json_round_trip() {
        let points = wiggle(50);
        let (_, diag) =
            simplify_with_diagnostics(&points, &SimplifyConfig::default(), &TickClock::default());
        let json = serde_json::to_string(&diag).unwrap();
        let back: SimplifyDiagnostics = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_duration, diag.total_duration);
        assert_eq!(back.summary.output_points, diag.summary.output_points);
    }

    #[test]
    fn rejects_negative_duration() {
        let json = r#"{"duration":-1.0,"metrics":{"Refinement":{"points_before":1,"points_after":1,"reduction_ratio":0.0}}}"#;
        assert!(serde_json::from_str::<StageDiagnostics>(json).is_err());
    }

    #[test]
    fn report_produces_nonempty_string() {
        let points = wiggle(200);
        let (_, diag) = simplify_with_diagnostics(
            &points,
            &SimplifyConfig::new(Some(0.4), Quality::Fast),
            &TickClock::default(),
        );
        let report = diag.report();
        assert!(report.contains("Simplification Diagnostics Report"));
        assert!(report.contains("Radial Pre-filter"));
        assert!(report.contains("Refinement"));
        assert!(report.contains("Points: 200 -> "));
    }

    #[test]
    fn web_clock_measures_non_negative_time() {
        let clock = WebClock;
        let start = clock.now();
        assert!(clock.elapsed(&start) >= Duration::ZERO);
    }
}
