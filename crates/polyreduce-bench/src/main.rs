//! polyreduce-bench: CLI tool for simplifying point files and tuning tolerances.
//!
//! Loads a JSON point file (one or more series), simplifies every series
//! with configurable parameters, and prints per-stage diagnostics. Useful
//! for:
//!
//! - Comparing `Fast` (radial pre-filter + Douglas-Peucker) with `High`
//!   (Douglas-Peucker only)
//! - Sweeping tolerances to see how many points each one keeps
//! - Measuring per-stage durations on large tracks
//! - Writing simplified output as JSON or SVG for inspection
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin polyreduce-bench -- [OPTIONS] <INPUT>
//! ```
//!
//! Progress messages go through `env_logger`; set `RUST_LOG=debug` to see
//! per-call engine logging as well.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use polyreduce::diagnostics::SimplifyDiagnostics;
use polyreduce::{Polyline, Quality, SimplifyConfig, WebClock};

/// Polyline simplification and tolerance experimentation.
///
/// Simplifies every series in a JSON point file and prints per-stage
/// timing and point-count diagnostics.
#[derive(Parser)]
#[command(name = "polyreduce-bench", version)]
struct Cli {
    /// Path to the input JSON point file.
    input: PathBuf,

    /// Simplification tolerance, in the same units as the coordinates.
    #[arg(long, default_value_t = SimplifyConfig::DEFAULT_TOLERANCE, conflicts_with = "no_tolerance")]
    tolerance: f64,

    /// Run without a tolerance (squared tolerance defaults to 1.0).
    #[arg(long)]
    no_tolerance: bool,

    /// Skip the radial pre-filter and run Douglas-Peucker only.
    #[arg(long)]
    high_quality: bool,

    /// Full simplification config as a JSON string.
    ///
    /// When provided, `--tolerance`, `--no-tolerance`, and
    /// `--high-quality` are ignored. The JSON must be a valid
    /// `SimplifyConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,

    /// Number of runs for averaging.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Output diagnostics as JSON instead of human-readable reports.
    #[arg(long)]
    json: bool,

    /// Comma-separated tolerances to sweep; prints the kept point count
    /// for each instead of per-run diagnostics.
    ///
    /// Only the quality setting applies to a sweep, so the tolerance,
    /// run, and output flags cannot be combined with it.
    #[arg(
        long,
        value_delimiter = ',',
        num_args = 1..,
        conflicts_with_all = ["tolerance", "no_tolerance", "runs", "json", "output", "svg"]
    )]
    sweep: Option<Vec<f64>>,

    /// Write the simplified series to this file as JSON.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the simplified series to this file as SVG.
    #[arg(long)]
    svg: Option<PathBuf>,
}

/// Build a [`SimplifyConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual parameter flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<SimplifyConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(SimplifyConfig {
        tolerance: (!cli.no_tolerance).then_some(cli.tolerance),
        quality: if cli.high_quality {
            Quality::High
        } else {
            Quality::Fast
        },
    })
}

/// Read and parse the input point file.
fn load_polylines(path: &Path) -> Result<Vec<Polyline>, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    polyreduce::parse_polylines(&text).map_err(|e| format!("Error parsing {}: {e}", path.display()))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            log::error!("{msg}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = config_from_cli(cli)?;
    let polylines = load_polylines(&cli.input)?;

    let total_points: usize = polylines.iter().map(Polyline::len).sum();
    log::info!(
        "Input: {} ({} series, {total_points} points)",
        cli.input.display(),
        polylines.len(),
    );
    log::info!("Config: {config:?}");

    if let Some(ref tolerances) = cli.sweep {
        print_sweep(&polylines, config.quality, tolerances);
        return Ok(());
    }

    log::info!("Runs: {}", cli.runs);

    let mut all_diagnostics = Vec::with_capacity(cli.runs);

    for run_index in 0..cli.runs {
        if cli.runs > 1 {
            log::info!("--- Run {}/{} ---", run_index + 1, cli.runs);
        }

        let mut simplified = Vec::with_capacity(polylines.len());
        let mut run_diagnostics = Vec::with_capacity(polylines.len());
        for polyline in &polylines {
            let (points, diagnostics) =
                polyreduce::simplify_with_diagnostics(polyline.points(), &config, &WebClock);
            simplified.push(Polyline::new(points));
            run_diagnostics.push(diagnostics);
        }

        if cli.json {
            let json = serde_json::to_string_pretty(&run_diagnostics)
                .map_err(|e| format!("Error serializing diagnostics: {e}"))?;
            println!("{json}");
        } else {
            for (index, diagnostics) in run_diagnostics.iter().enumerate() {
                if run_diagnostics.len() > 1 {
                    println!("Series {index}");
                }
                println!("{}", diagnostics.report());
            }
        }

        // Write outputs on the first run only.
        if run_index == 0 {
            write_outputs(cli, &config, &simplified)?;
        }

        all_diagnostics.push(run_diagnostics);
    }

    if cli.runs > 1 {
        print_multi_run_summary(&all_diagnostics);
    }

    Ok(())
}

/// Write the `--output` JSON and `--svg` files, if requested.
fn write_outputs(
    cli: &Cli,
    config: &SimplifyConfig,
    simplified: &[Polyline],
) -> Result<(), String> {
    if let Some(ref path) = cli.output {
        let json = polyreduce_export::to_json(simplified)
            .map_err(|e| format!("Error serializing output: {e}"))?;
        write_file(path, &json, "JSON")?;
    }

    if let Some(ref path) = cli.svg {
        let title = cli
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("polyreduce");
        let desc = format!("{config:?}");
        let config_json =
            serde_json::to_string(config).map_err(|e| format!("Error serializing config: {e}"))?;
        let metadata = polyreduce_export::SvgMetadata {
            title: Some(title),
            description: Some(&desc),
            config_json: Some(&config_json),
        };
        let svg = polyreduce_export::to_svg(simplified, &metadata);
        write_file(path, &svg, "SVG")?;
    }

    Ok(())
}

fn write_file(path: &Path, contents: &str, kind: &str) -> Result<(), String> {
    std::fs::write(path, contents)
        .map_err(|e| format!("Error writing {kind} to {}: {e}", path.display()))?;
    log::info!(
        "{kind} written to {} ({} bytes)",
        path.display(),
        contents.len(),
    );
    Ok(())
}

/// Print the kept point count for each tolerance.
fn print_sweep(polylines: &[Polyline], quality: Quality, tolerances: &[f64]) {
    println!("{:>12} {:>12}", "Tolerance", "Points");
    println!("{}", "-".repeat(25));
    for &tolerance in tolerances {
        let config = SimplifyConfig::new(Some(tolerance), quality);
        let kept: usize = polyreduce::simplify_paths(polylines, &config)
            .iter()
            .map(Polyline::len)
            .sum();
        println!("{tolerance:>12} {kept:>12}");
    }
}

/// Picks one stage's duration out of a diagnostics record.
type StageDuration = fn(&SimplifyDiagnostics) -> Option<Duration>;

/// Print aggregated statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_multi_run_summary(all_diagnostics: &[Vec<SimplifyDiagnostics>]) {
    println!();
    println!(
        "Summary ({} runs)\n{}",
        all_diagnostics.len(),
        "=".repeat(60),
    );

    if all_diagnostics.is_empty() {
        println!("Warning: no diagnostics to summarize");
        return;
    }

    // Per-run totals across all series, in milliseconds.
    let run_totals = |extract: StageDuration| {
        all_diagnostics
            .iter()
            .map(|run| {
                run.iter()
                    .filter_map(extract)
                    .map(|d| d.as_secs_f64() * 1000.0)
                    .sum::<f64>()
            })
            .collect::<Vec<f64>>()
    };

    let durations = run_totals(|d| Some(d.total_duration));
    let min = durations.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = durations.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = durations.iter().sum::<f64>() / durations.len() as f64;

    println!("Total duration: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms");

    println!();
    println!("{:<24} {:>12}", "Stage", "Mean (ms)");
    println!("{}", "-".repeat(40));

    let stage_extractors: &[(&str, StageDuration)] = &[
        ("Radial Pre-filter", |d| d.radial.as_ref().map(|s| s.duration)),
        ("Refinement", |d| Some(d.refinement.duration)),
    ];

    for (name, extractor) in stage_extractors {
        if all_diagnostics
            .iter()
            .flatten()
            .all(|d| extractor(d).is_none())
        {
            continue;
        }
        let stage_durations = run_totals(*extractor);
        let stage_mean = stage_durations.iter().sum::<f64>() / stage_durations.len() as f64;
        println!("{name:<24} {stage_mean:>10.3}ms");
    }
}
