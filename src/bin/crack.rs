//! Command-line entry point: reads a persisted placement file, runs one
//! scan, and prints matches. Argument parsing follows the teacher's
//! `clap::Parser`-derive convention (`src/analysis/query.rs`).

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use foliage_solver::cancel::CancelToken;
use foliage_solver::hash::HashVersion;
use foliage_solver::solver::{RequestedMode, ScanParams, Solver};
use foliage_solver::{format, init};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about = "Recovers in-world block coordinates from foliage render offsets")]
struct Args {
    /// Path to a persisted placement file (`spec.md` §6 line format).
    samples: std::path::PathBuf,

    #[arg(long, allow_hyphen_values = true)]
    center_x: f64,
    #[arg(long, allow_hyphen_values = true)]
    center_z: f64,
    #[arg(long, default_value_t = 256)]
    radius: u32,
    #[arg(long, allow_hyphen_values = true)]
    y_min: i32,
    #[arg(long, allow_hyphen_values = true)]
    y_max: i32,

    /// Use the pre-1.13 Y-dependent hash.
    #[arg(long)]
    classic: bool,

    /// Accept bounded-penalty matches instead of requiring exact agreement.
    #[arg(long)]
    scored: bool,
    #[arg(long, default_value_t = 1)]
    tol: u8,
    #[arg(long, default_value_t = 4)]
    max_score: u32,

    #[arg(long, default_value_t = 20)]
    max_results: usize,

    #[arg(long, default_value_t = true)]
    use_workers: bool,
}

fn main() -> anyhow::Result<()> {
    init();
    let args = Args::parse();

    let text = std::fs::read_to_string(&args.samples)
        .with_context(|| format!("reading {}", args.samples.display()))?;
    let placements = format::parse(&text).context("parsing placement file")?;
    log::info!("loaded {} placements from {}", placements.len(), args.samples.display());

    let params = ScanParams {
        center_x: args.center_x,
        center_z: args.center_z,
        radius: args.radius,
        y_min: args.y_min,
        y_max: args.y_max,
        version: if args.classic { HashVersion::Classic } else { HashVersion::Modern },
        mode: if args.scored {
            RequestedMode::Scored { tol: args.tol, max_score: args.max_score }
        } else {
            RequestedMode::Strict
        },
        max_results: args.max_results,
        use_workers: args.use_workers,
    };

    let cancel = CancelToken::new();
    let last_report = Arc::new(AtomicU64::new(0));
    let result = Solver::crack(&placements, params, cancel, |done, total| {
        let prev = last_report.swap(done, Ordering::Relaxed);
        if done.saturating_sub(prev) >= 100_000 || done == total {
            log::info!("progress: {done}/{total}");
        }
    });

    if result.matches.is_empty() {
        println!("{}", "no matches".red());
    }
    for m in &result.matches {
        match m.score {
            Some(score) => println!("{} {} {}  {}", m.x, m.y, m.z, format!("score={score}").dimmed()),
            None => println!("{} {} {}", m.x, m.y, m.z),
        }
    }
    if let Some(warning) = &result.warning {
        eprintln!("{} {}", "warning:".yellow(), warning);
    }
    Ok(())
}
