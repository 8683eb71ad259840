//! `SolverFacade`: the single public entry point. Validates input,
//! builds the `SampleSet`, dispatches the `WorkerPool` (or runs the scan
//! inline when `use_workers` is false, or unconditionally on `wasm32`
//! where `std::thread::spawn` is unavailable), and finalizes ordering.
//!
//! Mirrors the teacher's `Analysis`/`CLI` split (`src/analysis/cli.rs`,
//! `src/analysis/analysis.rs`): a thin orchestration type wrapping a
//! lower-level engine, never failing across the host boundary.

use crate::cancel::CancelToken;
use crate::error::SolverError;
use crate::hash::HashVersion;
use crate::sample::{Placement, SampleSet};
use crate::scan::{Match, ScanMode, SearchBox};
use crate::workers::{worker_count, WorkerPool};
use std::sync::Arc;

pub const MATCH_HARD_CAP: usize = 2000;
const MAX_RADIUS: u32 = 50_000;
const MAX_RESULTS_CEILING: usize = 50;

/// Everything the host supplies to start a scan — `spec.md` §6's
/// "Scan parameters".
#[derive(Debug, Clone, Copy)]
pub struct ScanParams {
    pub center_x: f64,
    pub center_z: f64,
    pub radius: u32,
    pub y_min: i32,
    pub y_max: i32,
    pub version: HashVersion,
    pub mode: RequestedMode,
    pub max_results: usize,
    pub use_workers: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum RequestedMode {
    Strict,
    Scored { tol: u8, max_score: u32 },
}

impl ScanParams {
    /// Clamps `radius` into `[0, 50_000]` and `tol` into `[0, 2]` per
    /// `spec.md` §7, then rejects anything still invalid.
    fn validated(mut self) -> Result<(Self, Vec<String>), SolverError> {
        let mut notes = Vec::new();

        if self.radius > MAX_RADIUS {
            notes.push(format!(
                "radius {} clamped to {}",
                self.radius, MAX_RADIUS
            ));
            self.radius = MAX_RADIUS;
        }

        if let RequestedMode::Scored { tol, .. } = &mut self.mode {
            if *tol > 2 {
                notes.push(format!("tol {} clamped to 2", tol));
                *tol = 2;
            }
        }

        if self.y_min > self.y_max {
            return Err(SolverError::InvalidParameter(format!(
                "yMin {} > yMax {}",
                self.y_min, self.y_max
            )));
        }

        if self.max_results == 0 || self.max_results > MAX_RESULTS_CEILING {
            return Err(SolverError::InvalidParameter(format!(
                "maxResults {} outside [1, {}]",
                self.max_results, MAX_RESULTS_CEILING
            )));
        }

        Ok((self, notes))
    }

    fn search_box(&self) -> SearchBox {
        let x_lo = (self.center_x - self.radius as f64).floor() as i32;
        let x_hi = (self.center_x + self.radius as f64).floor() as i32;
        let z_lo = (self.center_z - self.radius as f64).floor() as i32;
        let z_hi = (self.center_z + self.radius as f64).floor() as i32;
        let (y_lo, y_hi) = (self.y_min.min(self.y_max), self.y_min.max(self.y_max));
        SearchBox { x_lo, x_hi, y_lo, y_hi, z_lo, z_hi, version: self.version }
    }

    fn scan_mode(&self) -> ScanMode {
        match self.mode {
            RequestedMode::Strict => ScanMode::Strict,
            RequestedMode::Scored { tol, max_score } => ScanMode::Scored { tol, max_score },
        }
    }
}

/// What `crack` hands back. Never an error: a missing sample count or
/// a hit cap surfaces as `warning`, per `spec.md` §7.
#[derive(Debug, Clone, Default)]
pub struct SolverResult {
    pub matches: Vec<Match>,
    pub warning: Option<String>,
}

pub struct Solver;

impl Solver {
    /// Runs one full scan: validate, build samples, partition, launch
    /// workers (or scan inline), aggregate, sort, truncate.
    pub fn crack(
        placements: &[Placement],
        params: ScanParams,
        cancel: CancelToken,
        mut on_progress: impl FnMut(u64, u64),
    ) -> SolverResult {
        let set = match SampleSet::build(placements) {
            Ok(set) => set,
            Err(SolverError::InsufficientSamples(n)) => {
                return SolverResult {
                    matches: Vec::new(),
                    warning: Some(format!("need \u{2265} 2 samples, got {n}")),
                };
            }
            Err(other) => {
                return SolverResult { matches: Vec::new(), warning: Some(other.to_string()) };
            }
        };

        let (params, mut notes) = match params.validated() {
            Ok(v) => v,
            Err(e) => return SolverResult { matches: Vec::new(), warning: Some(e.to_string()) },
        };

        let box_ = params.search_box();
        let mode = params.scan_mode();
        let set = Arc::new(set);

        // `std::thread::spawn` is not supported on `wasm32-unknown-unknown`
        // and panics at runtime. `wasm.rs` is the only host boundary this
        // crate ships through, so `use_workers` is always overridden to
        // the single-threaded fallback there, per spec.md §4.6.
        let use_workers = params.use_workers && !cfg!(target_arch = "wasm32");

        let outcome = if use_workers {
            let hw = hardware_concurrency();
            let n = worker_count(hw, params.version, box_.x_count());
            WorkerPool::run(&box_, n, set, mode, MATCH_HARD_CAP, cancel, |done, total| {
                on_progress(done, total)
            })
        } else {
            let scan_outcome = crate::scan::scan(&box_, &set, mode, MATCH_HARD_CAP, &cancel, |done| {
                on_progress(done, box_.candidate_count());
            });
            crate::workers::WorkerPoolOutcome {
                matches: scan_outcome.matches,
                done: scan_outcome.done,
                hit_cap: scan_outcome.hit_cap,
                cancelled: scan_outcome.cancelled,
            }
        };

        let matches =
            finalize_matches(outcome.matches, outcome.hit_cap, mode, params.max_results, &mut notes);

        if outcome.cancelled {
            notes.push("scan cancelled before completion; results are partial".to_string());
        }

        SolverResult {
            matches,
            warning: if notes.is_empty() { None } else { Some(notes.join("; ")) },
        }
    }
}

/// Sorts the merged matches into the contractual order, enforces the
/// global `MATCH_HARD_CAP` safety ceiling, and truncates to
/// `max_results`. §4.7 step 7 sets the "match cap reached" warning only
/// when `hitCap` was actually observed — either because a worker capped
/// its own stripe, or because the *merged* buffer across all stripes
/// still exceeds `MATCH_HARD_CAP` even when no single stripe did — never
/// merely because `max_results` (≤ 50) trimmed an ordinary result set.
fn finalize_matches(
    mut matches: Vec<Match>,
    worker_hit_cap: bool,
    mode: ScanMode,
    max_results: usize,
    notes: &mut Vec<String>,
) -> Vec<Match> {
    match mode {
        ScanMode::Strict => matches.sort_by_key(|m| (m.x, m.z, m.y)),
        ScanMode::Scored { .. } => {
            matches.sort_by_key(|m| (m.score.unwrap_or(u32::MAX), m.x, m.z, m.y))
        }
    }

    // §5's global safety ceiling is independent of any one worker's
    // per-stripe cap: with N stripes each capped at MATCH_HARD_CAP, the
    // merged buffer can still reach N*MATCH_HARD_CAP, so the facade
    // enforces the shared ceiling itself here.
    let collected = matches.len();
    let global_hit_cap = collected > MATCH_HARD_CAP;
    matches.truncate(MATCH_HARD_CAP);

    if worker_hit_cap || global_hit_cap {
        notes.push(format!(
            "match cap reached ({collected} collected, {MATCH_HARD_CAP} hard cap)"
        ));
    }

    matches.truncate(max_results);
    matches
}

#[cfg(feature = "native")]
fn hardware_concurrency() -> usize {
    num_cpus::get()
}

#[cfg(not(feature = "native"))]
fn hardware_concurrency() -> usize {
    1
}
