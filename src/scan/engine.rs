use super::{Match, ScanMode, SearchBox};
use crate::cancel::CancelToken;
use crate::hash::packed12;
use crate::sample::{Sample, SampleSet};
use crate::CANCEL_CHECK_INTERVAL;

/// What one stripe's scan produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub matches: Vec<Match>,
    /// Candidates evaluated, not matched — the cheap progress counter.
    pub done: u64,
    /// True if this stripe's local buffer hit `match_cap` and the scan
    /// stopped early.
    pub hit_cap: bool,
    /// True if the scan returned early because `cancel` was observed.
    pub cancelled: bool,
}

fn plateau_equal(expected: u8, predicted: u8) -> bool {
    if expected <= 3 {
        predicted <= 3
    } else if expected >= 12 {
        predicted >= 12
    } else {
        predicted == expected
    }
}

fn plateau_distance(expected: u8, predicted: u8) -> i32 {
    if expected <= 3 {
        if predicted <= 3 { 0 } else { predicted as i32 - 3 }
    } else if expected >= 12 {
        if predicted >= 12 { 0 } else { 12 - predicted as i32 }
    } else {
        (predicted as i32 - expected as i32).abs()
    }
}

fn axis_nibble(packed: u16, axis: u32) -> u8 {
    ((packed >> (axis * 4)) & 0xF) as u8
}

/// Evaluates one sample in strict mode; `true` if it agrees with `pred`.
fn strict_agrees(sample: &Sample, pred: u16) -> bool {
    if !sample.drip {
        return (pred & sample.mask) == sample.packed;
    }
    for axis in 0..3u32 {
        let nib_mask = axis_nibble(sample.mask, axis);
        if nib_mask == 0 {
            continue;
        }
        let pn = axis_nibble(pred, axis);
        let en = axis_nibble(sample.packed, axis);
        let ok = if axis == 1 { pn == en } else { plateau_equal(en, pn) };
        if !ok {
            return false;
        }
    }
    true
}

/// Accumulates the scored penalty for one sample against `pred`,
/// returning `None` once the running `score` would exceed `max_score`.
fn scored_penalty(sample: &Sample, pred: u16, tol: i32, max_score: u32, score: &mut u32) -> bool {
    for axis in 0..3u32 {
        let nib_mask = axis_nibble(sample.mask, axis);
        if nib_mask == 0 {
            continue;
        }
        let pn = axis_nibble(pred, axis);
        let en = axis_nibble(sample.packed, axis);
        let d = if sample.drip && axis != 1 {
            plateau_distance(en, pn)
        } else {
            (pn as i32 - en as i32).abs()
        };
        let penalty = if d <= tol { d as u32 } else { (d * d) as u32 };
        *score += penalty;
        if *score > max_score {
            return false;
        }
    }
    true
}

/// Evaluates one candidate origin against every sample, in the
/// contractual sample order (farthest first).
fn evaluate(origin: (i32, i32, i32), set: &SampleSet, version: crate::hash::HashVersion, mode: ScanMode) -> Option<Option<u32>> {
    match mode {
        ScanMode::Strict => {
            for s in &set.samples {
                let pred = packed12(origin.0 + s.dx, origin.1 + s.dy, origin.2 + s.dz, version);
                if !strict_agrees(s, pred) {
                    return None;
                }
            }
            Some(None)
        }
        ScanMode::Scored { tol, max_score } => {
            let tol = tol as i32;
            let mut score = 0u32;
            for s in &set.samples {
                let pred = packed12(origin.0 + s.dx, origin.1 + s.dy, origin.2 + s.dz, version);
                if !scored_penalty(s, pred, tol, max_score, &mut score) {
                    return None;
                }
            }
            Some(Some(score))
        }
    }
}

/// Scans `stripe` for matches against `set`, in contractual iteration
/// order (Y outer, then Z, then X), honoring `match_cap` per stripe and
/// cooperative cancellation. `on_progress` is invoked with the
/// cumulative `done` count roughly every `CANCEL_CHECK_INTERVAL`
/// candidates, letting callers sample progress at a coarse cadence
/// without the engine itself blocking on I/O.
pub fn scan(
    stripe: &SearchBox,
    set: &SampleSet,
    mode: ScanMode,
    match_cap: usize,
    cancel: &CancelToken,
    mut on_progress: impl FnMut(u64),
) -> ScanOutcome {
    let mut out = ScanOutcome::default();
    let mut since_check: u64 = 0;

    let ys: Box<dyn Iterator<Item = i32>> = match stripe.version {
        crate::hash::HashVersion::Modern => Box::new(std::iter::once(stripe.y_lo)),
        crate::hash::HashVersion::Classic => Box::new(stripe.y_lo..=stripe.y_hi),
    };

    'outer: for y in ys {
        for z in stripe.z_lo..=stripe.z_hi {
            for x in stripe.x_lo..=stripe.x_hi {
                out.done += 1;
                since_check += 1;
                if since_check >= CANCEL_CHECK_INTERVAL {
                    since_check = 0;
                    on_progress(out.done);
                    if cancel.is_cancelled() {
                        out.cancelled = true;
                        break 'outer;
                    }
                }

                if let Some(score) = evaluate((x, y, z), set, stripe.version, mode) {
                    out.matches.push(Match { x, y, z, score });
                    if out.matches.len() >= match_cap {
                        out.hit_cap = true;
                        break 'outer;
                    }
                }
            }
        }
    }

    out
}
