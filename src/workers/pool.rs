use super::WorkerMessage;
use crate::cancel::CancelToken;
use crate::hash::HashVersion;
use crate::partition::Partitioner;
use crate::sample::SampleSet;
use crate::scan::{scan, Match, ScanMode, SearchBox};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

/// `hw = clamp(hardwareConcurrency, 1, 16)`, then capped to 4 for
/// `classic` (more work per candidate, so the source deliberately caps
/// fan-out) and to the stripe count everywhere, per `spec.md` §4.6.
pub fn worker_count(hardware_concurrency: usize, version: HashVersion, x_count: u64) -> usize {
    let hw = hardware_concurrency.clamp(1, 16);
    let capped = match version {
        HashVersion::Classic => hw.min(4),
        HashVersion::Modern => hw,
    };
    (capped as u64).min(x_count.max(1)) as usize
}

/// The merged result of every worker's stripe.
#[derive(Debug, Clone, Default)]
pub struct WorkerPoolOutcome {
    pub matches: Vec<Match>,
    /// Sum of every worker's `done` counter. Kept as `u64` so it never
    /// silently truncates for boxes with `~10^10` candidates.
    pub done: u64,
    pub hit_cap: bool,
    pub cancelled: bool,
}

pub struct WorkerPool;

impl WorkerPool {
    /// Partitions `box_` into `n` stripes, runs one OS thread per
    /// stripe, and merges their results. `on_progress` is called from
    /// the calling thread as aggregated `(done, total)` pairs arrive;
    /// it may be invoked many times and from no particular stripe
    /// order, per `spec.md` §4.6's "progress messages from different
    /// workers may interleave freely."
    pub fn run(
        box_: &SearchBox,
        n: usize,
        set: Arc<SampleSet>,
        mode: ScanMode,
        match_cap: usize,
        cancel: CancelToken,
        mut on_progress: impl FnMut(u64, u64),
    ) -> WorkerPoolOutcome {
        let stripes = Partitioner::stripes(box_, n);
        let total: u64 = box_.candidate_count();
        let (tx, rx) = mpsc::channel::<WorkerMessage>();

        let handles: Vec<_> = stripes
            .into_iter()
            .enumerate()
            .map(|(id, stripe)| {
                let set = Arc::clone(&set);
                let cancel = cancel.clone();
                let tx = tx.clone();
                thread::spawn(move || {
                    let stripe_total = stripe.candidate_count();
                    let progress_tx = tx.clone();
                    let outcome = scan(&stripe, &set, mode, match_cap, &cancel, |done| {
                        let _ = progress_tx.send(WorkerMessage::Progress {
                            worker: id,
                            done,
                            total: stripe_total,
                        });
                    });
                    let _ = tx.send(WorkerMessage::Done {
                        worker: id,
                        matches: outcome.matches,
                        done: outcome.done,
                        total: stripe_total,
                        hit_cap: outcome.hit_cap,
                        cancelled: outcome.cancelled,
                    });
                })
            })
            .collect();

        // Drop our own sender so `rx` closes once every worker has sent
        // its `Done` message and its clone is dropped.
        drop(tx);

        let worker_totals = handles.len();
        let mut done_per_worker = vec![0u64; worker_totals];
        let mut outcome = WorkerPoolOutcome::default();
        let mut finished = 0usize;

        for message in rx {
            match message {
                WorkerMessage::Progress { worker, done, .. } => {
                    done_per_worker[worker] = done;
                    on_progress(done_per_worker.iter().sum(), total);
                }
                WorkerMessage::Done { worker, matches, done, hit_cap, cancelled, .. } => {
                    done_per_worker[worker] = done;
                    outcome.matches.extend(matches);
                    outcome.hit_cap |= hit_cap;
                    outcome.cancelled |= cancelled;
                    finished += 1;
                    if finished == worker_totals {
                        on_progress(done_per_worker.iter().sum(), total);
                    }
                }
            }
        }

        outcome.done = done_per_worker.iter().sum();

        for handle in handles {
            let _ = handle.join();
        }

        outcome
    }
}
