use crate::scan::Match;

/// What a worker reports back over its channel. `spec.md` §4.6 names
/// three message kinds (`start`, `progress`, `done`); `start` is the
/// closure captured when the thread is spawned, so only the two
/// messages that travel *from* the worker need a wire type here.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// Periodic, best-effort progress. Workers may interleave these
    /// freely; the pool aggregates additively.
    Progress {
        worker: usize,
        done: u64,
        total: u64,
    },
    /// Emitted exactly once per worker, at the end of its stripe.
    Done {
        worker: usize,
        matches: Vec<Match>,
        done: u64,
        total: u64,
        hit_cap: bool,
        cancelled: bool,
    },
}
