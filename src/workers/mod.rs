//! Spawns one OS thread per search stripe, merges their matches, and
//! honors cooperative cancellation — `spec.md` §4.6.

mod message;
mod pool;

pub use message::WorkerMessage;
pub use pool::{worker_count, WorkerPool, WorkerPoolOutcome};
