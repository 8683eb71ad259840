//! Periodic throughput logging for long-running scans.
//!
//! Generalizes `src/clustering/progress.rs`'s single-counter tracker
//! to the aggregate-of-stripes counter the `WorkerPool` reports.

use std::time::{Duration, Instant};

/// Tracks elapsed time and candidate throughput, logging at most once
/// per `CHECKPOINT` ticks so the log doesn't choke on billions of
/// candidates.
pub struct Progress {
    total: u64,
    checkpoint: u64,
    done: u64,
    begin: Instant,
    delta: Instant,
}

impl Progress {
    const CHECKPOINT: u64 = 1_000_000;

    pub fn new(total: u64) -> Self {
        let now = Instant::now();
        Self {
            total,
            checkpoint: Self::CHECKPOINT,
            done: 0,
            begin: now,
            delta: now,
        }
    }

    /// Record `n` more candidates evaluated since the last call.
    pub fn advance(&mut self, n: u64) {
        self.done += n;
        if self.done >= self.checkpoint {
            self.checkpoint = self.done + Self::CHECKPOINT;
            let now = Instant::now();
            let total_t = now.duration_since(self.begin);
            let delta_t = now.duration_since(self.delta);
            self.delta = now;
            log::info!(
                "scan progress: {:8.0?} {:>12}/{:<12} {:6.2}%   mean {:>10.0}/s   last {:>10.0}/s",
                total_t,
                self.done,
                self.total,
                percent(self.done, self.total),
                rate(self.done, total_t),
                rate(Self::CHECKPOINT, delta_t),
            );
        }
    }

    pub fn done(&self) -> u64 {
        self.done
    }

    pub fn elapsed(&self) -> Duration {
        self.begin.elapsed()
    }
}

fn percent(done: u64, total: u64) -> f64 {
    if total == 0 {
        100.0
    } else {
        done as f64 / total as f64 * 100.0
    }
}

fn rate(count: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        0.0
    } else {
        count as f64 / secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_without_panicking_at_zero_total() {
        let mut p = Progress::new(0);
        p.advance(1);
        assert_eq!(p.done(), 1);
    }

    #[test]
    fn accumulates_across_calls() {
        let mut p = Progress::new(10);
        p.advance(3);
        p.advance(4);
        assert_eq!(p.done(), 7);
    }
}
