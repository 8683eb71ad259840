//! A cooperative cancellation flag shared between the facade and workers.
//!
//! Modeled as a single shared atomic rather than a message, per
//! `spec.md` §9: "If the host runtime offers shared atomics, a single
//! shared flag polled by workers is equivalent and acceptable."

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
