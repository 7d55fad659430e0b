//! Process-wide shutdown flag.
//! Set by the Ctrl+C handler; batch tasks and the restore loop poll it so an
//! interrupt stops work that has not started yet.
//!
//! Relaxed atomics are enough for a one-way "stop" flag.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent, signal-safe).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}
