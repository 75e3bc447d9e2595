//! Process-wide stop flag shared by every loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Longest single sleep between polls in [`ShutdownSignal::sleep`].
const POLL_SLICE: Duration = Duration::from_millis(10);

/// Set-once stop flag with a cloneable handle.
///
/// Setting uses release ordering and polling uses acquire ordering, so a set
/// made on any thread is seen by every loop on its next poll.
#[derive(Clone, Debug, Default)]
pub struct ShutdownSignal {
    flag: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the signal. Returns true only for the call that set it.
    pub fn trigger(&self) -> bool {
        !self.flag.swap(true, Ordering::AcqRel)
    }

    /// Returns true once the signal has been raised.
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Sleeps for `duration` or until the signal is raised, whichever comes
    /// first. Returns true if the signal is set on return.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        while !self.is_set() {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            thread::sleep((deadline - now).min(POLL_SLICE));
        }
        true
    }

    /// Returns a guard that raises the signal if dropped during a panic.
    pub(crate) fn panic_guard(&self) -> PanicGuard {
        PanicGuard {
            signal: self.clone(),
        }
    }
}

/// Raises the signal when a loop thread unwinds, so its sibling stops too.
pub(crate) struct PanicGuard {
    signal: ShutdownSignal,
}

impl Drop for PanicGuard {
    fn drop(&mut self) {
        if thread::panicking() {
            self.signal.trigger();
        }
    }
}
