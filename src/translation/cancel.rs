use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag for cooperative run termination.
///
/// Raised once by any external caller (stop action, Ctrl-C handler); workers
/// observe it at the top of their claim loop and stop pulling new work. The
/// flag is never cleared mid-run, only via `reset` before a new run.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    raised: Arc<AtomicBool>,
}

impl CancellationFlag {
    /// Create a new, lowered flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Idempotent.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    /// Check whether the flag has been raised.
    ///
    /// Workers call this without blocking; observing the flag one loop
    /// iteration late is acceptable.
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Clear the flag before starting a new run
    pub fn reset(&self) {
        self.raised.store(false, Ordering::SeqCst);
    }
}
