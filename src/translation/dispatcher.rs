use parking_lot::Mutex;
use std::collections::VecDeque;

/// Distributes paragraph indices exclusively to translation workers.
///
/// Seeded with `0..total` in ascending order. `claim_next` is the only
/// operation requiring mutual exclusion in the whole pipeline; the lock is
/// held just long enough to pop one index, so workers only ever block on
/// each other for the duration of a single claim.
#[derive(Debug)]
pub struct WorkDispatcher {
    /// Indices not yet claimed by any worker
    queue: Mutex<VecDeque<usize>>,
}

impl WorkDispatcher {
    /// Create a dispatcher holding indices `0..total`
    pub fn new(total: usize) -> Self {
        Self {
            queue: Mutex::new((0..total).collect()),
        }
    }

    /// Claim the next index, or `None` once the queue is exhausted.
    ///
    /// Safe under concurrent calls: no index is ever handed out twice, and
    /// exhaustion is terminal - every later call also returns `None`.
    pub fn claim_next(&self) -> Option<usize> {
        self.queue.lock().pop_front()
    }

    /// Number of indices still unclaimed
    pub fn remaining(&self) -> usize {
        self.queue.lock().len()
    }
}
