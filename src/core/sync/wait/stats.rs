/*!
 * Wait Queue Statistics
 * Atomic counters advanced inside the queue's critical section
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time view of a queue's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    /// Waiters ever registered
    pub enqueued: u64,
    /// Waiters removed for completion
    pub dequeued: u64,
    /// Waiters removed for cancellation
    pub canceled: u64,
    /// Waiters still pending when the snapshot was taken
    pub pending: usize,
}

#[derive(Debug, Default)]
pub(super) struct QueueCounters {
    enqueued: AtomicU64,
    dequeued: AtomicU64,
    canceled: AtomicU64,
}

impl QueueCounters {
    #[inline]
    pub fn record_enqueue(&self) {
        self.enqueued.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dequeue(&self, count: usize) {
        self.dequeued.fetch_add(count as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_cancel(&self, count: usize) {
        self.canceled.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self, pending: usize) -> QueueStats {
        QueueStats {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            dequeued: self.dequeued.load(Ordering::Relaxed),
            canceled: self.canceled.load(Ordering::Relaxed),
            pending,
        }
    }
}
