/*!
 * Fair Wait Queue
 *
 * FIFO registry of pending waiters for building async synchronization
 * primitives (mutexes, semaphores, condition variables, ready signals).
 *
 * # Design: Coarse Lock Around a Sequential Deque
 *
 * All waiter bookkeeping lives in one `CircularDeque` behind one mutex. Every
 * critical section is O(1) except targeted cancellation, which is a linear
 * scan plus an O(min(i, n - i)) removal.
 *
 * # Design: Completion Off the Lock and Off the Caller's Stack
 *
 * A waiter is removed from the deque under the lock, the lock is released,
 * and the promise is then resolved by a job handed to the injected
 * [`Scheduler`]. Continuation code therefore never runs while the queue is
 * locked, and chains of primitives releasing each other cannot grow the
 * releasing thread's stack.
 */

use super::config::WaitQueueConfig;
use super::promise::{promise, Promise, WaitFuture};
use super::stats::{QueueCounters, QueueStats};
use crate::core::data_structures::CircularDeque;
use crate::core::errors::PromiseError;
use crate::core::id::{IdGenerator, WaiterId, WaiterIdAllocator};
use crate::scheduler::Scheduler;
use parking_lot::Mutex;
use std::fmt;
use std::mem;
use std::sync::Arc;
use tracing::{debug, trace};

/// Thread-safe FIFO queue of pending waiters
///
/// # Guarantees
///
/// - **Fairness**: `dequeue_one` always releases the oldest pending waiter
/// - **Single resolution**: a waiter leaves the queue exactly once, so its
///   promise is resolved at most once by the queue
/// - **Snapshot drains**: `dequeue_all`/`cancel_all` affect exactly the
///   waiters present when the lock was taken
/// - **Distinct identities**: ids from queues with separate allocators never
///   match each other, so `cancel_one` only touches this queue's waiters
///
/// Resolutions are delivered through the scheduler. Once the scheduler has
/// shut down, a waiter removed by `dequeue_one` or `dequeue_all` resolves as
/// `WaitError::Cancelled` instead of receiving its value.
///
/// # Examples
///
/// ```
/// use fairq::core::sync::wait::FairWaitQueue;
/// use fairq::scheduler::ThreadPoolScheduler;
/// use std::sync::Arc;
///
/// let scheduler = Arc::new(ThreadPoolScheduler::with_defaults().unwrap());
/// let queue = FairWaitQueue::<&str>::new(scheduler);
///
/// let first = queue.enqueue();
/// let second = queue.enqueue();
///
/// queue.dequeue_one("a");
/// queue.dequeue_one("b");
///
/// assert_eq!(first.blocking_wait(), Ok("a"));
/// assert_eq!(second.blocking_wait(), Ok("b"));
/// ```
pub struct FairWaitQueue<T>
where
    T: Send + 'static,
{
    pending: Mutex<CircularDeque<Promise<T>>>,
    scheduler: Arc<dyn Scheduler>,
    ids: WaiterIdAllocator,
    counters: QueueCounters,
    config: WaitQueueConfig,
}

impl<T> FairWaitQueue<T>
where
    T: Send + 'static,
{
    /// Create a queue with default configuration
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self::with_config(WaitQueueConfig::default(), scheduler)
    }

    /// Create a queue with the given configuration
    pub fn with_config(config: WaitQueueConfig, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            pending: Mutex::new(CircularDeque::with_capacity(config.initial_capacity)),
            scheduler,
            ids: WaiterIdAllocator::default_start(),
            counters: QueueCounters::default(),
            config,
        }
    }

    /// Draw waiter ids from a shared allocator instead of a private one
    pub fn with_id_allocator(mut self, ids: WaiterIdAllocator) -> Self {
        self.ids = ids;
        self
    }

    /// Register a new waiter at the back of the queue
    ///
    /// Never blocks. Whether the caller should wait at all is the consuming
    /// primitive's decision.
    pub fn enqueue(&self) -> WaitFuture<T> {
        let id = self.ids.next();
        let (waiter, future) = promise(id);

        let depth = {
            let mut pending = self.pending.lock();
            pending.push_back(waiter);
            self.counters.record_enqueue();
            pending.len()
        };

        trace!(queue = %self.config.name, waiter = %id, depth, "Waiter enqueued");
        future.retaining(self.ids.lease())
    }

    /// Complete the oldest waiter with `result`
    ///
    /// Returns `false` without effect when no waiter is pending.
    pub fn dequeue_one(&self, result: T) -> bool {
        let popped = {
            let mut pending = self.pending.lock();
            let popped = pending.pop_front();
            if popped.is_ok() {
                self.counters.record_dequeue(1);
            }
            popped
        };
        // Empty queue is a no-op release, not an error
        let Ok(waiter) = popped else {
            trace!(queue = %self.config.name, "Dequeue on empty queue");
            return false;
        };

        trace!(queue = %self.config.name, waiter = %waiter.id(), "Waiter dequeued");
        self.scheduler
            .schedule(Box::new(move || complete_waiter(waiter, result)));
        true
    }

    /// Remove the waiter identified by `id` and resolve it as cancelled
    ///
    /// Returns `false` when the waiter is no longer pending (already
    /// dequeued, cancelled, or never registered here). Losing that race is
    /// an expected outcome.
    pub fn cancel_one(&self, id: WaiterId) -> bool {
        let removed = {
            let mut pending = self.pending.lock();
            let removed = pending.remove_first_where(|waiter| waiter.id() == id);
            if removed.is_some() {
                self.counters.record_cancel(1);
            }
            removed
        };

        let Some(waiter) = removed else {
            trace!(queue = %self.config.name, waiter = %id, "Cancel found no pending waiter");
            return false;
        };

        trace!(queue = %self.config.name, waiter = %id, "Waiter cancelled");
        self.scheduler.schedule(Box::new(move || cancel_waiter(waiter)));
        true
    }

    /// Cancel every pending waiter, returning how many were drained
    pub fn cancel_all(&self) -> usize {
        let drained = self.drain(QueueCounters::record_cancel);
        let count = drained.len();
        if count == 0 {
            return 0;
        }

        debug!(queue = %self.config.name, count, "Cancelling all waiters");
        self.scheduler.schedule(Box::new(move || {
            for waiter in drained {
                cancel_waiter(waiter);
            }
        }));
        count
    }

    /// Number of pending waiters
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// True if the waiter identified by `id` is still pending
    pub fn contains(&self, id: WaiterId) -> bool {
        self.pending
            .lock()
            .position(|waiter| waiter.id() == id)
            .is_some()
    }

    /// Snapshot of the queue counters
    ///
    /// Counters only move inside the critical section, so a snapshot always
    /// satisfies `enqueued == dequeued + canceled + pending`.
    pub fn stats(&self) -> QueueStats {
        let pending = self.pending.lock();
        self.counters.snapshot(pending.len())
    }

    pub fn config(&self) -> &WaitQueueConfig {
        &self.config
    }

    /// Name of the scheduler completions are dispatched to
    pub fn scheduler_name(&self) -> &'static str {
        self.scheduler.name()
    }

    /// Swap the pending deque for a fresh one, allocated outside the lock
    ///
    /// `record` is charged with the drained count while the lock is held.
    fn drain(&self, record: fn(&QueueCounters, usize)) -> CircularDeque<Promise<T>> {
        let fresh = CircularDeque::with_capacity(self.config.initial_capacity);
        let mut pending = self.pending.lock();
        record(&self.counters, pending.len());
        mem::replace(&mut *pending, fresh)
    }
}

impl<T> FairWaitQueue<T>
where
    T: Clone + Send + 'static,
{
    /// Complete every pending waiter with a copy of `result`
    ///
    /// Returns how many waiters were drained. Waiters enqueued after the
    /// snapshot stay pending.
    pub fn dequeue_all(&self, result: T) -> usize {
        let drained = self.drain(QueueCounters::record_dequeue);
        let count = drained.len();
        if count == 0 {
            return 0;
        }

        debug!(queue = %self.config.name, count, "Dequeuing all waiters");
        self.scheduler.schedule(Box::new(move || {
            for waiter in drained {
                complete_waiter(waiter, result.clone());
            }
        }));
        count
    }
}

impl<T> Drop for FairWaitQueue<T>
where
    T: Send + 'static,
{
    fn drop(&mut self) {
        let drained = mem::take(self.pending.get_mut());
        if drained.is_empty() {
            return;
        }

        debug!(
            queue = %self.config.name,
            count = drained.len(),
            "Queue dropped with pending waiters, cancelling"
        );
        self.scheduler.schedule(Box::new(move || {
            for waiter in drained {
                cancel_waiter(waiter);
            }
        }));
    }
}

impl<T> fmt::Debug for FairWaitQueue<T>
where
    T: Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FairWaitQueue")
            .field("name", &self.config.name)
            .field("pending", &self.len())
            .field("scheduler", &self.scheduler.name())
            .finish()
    }
}

fn complete_waiter<T>(mut waiter: Promise<T>, value: T) {
    if let Err(PromiseError::Detached) = waiter.complete(value) {
        trace!(waiter = %waiter.id(), "Waiter future dropped before completion");
    }
}

fn cancel_waiter<T>(mut waiter: Promise<T>) {
    if let Err(PromiseError::Detached) = waiter.cancel() {
        trace!(waiter = %waiter.id(), "Waiter future dropped before cancellation");
    }
}
