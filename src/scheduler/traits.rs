/*!
 * Scheduler Traits
 * Interface for handing work off the caller's call stack
 */

use std::sync::Arc;

/// A unit of deferred work
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Background execution context
///
/// Implementations must be:
/// - **Non-blocking**: `schedule` returns without waiting for the job to run
/// - **Off-stack**: the job never runs inside the `schedule` call itself
/// - **Eventual**: every job scheduled before the scheduler shuts down
///   eventually runs (no ordering guarantee)
///
/// A scheduler that has shut down drops new jobs unrun. Dropping a job drops
/// whatever it captured, so a waiter resolution dropped this way surfaces as
/// `WaitError::Cancelled` on the waiter's future.
pub trait Scheduler: Send + Sync {
    /// Queue `job` to run outside the caller's call stack
    ///
    /// After shutdown the job is dropped without running.
    fn schedule(&self, job: Job);

    /// Get scheduler name for debugging
    fn name(&self) -> &'static str;
}

impl<S> Scheduler for Arc<S>
where
    S: Scheduler + ?Sized,
{
    #[inline]
    fn schedule(&self, job: Job) {
        (**self).schedule(job)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
