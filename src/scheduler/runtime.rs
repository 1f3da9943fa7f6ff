/*!
 * Tokio Scheduler
 *
 * Dispatches jobs as tasks on a tokio runtime
 */

use super::traits::{Job, Scheduler};
use crate::core::errors::{SchedulerError, SchedulerResult};
use tokio::runtime::Handle;

/// Scheduler backed by a tokio runtime handle
///
/// Each job becomes its own task, so it always runs after `schedule` returns.
/// Panics inside a job are contained by the runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Bind to the runtime the caller is currently running on
    pub fn current() -> SchedulerResult<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| SchedulerError::NoRuntime(e.to_string()))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, job: Job) {
        // Detached; completion is observed through the waiter's future
        drop(self.handle.spawn(async move { job() }));
    }

    fn name(&self) -> &'static str {
        "tokio"
    }
}
