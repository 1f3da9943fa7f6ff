/*!
 * Manual Scheduler
 *
 * Deterministic scheduler that only runs jobs when told to
 */

use super::traits::{Job, Scheduler};
use crossbeam_queue::SegQueue;

/// Scheduler that parks jobs until [`run_pending`](Self::run_pending) is called
///
/// Intended for tests and single-threaded drivers: the hand-off point is
/// explicit, so the order in which completions become visible is fully
/// controlled by the caller.
#[derive(Default)]
pub struct ManualScheduler {
    jobs: SegQueue<Job>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued jobs
    pub fn pending(&self) -> usize {
        self.jobs.len()
    }

    /// Run the oldest queued job, returning whether one ran
    pub fn run_one(&self) -> bool {
        match self.jobs.pop() {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run jobs until the queue is empty, including jobs scheduled meanwhile
    ///
    /// Returns the number of jobs run.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while self.run_one() {
            ran += 1;
        }
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, job: Job) {
        self.jobs.push(job);
    }

    fn name(&self) -> &'static str {
        "manual"
    }
}
