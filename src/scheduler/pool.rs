/*!
 * Thread Pool Scheduler
 *
 * Fixed set of named worker threads fed by an unbounded flume channel
 */

use super::config::SchedulerConfig;
use super::traits::{Job, Scheduler};
use crate::core::errors::{SchedulerError, SchedulerResult};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, warn};

/// Scheduler running jobs on dedicated worker threads
///
/// # Performance
///
/// - `schedule` is a single channel send (no allocation beyond the boxed job)
/// - Workers block on the channel while idle (no spinning)
///
/// A job that panics is caught and logged; the worker keeps running.
pub struct ThreadPoolScheduler {
    sender: RwLock<Option<flume::Sender<Job>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    executed: Arc<AtomicU64>,
    worker_count: usize,
}

impl ThreadPoolScheduler {
    /// Spawn the worker threads described by `config`
    pub fn new(config: SchedulerConfig) -> SchedulerResult<Self> {
        config.validate()?;

        let (sender, receiver) = flume::unbounded::<Job>();
        let executed = Arc::new(AtomicU64::new(0));
        let mut workers = Vec::with_capacity(config.workers);

        for index in 0..config.workers {
            let receiver = receiver.clone();
            let executed = Arc::clone(&executed);
            let handle = thread::Builder::new()
                .name(format!("{}-{}", config.thread_name, index))
                .spawn(move || worker_loop(index, receiver, executed))?;
            workers.push(handle);
        }

        debug!(
            workers = config.workers,
            thread_name = %config.thread_name,
            "Thread pool scheduler started"
        );

        Ok(Self {
            sender: RwLock::new(Some(sender)),
            workers: Mutex::new(workers),
            executed,
            worker_count: config.workers,
        })
    }

    /// Create with default configuration
    pub fn with_defaults() -> SchedulerResult<Self> {
        Self::new(SchedulerConfig::default())
    }

    /// Number of jobs that finished running (including ones that panicked)
    pub fn executed(&self) -> u64 {
        self.executed.load(Ordering::Acquire)
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// True once `shutdown` has run; later jobs are dropped unrun
    pub fn is_shut_down(&self) -> bool {
        self.sender.read().is_none()
    }

    /// Stop accepting jobs, let workers drain the queue, and join them
    ///
    /// Idempotent. A worker calling this on its own pool is not joined.
    pub fn shutdown(&self) -> SchedulerResult<()> {
        drop(self.sender.write().take());

        let workers: Vec<_> = self.workers.lock().drain(..).collect();
        let current = thread::current().id();
        let mut result = Ok(());

        for handle in workers {
            if handle.thread().id() == current {
                continue;
            }
            if handle.join().is_err() {
                result = Err(SchedulerError::WorkerPanicked);
            }
        }

        debug!(executed = self.executed(), "Thread pool scheduler stopped");
        result
    }
}

impl Scheduler for ThreadPoolScheduler {
    fn schedule(&self, job: Job) {
        let sender = self.sender.read();
        match sender.as_ref() {
            Some(sender) => {
                if sender.send(job).is_err() {
                    warn!("All scheduler workers exited, dropping job");
                }
            }
            None => warn!("Scheduler is shut down, dropping job"),
        }
    }

    fn name(&self) -> &'static str {
        "thread_pool"
    }
}

impl Drop for ThreadPoolScheduler {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            error!(error = %e, "Thread pool scheduler shutdown failed");
        }
    }
}

fn worker_loop(index: usize, receiver: flume::Receiver<Job>, executed: Arc<AtomicU64>) {
    while let Ok(job) = receiver.recv() {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
            error!(
                worker = index,
                panic = panic_message(payload.as_ref()),
                "Scheduled job panicked"
            );
        }
        executed.fetch_add(1, Ordering::AcqRel);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_runs_off_calling_thread() {
        let scheduler = ThreadPoolScheduler::with_defaults().unwrap();
        let (tx, rx) = mpsc::channel();
        let caller = thread::current().id();

        scheduler.schedule(Box::new(move || {
            tx.send(thread::current().id()).unwrap();
        }));

        let ran_on = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_ne!(ran_on, caller);
    }

    #[test]
    fn test_shutdown_drains_queue() {
        let scheduler = ThreadPoolScheduler::new(SchedulerConfig::single_worker()).unwrap();
        let counter = Arc::new(AtomicU64::new(0));

        for _ in 0..100 {
            let counter = Arc::clone(&counter);
            scheduler.schedule(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }

        assert!(!scheduler.is_shut_down());
        scheduler.shutdown().unwrap();
        assert!(scheduler.is_shut_down());
        assert_eq!(counter.load(Ordering::SeqCst), 100);
        assert_eq!(scheduler.executed(), 100);

        // Jobs after shutdown are dropped, not run
        let counter_after = Arc::clone(&counter);
        scheduler.schedule(Box::new(move || {
            counter_after.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn test_panicking_job_keeps_worker_alive() {
        let scheduler = ThreadPoolScheduler::new(SchedulerConfig::single_worker()).unwrap();
        let (tx, rx) = mpsc::channel();

        scheduler.schedule(Box::new(|| panic!("boom")));
        scheduler.schedule(Box::new(move || tx.send(()).unwrap()));

        assert!(rx.recv_timeout(Duration::from_secs(1)).is_ok());
        scheduler.shutdown().unwrap();
        assert_eq!(scheduler.executed(), 2);
    }

    #[test]
    fn test_worker_names() {
        let config = SchedulerConfig {
            workers: 1,
            thread_name: "completion".to_string(),
        };
        let scheduler = ThreadPoolScheduler::new(config).unwrap();
        let (tx, rx) = mpsc::channel();

        scheduler.schedule(Box::new(move || {
            tx.send(thread::current().name().map(str::to_string)).unwrap();
        }));

        let name = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(name.as_deref(), Some("completion-0"));
    }
}
