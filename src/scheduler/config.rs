/*!
 * Scheduler Configuration
 *
 * Runtime configuration for the background completion pool
 */

use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::limits::{
    DEFAULT_SCHEDULER_WORKERS, DEFAULT_WORKER_THREAD_NAME, MAX_SCHEDULER_WORKERS,
    SCHEDULER_WORKERS_ENV,
};
use serde::{Deserialize, Serialize};

/// Thread pool scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Number of worker threads
    pub workers: usize,
    /// Worker thread name prefix (the worker index is appended)
    pub thread_name: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_SCHEDULER_WORKERS,
            thread_name: DEFAULT_WORKER_THREAD_NAME.to_string(),
        }
    }
}

impl SchedulerConfig {
    /// Configuration with a single worker (completions run in dispatch order)
    pub fn single_worker() -> Self {
        Self {
            workers: 1,
            ..Default::default()
        }
    }

    /// Default configuration with `FAIRQ_SCHEDULER_WORKERS` applied when set
    pub fn from_env() -> SchedulerResult<Self> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(SCHEDULER_WORKERS_ENV) {
            config.workers = raw.trim().parse().map_err(|_| {
                SchedulerError::InvalidConfig(format!(
                    "{SCHEDULER_WORKERS_ENV}={raw:?} is not a worker count"
                ))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check worker bounds
    pub fn validate(&self) -> SchedulerResult<()> {
        if self.workers == 0 || self.workers > MAX_SCHEDULER_WORKERS {
            return Err(SchedulerError::InvalidConfig(format!(
                "worker count {} must be in 1..={MAX_SCHEDULER_WORKERS}",
                self.workers
            )));
        }
        Ok(())
    }
}
