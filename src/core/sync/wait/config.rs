/*!
 * Wait Queue Configuration
 *
 * Sizing and labeling for fair wait queues
 */

use crate::core::limits::{
    DEFAULT_DEQUE_CAPACITY, HIGH_CONTENTION_WAIT_QUEUE_CAPACITY, SMALL_WAIT_QUEUE_CAPACITY,
};
use serde::{Deserialize, Serialize};

/// Fair wait queue configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitQueueConfig {
    /// Label attached to every trace event of the queue
    pub name: String,
    /// Initial waiter capacity, also used when the queue is drained
    pub initial_capacity: usize,
}

impl Default for WaitQueueConfig {
    fn default() -> Self {
        Self {
            name: "wait_queue".to_string(),
            initial_capacity: DEFAULT_DEQUE_CAPACITY,
        }
    }
}

impl WaitQueueConfig {
    /// Configuration for primitives that rarely have more than a few waiters
    pub fn small() -> Self {
        Self {
            initial_capacity: SMALL_WAIT_QUEUE_CAPACITY,
            ..Default::default()
        }
    }

    /// Configuration for bursts of many concurrent waiters
    pub fn high_contention() -> Self {
        Self {
            initial_capacity: HIGH_CONTENTION_WAIT_QUEUE_CAPACITY,
            ..Default::default()
        }
    }

    /// Set the trace label
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
