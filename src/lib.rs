/*!
 * fairq
 * Fair asynchronous wait queue over a circular double-ended queue
 *
 * - `core::data_structures::CircularDeque`: indexed growable ring deque
 * - `core::sync::wait::FairWaitQueue`: FIFO, cancellable waiter registry
 * - `scheduler`: background execution contexts for waiter resolution
 */

pub mod core;
pub mod monitoring;
pub mod scheduler;

// Re-exports
pub use crate::core::data_structures::CircularDeque;
pub use crate::core::errors::{
    DequeError, DequeResult, PromiseError, PromiseResult, SchedulerError, SchedulerResult,
    WaitError, WaitResult,
};
pub use crate::core::id::{WaiterId, WaiterIdAllocator};
pub use crate::core::sync::wait::{FairWaitQueue, Promise, QueueStats, WaitFuture, WaitQueueConfig};
pub use monitoring::init_tracing;
pub use scheduler::{
    Job, ManualScheduler, Scheduler, SchedulerConfig, ThreadPoolScheduler, TokioScheduler,
};
