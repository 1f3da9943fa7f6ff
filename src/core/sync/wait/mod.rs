/*!
 * Fair Wait Primitives
 *
 * FIFO waiter registry with promise/future completion:
 * - `FairWaitQueue` registers waiters and releases them oldest-first
 * - `Promise` / `WaitFuture` carry each waiter's single resolution
 *
 * # Architecture
 *
 * A consuming primitive (async mutex, semaphore, ready signal) calls
 * `enqueue()` when it cannot grant access, hands the returned future to its
 * caller, and later calls `dequeue_one(result)` on release. Resolution is
 * dispatched to a `Scheduler`, never run under the queue lock.
 *
 * # Use Cases
 *
 * - **Async mutex/semaphore**: fair hand-off of permits
 * - **Condition variables**: notify one / notify all
 * - **Collection readiness**: wake consumers when items arrive
 */

mod config;
mod fair_queue;
mod promise;
mod stats;

// Re-export public API
pub use config::WaitQueueConfig;
pub use fair_queue::FairWaitQueue;
pub use promise::{promise, Promise, WaitFuture};
pub use stats::QueueStats;
