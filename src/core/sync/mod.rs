/*!
 * Synchronization Primitives
 *
 * Building blocks for fair asynchronous synchronization:
 * - FIFO wait queue with cancellable waiters
 * - Single-assignment promise/future pairs
 *
 * # Architecture
 *
 * Waiter bookkeeping is a sequential `CircularDeque` behind one
 * `parking_lot::Mutex`. Resolution work is handed to a pluggable
 * `Scheduler` so it never runs under the lock.
 */

pub mod wait;

pub use wait::{FairWaitQueue, Promise, QueueStats, WaitFuture, WaitQueueConfig};
