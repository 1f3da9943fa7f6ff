/*!
 * Error Types
 * Centralized error handling with thiserror and miette diagnostics
 */

use miette::Diagnostic;
use thiserror::Error;

/// Result type for circular deque operations
pub type DequeResult<T> = Result<T, DequeError>;

/// Result type for promise resolution
pub type PromiseResult<T> = Result<T, PromiseError>;

/// Result type observed by waiters
pub type WaitResult<T> = Result<T, WaitError>;

/// Result type for scheduler construction and shutdown
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Structural errors raised by [`CircularDeque`](crate::core::data_structures::CircularDeque)
///
/// These indicate a logic bug in the caller. They are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum DequeError {
    #[error("The deque is empty")]
    #[diagnostic(
        code(deque::empty_container),
        help("Check `is_empty()` before popping from the deque.")
    )]
    EmptyContainer,

    #[error("Index {index} out of range for deque of length {len}")]
    #[diagnostic(
        code(deque::index_out_of_range),
        help("Existing-element indices must be in [0, len); insertion points in [0, len].")
    )]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Range starting at {offset} with {count} elements exceeds deque length {len}")]
    #[diagnostic(
        code(deque::invalid_range),
        help("The range [offset, offset + count) must lie inside [0, len).")
    )]
    InvalidRange {
        offset: usize,
        count: usize,
        len: usize,
    },

    #[error("Capacity {requested} cannot be less than the element count {len}")]
    #[diagnostic(
        code(deque::invalid_state),
        help("Remove elements before shrinking the capacity.")
    )]
    InvalidState { requested: usize, len: usize },

    #[error("Capacity must be greater than 0")]
    #[diagnostic(code(deque::invalid_capacity))]
    InvalidCapacity,
}

/// Errors raised when resolving a [`Promise`](crate::core::sync::wait::Promise)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Diagnostic)]
pub enum PromiseError {
    #[error("Promise was already completed or canceled")]
    #[diagnostic(
        code(promise::already_completed),
        help("A promise can be resolved exactly once.")
    )]
    AlreadyCompleted,

    #[error("The waiting future was dropped before the promise resolved")]
    #[diagnostic(code(promise::detached))]
    Detached,
}

/// Errors observed by the holder of a [`WaitFuture`](crate::core::sync::wait::WaitFuture)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Diagnostic)]
pub enum WaitError {
    #[error("Wait was cancelled")]
    #[diagnostic(
        code(wait::cancelled),
        help("The waiter was removed by cancel_one/cancel_all or its queue was dropped.")
    )]
    Cancelled,
}

/// Scheduler lifecycle errors
#[derive(Error, Debug, Diagnostic)]
pub enum SchedulerError {
    #[error("Failed to spawn scheduler worker: {0}")]
    #[diagnostic(
        code(scheduler::spawn_failed),
        help("The OS refused to create a thread. Check process thread limits.")
    )]
    SpawnFailed(#[from] std::io::Error),

    #[error("Scheduler worker panicked during shutdown")]
    #[diagnostic(code(scheduler::worker_panicked))]
    WorkerPanicked,

    #[error("No tokio runtime is available: {0}")]
    #[diagnostic(
        code(scheduler::no_runtime),
        help("Create the TokioScheduler from inside a runtime or pass a Handle explicitly.")
    )]
    NoRuntime(String),

    #[error("Invalid scheduler configuration: {0}")]
    #[diagnostic(code(scheduler::invalid_config))]
    InvalidConfig(String),
}
