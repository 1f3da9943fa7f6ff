/*!
 * Limits and Constants
 *
 * Centralized location for capacities, thresholds, and environment keys.
 */

// =============================================================================
// DEQUE LIMITS
// =============================================================================

/// Default capacity of a freshly created circular deque
pub const DEFAULT_DEQUE_CAPACITY: usize = 8;

/// Smallest capacity a circular deque may hold
/// A zero-length buffer would make the modulo index mapping undefined
pub const MIN_DEQUE_CAPACITY: usize = 1;

// =============================================================================
// WAIT QUEUE LIMITS
// =============================================================================

/// Initial waiter capacity for small queues (single-owner primitives)
pub const SMALL_WAIT_QUEUE_CAPACITY: usize = 4;

/// Initial waiter capacity for queues expecting many concurrent waiters
/// [PERF] Avoids repeated doubling during a burst of enqueues
pub const HIGH_CONTENTION_WAIT_QUEUE_CAPACITY: usize = 256;

// =============================================================================
// SCHEDULER LIMITS
// =============================================================================

/// Default number of background completion workers
pub const DEFAULT_SCHEDULER_WORKERS: usize = 2;

/// Upper bound on background completion workers
pub const MAX_SCHEDULER_WORKERS: usize = 64;

/// Thread name prefix for background completion workers
pub const DEFAULT_WORKER_THREAD_NAME: &str = "fairq-worker";

/// Environment variable overriding the worker count
pub const SCHEDULER_WORKERS_ENV: &str = "FAIRQ_SCHEDULER_WORKERS";

/// Environment variable enabling JSON trace output
pub const TRACE_JSON_ENV: &str = "FAIRQ_TRACE_JSON";
