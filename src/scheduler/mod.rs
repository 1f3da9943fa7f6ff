/*!
 * Scheduler Module
 * Background execution contexts for deferred completion work
 *
 * # Implementations
 *
 * - **ThreadPoolScheduler**: dedicated worker threads (no runtime needed)
 * - **TokioScheduler**: tasks on an existing tokio runtime
 * - **ManualScheduler**: deterministic, caller-driven (tests)
 */

mod config;
mod manual;
mod pool;
mod runtime;
mod traits;

// Re-export public API
pub use config::SchedulerConfig;
pub use manual::ManualScheduler;
pub use pool::ThreadPoolScheduler;
pub use runtime::TokioScheduler;
pub use traits::{Job, Scheduler};
