/*!
 * Core Module
 * Containers, synchronization primitives, identities and error handling
 */

pub mod data_structures;
pub mod errors;
pub mod id;
pub mod limits;
pub mod sync;

// Re-export for convenience
pub use data_structures::CircularDeque;
pub use errors::*;
pub use id::{AtomicGenerator, IdGenerator, SourceLease, WaiterId, WaiterIdAllocator};
pub use sync::{FairWaitQueue, Promise, QueueStats, WaitFuture, WaitQueueConfig};
