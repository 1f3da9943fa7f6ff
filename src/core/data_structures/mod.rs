/*!
 * Data Structures
 *
 * Sequential containers used by the synchronization layer:
 * - Circular deque with O(1) access at both ends and by index
 * - Read-only borrowing and owning iterators over it
 *
 * # Performance
 *
 * - Front and back operations never move other elements
 * - Middle insert/remove only shifts the shorter side
 *
 * # Use Cases
 *
 * - **Wait queues**: FIFO waiter registry with targeted removal
 * - **Work lists**: double-ended buffers that need random access
 */

mod circular_deque;
mod iter;

pub use circular_deque::CircularDeque;
pub use iter::{IntoIter, Iter};
