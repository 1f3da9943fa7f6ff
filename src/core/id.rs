/*!
 * ID Generation System
 * Caller-owned identity allocation with type-safe wrappers
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// ============================================================================
// Type-Safe ID Wrappers
// ============================================================================

/// Identity of a single waiter and its future
///
/// Made of the issuing allocator's source tag and a per-allocator sequence
/// number. Ids from different allocators never compare equal while the
/// waiter's future is alive. Zero is reserved as "unassigned" in both parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaiterId {
    source: NonZeroU64,
    sequence: NonZeroU64,
}

impl WaiterId {
    /// Build an id from raw parts, returning `None` if either is zero
    #[inline]
    pub fn new(source: u64, sequence: u64) -> Option<Self> {
        Some(Self {
            source: NonZeroU64::new(source)?,
            sequence: NonZeroU64::new(sequence)?,
        })
    }

    /// Tag of the allocator that issued this id
    #[inline]
    pub fn source(self) -> u64 {
        self.source.get()
    }

    /// Position in the issuing allocator's sequence
    #[inline]
    pub fn sequence(self) -> u64 {
        self.sequence.get()
    }
}

impl fmt::Display for WaiterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:x}", self.sequence.get(), self.source.get())
    }
}

// ============================================================================
// ID Generator Trait
// ============================================================================

/// Generic ID generator interface
pub trait IdGenerator<T> {
    /// Generate next ID
    fn next(&self) -> T;

    /// Get the value the next call to `next` will be derived from (for debugging)
    fn current(&self) -> u64;
}

// ============================================================================
// Atomic Counter Generator
// ============================================================================

/// Monotonic atomic counter shared by all clones
///
/// The address of the shared counter doubles as the generator's source tag.
/// It stays reserved for as long as any clone or [`SourceLease`] is alive.
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - Lock-free atomic operations
#[repr(C, align(64))]
pub struct AtomicGenerator<T> {
    counter: Arc<AtomicU64>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> AtomicGenerator<T> {
    /// Create new generator starting at given value
    ///
    /// A start of zero is bumped to one so the reserved value is never issued.
    #[inline]
    pub fn new(start: u64) -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(start.max(1))),
            _marker: std::marker::PhantomData,
        }
    }

    /// Create new generator starting at 1
    #[inline]
    pub fn default_start() -> Self {
        Self::new(1)
    }

    /// Tag distinguishing this generator (and its clones) from every other live one
    #[inline]
    pub fn source(&self) -> NonZeroU64 {
        let address = Arc::as_ptr(&self.counter) as usize as u64;
        NonZeroU64::new(address).unwrap_or(NonZeroU64::MIN)
    }

    /// Keep this generator's source tag reserved independently of the generator
    pub fn lease(&self) -> SourceLease {
        SourceLease(Arc::clone(&self.counter))
    }
}

/// Holds an allocator's source tag so no other allocator can be issued it
#[derive(Clone)]
pub struct SourceLease(Arc<AtomicU64>);

impl fmt::Debug for SourceLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceLease({:p})", Arc::as_ptr(&self.0))
    }
}

impl<T> Default for AtomicGenerator<T> {
    fn default() -> Self {
        Self::default_start()
    }
}

impl<T> Clone for AtomicGenerator<T> {
    fn clone(&self) -> Self {
        Self {
            counter: Arc::clone(&self.counter),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> fmt::Debug for AtomicGenerator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicGenerator")
            .field("current", &self.counter.load(Ordering::Relaxed))
            .finish()
    }
}

impl IdGenerator<WaiterId> for AtomicGenerator<WaiterId> {
    #[inline]
    fn next(&self) -> WaiterId {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed);
        match NonZeroU64::new(sequence) {
            Some(sequence) => WaiterId {
                source: self.source(),
                sequence,
            },
            None => panic!("waiter id counter wrapped around"),
        }
    }

    #[inline]
    fn current(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Convenience Type Aliases
// ============================================================================

/// Waiter identity allocator (no recycling - ids must stay unique for cancellation)
pub type WaiterIdAllocator = AtomicGenerator<WaiterId>;

// ============================================================================
// Tests
// ============================================================================
