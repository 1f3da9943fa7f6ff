/*!
 * Circular Deque
 *
 * Growable double-ended queue over a circular buffer with O(1) indexed access.
 *
 * # Layout
 *
 * Logical index `i` lives at physical slot `(offset + i) % capacity`. The live
 * range is "split" when it wraps past the physical end of the buffer, in which
 * case it is made of two contiguous segments: `[offset, capacity)` followed by
 * `[0, len - (capacity - offset))`.
 *
 * # Performance
 *
 * - push/pop at either end: O(1) amortized (capacity doubles when full)
 * - get/set: O(1)
 * - insert/remove in the middle: O(min(i, len - i)), only the shorter side moves
 */

use super::iter::{IntoIter, Iter};
use crate::core::errors::{DequeError, DequeResult};
use crate::core::limits::{DEFAULT_DEQUE_CAPACITY, MIN_DEQUE_CAPACITY};
use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut, Range};

/// Double-ended queue backed by a growable circular buffer
///
/// Not internally synchronized. Wrap it in a lock to share it between threads,
/// as [`FairWaitQueue`](crate::core::sync::wait::FairWaitQueue) does.
///
/// # Example
///
/// ```
/// use fairq::core::data_structures::CircularDeque;
///
/// let mut deque = CircularDeque::with_capacity(4);
/// deque.push_back(2);
/// deque.push_front(1);
/// deque.insert(2, 3).unwrap();
///
/// assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
/// assert_eq!(deque.pop_front(), Ok(1));
/// ```
pub struct CircularDeque<T> {
    buffer: Box<[Option<T>]>,
    offset: usize,
    len: usize,
}

fn alloc_buffer<T>(capacity: usize) -> Box<[Option<T>]> {
    (0..capacity).map(|_| None).collect()
}

impl<T> CircularDeque<T> {
    /// Create an empty deque with the default capacity (8)
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_DEQUE_CAPACITY)
    }

    /// Create an empty deque with room for `capacity` elements
    ///
    /// A capacity of zero is raised to the minimum capacity of one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: alloc_buffer(capacity.max(MIN_DEQUE_CAPACITY)),
            offset: 0,
            len: 0,
        }
    }

    /// Number of live elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when the next push has to grow the buffer
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Resize the backing buffer, repacking the live range at physical offset 0
    ///
    /// # Errors
    ///
    /// - `InvalidCapacity` if `capacity` is zero
    /// - `InvalidState` if `capacity` is below the current element count
    pub fn set_capacity(&mut self, capacity: usize) -> DequeResult<()> {
        if capacity < MIN_DEQUE_CAPACITY {
            return Err(DequeError::InvalidCapacity);
        }
        if capacity < self.len {
            return Err(DequeError::InvalidState {
                requested: capacity,
                len: self.len,
            });
        }
        if capacity != self.capacity() {
            self.reallocate(capacity);
        }
        Ok(())
    }

    /// Append an element at the back
    pub fn push_back(&mut self, value: T) {
        self.ensure_capacity_for_one();
        let slot = self.buffer_index(self.len);
        self.buffer[slot] = Some(value);
        self.len += 1;
    }

    /// Prepend an element at the front
    pub fn push_front(&mut self, value: T) {
        self.ensure_capacity_for_one();
        let slot = self.pre_decrement(1);
        self.buffer[slot] = Some(value);
        self.len += 1;
    }

    /// Remove and return the first element
    pub fn pop_front(&mut self) -> DequeResult<T> {
        if self.is_empty() {
            return Err(DequeError::EmptyContainer);
        }
        self.len -= 1;
        let slot = self.post_increment(1);
        Ok(self.take_live(slot))
    }

    /// Remove and return the last element
    pub fn pop_back(&mut self) -> DequeResult<T> {
        if self.is_empty() {
            return Err(DequeError::EmptyContainer);
        }
        let slot = self.buffer_index(self.len - 1);
        self.len -= 1;
        Ok(self.take_live(slot))
    }

    pub fn front(&self) -> Option<&T> {
        self.get(0).ok()
    }

    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last).ok())
    }

    /// Borrow the element at logical `index`
    pub fn get(&self, index: usize) -> DequeResult<&T> {
        self.check_existing_index(index)?;
        Ok(self.live(index))
    }

    /// Mutably borrow the element at logical `index`
    pub fn get_mut(&mut self, index: usize) -> DequeResult<&mut T> {
        self.check_existing_index(index)?;
        let slot = self.buffer_index(index);
        match self.buffer[slot].as_mut() {
            Some(value) => Ok(value),
            None => unreachable!("live slot {slot} is vacant"),
        }
    }

    /// Replace the element at logical `index`, returning the previous value
    pub fn set(&mut self, index: usize, value: T) -> DequeResult<T> {
        let current = self.get_mut(index)?;
        Ok(mem::replace(current, value))
    }

    /// Insert an element so that it ends up at logical `index`
    ///
    /// `index == 0` and `index == len` degrade to `push_front` / `push_back`.
    /// Otherwise the shorter side of the insertion point is shifted by one slot.
    pub fn insert(&mut self, index: usize, value: T) -> DequeResult<()> {
        self.check_new_index(index)?;

        if index == 0 {
            self.push_front(value);
            return Ok(());
        }
        if index == self.len {
            self.push_back(value);
            return Ok(());
        }

        self.ensure_capacity_for_one();
        self.open_gap(index, 1);
        let slot = self.buffer_index(index);
        self.buffer[slot] = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Insert a sequence of elements starting at logical `index`
    ///
    /// Grows the capacity to exactly `len + n` when the elements do not fit.
    pub fn insert_range<I>(&mut self, index: usize, items: I) -> DequeResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_new_index(index)?;

        let items: Vec<T> = items.into_iter().collect();
        let count = items.len();
        if count == 0 {
            return Ok(());
        }

        if count > self.capacity() - self.len {
            let required = self
                .len
                .checked_add(count)
                .expect("circular deque capacity overflow");
            self.reallocate(required);
        }

        self.open_gap(index, count);
        for (k, item) in items.into_iter().enumerate() {
            let slot = self.buffer_index(index + k);
            self.buffer[slot] = Some(item);
        }
        self.len += count;
        Ok(())
    }

    /// Remove and return the element at logical `index`
    ///
    /// The first and last index degrade to `pop_front` / `pop_back`. Otherwise
    /// the shorter side is shifted to close the gap.
    pub fn remove_at(&mut self, index: usize) -> DequeResult<T> {
        self.check_existing_index(index)?;

        if index == 0 {
            return self.pop_front();
        }
        if index == self.len - 1 {
            return self.pop_back();
        }

        let slot = self.buffer_index(index);
        let removed = self.take_live(slot);
        self.close_gap(index, 1);
        Ok(removed)
    }

    /// Remove `count` elements starting at logical `offset`, returned in order
    pub fn remove_range(&mut self, offset: usize, count: usize) -> DequeResult<Vec<T>> {
        if offset > self.len || count > self.len - offset {
            return Err(DequeError::InvalidRange {
                offset,
                count,
                len: self.len,
            });
        }
        if count == 0 {
            return Ok(Vec::new());
        }

        let removed = (offset..offset + count)
            .map(|index| {
                let slot = self.buffer_index(index);
                self.take_live(slot)
            })
            .collect();
        self.close_gap(offset, count);
        Ok(removed)
    }

    /// Logical index of the first element matching `predicate`
    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().position(predicate)
    }

    /// Remove and return the first element matching `predicate`
    pub fn remove_first_where<P>(&mut self, predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        let index = self.position(predicate)?;
        self.remove_at(index).ok()
    }

    /// Remove every element, leaving the capacity untouched
    pub fn clear(&mut self) {
        if mem::needs_drop::<T>() {
            let (head, tail) = self.live_ranges();
            for slot in head.chain(tail) {
                self.buffer[slot] = None;
            }
        }
        self.offset = 0;
        self.len = 0;
    }

    /// Lazy read-only iteration in logical order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    // ------------------------------------------------------------------------
    // Index arithmetic
    // ------------------------------------------------------------------------

    /// True when the live range wraps past the physical end of the buffer
    #[inline]
    fn is_split(&self) -> bool {
        self.offset > self.capacity() - self.len
    }

    #[inline]
    fn buffer_index(&self, index: usize) -> usize {
        (index + self.offset) % self.capacity()
    }

    /// Physical slots of the live range, in logical order
    fn live_ranges(&self) -> (Range<usize>, Range<usize>) {
        if self.is_split() {
            let head_len = self.capacity() - self.offset;
            (self.offset..self.capacity(), 0..self.len - head_len)
        } else {
            (self.offset..self.offset + self.len, 0..0)
        }
    }

    /// Advance `offset` by `value`, returning the offset before the move
    #[inline]
    fn post_increment(&mut self, value: usize) -> usize {
        let previous = self.offset;
        self.offset = (self.offset + value) % self.capacity();
        previous
    }

    /// Retreat `offset` by `value` (at most `capacity`), returning the new offset
    #[inline]
    fn pre_decrement(&mut self, value: usize) -> usize {
        debug_assert!(value <= self.capacity());
        self.offset = (self.offset + self.capacity() - value) % self.capacity();
        self.offset
    }

    #[inline]
    pub(super) fn live(&self, index: usize) -> &T {
        let slot = self.buffer_index(index);
        match self.buffer[slot].as_ref() {
            Some(value) => value,
            None => unreachable!("live slot {slot} is vacant"),
        }
    }

    fn take_live(&mut self, slot: usize) -> T {
        match self.buffer[slot].take() {
            Some(value) => value,
            None => unreachable!("live slot {slot} is vacant"),
        }
    }

    #[inline]
    fn move_slot(&mut self, from: usize, to: usize) {
        let src = self.buffer_index(from);
        let dst = self.buffer_index(to);
        self.buffer[dst] = self.buffer[src].take();
    }

    fn check_existing_index(&self, index: usize) -> DequeResult<()> {
        if index >= self.len {
            return Err(DequeError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    fn check_new_index(&self, index: usize) -> DequeResult<()> {
        if index > self.len {
            return Err(DequeError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Growth and shifting
    // ------------------------------------------------------------------------

    fn ensure_capacity_for_one(&mut self) {
        if self.is_full() {
            let doubled = self
                .capacity()
                .checked_mul(2)
                .expect("circular deque capacity overflow");
            self.reallocate(doubled);
        }
    }

    /// Move the live range into a fresh buffer starting at physical slot 0
    ///
    /// When split, the segment at the physical end (logical head) is copied
    /// first, then the wrapped segment at the physical start.
    fn reallocate(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.len);
        let mut fresh = alloc_buffer(capacity);
        let (head, tail) = self.live_ranges();
        for (dst, src) in head.chain(tail).enumerate() {
            fresh[dst] = self.buffer[src].take();
        }
        self.buffer = fresh;
        self.offset = 0;
    }

    /// Make room for `count` vacant slots at logical `index`
    ///
    /// Requires `len + count <= capacity`. Does not touch `len`.
    fn open_gap(&mut self, index: usize, count: usize) {
        debug_assert!(self.len + count <= self.capacity());

        if index < self.len / 2 {
            // Rotate the view down by `count`, then slide [0, index) back into place
            self.pre_decrement(count);
            for j in 0..index {
                self.move_slot(j + count, j);
            }
        } else {
            // Slide [index, len) up by `count`, highest first
            for j in (index..self.len).rev() {
                self.move_slot(j, j + count);
            }
        }
    }

    /// Close the already vacated slots `[index, index + count)`
    fn close_gap(&mut self, index: usize, count: usize) {
        if index == 0 {
            self.post_increment(count);
            self.len -= count;
            return;
        }
        if index == self.len - count {
            self.len -= count;
            return;
        }

        if index + count / 2 < self.len / 2 {
            // Slide [0, index) up by `count`, highest first, then rotate the view
            for j in (0..index).rev() {
                self.move_slot(j, j + count);
            }
            self.post_increment(count);
        } else {
            // Slide [index + count, len) down by `count`
            for j in index..self.len - count {
                self.move_slot(j + count, j);
            }
        }
        self.len -= count;
    }
}

impl<T: PartialEq> CircularDeque<T> {
    /// Logical index of the first element equal to `value`
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.position(|item| item == value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Remove the first element equal to `value`, returning whether one was found
    pub fn remove_item(&mut self, value: &T) -> bool {
        self.remove_first_where(|item| item == value).is_some()
    }
}

impl<T> Default for CircularDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for CircularDeque<T> {
    fn clone(&self) -> Self {
        let mut cloned = Self::with_capacity(self.capacity());
        cloned.extend(self.iter().cloned());
        cloned
    }
}

impl<T: PartialEq> PartialEq for CircularDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CircularDeque<T> {}

impl<T: fmt::Debug> fmt::Debug for CircularDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircularDeque")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("items", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Index<usize> for CircularDeque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for CircularDeque<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> Extend<T> for CircularDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for CircularDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut deque = Self::with_capacity(iter.size_hint().0.max(DEFAULT_DEQUE_CAPACITY));
        deque.extend(iter);
        deque
    }
}

impl<T> IntoIterator for CircularDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a CircularDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
