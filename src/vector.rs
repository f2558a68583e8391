use crate::{ArrayBuf, VecError};
use std::ops::{Deref, DerefMut};

/// Capacity request used to construct an empty `SimpleVec` with preallocated slots.
///
/// Keeps "reserve `n` slots" apart from "create `n` default items", which take the same number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReserveProxy {
    capacity: usize,
}

impl ReserveProxy {
    pub fn new(capacity: usize) -> ReserveProxy {
        ReserveProxy { capacity }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Shorthand for `ReserveProxy::new`, meant for `SimpleVec::from(reserve(n))`.
pub fn reserve(capacity: usize) -> ReserveProxy {
    ReserveProxy::new(capacity)
}

/// Growable array with an explicit logical size inside a fixed-size `ArrayBuf`.
///
/// Items at `[0, len)` are live. Slots at `[len, capacity)` still hold valid values left over from
/// default construction or from earlier shrinking, but they are not part of the sequence and are
/// only dropped when overwritten or when the storage is freed.
///
/// Positions are plain indices: `0` is the beginning and `len()` is the end. Any operation that
/// reallocates, and any insert or erase at or before a position, invalidates what the position
/// used to refer to.
pub struct SimpleVec<T> {
    _buf: ArrayBuf<T>,
    _len: usize,
}

impl<T> SimpleVec<T> {
    /// Empty array without an allocation.
    pub const fn new() -> SimpleVec<T> {
        SimpleVec {
            _buf: ArrayBuf::empty(),
            _len: 0,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self._len
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self._buf.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self._len == 0
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        &self._buf[..self._len]
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self._buf[..self._len]
    }

    /// Pointer to the first slot; null when nothing is allocated.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self._buf.as_ptr()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns the item at `index`, or `OutOfRange` when `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, VecError> {
        let len = self._len;
        self.as_slice().get(index).ok_or(VecError::OutOfRange { index, len })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, VecError> {
        let len = self._len;
        self.as_mut_slice().get_mut(index).ok_or(VecError::OutOfRange { index, len })
    }

    /// # Safety
    ///
    /// `index` must be below `len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self._len, "get_unchecked: index {} >= len {}", index, self._len);
        self._buf.get_unchecked(index)
    }

    /// # Safety
    ///
    /// `index` must be below `len()`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self._len, "get_unchecked_mut: index {} >= len {}", index, self._len);
        self._buf.get_unchecked_mut(index)
    }

    /// Forgets the last item. Does nothing on an empty array.
    pub fn pop_back(&mut self) {
        self._len = self._len.saturating_sub(1);
    }

    /// Removes the item at `pos` by shifting the tail one slot towards the head.
    ///
    /// Returns the position of the item that followed the erased one, which is `len()` when the
    /// last item was erased. Panics if `pos` does not refer to a live item.
    pub fn erase(&mut self, pos: usize) -> usize {
        assert!(pos < self._len, "erase position {} is not below len {}", pos, self._len);
        self._buf[pos..self._len].rotate_left(1);
        self._len -= 1;
        pos
    }

    /// Sets the length to zero. Capacity and slot contents stay.
    pub fn clear(&mut self) {
        self._len = 0;
    }

    /// Exchanges storage, length and capacity with `other`.
    pub fn swap(&mut self, other: &mut SimpleVec<T>) {
        self._buf.swap(&mut other._buf);
        std::mem::swap(&mut self._len, &mut other._len);
    }

    /// Moves everything out into a new array; this one is left empty without an allocation.
    pub fn take(&mut self) -> SimpleVec<T> {
        std::mem::replace(self, SimpleVec::new())
    }

    /// Wraps a buffer whose first `len` slots are the live items.
    pub(crate) fn from_buf(buf: ArrayBuf<T>, len: usize) -> SimpleVec<T> {
        debug_assert!(len <= buf.len(), "live items exceed capacity");
        SimpleVec {
            _buf: buf,
            _len: len,
        }
    }

    fn grown_capacity(&self) -> Result<usize, VecError> {
        let capacity = self.capacity();
        if capacity == 0 {
            Ok(1)
        } else {
            capacity.checked_mul(2).ok_or(VecError::CapacityOverflow { requested: capacity })
        }
    }
}

impl<T: Default> SimpleVec<T> {
    /// Array of `len` default items, with capacity exactly `len`.
    pub fn with_len(len: usize) -> SimpleVec<T> {
        SimpleVec {
            _buf: ArrayBuf::new(len),
            _len: len,
        }
    }

    /// Empty array with `capacity` slots already allocated.
    pub fn with_capacity(capacity: usize) -> SimpleVec<T> {
        SimpleVec::with_reserve(ReserveProxy::new(capacity))
    }

    pub fn with_reserve(request: ReserveProxy) -> SimpleVec<T> {
        SimpleVec {
            _buf: ArrayBuf::new(request.capacity()),
            _len: 0,
        }
    }

    /// Allocates `capacity` default slots and moves the live items into them, skipping the slot
    /// at `gap` if there is one. Nothing is moved unless the allocation fully succeeds.
    fn relocated(&mut self, capacity: usize, gap: Option<usize>) -> Result<ArrayBuf<T>, VecError> {
        let mut fresh = ArrayBuf::try_new(capacity)?;
        for (index, item) in self._buf[..self._len].iter_mut().enumerate() {
            let target = match gap {
                Some(at) if index >= at => index + 1,
                _ => index,
            };
            std::mem::swap(item, &mut fresh[target]);
        }
        Ok(fresh)
    }

    pub fn try_push_back(&mut self, value: T) -> Result<(), VecError> {
        if self._len < self.capacity() {
            self._buf[self._len] = value;
        } else {
            let capacity = self.grown_capacity()?;
            let mut fresh = self.relocated(capacity, None)?;
            debug!("grow {} -> {} on push", self.capacity(), capacity);
            fresh[self._len] = value;
            self._buf.swap(&mut fresh);
        }
        self._len += 1;
        Ok(())
    }

    /// Appends `value`, doubling the capacity when it is exhausted.
    pub fn push_back(&mut self, value: T) {
        if let Err(e) = self.try_push_back(value) {
            e.fail()
        }
    }

    pub fn try_insert(&mut self, pos: usize, value: T) -> Result<usize, VecError> {
        assert!(pos <= self._len, "insert position {} is past len {}", pos, self._len);
        if self._len < self.capacity() {
            let shifted = &mut self._buf[pos..=self._len];
            shifted.rotate_right(1);
            shifted[0] = value;
        } else {
            let capacity = self.grown_capacity()?;
            let mut fresh = self.relocated(capacity, Some(pos))?;
            debug!("grow {} -> {} on insert at {}", self.capacity(), capacity, pos);
            fresh[pos] = value;
            self._buf.swap(&mut fresh);
        }
        self._len += 1;
        Ok(pos)
    }

    /// Inserts `value` before the item at `pos` (or at the end when `pos == len()`) and returns
    /// the position of the inserted item. Panics if `pos > len()`.
    pub fn insert(&mut self, pos: usize, value: T) -> usize {
        match self.try_insert(pos, value) {
            Ok(pos) => pos,
            Err(e) => e.fail(),
        }
    }

    pub fn try_resize(&mut self, len: usize) -> Result<(), VecError> {
        if len <= self._len {
            self._len = len;
            return Ok(());
        }
        if len <= self.capacity() {
            for slot in &mut self._buf[self._len..len] {
                *slot = T::default();
            }
        } else {
            let mut fresh = self.relocated(len, None)?;
            debug!("grow {} -> {} on resize", self.capacity(), len);
            self._buf.swap(&mut fresh);
        }
        self._len = len;
        Ok(())
    }

    /// Changes the length to `len`.
    ///
    /// Shrinking only moves the end. Growing fills the new positions with `T::default()`; if that
    /// exceeds the capacity, exactly `len` slots are allocated.
    pub fn resize(&mut self, len: usize) {
        if let Err(e) = self.try_resize(len) {
            e.fail()
        }
    }

    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), VecError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        let mut fresh = self.relocated(capacity, None)?;
        debug!("grow {} -> {} on reserve", self.capacity(), capacity);
        self._buf.swap(&mut fresh);
        Ok(())
    }

    /// Makes the capacity at least `capacity`. Never shrinks and never changes the items.
    pub fn reserve(&mut self, capacity: usize) {
        if let Err(e) = self.try_reserve(capacity) {
            e.fail()
        }
    }
}

impl<T: Clone> SimpleVec<T> {
    /// Array of `len` copies of `value`.
    pub fn from_elem(len: usize, value: &T) -> SimpleVec<T> {
        SimpleVec {
            _buf: ArrayBuf::from_fn(len, |_| value.clone()),
            _len: len,
        }
    }

    /// Array holding copies of `items`, with capacity exactly `items.len()`.
    pub fn from_slice(items: &[T]) -> SimpleVec<T> {
        SimpleVec {
            _buf: ArrayBuf::from_fn(items.len(), |i| items[i].clone()),
            _len: items.len(),
        }
    }
}

impl<T: Clone + Default> SimpleVec<T> {
    /// Appends a copy of `value`. The copy is made before any storage changes.
    pub fn push_back_clone(&mut self, value: &T) {
        self.push_back(value.clone())
    }

    pub fn insert_clone(&mut self, pos: usize, value: &T) -> usize {
        self.insert(pos, value.clone())
    }
}

impl<T> Default for SimpleVec<T> {
    fn default() -> Self {
        SimpleVec::new()
    }
}

impl<T: Clone> Clone for SimpleVec<T> {
    fn clone(&self) -> Self {
        SimpleVec::from_slice(self.as_slice())
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T: Default> From<ReserveProxy> for SimpleVec<T> {
    fn from(request: ReserveProxy) -> Self {
        SimpleVec::with_reserve(request)
    }
}

impl<T> Deref for SimpleVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for SimpleVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T> IntoIterator for &'a SimpleVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SimpleVec<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
