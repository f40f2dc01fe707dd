use core::slice;
use std::fmt;

use crate::error::SequenceError;

/// A growable buffer with an explicit doubling policy and bounds-checked
/// element access.
///
/// # Overview
/// This is the storage primitive underneath every segment of
/// [`SegmentedDeque`](crate::SegmentedDeque) and the backing store of
/// [`ArraySequence`](crate::ArraySequence). It owns its growth decisions
/// instead of inheriting whatever `Vec` happens to do: when `append` finds the
/// buffer full, capacity is doubled (or set to 1 from empty) before the push,
/// so append stays amortized O(1) under this crate's cost model.
///
/// # Invariants
/// * `len() <= capacity()` always.
/// * `get`/`set` never touch memory outside `[0, len)`; violations surface as
///   [`SequenceError::IndexOutOfRange`], never as a panic.
pub struct DynArray<T> {
    items: Vec<T>,
}

impl<T> DynArray<T> {
    /// Creates an empty buffer with no allocation.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty buffer that can hold `capacity` elements before
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    // --- Inspection ---

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.items.as_mut_slice()
    }

    // --- Element access ---

    pub fn get(&self, index: usize) -> Result<&T, SequenceError> {
        self.items.get(index).ok_or(SequenceError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, SequenceError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(SequenceError::IndexOutOfRange { index, len })
    }

    /// Overwrites the element at `index`.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), SequenceError> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    // --- Modification ---

    /// Appends an element, doubling capacity first if the buffer is full.
    pub fn append(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            let grow = self.items.capacity().max(1);
            self.items.reserve_exact(grow);
        }
        self.items.push(item);
    }

    /// Grows or shrinks the logical size. New slots are filled with
    /// `T::default()`; shrinking truncates.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        if new_len > self.items.capacity() {
            let target = new_len.max(self.items.capacity() * 2);
            self.items.reserve_exact(target - self.items.len());
        }
        self.items.resize_with(new_len, T::default);
    }

    /// Shrinks the logical size to `new_len`; does nothing if the buffer is
    /// already that small. Unlike `resize`, this never needs `T: Default`.
    pub fn truncate(&mut self, new_len: usize) {
        self.items.truncate(new_len);
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Splits the buffer at `at`, returning a new buffer holding the tail
    /// `[at, len)` and leaving `[0, at)` behind.
    pub fn split_off(&mut self, at: usize) -> Self {
        Self {
            items: self.items.split_off(at),
        }
    }

    /// Raises capacity to at least `capacity` without changing the length.
    pub fn reserve(&mut self, capacity: usize) {
        if capacity > self.items.capacity() {
            self.items.reserve_exact(capacity - self.items.len());
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    // --- Iteration ---

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// --- Tests ---
