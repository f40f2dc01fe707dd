use core::cmp::Ordering;
use core::mem;
use std::fmt;

use crate::dyn_array::DynArray;
use crate::error::SequenceError;
use crate::sequence::{MutableSequence, Sequence};

/// Segment capacity used by `Default` and `FromIterator`.
pub const DEFAULT_SEGMENT_CAPACITY: usize = 4;

/// One node of the deque: a bounded buffer plus links to its neighbors.
///
/// Segments live in the deque's slot table and reference each other by slot
/// index, so there are no ownership cycles to manage; freed slots go onto a
/// free list and get recycled with their buffer allocation intact.
struct Segment<T> {
    data: DynArray<T>,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<T> Segment<T> {
    fn new(capacity: usize) -> Self {
        let mut data = DynArray::new();
        data.reserve(capacity);
        Self {
            data,
            prev: None,
            next: None,
        }
    }
}

/// A double-ended queue stored as a chain of fixed-capacity segments.
///
/// # Overview
/// Elements live in segments of at most `segment_capacity` items each, linked
/// into a chain. Pushes at either end are amortized O(1) (prepending into a
/// partially filled head shifts that one segment); indexed access walks the
/// chain segment by segment; insertion into a full segment splits it around
/// the midpoint so both halves stay within capacity.
///
/// # Invariants
/// * Every segment on the chain holds between 1 and `segment_capacity`
///   elements (a segment is only empty while being unlinked); an empty deque
///   has no chained segments at all.
/// * `len()` equals the sum of the chained segments' sizes.
/// * `segment_capacity` is fixed for the lifetime of the deque and inherited
///   by every deque derived from it (clones, subsequences, `map`/`filter`/
///   `sort` results).
///
/// Removals never merge surviving neighbors, so occupancy can degrade toward
/// many small segments until [`optimize`](SegmentedDeque::optimize) is called
/// explicitly. That keeps pops O(`segment_capacity`) at worst instead of
/// forcing a merge pass into every removal.
///
/// # Examples
///
/// ```rust
/// use segmented_collections::SegmentedDeque;
///
/// let mut deque: SegmentedDeque<i32> = SegmentedDeque::new(3).unwrap();
/// for value in 1..=5 {
///     deque.append_in_place(value);
/// }
///
/// assert_eq!(deque.segment_sizes(), vec![3, 2]);
/// assert_eq!(deque.get(3), Ok(&4));
/// assert_eq!(deque.pop_front(), Ok(1));
/// ```
pub struct SegmentedDeque<T> {
    slots: Vec<Segment<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    segment_capacity: usize,
    len: usize,
}

/// Inserts `item` at `offset`, shifting the tail of the buffer right by one.
fn shift_insert<T>(data: &mut DynArray<T>, offset: usize, item: T) {
    data.append(item);
    data.as_mut_slice()[offset..].rotate_right(1);
}

impl<T> SegmentedDeque<T> {
    /// Creates an empty deque whose segments hold at most `segment_capacity`
    /// elements. Fails with [`SequenceError::InvalidCapacity`] for 0.
    pub fn new(segment_capacity: usize) -> Result<Self, SequenceError> {
        if segment_capacity == 0 {
            return Err(SequenceError::InvalidCapacity);
        }
        Ok(Self::empty(segment_capacity))
    }

    /// Internal constructor; callers guarantee `segment_capacity > 0`.
    fn empty(segment_capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            segment_capacity,
            len: 0,
        }
    }

    // --- Inspection ---

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn segment_capacity(&self) -> usize {
        self.segment_capacity
    }

    /// Number of segments currently on the chain.
    pub fn segment_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Per-segment occupancy in chain order. Diagnostic only.
    pub fn segment_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.segment_count());
        let mut current = self.head;
        while let Some(id) = current {
            sizes.push(self.slots[id].data.len());
            current = self.slots[id].next;
        }
        sizes
    }

    // --- Element access ---

    pub fn get_first(&self) -> Result<&T, SequenceError> {
        let head = self.head.ok_or(SequenceError::Empty)?;
        self.slots[head].data.get(0)
    }

    pub fn get_last(&self) -> Result<&T, SequenceError> {
        let tail = self.tail.ok_or(SequenceError::Empty)?;
        let data = &self.slots[tail].data;
        data.get(data.len() - 1)
    }

    pub fn get(&self, index: usize) -> Result<&T, SequenceError> {
        let (id, offset) = self.locate(index)?;
        self.slots[id].data.get(offset)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, SequenceError> {
        let (id, offset) = self.locate(index)?;
        self.slots[id].data.get_mut(offset)
    }

    /// Walks the chain from the head, resolving `index` to the owning segment
    /// and the offset inside it. O(number of segments).
    fn locate(&self, index: usize) -> Result<(usize, usize), SequenceError> {
        if index >= self.len {
            return Err(SequenceError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        let mut current = self.head;
        let mut remaining = index;
        while let Some(id) = current {
            let size = self.slots[id].data.len();
            if remaining < size {
                return Ok((id, remaining));
            }
            remaining -= size;
            current = self.slots[id].next;
        }

        unreachable!("len is the sum of the chained segment sizes")
    }

    // --- Segment bookkeeping ---

    fn alloc_segment(&mut self) -> usize {
        match self.free.pop() {
            Some(id) => id,
            None => {
                self.slots.push(Segment::new(self.segment_capacity));
                self.slots.len() - 1
            }
        }
    }

    fn free_segment(&mut self, id: usize) {
        self.slots[id].data.clear();
        self.slots[id].prev = None;
        self.slots[id].next = None;
        self.free.push(id);
    }

    /// Splices `id` out of the chain, fixing `head`/`tail` when it was an
    /// endpoint, and recycles its slot.
    fn unlink(&mut self, id: usize) {
        let prev = self.slots[id].prev;
        let next = self.slots[id].next;
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
        self.free_segment(id);
    }

    /// Returns the tail segment with room for one more element, chaining a
    /// fresh one when the tail is absent or full.
    fn ensure_tail(&mut self) -> usize {
        let tail = match self.tail {
            Some(id) if self.slots[id].data.len() < self.segment_capacity => return id,
            Some(id) => id,
            None => {
                let id = self.alloc_segment();
                self.head = Some(id);
                self.tail = Some(id);
                return id;
            }
        };
        let id = self.alloc_segment();
        self.slots[id].prev = Some(tail);
        self.slots[tail].next = Some(id);
        self.tail = Some(id);
        id
    }

    fn ensure_head(&mut self) -> usize {
        let head = match self.head {
            Some(id) if self.slots[id].data.len() < self.segment_capacity => return id,
            Some(id) => id,
            None => {
                let id = self.alloc_segment();
                self.head = Some(id);
                self.tail = Some(id);
                return id;
            }
        };
        let id = self.alloc_segment();
        self.slots[id].next = Some(head);
        self.slots[head].prev = Some(id);
        self.head = Some(id);
        id
    }

    // --- Growth at the ends ---

    /// Appends an element at the back. Amortized O(1).
    pub fn append_in_place(&mut self, item: T) {
        let id = self.ensure_tail();
        self.slots[id].data.append(item);
        self.len += 1;
    }

    /// Prepends an element at the front. O(1) when the head segment is full
    /// or absent (a fresh segment is chained); otherwise the head segment's
    /// contents shift right by one, O(`segment_capacity`).
    pub fn prepend_in_place(&mut self, item: T) {
        let id = self.ensure_head();
        shift_insert(&mut self.slots[id].data, 0, item);
        self.len += 1;
    }

    // --- Positional insert ---

    /// Inserts `item` so it ends up at `index`; valid insertion points are
    /// `0..=len`. A full target segment is split around the midpoint so both
    /// halves stay within capacity. O(`segment_capacity`) plus the locate
    /// walk.
    pub fn insert_at_in_place(&mut self, item: T, index: usize) -> Result<(), SequenceError> {
        if index > self.len {
            return Err(SequenceError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        if index == 0 {
            self.prepend_in_place(item);
            return Ok(());
        }
        if index == self.len {
            self.append_in_place(item);
            return Ok(());
        }

        let (id, offset) = self.locate(index)?;
        if self.slots[id].data.len() < self.segment_capacity {
            shift_insert(&mut self.slots[id].data, offset, item);
        } else {
            self.split_insert(id, offset, item);
        }
        self.len += 1;
        Ok(())
    }

    /// Splits the full segment `id` into two, placing `item` at `offset`
    /// within the combined contents. Elements from the midpoint on move to a
    /// new segment chained right after `id`; the item joins whichever half
    /// its offset falls into.
    fn split_insert(&mut self, id: usize, offset: usize, item: T) {
        let new_id = self.alloc_segment();
        let next = self.slots[id].next;
        self.slots[new_id].prev = Some(id);
        self.slots[new_id].next = next;
        match next {
            Some(n) => self.slots[n].prev = Some(new_id),
            None => self.tail = Some(new_id),
        }
        self.slots[id].next = Some(new_id);

        let mid = self.segment_capacity / 2;
        let moved = self.slots[id].data.split_off(mid);
        self.slots[new_id].data.extend(moved);
        if offset <= mid {
            shift_insert(&mut self.slots[id].data, offset, item);
        } else {
            shift_insert(&mut self.slots[new_id].data, offset - mid, item);
        }
    }

    // --- Positional removal ---

    /// Removes and returns the first element. The head segment's survivors
    /// shift left by one; an emptied segment is unlinked.
    pub fn pop_front(&mut self) -> Result<T, SequenceError> {
        let head = self.head.ok_or(SequenceError::Empty)?;
        let data = &mut self.slots[head].data;
        data.as_mut_slice().rotate_left(1);
        let Some(result) = data.pop() else {
            unreachable!("a chained segment holds at least one element")
        };
        self.len -= 1;
        if self.slots[head].data.is_empty() {
            self.unlink(head);
        }
        Ok(result)
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Result<T, SequenceError> {
        let tail = self.tail.ok_or(SequenceError::Empty)?;
        let Some(result) = self.slots[tail].data.pop() else {
            unreachable!("a chained segment holds at least one element")
        };
        self.len -= 1;
        if self.slots[tail].data.is_empty() {
            self.unlink(tail);
        }
        Ok(result)
    }

    /// Removes and returns the element at `index`. Boundary indices delegate
    /// to `pop_front`/`pop_back`; interior removal shifts within the owning
    /// segment and unlinks it if it empties. Surviving under-filled neighbors
    /// are left alone until [`optimize`](SegmentedDeque::optimize).
    pub fn remove_at(&mut self, index: usize) -> Result<T, SequenceError> {
        if index >= self.len {
            return Err(SequenceError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        if index == 0 {
            return self.pop_front();
        }
        if index == self.len - 1 {
            return self.pop_back();
        }

        let (id, offset) = self.locate(index)?;
        let data = &mut self.slots[id].data;
        data.as_mut_slice()[offset..].rotate_left(1);
        let Some(result) = data.pop() else {
            unreachable!("a chained segment holds at least one element")
        };
        self.len -= 1;
        if self.slots[id].data.is_empty() {
            self.unlink(id);
        }
        Ok(result)
    }

    /// Drops every element and segment.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // --- Rebalancing & capacity ---

    /// Merges each segment with its successor whenever their combined size
    /// fits within the segment capacity, in one left-to-right sweep. A merged
    /// segment keeps absorbing successors before the sweep moves on, so after
    /// this returns no two adjacent segments can be merged further.
    ///
    /// Never triggered automatically; callers opt into the O(len) pass after
    /// a batch of removals instead of paying for it on every removal.
    pub fn optimize(&mut self) {
        let mut current = self.head;
        while let Some(id) = current {
            let Some(next_id) = self.slots[id].next else {
                break;
            };
            let combined = self.slots[id].data.len() + self.slots[next_id].data.len();
            if combined <= self.segment_capacity {
                let moved = mem::take(&mut self.slots[next_id].data);
                self.slots[id].data.extend(moved);
                self.unlink(next_id);
            } else {
                current = Some(next_id);
            }
        }
    }

    /// Pre-builds enough spare segments for `expected_size` elements, so the
    /// appends that follow take recycled slots instead of allocating. Existing
    /// content is not touched.
    pub fn reserve(&mut self, expected_size: usize) {
        let needed = expected_size.div_ceil(self.segment_capacity);
        while self.slots.len() < needed {
            self.slots.push(Segment::new(self.segment_capacity));
            self.free.push(self.slots.len() - 1);
        }
    }

    // --- Iteration ---

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            deque: self,
            segment: self.head,
            offset: 0,
            remaining: self.len,
        }
    }

    /// Strict left fold over the elements in index order.
    pub fn reduce<A, F>(&self, mut reducer: F, initial: A) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        let mut acc = initial;
        for item in self.iter() {
            acc = reducer(acc, item);
        }
        acc
    }

    /// Returns a new deque (same segment capacity) of `mapper` applied to
    /// every element, in order.
    pub fn map<U, F>(&self, mut mapper: F) -> SegmentedDeque<U>
    where
        F: FnMut(&T) -> U,
    {
        let mut result = SegmentedDeque::empty(self.segment_capacity);
        for item in self.iter() {
            result.append_in_place(mapper(item));
        }
        result
    }
}

impl<T: Clone> SegmentedDeque<T> {
    /// Returns a new deque (same segment capacity) holding the elements in
    /// `[start, end]`, inclusive. Requires `start <= end < len`.
    pub fn get_subsequence(&self, start: usize, end: usize) -> Result<Self, SequenceError> {
        if start > end || end >= self.len {
            return Err(SequenceError::InvalidRange {
                start,
                end,
                len: self.len,
            });
        }
        let mut sub = Self::empty(self.segment_capacity);
        for item in self.iter().skip(start).take(end - start + 1) {
            sub.append_in_place(item.clone());
        }
        Ok(sub)
    }

    /// Returns a new deque holding this deque's elements followed by
    /// `other`'s.
    pub fn concat(&self, other: &dyn Sequence<T>) -> Self
    where
        T: 'static,
    {
        let mut result = self.clone();
        for i in 0..other.len() {
            let Ok(item) = other.get(i) else {
                unreachable!("index is within the other sequence's length")
            };
            result.append_in_place(item);
        }
        result
    }

    /// Returns a new deque (same segment capacity) of the elements satisfying
    /// `predicate`, preserving order.
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        let mut result = Self::empty(self.segment_capacity);
        for item in self.iter() {
            if predicate(item) {
                result.append_in_place(item.clone());
            }
        }
        result
    }

    /// Sorts the elements with `compare`, keeping the existing segment
    /// boundaries: the elements are flattened into one buffer, sorted, and
    /// written back segment by segment in the original occupancy order.
    pub fn sort_in_place<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut flat: Vec<T> = self.iter().cloned().collect();
        flat.sort_by(|a, b| compare(a, b));

        let mut values = flat.into_iter();
        let mut current = self.head;
        while let Some(id) = current {
            current = self.slots[id].next;
            for slot in self.slots[id].data.as_mut_slice() {
                let Some(value) = values.next() else {
                    unreachable!("flattened buffer holds exactly len elements")
                };
                *slot = value;
            }
        }
    }

    /// Copy-returning counterpart of
    /// [`sort_in_place`](SegmentedDeque::sort_in_place).
    pub fn sort<F>(&self, compare: F) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut sorted = self.clone();
        sorted.sort_in_place(compare);
        sorted
    }

    /// Returns true when `pattern` occurs as a contiguous run of elements,
    /// comparing by value. The empty pattern matches any deque; a pattern
    /// longer than the deque never matches. Brute-force over every start
    /// offset, O(len × pattern length) worst case.
    pub fn contains_subsequence(&self, pattern: &dyn Sequence<T>) -> bool
    where
        T: PartialEq + 'static,
    {
        let pattern_len = pattern.len();
        if pattern_len == 0 {
            return true;
        }
        if pattern_len > self.len {
            return false;
        }

        let mut needle = Vec::with_capacity(pattern_len);
        for i in 0..pattern_len {
            let Ok(item) = pattern.get(i) else {
                unreachable!("index is within the pattern's length")
            };
            needle.push(item);
        }

        let elements: Vec<&T> = self.iter().collect();
        elements
            .windows(pattern_len)
            .any(|window| window.iter().zip(needle.iter()).all(|(a, b)| **a == *b))
    }
}

// --- Iterators ---

pub struct Iter<'a, T> {
    deque: &'a SegmentedDeque<T>,
    segment: Option<usize>,
    offset: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.segment?;
            let segment = &self.deque.slots[id];
            match segment.data.as_slice().get(self.offset) {
                Some(item) => {
                    self.offset += 1;
                    self.remaining -= 1;
                    return Some(item);
                }
                None => {
                    self.segment = segment.next;
                    self.offset = 0;
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

pub struct IntoIter<T> {
    deque: SegmentedDeque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.deque.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.deque.len();
        (len, Some(len))
    }
}

impl<T> IntoIterator for SegmentedDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { deque: self }
    }
}

impl<'a, T> IntoIterator for &'a SegmentedDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// --- Traits ---

impl<T: Clone> Clone for SegmentedDeque<T> {
    /// Deep copy, element by element. The copy's segment chain is rebuilt
    /// from scratch rather than mirroring the donor's segment boundaries.
    fn clone(&self) -> Self {
        let mut copy = Self::empty(self.segment_capacity);
        for item in self.iter() {
            copy.append_in_place(item.clone());
        }
        copy
    }
}

impl<T: fmt::Debug> fmt::Debug for SegmentedDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments: Vec<&[T]> = Vec::with_capacity(self.segment_count());
        let mut current = self.head;
        while let Some(id) = current {
            segments.push(self.slots[id].data.as_slice());
            current = self.slots[id].next;
        }
        f.debug_struct("SegmentedDeque")
            .field("len", &self.len)
            .field("segment_capacity", &self.segment_capacity)
            .field("segments", &segments)
            .finish()
    }
}

impl<T> Default for SegmentedDeque<T> {
    fn default() -> Self {
        Self::empty(DEFAULT_SEGMENT_CAPACITY)
    }
}

impl<T: PartialEq> PartialEq for SegmentedDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for SegmentedDeque<T> {}

impl<T> Extend<T> for SegmentedDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(self.len + lower);
        for item in iter {
            self.append_in_place(item);
        }
    }
}

impl<T> FromIterator<T> for SegmentedDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::default();
        deque.extend(iter);
        deque
    }
}

impl<T: Clone + 'static> Sequence<T> for SegmentedDeque<T> {
    fn get_first(&self) -> Result<T, SequenceError> {
        SegmentedDeque::get_first(self).cloned()
    }

    fn get_last(&self) -> Result<T, SequenceError> {
        SegmentedDeque::get_last(self).cloned()
    }

    fn get(&self, index: usize) -> Result<T, SequenceError> {
        SegmentedDeque::get(self, index).cloned()
    }

    fn get_subsequence(
        &self,
        start: usize,
        end: usize,
    ) -> Result<Box<dyn Sequence<T>>, SequenceError> {
        let sub = SegmentedDeque::get_subsequence(self, start, end)?;
        Ok(Box::new(sub))
    }

    fn len(&self) -> usize {
        self.len
    }

    fn append(&self, item: T) -> Box<dyn Sequence<T>> {
        let mut copy = self.clone();
        copy.append_in_place(item);
        Box::new(copy)
    }

    fn prepend(&self, item: T) -> Box<dyn Sequence<T>> {
        let mut copy = self.clone();
        copy.prepend_in_place(item);
        Box::new(copy)
    }

    fn insert_at(&self, item: T, index: usize) -> Result<Box<dyn Sequence<T>>, SequenceError> {
        let mut copy = self.clone();
        copy.insert_at_in_place(item, index)?;
        Ok(Box::new(copy))
    }

    fn concat(&self, other: &dyn Sequence<T>) -> Box<dyn Sequence<T>> {
        Box::new(SegmentedDeque::concat(self, other))
    }
}

impl<T: Clone + 'static> MutableSequence<T> for SegmentedDeque<T> {
    fn append_in_place(&mut self, item: T) {
        SegmentedDeque::append_in_place(self, item);
    }

    fn prepend_in_place(&mut self, item: T) {
        SegmentedDeque::prepend_in_place(self, item);
    }

    fn insert_at_in_place(&mut self, item: T, index: usize) -> Result<(), SequenceError> {
        SegmentedDeque::insert_at_in_place(self, item, index)
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArraySequence;

    fn deque_of(capacity: usize, values: impl IntoIterator<Item = i32>) -> SegmentedDeque<i32> {
        let mut deque = SegmentedDeque::new(capacity).unwrap();
        deque.extend(values);
        deque
    }

    fn contents(deque: &SegmentedDeque<i32>) -> Vec<i32> {
        deque.iter().copied().collect()
    }

    #[test]
    fn test_deque_invalid_capacity() {
        assert_eq!(
            SegmentedDeque::<i32>::new(0).err(),
            Some(SequenceError::InvalidCapacity)
        );
        assert!(SegmentedDeque::<i32>::new(1).is_ok());
    }

    #[test]
    fn test_deque_append_layout_capacity_3() {
        let deque = deque_of(3, 1..=5);
        assert_eq!(deque.len(), 5);
        assert_eq!(deque.segment_sizes(), vec![3, 2]);
        assert_eq!(deque.get(3), Ok(&4));
        assert_eq!(deque.get_first(), Ok(&1));
        assert_eq!(deque.get_last(), Ok(&5));
    }

    #[test]
    fn test_deque_prepend_full_head_allocates() {
        let mut deque = deque_of(3, 1..=5); // [1,2,3] [4,5]
        deque.prepend_in_place(0);
        assert_eq!(deque.segment_sizes(), vec![1, 3, 2]);
        assert_eq!(contents(&deque), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_deque_prepend_shifts_partial_head() {
        let mut deque = deque_of(3, [2, 3]);
        deque.prepend_in_place(1);
        assert_eq!(deque.segment_sizes(), vec![3]);
        assert_eq!(contents(&deque), vec![1, 2, 3]);
    }

    #[test]
    fn test_deque_insert_into_partial_segment() {
        let mut deque = deque_of(3, 1..=5); // [1,2,3] [4,5]
        deque.insert_at_in_place(10, 3).unwrap();
        assert_eq!(deque.len(), 6);
        assert_eq!(deque.get(3), Ok(&10));
        assert_eq!(deque.get(4), Ok(&4));
        assert!(deque.segment_sizes().iter().all(|&size| size <= 3));
    }

    #[test]
    fn test_deque_insert_split_every_offset() {
        let capacity = 4;
        // Two full segments, so every local offset of the second one is an
        // interior insertion point (index 0 would delegate to prepend, and
        // offset 0 of the first segment is unreachable from the interior).
        for offset in 0..capacity {
            let index = capacity + offset;
            let mut deque = deque_of(capacity, 0..2 * capacity as i32);
            deque.insert_at_in_place(99, index).unwrap();

            let mut expected: Vec<i32> = (0..2 * capacity as i32).collect();
            expected.insert(index, 99);
            assert_eq!(contents(&deque), expected, "insert at {index}");
            assert!(
                deque.segment_sizes().iter().all(|&size| size <= capacity),
                "insert at {index} overflowed a segment: {:?}",
                deque.segment_sizes()
            );
        }
    }

    #[test]
    fn test_deque_insert_split_at_segment_start() {
        let mut deque = deque_of(3, 1..=6); // [1,2,3] [4,5,6]
        deque.insert_at_in_place(99, 3).unwrap();
        assert_eq!(contents(&deque), vec![1, 2, 3, 99, 4, 5, 6]);
        assert_eq!(deque.segment_sizes(), vec![3, 2, 2]);
        assert_eq!(deque.get(3), Ok(&99));
    }

    #[test]
    fn test_deque_insert_split_capacity_1() {
        let mut deque = deque_of(1, [1, 2, 3]);
        deque.insert_at_in_place(9, 1).unwrap();
        assert_eq!(contents(&deque), vec![1, 9, 2, 3]);
        assert_eq!(deque.segment_sizes(), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_deque_insert_bounds() {
        let mut deque = deque_of(3, 1..=3);
        assert_eq!(
            deque.insert_at_in_place(9, 4),
            Err(SequenceError::IndexOutOfRange { index: 4, len: 3 })
        );
        // Failed insert left everything untouched.
        assert_eq!(contents(&deque), vec![1, 2, 3]);

        deque.insert_at_in_place(0, 0).unwrap();
        deque.insert_at_in_place(4, 4).unwrap();
        assert_eq!(contents(&deque), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_deque_pop_front_round_trip() {
        let mut deque: SegmentedDeque<i32> = SegmentedDeque::new(3).unwrap();
        deque.append_in_place(42);
        assert_eq!(deque.pop_front(), Ok(42));
        assert!(deque.is_empty());
        assert_eq!(deque.segment_count(), 0);

        deque.extend(0..20);
        for expected in 0..20 {
            assert_eq!(deque.pop_front(), Ok(expected));
        }
        assert!(deque.is_empty());
        assert_eq!(deque.pop_front(), Err(SequenceError::Empty));
    }

    #[test]
    fn test_deque_pop_back_unlinks_emptied_tail() {
        let mut deque = deque_of(3, 1..=4); // [1,2,3] [4]
        assert_eq!(deque.pop_back(), Ok(4));
        assert_eq!(deque.segment_sizes(), vec![3]);
        assert_eq!(deque.pop_back(), Ok(3));
        assert_eq!(deque.pop_back(), Ok(2));
        assert_eq!(deque.pop_back(), Ok(1));
        assert_eq!(deque.pop_back(), Err(SequenceError::Empty));
        assert_eq!(deque.segment_count(), 0);
    }

    #[test]
    fn test_deque_remove_at_interior() {
        let mut deque = deque_of(3, 1..=5); // [1,2,3] [4,5]
        assert_eq!(deque.remove_at(1), Ok(2));
        assert_eq!(contents(&deque), vec![1, 3, 4, 5]);
        assert_eq!(deque.segment_sizes(), vec![2, 2]);

        // Boundary indices delegate to the pops.
        assert_eq!(deque.remove_at(0), Ok(1));
        assert_eq!(deque.remove_at(2), Ok(5));
        assert_eq!(contents(&deque), vec![3, 4]);

        assert_eq!(
            deque.remove_at(2),
            Err(SequenceError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_deque_remove_at_unlinks_interior_segment() {
        let mut deque = deque_of(2, 1..=6); // [1,2] [3,4] [5,6]
        assert_eq!(deque.remove_at(2), Ok(3));
        assert_eq!(deque.remove_at(2), Ok(4)); // middle segment now empty
        assert_eq!(deque.segment_sizes(), vec![2, 2]);
        assert_eq!(contents(&deque), vec![1, 2, 5, 6]);
    }

    #[test]
    fn test_deque_removals_do_not_merge_neighbors() {
        let mut deque = deque_of(3, 0..9); // [0,1,2] [3,4,5] [6,7,8]
        deque.remove_at(1).unwrap();
        deque.remove_at(3).unwrap();
        deque.remove_at(5).unwrap();
        // Three two-element segments survive; no automatic rebalancing.
        assert_eq!(deque.segment_sizes(), vec![2, 2, 2]);
    }

    #[test]
    fn test_deque_optimize_merges_chain() {
        let mut deque = deque_of(3, 0..9);
        deque.remove_at(1).unwrap();
        deque.remove_at(3).unwrap();
        deque.remove_at(5).unwrap(); // [0,2] [3,5] [6,8]
        let before = contents(&deque);

        deque.optimize();
        assert_eq!(contents(&deque), before);
        // 2 + 2 > 3, so nothing can merge at capacity 3.
        assert_eq!(deque.segment_sizes(), vec![2, 2, 2]);

        let mut sparse = deque_of(4, 0..6); // [0,1,2,3] [4,5]
        sparse.remove_at(1).unwrap();
        sparse.remove_at(1).unwrap(); // [0,3] [4,5]
        sparse.optimize();
        assert_eq!(sparse.segment_sizes(), vec![4]);
        assert_eq!(contents(&sparse), vec![0, 3, 4, 5]);
    }

    #[test]
    fn test_deque_optimize_idempotent() {
        for capacity in 1..=5 {
            let mut deque = deque_of(capacity, 0..12);
            for index in [9, 6, 3, 1] {
                deque.remove_at(index).unwrap();
            }
            deque.optimize();
            let layout = deque.segment_sizes();
            let elements = contents(&deque);

            deque.optimize();
            assert_eq!(deque.segment_sizes(), layout, "capacity {capacity}");
            assert_eq!(contents(&deque), elements, "capacity {capacity}");

            // No two adjacent segments can be merged further.
            for pair in layout.windows(2) {
                assert!(pair[0] + pair[1] > capacity, "capacity {capacity}: {layout:?}");
            }
        }
    }

    #[test]
    fn test_deque_length_invariant() {
        let mut deque = deque_of(3, 0..10);
        deque.prepend_in_place(-1);
        deque.insert_at_in_place(99, 5).unwrap();
        deque.remove_at(7).unwrap();
        deque.pop_front().unwrap();
        deque.pop_back().unwrap();
        deque.optimize();

        let walked: usize = deque.segment_sizes().iter().sum();
        assert_eq!(deque.len(), walked);
        assert_eq!(deque.iter().count(), deque.len());
        for i in 0..deque.len() {
            assert!(deque.get(i).is_ok());
        }
    }

    #[test]
    fn test_deque_reserve_prebuilds_segments() {
        let mut deque: SegmentedDeque<i32> = SegmentedDeque::new(3).unwrap();
        deque.reserve(10);
        assert!(deque.is_empty());
        assert_eq!(deque.segment_count(), 0);

        deque.extend(0..10);
        assert_eq!(deque.segment_sizes(), vec![3, 3, 3, 1]);
        assert_eq!(contents(&deque), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_deque_get_subsequence() {
        let deque = deque_of(3, 1..=6);
        let sub = deque.get_subsequence(1, 3).unwrap();
        assert_eq!(contents(&sub), vec![2, 3, 4]);
        assert_eq!(sub.segment_capacity(), 3);

        assert_eq!(
            deque.get_subsequence(3, 2).err(),
            Some(SequenceError::InvalidRange {
                start: 3,
                end: 2,
                len: 6
            })
        );
        assert_eq!(
            deque.get_subsequence(0, 6).err(),
            Some(SequenceError::InvalidRange {
                start: 0,
                end: 6,
                len: 6
            })
        );
    }

    #[test]
    fn test_deque_concat() {
        let left = deque_of(3, 1..=5);
        let right = deque_of(2, 20..=22);
        let joined = left.concat(&right);
        assert_eq!(contents(&joined), vec![1, 2, 3, 4, 5, 20, 21, 22]);
        assert_eq!(joined.segment_capacity(), 3);
        // Donors untouched.
        assert_eq!(left.len(), 5);
        assert_eq!(right.len(), 3);
    }

    #[test]
    fn test_deque_persistent_ops_deep_copy() {
        let deque = deque_of(3, 1..=3);
        let appended = Sequence::append(&deque, 4);
        assert_eq!(appended.len(), 4);
        assert_eq!(appended.get_last(), Ok(4));
        assert_eq!(deque.len(), 3);

        let prepended = Sequence::prepend(&deque, 0);
        assert_eq!(prepended.get_first(), Ok(0));
        assert_eq!(deque.get_first(), Ok(&1));

        let inserted = Sequence::insert_at(&deque, 9, 1).unwrap();
        assert_eq!(inserted.get(1), Ok(9));
        assert_eq!(Sequence::get(&deque, 1), Ok(2));

        assert_eq!(
            Sequence::insert_at(&deque, 9, 4).err(),
            Some(SequenceError::IndexOutOfRange { index: 4, len: 3 })
        );
    }

    #[test]
    fn test_deque_sort_both_directions() {
        let mut deque: SegmentedDeque<i32> = SegmentedDeque::new(3).unwrap();
        for i in 0..10 {
            deque.append_in_place(9 - i);
        }
        let layout = deque.segment_sizes();

        deque.sort_in_place(|a, b| a.cmp(b));
        for i in 0..10 {
            assert_eq!(deque.get(i), Ok(&(i as i32)));
        }
        // Segment boundaries survive the sort.
        assert_eq!(deque.segment_sizes(), layout);

        deque.sort_in_place(|a, b| b.cmp(a));
        for i in 0..10 {
            assert_eq!(deque.get(i), Ok(&(9 - i as i32)));
        }

        let sorted = deque.sort(|a, b| a.cmp(b));
        assert_eq!(contents(&sorted), (0..10).collect::<Vec<_>>());
        assert_eq!(deque.get_first(), Ok(&9));
    }

    #[test]
    fn test_deque_map_filter_reduce() {
        let deque = deque_of(3, 1..=5);

        let squared = deque.map(|x| x * x);
        assert_eq!(contents(&squared), vec![1, 4, 9, 16, 25]);
        assert_eq!(squared.segment_capacity(), 3);

        let evens = deque.filter(|x| x % 2 == 0);
        assert_eq!(contents(&evens), vec![2, 4]);

        let sum = deque.reduce(|acc, x| acc + x, 0);
        assert_eq!(sum, 15);

        let max = deque.reduce(|acc, x| acc.max(*x), i32::MIN);
        assert_eq!(max, 5);
    }

    #[test]
    fn test_deque_contains_subsequence() {
        let mut deque: SegmentedDeque<i32> = SegmentedDeque::new(3).unwrap();
        for i in 0..10 {
            deque.append_in_place(9 - i); // [9,8,...,0]
        }

        let present = ArraySequence::from_iter([9, 8, 7]);
        let absent = ArraySequence::from_iter([1, 2, 3]);
        let empty: ArraySequence<i32> = ArraySequence::new();
        let too_long = ArraySequence::from_iter(0..20);

        assert!(deque.contains_subsequence(&present));
        assert!(!deque.contains_subsequence(&absent));
        assert!(deque.contains_subsequence(&empty));
        assert!(!deque.contains_subsequence(&too_long));
    }

    #[test]
    fn test_deque_empty_accessors() {
        let deque: SegmentedDeque<i32> = SegmentedDeque::new(3).unwrap();
        assert_eq!(deque.get_first(), Err(SequenceError::Empty));
        assert_eq!(deque.get_last(), Err(SequenceError::Empty));
        assert_eq!(
            deque.get(0),
            Err(SequenceError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_deque_clear_and_reuse() {
        let mut deque = deque_of(2, 0..7);
        deque.clear();
        assert!(deque.is_empty());
        assert_eq!(deque.segment_count(), 0);

        deque.append_in_place(5);
        assert_eq!(contents(&deque), vec![5]);
    }

    #[test]
    fn test_deque_clone_rebuilds_layout() {
        let mut deque = deque_of(3, 0..9);
        deque.remove_at(1).unwrap();
        deque.remove_at(3).unwrap(); // degraded layout [2,2,...]
        let degraded = deque.segment_sizes();

        let copy = deque.clone();
        assert_eq!(copy, deque);
        // The clone repacks densely instead of copying the donor layout.
        assert_eq!(copy.segment_sizes(), vec![3, 3, 1]);
        assert_ne!(copy.segment_sizes(), degraded);
        assert_eq!(deque.segment_sizes(), degraded);
    }

    #[test]
    fn test_deque_traits_iterators() {
        let deque = deque_of(3, 1..=5);
        let collected: Vec<i32> = deque.iter().copied().collect();
        assert_eq!(collected, vec![1, 2, 3, 4, 5]);
        assert_eq!(deque.iter().len(), 5);

        let owned: Vec<i32> = deque.clone().into_iter().collect();
        assert_eq!(owned, vec![1, 2, 3, 4, 5]);

        let debug = format!("{:?}", deque);
        assert!(debug.contains("segment_capacity: 3"));

        let other = deque_of(4, 1..=5);
        assert_eq!(deque, other); // equality is elementwise, not layout

        let def: SegmentedDeque<i32> = SegmentedDeque::default();
        assert_eq!(def.segment_capacity(), DEFAULT_SEGMENT_CAPACITY);

        let from_iter: SegmentedDeque<i32> = (1..=5).collect();
        assert_eq!(from_iter, deque);
    }

    #[test]
    fn test_deque_get_mut() {
        let mut deque = deque_of(3, 1..=5);
        *deque.get_mut(3).unwrap() = 40;
        assert_eq!(deque.get(3), Ok(&40));
        assert!(deque.get_mut(5).is_err());
    }

    #[test]
    fn test_deque_as_boxed_sequence() {
        let deque = deque_of(3, 1..=4);
        let boxed: Box<dyn Sequence<i32>> = Box::new(deque);
        assert_eq!(boxed.get_first(), Ok(1));
        assert_eq!(boxed.get_last(), Ok(4));

        let sub = boxed.get_subsequence(1, 2).unwrap();
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.get(0), Ok(2));

        let grown = boxed.concat(sub.as_ref());
        assert_eq!(grown.len(), 6);
        assert_eq!(grown.get_last(), Ok(3));
    }
}
