use std::fmt;

use crate::dyn_array::DynArray;
use crate::error::SequenceError;
use crate::sequence::{MutableSequence, Sequence};

/// A [`Sequence`] backed by one contiguous growable buffer.
///
/// The simplest of the sequence implementations: appends go straight to the
/// buffer, prepend and positional insert shift the tail of the buffer right
/// by one slot.
pub struct ArraySequence<T> {
    items: DynArray<T>,
}

impl<T> ArraySequence<T> {
    pub fn new() -> Self {
        Self {
            items: DynArray::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&T, SequenceError> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }

    pub fn append_in_place(&mut self, item: T) {
        self.items.append(item);
    }

    pub fn prepend_in_place(&mut self, item: T) {
        self.items.append(item);
        self.items.as_mut_slice().rotate_right(1);
    }

    pub fn insert_at_in_place(&mut self, item: T, index: usize) -> Result<(), SequenceError> {
        if index > self.items.len() {
            return Err(SequenceError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.items.append(item);
        self.items.as_mut_slice()[index..].rotate_right(1);
        Ok(())
    }
}

impl<T> Default for ArraySequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ArraySequence<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ArraySequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ArraySequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for ArraySequence<T> {}

impl<T> Extend<T> for ArraySequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> FromIterator<T> for ArraySequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: DynArray::from_iter(iter),
        }
    }
}

impl<T: Clone + 'static> Sequence<T> for ArraySequence<T> {
    fn get_first(&self) -> Result<T, SequenceError> {
        self.items
            .as_slice()
            .first()
            .cloned()
            .ok_or(SequenceError::Empty)
    }

    fn get_last(&self) -> Result<T, SequenceError> {
        self.items
            .as_slice()
            .last()
            .cloned()
            .ok_or(SequenceError::Empty)
    }

    fn get(&self, index: usize) -> Result<T, SequenceError> {
        self.items.get(index).cloned()
    }

    fn get_subsequence(
        &self,
        start: usize,
        end: usize,
    ) -> Result<Box<dyn Sequence<T>>, SequenceError> {
        if start > end || end >= self.items.len() {
            return Err(SequenceError::InvalidRange {
                start,
                end,
                len: self.items.len(),
            });
        }
        let sub: ArraySequence<T> = self.items.as_slice()[start..=end].iter().cloned().collect();
        Ok(Box::new(sub))
    }

    fn len(&self) -> usize {
        self.items.len()
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
        let mut copy = self.clone();
        for i in 0..other.len() {
            let Ok(item) = other.get(i) else {
                unreachable!("index is within the other sequence's length")
            };
            copy.append_in_place(item);
        }
        Box::new(copy)
    }
}

impl<T: Clone + 'static> MutableSequence<T> for ArraySequence<T> {
    fn append_in_place(&mut self, item: T) {
        ArraySequence::append_in_place(self, item);
    }

    fn prepend_in_place(&mut self, item: T) {
        ArraySequence::prepend_in_place(self, item);
    }

    fn insert_at_in_place(&mut self, item: T, index: usize) -> Result<(), SequenceError> {
        ArraySequence::insert_at_in_place(self, item, index)
    }
}

// --- Tests ---
