use std::fmt;

use crate::error::SequenceError;
use crate::sequence::{MutableSequence, Sequence};

struct Node<T> {
    value: T,
    next: Option<Box<Node<T>>>,
}

/// A [`Sequence`] backed by an owned singly-linked chain of nodes.
///
/// Each node is uniquely owned by its predecessor (or by the list head), so
/// there is nothing to reference-count and no back links to keep in sync.
/// Prepend is O(1); append and positional access walk the chain.
pub struct ListSequence<T> {
    head: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> ListSequence<T> {
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Result<&T, SequenceError> {
        if index >= self.len {
            return Err(SequenceError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let mut node = self.head.as_deref();
        for _ in 0..index {
            node = node.and_then(|n| n.next.as_deref());
        }
        match node {
            Some(n) => Ok(&n.value),
            None => unreachable!("len matches the chain length"),
        }
    }

    pub fn append_in_place(&mut self, item: T) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node {
            value: item,
            next: None,
        }));
        self.len += 1;
    }

    pub fn prepend_in_place(&mut self, item: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value: item, next }));
        self.len += 1;
    }

    pub fn insert_at_in_place(&mut self, item: T, index: usize) -> Result<(), SequenceError> {
        if index > self.len {
            return Err(SequenceError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let mut cursor = &mut self.head;
        for _ in 0..index {
            let Some(node) = cursor else {
                unreachable!("index is within bounds")
            };
            cursor = &mut node.next;
        }
        let next = cursor.take();
        *cursor = Some(Box::new(Node { value: item, next }));
        self.len += 1;
        Ok(())
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            node: self.head.as_deref(),
        }
    }
}

// Long chains would otherwise drop recursively and can blow the stack.
impl<T> Drop for ListSequence<T> {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

pub struct Iter<'a, T> {
    node: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node?;
        self.node = node.next.as_deref();
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a ListSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for ListSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ListSequence<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for ListSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ListSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for ListSequence<T> {}

impl<T> FromIterator<T> for ListSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        // Build back to front so construction stays O(n).
        let mut items: Vec<T> = iter.into_iter().collect();
        let mut list = Self::new();
        while let Some(item) = items.pop() {
            list.prepend_in_place(item);
        }
        list
    }
}

impl<T: Clone + 'static> Sequence<T> for ListSequence<T> {
    fn get_first(&self) -> Result<T, SequenceError> {
        match self.head.as_deref() {
            Some(node) => Ok(node.value.clone()),
            None => Err(SequenceError::Empty),
        }
    }

    fn get_last(&self) -> Result<T, SequenceError> {
        self.iter().last().cloned().ok_or(SequenceError::Empty)
    }

    fn get(&self, index: usize) -> Result<T, SequenceError> {
        ListSequence::get(self, index).cloned()
    }

    fn get_subsequence(
        &self,
        start: usize,
        end: usize,
    ) -> Result<Box<dyn Sequence<T>>, SequenceError> {
        if start > end || end >= self.len {
            return Err(SequenceError::InvalidRange {
                start,
                end,
                len: self.len,
            });
        }
        let sub: ListSequence<T> = self
            .iter()
            .skip(start)
            .take(end - start + 1)
            .cloned()
            .collect();
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

impl<T: Clone + 'static> MutableSequence<T> for ListSequence<T> {
    fn append_in_place(&mut self, item: T) {
        ListSequence::append_in_place(self, item);
    }

    fn prepend_in_place(&mut self, item: T) {
        ListSequence::prepend_in_place(self, item);
    }

    fn insert_at_in_place(&mut self, item: T, index: usize) -> Result<(), SequenceError> {
        ListSequence::insert_at_in_place(self, item, index)
    }
}

// --- Tests ---
