use crate::error::SequenceError;

/// A trait for abstraction over different sequence implementations
/// (array-backed, list-backed, segmented, immutable wrapper).
///
/// The trait is object-safe so callers can pick an implementation at
/// construction time and keep working through `Box<dyn Sequence<T>>`.
/// Element access returns owned values (hence the `Clone` bound), and the
/// copy-returning mutators (`append`, `prepend`, `insert_at`, `concat`)
/// produce a fully independent deep copy of the receiver with the update
/// applied; there is no structural sharing between the two.
pub trait Sequence<T: Clone + 'static> {
    /// Returns the first element, or [`SequenceError::Empty`].
    fn get_first(&self) -> Result<T, SequenceError>;

    /// Returns the last element, or [`SequenceError::Empty`].
    fn get_last(&self) -> Result<T, SequenceError>;

    /// Returns the element at `index`, or [`SequenceError::IndexOutOfRange`].
    fn get(&self, index: usize) -> Result<T, SequenceError>;

    /// Returns a new sequence holding the elements in `[start, end]`
    /// (inclusive bounds). Requires `start <= end < len`.
    fn get_subsequence(
        &self,
        start: usize,
        end: usize,
    ) -> Result<Box<dyn Sequence<T>>, SequenceError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- Copy-returning mutators ---

    /// Returns a copy of this sequence with `item` appended.
    fn append(&self, item: T) -> Box<dyn Sequence<T>>;

    /// Returns a copy of this sequence with `item` prepended.
    fn prepend(&self, item: T) -> Box<dyn Sequence<T>>;

    /// Returns a copy of this sequence with `item` inserted at `index`
    /// (valid insertion points are `0..=len`).
    fn insert_at(&self, item: T, index: usize) -> Result<Box<dyn Sequence<T>>, SequenceError>;

    /// Returns a new sequence holding this sequence's elements followed by
    /// `other`'s.
    fn concat(&self, other: &dyn Sequence<T>) -> Box<dyn Sequence<T>>;
}

/// The mutable extension of [`Sequence`]: the same three insertions, applied
/// in place instead of on a copy.
pub trait MutableSequence<T: Clone + 'static>: Sequence<T> {
    fn append_in_place(&mut self, item: T);

    fn prepend_in_place(&mut self, item: T);

    /// Inserts `item` at `index`; valid insertion points are `0..=len`.
    fn insert_at_in_place(&mut self, item: T, index: usize) -> Result<(), SequenceError>;
}
