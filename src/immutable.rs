use crate::error::SequenceError;
use crate::sequence::Sequence;

/// A read-only facade over any boxed [`Sequence`].
///
/// The wrapper exposes only the shared contract and never hands out the inner
/// sequence, so the contents cannot be mutated through it. The copy-returning
/// mutators still work: each produces a fresh wrapped sequence, leaving this
/// one untouched.
pub struct ImmutableSequence<T> {
    inner: Box<dyn Sequence<T>>,
}

impl<T: Clone + 'static> ImmutableSequence<T> {
    /// Wraps `inner`, taking ownership so no one else can mutate it.
    pub fn new(inner: Box<dyn Sequence<T>>) -> Self {
        Self { inner }
    }
}

impl<T: Clone + 'static> Sequence<T> for ImmutableSequence<T> {
    fn get_first(&self) -> Result<T, SequenceError> {
        self.inner.get_first()
    }

    fn get_last(&self) -> Result<T, SequenceError> {
        self.inner.get_last()
    }

    fn get(&self, index: usize) -> Result<T, SequenceError> {
        self.inner.get(index)
    }

    fn get_subsequence(
        &self,
        start: usize,
        end: usize,
    ) -> Result<Box<dyn Sequence<T>>, SequenceError> {
        let sub = self.inner.get_subsequence(start, end)?;
        Ok(Box::new(ImmutableSequence { inner: sub }))
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn append(&self, item: T) -> Box<dyn Sequence<T>> {
        Box::new(ImmutableSequence {
            inner: self.inner.append(item),
        })
    }

    fn prepend(&self, item: T) -> Box<dyn Sequence<T>> {
        Box::new(ImmutableSequence {
            inner: self.inner.prepend(item),
        })
    }

    fn insert_at(&self, item: T, index: usize) -> Result<Box<dyn Sequence<T>>, SequenceError> {
        let inner = self.inner.insert_at(item, index)?;
        Ok(Box::new(ImmutableSequence { inner }))
    }

    fn concat(&self, other: &dyn Sequence<T>) -> Box<dyn Sequence<T>> {
        Box::new(ImmutableSequence {
            inner: self.inner.concat(other),
        })
    }
}

// --- Tests ---
