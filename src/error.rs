use thiserror::Error;

/// Errors shared by every sequence implementation in this crate.
///
/// All of these are contract violations raised synchronously at the point of
/// the offending call; the collection is left exactly as it was before the
/// call (bounds are checked before any mutation happens).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// An index outside `[0, len)` (or `[0, len]` for insertion points).
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A subsequence range that is not `0 <= start <= end < len`.
    #[error("invalid range [{start}, {end}] for length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// First/last/pop on a collection with no elements.
    #[error("collection is empty")]
    Empty,

    /// A segmented deque was constructed with a zero segment capacity.
    #[error("segment capacity must be positive")]
    InvalidCapacity,
}
