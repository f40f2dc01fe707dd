//! # Segmented Collections
//!
//! Sequence collections built around [`SegmentedDeque`], a double-ended queue
//! stored as a chain of fixed-capacity segments.
//!
//! Every collection here implements the same [`Sequence`] contract (read
//! access plus copy-returning updates) and, where it makes sense, the
//! [`MutableSequence`] extension (in-place updates), so callers can pick a
//! backing representation at construction time and keep working through
//! `Box<dyn Sequence<T>>`.
//!
//! ## Key Features
//!
//! * **Segmented storage:** elements live in segments of a fixed capacity
//!   chosen at construction; pushes at either end are amortized O(1) and
//!   positional inserts stay local to one segment (splitting it when full).
//! * **Deferred rebalancing:** removals never merge surviving segments;
//!   callers run [`SegmentedDeque::optimize`] once after a batch of removals
//!   instead of paying for compaction on every removal.
//! * **One contract, several backings:** [`ArraySequence`] (contiguous
//!   buffer), [`ListSequence`] (owned singly-linked chain), the deque itself,
//!   and [`ImmutableSequence`] (read-only wrapper over any of them).
//! * **Checked access:** out-of-range indexes and empty-collection accesses
//!   surface as [`SequenceError`] values, never as panics.
//!
//! ## Examples
//!
//! ### SegmentedDeque
//!
//! ```rust
//! use segmented_collections::SegmentedDeque;
//!
//! let mut deque: SegmentedDeque<i32> = SegmentedDeque::new(3).unwrap();
//! for value in 1..=5 {
//!     deque.append_in_place(value);
//! }
//!
//! // Two segments: [1, 2, 3] and [4, 5].
//! assert_eq!(deque.segment_sizes(), vec![3, 2]);
//! assert_eq!(deque.get(3), Ok(&4));
//!
//! deque.insert_at_in_place(10, 3).unwrap();
//! assert_eq!(deque.get(3), Ok(&10));
//! assert_eq!(deque.len(), 6);
//!
//! assert_eq!(deque.pop_front(), Ok(1));
//! assert_eq!(deque.pop_back(), Ok(5));
//! ```
//!
//! ### Working through the contract
//!
//! ```rust
//! use segmented_collections::{ArraySequence, ListSequence, Sequence};
//!
//! let sequences: Vec<Box<dyn Sequence<i32>>> = vec![
//!     Box::new(ArraySequence::from_iter([1, 2, 3])),
//!     Box::new(ListSequence::from_iter([1, 2, 3])),
//! ];
//!
//! for seq in &sequences {
//!     let grown = seq.append(4);
//!     assert_eq!(grown.get_last(), Ok(4));
//!     assert_eq!(seq.len(), 3); // the original is untouched
//! }
//! ```
//!
//! ### Bulk operations
//!
//! ```rust
//! use segmented_collections::SegmentedDeque;
//!
//! let mut deque: SegmentedDeque<i32> = SegmentedDeque::new(3).unwrap();
//! deque.extend((0..10).map(|i| 9 - i));
//!
//! deque.sort_in_place(|a, b| a.cmp(b));
//! assert_eq!(deque.get_first(), Ok(&0));
//! assert_eq!(deque.get_last(), Ok(&9));
//!
//! let evens = deque.filter(|x| x % 2 == 0);
//! assert_eq!(evens.len(), 5);
//!
//! let sum = deque.reduce(|acc, x| acc + x, 0);
//! assert_eq!(sum, 45);
//! ```

// --- Module Declarations ---

pub mod array_seq;
pub mod dyn_array;
pub mod error;
pub mod immutable;
pub mod list_seq;
pub mod segmented_deque;
pub mod sequence;

// --- Re-exports ---

pub use array_seq::ArraySequence;
pub use dyn_array::DynArray;
pub use error::SequenceError;
pub use immutable::ImmutableSequence;
pub use list_seq::ListSequence;
pub use segmented_deque::{SegmentedDeque, DEFAULT_SEGMENT_CAPACITY};
pub use sequence::{MutableSequence, Sequence};
