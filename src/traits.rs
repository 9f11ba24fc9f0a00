//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for heap/priority queue data structures:
//!
//! - [`Heap`]: Base trait for simple heaps without `decrease_key` support
//! - [`DecreaseKeyHeap`]: Extended trait adding `decrease_key`, `delete` and handle-based operations
//!
//! The shortest-path engine in [`crate::dijkstra`] is written against
//! [`DecreaseKeyHeap`], so any heap implementing it can drive a query.

use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The new priority is greater than the current priority
    #[error("new priority is greater than the current priority")]
    PriorityIncreased,
    /// The handle is no longer valid (element was removed, or belongs to another heap)
    #[error("handle is no longer valid (element was removed)")]
    InvalidHandle,
}

/// A handle to an element in the heap, used for decrease_key operations
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data.
///
/// # Example
///
/// ```rust
/// use fibonacci_paths::Heap;
/// use fibonacci_paths::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    ///
    /// Returns `None` on an empty heap; this is the normal loop termination
    /// signal, not an error.
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with `decrease_key` support
///
/// # Example
///
/// ```rust
/// use fibonacci_paths::{Heap, DecreaseKeyHeap};
/// use fibonacci_paths::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Returns the priority and item behind a handle, if it is still live
    fn get(&self, handle: &Self::Handle) -> Option<(&P, &T)>;

    /// Decreases the priority of an element identified by the handle
    ///
    /// # Errors
    /// - `HeapError::PriorityIncreased` if the new priority is greater than
    ///   the current one. The heap is left untouched.
    /// - `HeapError::InvalidHandle` if the element was already removed.
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;

    /// Removes the element identified by the handle, returning it
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the element was already removed.
    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError>;
}
