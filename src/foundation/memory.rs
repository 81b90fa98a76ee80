//! Buffers backing the stateful adapters.
//!
//! This module provides the three pieces of memory a pipeline ever holds on
//! to: a bounded ring buffer, the shared replay buffer behind `tee`, and the
//! reusable window used by [`WindowCursor`].
//!
//! ## Design Principles
//!
//! - **Bounded**: every buffer here has a fixed capacity or is trimmed as its
//!   readers advance
//! - **Lazy**: nothing is pulled from a source before a reader asks for it
//! - **Single-threaded**: shared state uses `Rc<RefCell<_>>`, never locks

use core::cell::RefCell;
use core::fmt;
use std::collections::VecDeque;
use std::rc::Rc;

// ============================================================================
// Ring Buffer
// ============================================================================

/// A fixed-capacity FIFO that evicts its oldest element when full.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty ring buffer holding at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Fills a ring buffer with the last `capacity` items of `iter`.
    ///
    /// Consumes the whole iterator.
    pub fn from_tail<I>(iter: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut ring = Self::new(capacity);
        for item in iter {
            ring.push(item);
        }
        ring
    }

    /// Pushes an item, returning the evicted one when the buffer was full.
    ///
    /// A zero-capacity buffer hands the item straight back.
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }
        let evicted = if self.is_full() {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Removes and returns the oldest item.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Maximum number of items held.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the buffer holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns whether the next push evicts.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Borrows the items, oldest first.
    pub const fn as_deque(&self) -> &VecDeque<T> {
        &self.items
    }

    /// Returns the items, oldest first.
    pub fn into_deque(self) -> VecDeque<T> {
        self.items
    }
}

// ============================================================================
// Tee replay buffer
// ============================================================================

/// Position marking a branch that has been dropped.
const DETACHED: usize = usize::MAX;

struct TeeState<I: Iterator> {
    source: I,
    exhausted: bool,
    buffer: VecDeque<I::Item>,
    /// Absolute position of `buffer[0]` in the source.
    offset: usize,
    /// Absolute read position of every branch.
    positions: Vec<usize>,
}

impl<I: Iterator> TeeState<I> {
    fn slowest(&self) -> usize {
        self.positions
            .iter()
            .copied()
            .filter(|&p| p != DETACHED)
            .min()
            .unwrap_or(self.offset + self.buffer.len())
    }

    fn trim(&mut self) {
        let slowest = self.slowest();
        while self.offset < slowest && self.buffer.pop_front().is_some() {
            self.offset += 1;
        }
    }
}

/// One of several independent readers over a shared source.
///
/// Items pulled by the fastest branch are kept in a shared buffer until the
/// slowest live branch has read them. Branches are not thread-safe.
pub struct TeeBranch<I: Iterator> {
    shared: Rc<RefCell<TeeState<I>>>,
    id: usize,
}

impl<I: Iterator> fmt::Debug for TeeBranch<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeeBranch")
            .field("id", &self.id)
            .field("buffered", &self.buffered())
            .finish()
    }
}

fn shared_state<I: Iterator>(iter: I, branches: usize) -> Rc<RefCell<TeeState<I>>> {
    Rc::new(RefCell::new(TeeState {
        source: iter,
        exhausted: false,
        buffer: VecDeque::new(),
        offset: 0,
        positions: vec![0; branches],
    }))
}

/// Splits `iter` into `n` independent branches.
pub fn tee<I: Iterator>(iter: I, n: usize) -> Vec<TeeBranch<I>> {
    let shared = shared_state(iter, n);
    (0..n)
        .map(|id| TeeBranch {
            shared: Rc::clone(&shared),
            id,
        })
        .collect()
}

impl<I: Iterator> TeeBranch<I> {
    /// Wraps `iter` in a single branch; more come from [`fork`](Self::fork).
    pub fn new(iter: I) -> Self {
        Self {
            shared: shared_state(iter, 1),
            id: 0,
        }
    }

    /// Adds a new branch positioned where this one currently is.
    pub fn fork(&self) -> Self {
        let mut state = self.shared.borrow_mut();
        let position = state.positions[self.id];
        state.positions.push(position);
        Self {
            shared: Rc::clone(&self.shared),
            id: state.positions.len() - 1,
        }
    }

    /// Number of items held in the shared buffer.
    pub fn buffered(&self) -> usize {
        self.shared.borrow().buffer.len()
    }
}

impl<I> Iterator for TeeBranch<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let mut state = self.shared.borrow_mut();
        let position = state.positions[self.id];
        let index = position - state.offset;

        let item = if index < state.buffer.len() {
            state.buffer[index].clone()
        } else {
            if state.exhausted {
                return None;
            }
            match state.source.next() {
                Some(item) => {
                    state.buffer.push_back(item.clone());
                    item
                }
                None => {
                    state.exhausted = true;
                    return None;
                }
            }
        };

        state.positions[self.id] = position + 1;
        state.trim();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let state = self.shared.borrow();
        let ahead = state.offset + state.buffer.len() - state.positions[self.id];
        if state.exhausted {
            return (ahead, Some(ahead));
        }
        let (lower, upper) = state.source.size_hint();
        (
            lower.saturating_add(ahead),
            upper.and_then(|u| u.checked_add(ahead)),
        )
    }
}

impl<I> core::iter::FusedIterator for TeeBranch<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

impl<I: Iterator> Drop for TeeBranch<I> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.shared.try_borrow_mut() {
            state.positions[self.id] = DETACHED;
            state.trim();
        }
    }
}

// ============================================================================
// In-place window
// ============================================================================

/// A sliding window that reuses one buffer for every step.
///
/// This is the allocation-free counterpart of
/// [`SlidingWindow`](crate::foundation::iterator::SlidingWindow). Since only
/// one buffer is used for the entire iteration, every call to
/// [`next_window`](Self::next_window) mutates the view returned by the previous
/// call: the same buffer is handed out each time, holding different items.
/// The borrow checker refuses code that keeps a view across calls.
///
/// The first view holds the first `size` items, or fewer (possibly none) when
/// the source is shorter, in which case it is also the last view.
#[derive(Debug)]
pub struct WindowCursor<I: Iterator> {
    iter: I,
    ring: RingBuffer<I::Item>,
    started: bool,
}

impl<I: Iterator> WindowCursor<I> {
    /// Creates a cursor over windows of `size` items. `size` must be non-zero;
    /// callers validate it.
    pub fn new(iter: I, size: usize) -> Self {
        Self {
            iter,
            ring: RingBuffer::new(size),
            started: false,
        }
    }

    /// Advances by one element and returns the current window.
    pub fn next_window(&mut self) -> Option<&VecDeque<I::Item>> {
        if !self.started {
            self.started = true;
            while !self.ring.is_full() {
                match self.iter.next() {
                    Some(item) => {
                        self.ring.push(item);
                    }
                    None => break,
                }
            }
            return Some(self.ring.as_deque());
        }

        if !self.ring.is_full() {
            return None;
        }
        let item = self.iter.next()?;
        self.ring.push(item);
        Some(self.ring.as_deque())
    }

    /// Window size.
    pub const fn size(&self) -> usize {
        self.ring.capacity()
    }
}
