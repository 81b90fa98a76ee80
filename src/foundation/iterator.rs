//! Iterator adapters and combinators for ww-core.
//!
//! Every adapter here works on any `Iterator`, stays lazy, and pulls from its
//! source only when its own `next` is called. The [`IteratorExt`] trait makes
//! them available as methods on all iterators; the pipeline wrapper in
//! [`crate::core::pipeline`] builds on the same types.
//!
//! ## Design Principles
//!
//! - **Lazy Evaluation**: defer reading the source until a value is needed
//! - **Bounded Buffers**: adapters that must remember items keep at most the
//!   items they are asked for (`n` for windows and lasts, one chunk at a time)
//! - **Composability**: small, focused adapters that combine well
//! - **Accurate Hints**: `size_hint` is exact whenever it can be

#![allow(clippy::module_name_repetitions)]

use core::borrow::BorrowMut;
use core::hash::Hash;
use core::iter::{ExactSizeIterator, FusedIterator, Iterator};
use core::marker::PhantomData;
use std::collections::{HashSet, VecDeque};

use crate::foundation::error::{Error, Result};
use crate::foundation::memory::{RingBuffer, WindowCursor};
use crate::foundation::types::Fingerprint;

// ============================================================================
// Core Iterator Traits
// ============================================================================

/// Trait for iterators that can report an exact remaining length.
///
/// This extends the standard `size_hint` with more precise information.
pub trait PreciseSizeHint: Iterator {
    /// Returns the exact number of remaining elements, if known.
    fn exact_size(&self) -> Option<usize> {
        let (lower, upper) = self.size_hint();
        if upper == Some(lower) {
            Some(lower)
        } else {
            None
        }
    }
}

// Blanket implementation for all iterators
impl<I: Iterator + ?Sized> PreciseSizeHint for I {}

/// The identity cast: hands a chunk back unchanged.
pub fn keep_vec<T>(chunk: Vec<T>) -> Vec<T> {
    chunk
}

/// The default window cast: copies the window into a `Vec`.
pub fn window_to_vec<T: Clone>(window: &VecDeque<T>) -> Vec<T> {
    window.iter().cloned().collect()
}

/// Chunk cast used when none is given.
pub type VecCast<T> = fn(Vec<T>) -> Vec<T>;

/// Window cast used when none is given.
pub type WindowVecCast<T> = fn(&VecDeque<T>) -> Vec<T>;

pub(crate) fn check_size(name: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(Error::InvalidSize { name, value });
    }
    Ok(())
}

// ============================================================================
// Chunk Iterator
// ============================================================================

/// Iterator adapter for chunking elements into fixed-size groups.
///
/// This iterator yields non-overlapping chunks, with the last chunk
/// potentially being smaller than the requested size. Each chunk is handed
/// to `cast` before being yielded.
#[derive(Debug, Clone)]
pub struct Chunks<I, F> {
    iter: I,
    size: usize,
    cast: F,
}

impl<I, F, C> Chunks<I, F>
where
    I: Iterator,
    F: FnMut(Vec<I::Item>) -> C,
{
    /// Creates a new chunking iterator.
    ///
    /// Fails with [`Error::InvalidSize`] if `size` is 0.
    pub fn new(iter: I, size: usize, cast: F) -> Result<Self> {
        check_size("chunk size", size)?;
        Ok(Self { iter, size, cast })
    }

    /// Returns the chunk size.
    pub const fn chunk_size(&self) -> usize {
        self.size
    }
}

impl<I, F, C> Iterator for Chunks<I, F>
where
    I: Iterator,
    F: FnMut(Vec<I::Item>) -> C,
{
    type Item = C;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.iter.next()?;
        let mut chunk = Vec::with_capacity(self.size);
        chunk.push(first);
        chunk.extend(self.iter.by_ref().take(self.size - 1));
        Some((self.cast)(chunk))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        (lower.div_ceil(self.size), upper.map(|u| u.div_ceil(self.size)))
    }
}

impl<I, F, C> FusedIterator for Chunks<I, F>
where
    I: FusedIterator,
    F: FnMut(Vec<I::Item>) -> C,
{
}

// ============================================================================
// Window iterators
// ============================================================================

/// Sliding window iterator advancing one element at a time.
///
/// The first window holds the first `size` items. If the source is shorter,
/// exactly one short window is yielded (an empty one for an empty source).
/// Each following window drops the oldest item and takes one new one.
///
/// Every window is produced by `cast` from the shared buffer; the default
/// cast copies it into a `Vec`. To look at the buffer itself without
/// copying, use [`WindowCursor`].
pub struct SlidingWindow<I: Iterator, F> {
    cursor: WindowCursor<I>,
    cast: F,
}

impl<I: Iterator, F> core::fmt::Debug for SlidingWindow<I, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SlidingWindow")
            .field("size", &self.cursor.size())
            .finish_non_exhaustive()
    }
}

impl<I, F, C> SlidingWindow<I, F>
where
    I: Iterator,
    F: FnMut(&VecDeque<I::Item>) -> C,
{
    /// Creates a new sliding window iterator.
    ///
    /// Fails with [`Error::InvalidSize`] if `size` is 0.
    pub fn new(iter: I, size: usize, cast: F) -> Result<Self> {
        check_size("window size", size)?;
        Ok(Self {
            cursor: WindowCursor::new(iter, size),
            cast,
        })
    }

    /// Returns the window size.
    pub const fn window_size(&self) -> usize {
        self.cursor.size()
    }
}

impl<I, F, C> Iterator for SlidingWindow<I, F>
where
    I: Iterator,
    F: FnMut(&VecDeque<I::Item>) -> C,
{
    type Item = C;

    fn next(&mut self) -> Option<Self::Item> {
        let window = self.cursor.next_window()?;
        Some((self.cast)(window))
    }
}

impl<I, F, C> FusedIterator for SlidingWindow<I, F>
where
    I: FusedIterator,
    F: FnMut(&VecDeque<I::Item>) -> C,
{
}

// ============================================================================
// Head and tail with padding
// ============================================================================

/// Yields exactly `n` items: the head of the source, padded with a default.
///
/// Never pulls more than `n` items from the source and buffers none.
#[derive(Debug, Clone)]
pub struct Firsts<I: Iterator> {
    iter: I,
    remaining: usize,
    source_done: bool,
    default: I::Item,
}

impl<I: Iterator> Firsts<I>
where
    I::Item: Clone,
{
    /// Creates a new head iterator.
    pub const fn new(iter: I, n: usize, default: I::Item) -> Self {
        Self {
            iter,
            remaining: n,
            source_done: false,
            default,
        }
    }
}

impl<I: Iterator> Iterator for Firsts<I>
where
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        if !self.source_done {
            match self.iter.next() {
                Some(item) => return Some(item),
                None => self.source_done = true,
            }
        }
        Some(self.default.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<I: Iterator> ExactSizeIterator for Firsts<I> where I::Item: Clone {}
impl<I: Iterator> FusedIterator for Firsts<I> where I::Item: Clone {}

/// Yields exactly `n` items: the tail of the source, padded at the front with
/// a default.
///
/// The source is read to exhaustion on the first call to `next`, keeping only
/// its last `n` items in a ring buffer.
#[derive(Debug)]
pub struct Lasts<I: Iterator> {
    iter: Option<I>,
    n: usize,
    padding: usize,
    tail: VecDeque<I::Item>,
    default: I::Item,
}

impl<I: Iterator> Lasts<I>
where
    I::Item: Clone,
{
    /// Creates a new tail iterator.
    pub fn new(iter: I, n: usize, default: I::Item) -> Self {
        Self {
            iter: Some(iter),
            n,
            padding: 0,
            tail: VecDeque::new(),
            default,
        }
    }

    fn fill(&mut self) {
        if let Some(iter) = self.iter.take() {
            let ring = RingBuffer::from_tail(iter, self.n);
            self.padding = self.n - ring.len();
            self.tail = ring.into_deque();
            log::trace!(
                "lasts({}) buffered {} items, padding {}",
                self.n,
                self.tail.len(),
                self.padding
            );
        }
    }
}

impl<I: Iterator> Iterator for Lasts<I>
where
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.fill();
        if self.padding > 0 {
            self.padding -= 1;
            return Some(self.default.clone());
        }
        self.tail.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.iter.is_some() {
            self.n
        } else {
            self.padding + self.tail.len()
        };
        (remaining, Some(remaining))
    }
}

impl<I: Iterator> ExactSizeIterator for Lasts<I> where I::Item: Clone {}
impl<I: Iterator> FusedIterator for Lasts<I> where I::Item: Clone {}

// ============================================================================
// Deduplication
// ============================================================================

/// Yields each element the first time its fingerprint is seen.
///
/// Duplicates are identified by the `key` function, not by natural equality.
/// The fingerprint set may be owned or borrowed, so it can be pre-seeded and
/// shared between several deduplicating passes.
#[derive(Debug)]
pub struct SkipDuplicates<I, F, K, S = HashSet<K>> {
    iter: I,
    key: F,
    fingerprints: S,
    _marker: PhantomData<K>,
}

impl<I, F, K, S> SkipDuplicates<I, F, K, S>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: Hash + Eq,
    S: BorrowMut<HashSet<K>>,
{
    /// Creates a deduplicating iterator over `iter` using `fingerprints` as
    /// the seen-set.
    pub const fn new(iter: I, key: F, fingerprints: S) -> Self {
        Self {
            iter,
            key,
            fingerprints,
            _marker: PhantomData,
        }
    }
}

impl<I, F, K, S> Iterator for SkipDuplicates<I, F, K, S>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: Hash + Eq,
    S: BorrowMut<HashSet<K>>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let seen = self.fingerprints.borrow_mut();
        self.iter.by_ref().find(|item| seen.insert((self.key)(item)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every remaining item may already be in the set.
        (0, self.iter.size_hint().1)
    }
}

impl<I, F, K, S> FusedIterator for SkipDuplicates<I, F, K, S>
where
    I: FusedIterator,
    F: FnMut(&I::Item) -> K,
    K: Hash + Eq,
    S: BorrowMut<HashSet<K>>,
{
}

/// Deduplication over dynamically typed [`Fingerprint`] keys.
///
/// Yields `Ok(item)` for first occurrences. When the key returns an
/// unhashable fingerprint the adapter yields one [`Error::Unhashable`] naming
/// the fingerprint's type and the element, then stops.
#[derive(Debug)]
pub struct CheckedSkipDuplicates<I, F> {
    iter: I,
    key: F,
    fingerprints: HashSet<Fingerprint>,
    failed: bool,
}

impl<I, F> CheckedSkipDuplicates<I, F>
where
    I: Iterator,
    I::Item: core::fmt::Debug,
    F: FnMut(&I::Item) -> Fingerprint,
{
    /// Creates a checked deduplicating iterator.
    pub fn new(iter: I, key: F, fingerprints: HashSet<Fingerprint>) -> Self {
        Self {
            iter,
            key,
            fingerprints,
            failed: false,
        }
    }
}

impl<I, F> Iterator for CheckedSkipDuplicates<I, F>
where
    I: Iterator,
    I::Item: core::fmt::Debug,
    F: FnMut(&I::Item) -> Fingerprint,
{
    type Item = Result<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let item = self.iter.next()?;
            let fingerprint = (self.key)(&item);
            if !fingerprint.is_hashable() {
                self.failed = true;
                return Some(Err(Error::Unhashable {
                    fingerprint_type: fingerprint.type_name(),
                    element: format!("{item:?}"),
                }));
            }
            if self.fingerprints.insert(fingerprint) {
                return Some(Ok(item));
            }
        }
    }
}

impl<I, F> FusedIterator for CheckedSkipDuplicates<I, F>
where
    I: FusedIterator,
    I::Item: core::fmt::Debug,
    F: FnMut(&I::Item) -> Fingerprint,
{
}

// ============================================================================
// Predicate boundaries
// ============================================================================

/// Skips items until the predicate first holds, then yields everything.
#[derive(Debug, Clone)]
pub struct StartsWhen<I, P> {
    iter: I,
    predicate: P,
    started: bool,
}

impl<I, P> StartsWhen<I, P> {
    /// Creates a new drop-until iterator.
    pub const fn new(iter: I, predicate: P) -> Self {
        Self {
            iter,
            predicate,
            started: false,
        }
    }
}

impl<I, P> Iterator for StartsWhen<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            return self.iter.next();
        }
        let item = self.iter.by_ref().find(|item| (self.predicate)(item))?;
        self.started = true;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        if self.started {
            (lower, upper)
        } else {
            (0, upper)
        }
    }
}

impl<I, P> FusedIterator for StartsWhen<I, P>
where
    I: FusedIterator,
    P: FnMut(&I::Item) -> bool,
{
}

/// Yields items until the predicate first holds; that item and everything
/// after it are left unread or discarded.
#[derive(Debug, Clone)]
pub struct StopsWhen<I, P> {
    iter: I,
    predicate: P,
    stopped: bool,
}

impl<I, P> StopsWhen<I, P> {
    /// Creates a new take-until iterator.
    pub const fn new(iter: I, predicate: P) -> Self {
        Self {
            iter,
            predicate,
            stopped: false,
        }
    }
}

impl<I, P> Iterator for StopsWhen<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped {
            return None;
        }
        let item = self.iter.next()?;
        if (self.predicate)(&item) {
            self.stopped = true;
            return None;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.stopped {
            (0, Some(0))
        } else {
            (0, self.iter.size_hint().1)
        }
    }
}

impl<I, P> FusedIterator for StopsWhen<I, P>
where
    I: FusedIterator,
    P: FnMut(&I::Item) -> bool,
{
}

// ============================================================================
// Stride and cycle
// ============================================================================

/// Iterator adapter yielding every `step`-th element, starting with the first.
///
/// Elements between two yields are skipped only when the next one is
/// requested, so the source is never read further than needed.
#[derive(Debug, Clone)]
pub struct Stride<I> {
    iter: I,
    step: usize,
    first: bool,
}

impl<I> Stride<I>
where
    I: Iterator,
{
    /// Creates a new striding iterator.
    ///
    /// Fails with [`Error::InvalidSize`] if `step` is 0.
    pub fn new(iter: I, step: usize) -> Result<Self> {
        check_size("step", step)?;
        Ok(Self {
            iter,
            step,
            first: true,
        })
    }
}

impl<I> Iterator for Stride<I>
where
    I: Iterator,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.first {
            self.first = false;
            return self.iter.next();
        }
        self.iter.nth(self.step - 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        let strided = |n: usize| {
            if self.first {
                n.div_ceil(self.step)
            } else {
                n / self.step
            }
        };
        (strided(lower), upper.map(strided))
    }
}

impl<I> FusedIterator for Stride<I> where I: FusedIterator {}

/// Repeats a source forever, replaying saved copies after the first pass.
///
/// Works on single-pass sources: every item is cloned once while it is first
/// read. An empty source yields nothing.
#[derive(Debug, Clone)]
pub struct Cycle<I: Iterator> {
    iter: Option<I>,
    saved: Vec<I::Item>,
    index: usize,
}

impl<I: Iterator> Cycle<I>
where
    I::Item: Clone,
{
    /// Creates a new cycling iterator.
    pub const fn new(iter: I) -> Self {
        Self {
            iter: Some(iter),
            saved: Vec::new(),
            index: 0,
        }
    }
}

impl<I: Iterator> Iterator for Cycle<I>
where
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(iter) = self.iter.as_mut() {
            if let Some(item) = iter.next() {
                self.saved.push(item.clone());
                return Some(item);
            }
            self.iter = None;
        }
        if self.saved.is_empty() {
            return None;
        }
        let item = self.saved[self.index].clone();
        self.index = (self.index + 1) % self.saved.len();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.iter {
            Some(iter) if self.saved.is_empty() => match iter.size_hint() {
                (0, Some(0)) => (0, Some(0)),
                (0, _) => (0, None),
                _ => (usize::MAX, None),
            },
            _ if self.saved.is_empty() => (0, Some(0)),
            _ => (usize::MAX, None),
        }
    }
}

// ============================================================================
// Extension trait
// ============================================================================

/// Extension trait adding the ww-core adapters to every iterator.
pub trait IteratorExt: Iterator {
    /// Groups items into `Vec`s of `size`; the last one may be shorter.
    fn chunks(self, size: usize) -> Result<Chunks<Self, VecCast<Self::Item>>>
    where
        Self: Sized,
    {
        Chunks::new(self, size, keep_vec as VecCast<Self::Item>)
    }

    /// Groups items into chunks of `size` built by `cast`.
    fn chunks_with<F, C>(self, size: usize, cast: F) -> Result<Chunks<Self, F>>
    where
        Self: Sized,
        F: FnMut(Vec<Self::Item>) -> C,
    {
        Chunks::new(self, size, cast)
    }

    /// Creates a sliding window iterator yielding `Vec` copies.
    fn window(self, size: usize) -> Result<SlidingWindow<Self, WindowVecCast<Self::Item>>>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        SlidingWindow::new(self, size, window_to_vec as WindowVecCast<Self::Item>)
    }

    /// Creates a sliding window iterator building each window with `cast`.
    fn window_with<F, C>(self, size: usize, cast: F) -> Result<SlidingWindow<Self, F>>
    where
        Self: Sized,
        F: FnMut(&VecDeque<Self::Item>) -> C,
    {
        SlidingWindow::new(self, size, cast)
    }

    /// Creates a window cursor that reuses a single buffer.
    fn window_cursor(self, size: usize) -> Result<WindowCursor<Self>>
    where
        Self: Sized,
    {
        check_size("window size", size)?;
        Ok(WindowCursor::new(self, size))
    }

    /// Yields exactly `n` items from the head, padded with `default`.
    fn firsts(self, n: usize, default: Self::Item) -> Firsts<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Firsts::new(self, n, default)
    }

    /// Yields exactly `n` items from the tail, padded in front with `default`.
    fn lasts(self, n: usize, default: Self::Item) -> Lasts<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Lasts::new(self, n, default)
    }

    /// Skips items already seen, using the items themselves as fingerprints.
    #[allow(clippy::type_complexity)]
    fn skip_duplicates(self) -> SkipDuplicates<Self, fn(&Self::Item) -> Self::Item, Self::Item>
    where
        Self: Sized,
        Self::Item: Clone + Hash + Eq,
    {
        SkipDuplicates::new(
            self,
            Clone::clone as fn(&Self::Item) -> Self::Item,
            HashSet::new(),
        )
    }

    /// Skips items whose `key` has already been seen.
    fn skip_duplicates_by<F, K>(self, key: F) -> SkipDuplicates<Self, F, K>
    where
        Self: Sized,
        F: FnMut(&Self::Item) -> K,
        K: Hash + Eq,
    {
        SkipDuplicates::new(self, key, HashSet::new())
    }

    /// Skips items whose `key` is already in `fingerprints`, recording new
    /// ones there.
    fn skip_duplicates_with<F, K, S>(self, key: F, fingerprints: S) -> SkipDuplicates<Self, F, K, S>
    where
        Self: Sized,
        F: FnMut(&Self::Item) -> K,
        K: Hash + Eq,
        S: BorrowMut<HashSet<K>>,
    {
        SkipDuplicates::new(self, key, fingerprints)
    }

    /// Skips duplicates by a dynamic fingerprint, reporting unhashable ones.
    fn skip_duplicates_checked<F>(self, key: F) -> CheckedSkipDuplicates<Self, F>
    where
        Self: Sized,
        Self::Item: core::fmt::Debug,
        F: FnMut(&Self::Item) -> Fingerprint,
    {
        CheckedSkipDuplicates::new(self, key, HashSet::new())
    }

    /// Starts yielding once `predicate` first holds.
    fn starts_when<P>(self, predicate: P) -> StartsWhen<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        StartsWhen::new(self, predicate)
    }

    /// Stops yielding once `predicate` first holds.
    fn stops_when<P>(self, predicate: P) -> StopsWhen<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        StopsWhen::new(self, predicate)
    }

    /// Creates a strided iterator.
    fn stride(self, step: usize) -> Result<Stride<Self>>
    where
        Self: Sized,
    {
        Stride::new(self, step)
    }

    /// Repeats the items forever, saving them on the first pass.
    fn cycle_saved(self) -> Cycle<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Cycle::new(self)
    }
}

impl<I: Iterator> IteratorExt for I {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows() {
        let data = vec![1, 2, 3, 4, 5];
        let windows: Vec<_> = data.iter().cloned().window(3).unwrap().collect();
        assert_eq!(windows, vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);
    }

    #[test]
    fn test_windows_short_source() {
        let windows: Vec<_> = [1, 2].into_iter().window(3).unwrap().collect();
        assert_eq!(windows, vec![vec![1, 2]]);

        let windows: Vec<Vec<u8>> = core::iter::empty().window(2).unwrap().collect();
        assert_eq!(windows, vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_windows_with_cast() {
        let sums: Vec<i32> = (1..=5)
            .window_with(2, |w: &VecDeque<i32>| w.iter().sum())
            .unwrap()
            .collect();
        assert_eq!(sums, vec![3, 5, 7, 9]);
    }

    #[test]
    fn test_window_size_zero() {
        assert_eq!(
            (0..3).window(0).unwrap_err(),
            Error::InvalidSize {
                name: "window size",
                value: 0
            }
        );
    }

    #[test]
    fn test_chunks() {
        let data = vec![1, 2, 3, 4, 5, 6, 7];
        let chunks: Vec<_> = data.iter().cloned().chunks(3).unwrap().collect();
        assert_eq!(chunks, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
    }

    #[test]
    fn test_chunks_with_cast_and_hint() {
        let chunks = "123456789".chars().chunks_with(2, |c| c.into_iter().collect::<String>());
        let chunks = chunks.unwrap();
        assert_eq!(chunks.size_hint().1, Some(5));
        assert_eq!(chunks.collect::<Vec<_>>(), vec!["12", "34", "56", "78", "9"]);
        assert!((0..3).chunks(0).is_err());
    }

    #[test]
    fn test_stride() {
        let data = vec![1, 2, 3, 4, 5, 6];
        let strided: Vec<_> = data.iter().cloned().stride(2).unwrap().collect();
        assert_eq!(strided, vec![1, 3, 5]);
    }

    #[test]
    fn test_stride_reads_lazily() {
        let mut source = 0..10;
        let mut strided = source.by_ref().stride(3).unwrap();
        assert_eq!(strided.next(), Some(0));
        assert_eq!(strided.next(), Some(3));
        drop(strided);
        assert_eq!(source.next(), Some(4));
    }

    #[test]
    fn test_firsts_pads_and_does_not_overread() {
        let mut source = 0..5;
        let head: Vec<_> = source.by_ref().firsts(2, -1).collect();
        assert_eq!(head, vec![0, 1]);
        assert_eq!(source.collect::<Vec<_>>(), vec![2, 3, 4]);

        let padded: Vec<_> = "12".chars().firsts(4, '-').collect();
        assert_eq!(padded, vec!['1', '2', '-', '-']);

        let empty: Vec<_> = core::iter::empty().firsts(2, 0).collect();
        assert_eq!(empty, vec![0, 0]);
    }

    #[test]
    fn test_lasts_pads_in_front() {
        let tail: Vec<_> = "12345".chars().lasts(2, '-').collect();
        assert_eq!(tail, vec!['4', '5']);

        let padded = "12".chars().map(Some).lasts(3, None);
        assert_eq!(padded.len(), 3);
        assert_eq!(padded.collect::<Vec<_>>(), vec![None, Some('1'), Some('2')]);
    }

    #[test]
    fn test_skip_duplicates() {
        let unique: Vec<_> = [1, 2, 3, 4, 4, 2, 1, 3, 4].into_iter().skip_duplicates().collect();
        assert_eq!(unique, vec![1, 2, 3, 4]);

        let by_abs: Vec<_> = [-1, 1, 2, 3].into_iter().skip_duplicates_by(|x: &i32| x.abs()).collect();
        assert_eq!(by_abs, vec![-1, 2, 3]);
    }

    #[test]
    fn test_skip_duplicates_shared_set() {
        let mut seen: HashSet<i32> = [1].into_iter().collect();
        let first: Vec<_> = [1, 2].into_iter().skip_duplicates_with(|x| *x, &mut seen).collect();
        assert_eq!(first, vec![2]);
        let second: Vec<_> = [2, 3].into_iter().skip_duplicates_with(|x| *x, &mut seen).collect();
        assert_eq!(second, vec![3]);
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_skip_duplicates_size_hint_with_seeded_set() {
        let mut seen: HashSet<i32> = [1].into_iter().collect();
        let mut unique = [1].into_iter().skip_duplicates_with(|x| *x, &mut seen);
        assert_eq!(unique.size_hint(), (0, Some(1)));
        assert_eq!(unique.exact_size(), None);
        assert_eq!(unique.next(), None);
    }

    #[test]
    fn test_skip_duplicates_checked_reports_unhashable() {
        let data = vec![vec![1], vec![1], vec![2]];
        let mut results = data.into_iter().skip_duplicates_checked(|v| Fingerprint::from(v.clone()));
        match results.next() {
            Some(Err(Error::Unhashable {
                fingerprint_type,
                element,
            })) => {
                assert_eq!(fingerprint_type, "list");
                assert_eq!(element, "[1]");
            }
            other => panic!("expected an unhashable error, got {other:?}"),
        }
        assert!(results.next().is_none());
    }

    #[test]
    fn test_skip_duplicates_checked_tuple_keys() {
        let data = vec![vec![], vec![], vec![1, 2]];
        let unique: Vec<_> = data
            .into_iter()
            .skip_duplicates_checked(|v| {
                Fingerprint::Tuple(v.iter().map(|&x| Fingerprint::Int(x)).collect())
            })
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(unique, vec![vec![], vec![1, 2]]);
    }

    #[test]
    fn test_starts_and_stops_when() {
        let started: Vec<_> = (0..10).starts_when(|x| *x > 5).collect();
        assert_eq!(started, vec![6, 7, 8, 9]);

        let stopped: Vec<_> = (0..10).stops_when(|x| *x == 7).collect();
        assert_eq!(stopped, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_cycle_saved() {
        let items: Vec<_> = (0..2).cycle_saved().take(5).collect();
        assert_eq!(items, vec![0, 1, 0, 1, 0]);
        assert_eq!(core::iter::empty::<u8>().cycle_saved().next(), None);
    }

    #[test]
    fn test_precise_size_hint() {
        assert_eq!(vec![1, 2, 3].into_iter().exact_size(), Some(3));
        assert_eq!((0..10).filter(|x| x % 2 == 0).exact_size(), None);
        assert_eq!(core::iter::empty::<u8>().exact_size(), Some(0));
    }
}
