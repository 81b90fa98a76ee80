//! The lazy pipeline wrapper.
//!
//! A [`Pipeline`] is a single-pass cursor over one or more sources. Lazy
//! transforms consume the pipeline and return a new one without reading
//! anything; eager operations read it to the end before returning.
//!
//! ## Cursors and views
//!
//! A pipeline is never `Clone`. Replayable data (a `Vec`, a slice, a range)
//! is the *view*; a pipeline built from it is a *cursor* that reads each
//! element once. More cursors come only from [`Pipeline::tee`] and
//! [`Pipeline::copy`]. Once a pipeline returns `None` it keeps returning
//! `None`.
//!
//! ## Forking
//!
//! After `tee` the original pipeline is frozen: every fallible read returns
//! [`Error::Forked`], and a pipeline derived from a frozen one by a lazy
//! transform is frozen too.
//!
//! ```
//! use ww_core::prelude::*;
//!
//! let mut squares = Pipeline::new((0..3).map(|x| x * x));
//! let branches = squares.tee(2).unwrap();
//! for branch in branches {
//!     assert_eq!(branch.collect::<Vec<_>>(), vec![0, 1, 4]);
//! }
//! assert_eq!(squares.try_next(), Err(Error::Forked));
//! ```

use core::borrow::BorrowMut;
use core::fmt::{self, Debug, Display};
use core::hash::Hash;
use core::iter::FusedIterator;
use core::ops::{Range, RangeFrom, RangeTo};
use std::collections::{HashSet, VecDeque};

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::core::config::{GroupOptions, JoinOptions, SampleOptions, SortOptions};
use crate::core::tools;
use crate::core::traits::{ElementFormatter, TemplateFormatter, Validate};
use crate::foundation::error::{Error, Result};
use crate::foundation::iterator::{check_size, keep_vec, window_to_vec, IteratorExt, PreciseSizeHint};
use crate::foundation::memory::{self, TeeBranch, WindowCursor};
use crate::foundation::types::{BoxIter, Condition, Fingerprint, Predicate, SliceSpec, Source};

// ============================================================================
// Pipeline
// ============================================================================

/// A lazy, single-pass, chainable sequence.
pub struct Pipeline<'a, T> {
    /// `None` once the pipeline has been forked by `tee`.
    source: Option<BoxIter<'a, T>>,
}

impl<'a, T: 'a> Pipeline<'a, T> {
    fn wrap<I>(iter: I) -> BoxIter<'a, T>
    where
        I: Iterator<Item = T> + 'a,
    {
        Box::new(iter.fuse())
    }

    pub(crate) const fn forked() -> Self {
        Self { source: None }
    }

    /// Wraps an iterable.
    pub fn new<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self {
            source: Some(Self::wrap(iterable.into_iter())),
        }
    }

    /// A pipeline with no elements.
    pub fn empty() -> Self {
        Self::new(core::iter::empty())
    }

    /// Reads several iterables one after another.
    pub fn concat<I, S>(iterables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: 'a,
        S: IntoIterator<Item = T>,
        S::IntoIter: 'a,
    {
        Self::new(iterables.into_iter().flatten())
    }

    /// Concatenates tagged sources, refusing any that is not a sequence.
    ///
    /// Every source is checked before anything is read. The first scalar
    /// fails the whole call with [`Error::NotIterable`] naming its position.
    pub fn from_sources(sources: Vec<Source<'a, T>>) -> Result<Self>
    where
        T: Debug,
    {
        let iters = sources
            .into_iter()
            .enumerate()
            .map(|(position, source)| source.require_sequence(position))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::concat(iters))
    }

    fn live(self) -> Result<BoxIter<'a, T>> {
        self.source.ok_or(Error::Forked)
    }

    fn live_mut(&mut self) -> Result<&mut BoxIter<'a, T>> {
        self.source.as_mut().ok_or(Error::Forked)
    }

    fn transform<U, I>(self, f: impl FnOnce(BoxIter<'a, T>) -> I) -> Pipeline<'a, U>
    where
        U: 'a,
        I: Iterator<Item = U> + 'a,
    {
        Pipeline {
            source: self.source.map(|iter| Pipeline::wrap(f(iter))),
        }
    }

    /// Returns `true` once `tee` has been called on this pipeline.
    pub const fn is_forked(&self) -> bool {
        self.source.is_none()
    }

    // ------------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------------

    /// Checks that the pipeline can still be read, for use in `for` loops.
    #[allow(clippy::iter_not_returning_iterator)]
    pub fn iter(&mut self) -> Result<&mut Self> {
        self.live_mut()?;
        Ok(self)
    }

    /// Pulls one element.
    pub fn try_next(&mut self) -> Result<Option<T>> {
        Ok(self.live_mut()?.next())
    }

    /// Pulls one element, or returns `default` when the pipeline is
    /// exhausted.
    pub fn next_or(&mut self, default: T) -> Result<T> {
        Ok(self.try_next()?.unwrap_or(default))
    }

    /// A pipeline reading through this one.
    ///
    /// Lets a partial consumer such as [`firsts`](Self::firsts) take a few
    /// elements and leave the rest here.
    pub fn borrowed(&mut self) -> Result<Pipeline<'_, T>> {
        let iter = self.live_mut()?;
        Ok(Pipeline::new(iter))
    }

    // ------------------------------------------------------------------------
    // Combining
    // ------------------------------------------------------------------------

    /// Yields this pipeline's elements, then `other`'s.
    pub fn chain<I>(self, other: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        self.transform(|iter| iter.chain(other))
    }

    /// Yields `other`'s elements, then this pipeline's.
    pub fn prepend<I>(self, other: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        self.transform(|iter| other.into_iter().chain(iter))
    }

    /// Yields the elements not found in `other`.
    ///
    /// `other` is read completely into a set right away, so it must be finite.
    pub fn difference<I>(self, other: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Hash + Eq,
    {
        let excluded: HashSet<T> = other.into_iter().collect();
        log::debug!("difference: excluding {} distinct elements", excluded.len());
        self.transform(move |iter| iter.filter(move |item| !excluded.contains(item)))
    }

    /// Like [`difference`](Self::difference), with a lone value standing for
    /// a one-element set.
    pub fn difference_source(self, other: Source<'a, T>) -> Self
    where
        T: Hash + Eq,
    {
        self.difference(other.into_items())
    }

    /// Yields the elements of `other` not found in this pipeline.
    ///
    /// This pipeline is read completely into a set right away.
    pub fn difference_from<I>(self, other: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
        T: Hash + Eq,
    {
        let excluded: HashSet<T> = self.live()?.collect();
        log::debug!("difference: excluding {} distinct elements", excluded.len());
        Ok(Self::new(
            other.into_iter().filter(move |item| !excluded.contains(item)),
        ))
    }

    /// Yields the elements `times` times over.
    ///
    /// The source is read once; the repetitions replay it from a shared
    /// buffer.
    pub fn repeat(self, times: usize) -> Self
    where
        T: Clone,
    {
        self.transform(|iter| memory::tee(iter, times).into_iter().flatten())
    }

    /// Splits the pipeline into `n` independent branches.
    ///
    /// Each branch yields every remaining element. Elements are buffered
    /// until the slowest branch has read them. This pipeline is frozen
    /// afterwards.
    pub fn tee(&mut self, n: usize) -> Result<Vec<Self>>
    where
        T: Clone,
    {
        let iter = self.source.take().ok_or(Error::Forked)?;
        log::trace!("tee: forking pipeline into {n} branches");
        Ok(memory::tee(iter, n).into_iter().map(Self::new).collect())
    }

    /// Returns an independent pipeline at the same position.
    ///
    /// Unlike [`tee`](Self::tee), this pipeline stays readable.
    pub fn copy(&mut self) -> Result<Self>
    where
        T: Clone,
    {
        let iter = self.source.take().ok_or(Error::Forked)?;
        log::trace!("copy: sharing pipeline source between two cursors");

        let original = TeeBranch::new(iter);
        let copy = original.fork();
        *self = Self::new(original);
        Ok(Self::new(copy))
    }

    // ------------------------------------------------------------------------
    // Indexing
    // ------------------------------------------------------------------------

    /// Returns the element at `index`, counting from the end when negative.
    ///
    /// Reads up to and including that position; a negative index reads the
    /// whole pipeline. Fails with [`Error::IndexOutOfRange`] when the
    /// pipeline is too short.
    pub fn at(&mut self, index: isize) -> Result<T> {
        tools::at_index(self.live_mut()?, index)
    }

    /// Like [`at`](Self::at), returning `default` when out of range.
    pub fn at_or(&mut self, index: isize, default: T) -> Result<T> {
        Ok(tools::at_index_or(self.live_mut()?, index, default))
    }

    /// Returns the first element satisfying `predicate`, reading up to and
    /// including it.
    pub fn first_match<P>(&mut self, predicate: P) -> Result<T>
    where
        P: FnMut(&T) -> bool,
    {
        tools::first_true(self.live_mut()?, predicate)
    }

    /// Slices the pipeline with integer or predicate boundaries.
    ///
    /// See [`tools::iterslice`] for the meaning of each combination. The
    /// boundaries are checked before anything is read.
    pub fn slice(self, spec: impl Into<SliceSpec<'a, T>>) -> Result<Self> {
        let spec = spec.into();
        spec.validate()?;
        match self.source {
            Some(iter) => Ok(Self {
                source: Some(tools::iterslice(iter, spec)?),
            }),
            None => Ok(Self::forked()),
        }
    }

    /// Index, predicate or slice lookup in one call.
    pub fn select(mut self, selector: impl Into<Selector<'a, T>>) -> Result<Selection<'a, T>> {
        match selector.into() {
            Selector::Index(index) => self.at(index).map(Selection::Item),
            Selector::First(predicate) => self.first_match(predicate).map(Selection::Item),
            Selector::Slice(spec) => self.slice(spec).map(Selection::Items),
        }
    }

    // ------------------------------------------------------------------------
    // Lazy transforms
    // ------------------------------------------------------------------------

    /// Applies `f` to every element.
    pub fn map<U: 'a, F>(self, f: F) -> Pipeline<'a, U>
    where
        F: FnMut(T) -> U + 'a,
    {
        self.transform(|iter| iter.map(f))
    }

    /// Keeps the elements satisfying `predicate`.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnMut(&T) -> bool + 'a,
    {
        self.transform(|iter| iter.filter(predicate))
    }

    /// Pairs elements with those of `other`, stopping at the shorter.
    pub fn zip<I>(self, other: I) -> Pipeline<'a, (T, I::Item)>
    where
        I: IntoIterator,
        I::IntoIter: 'a,
        I::Item: 'a,
    {
        self.transform(|iter| iter.zip(other))
    }

    /// Groups the n-th elements of this pipeline and every one of `others`.
    pub fn zip_many<I>(self, others: Vec<I>) -> Pipeline<'a, Vec<T>>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        self.transform(|iter| {
            let mut iters: Vec<BoxIter<'a, T>> = Vec::with_capacity(others.len() + 1);
            iters.push(iter);
            iters.extend(others.into_iter().map(|other| Box::new(other.into_iter()) as BoxIter<'a, T>));
            core::iter::from_fn(move || iters.iter_mut().map(Iterator::next).collect())
        })
    }

    /// Pairs each element with its position, counting from `start`.
    pub fn enumerate(self, start: usize) -> Pipeline<'a, (usize, T)> {
        self.transform(|iter| (start..).zip(iter))
    }

    /// Repeats the elements forever.
    ///
    /// The first pass is saved, so a single-pass source works. Never collect
    /// the result: it is infinite unless the pipeline is empty.
    pub fn cycle(self) -> Self
    where
        T: Clone,
    {
        self.transform(IteratorExt::cycle_saved)
    }

    /// Groups elements into `Vec`s of `size`; the last may be shorter.
    pub fn chunks(self, size: usize) -> Result<Pipeline<'a, Vec<T>>> {
        self.chunks_with(size, keep_vec)
    }

    /// Groups elements into chunks of `size` built by `cast`.
    pub fn chunks_with<C, F>(self, size: usize, cast: F) -> Result<Pipeline<'a, C>>
    where
        C: 'a,
        F: FnMut(Vec<T>) -> C + 'a,
    {
        check_size("chunk size", size)?;
        self.source
            .map(|iter| iter.chunks_with(size, cast).map(Pipeline::new))
            .unwrap_or_else(|| Ok(Pipeline::forked()))
    }

    /// Overlapping windows of `size` elements, copied into `Vec`s.
    ///
    /// A source shorter than `size` yields one short window.
    pub fn window(self, size: usize) -> Result<Pipeline<'a, Vec<T>>>
    where
        T: Clone,
    {
        self.window_with(size, window_to_vec)
    }

    /// Overlapping windows of `size` elements, each built by `cast` from the
    /// shared window buffer.
    pub fn window_with<C, F>(self, size: usize, cast: F) -> Result<Pipeline<'a, C>>
    where
        C: 'a,
        F: FnMut(&VecDeque<T>) -> C + 'a,
    {
        check_size("window size", size)?;
        self.source
            .map(|iter| iter.window_with(size, cast).map(Pipeline::new))
            .unwrap_or_else(|| Ok(Pipeline::forked()))
    }

    /// Windows without copies: one buffer, updated in place at every step.
    ///
    /// Each call to [`WindowCursor::next_window`] changes the window returned
    /// by the previous call.
    pub fn window_cursor(self, size: usize) -> Result<WindowCursor<BoxIter<'a, T>>> {
        check_size("window size", size)?;
        self.live()?.window_cursor(size)
    }

    /// Exactly `n` elements from the head, padded with `default`.
    ///
    /// Reads at most `n` elements.
    pub fn firsts(self, n: usize, default: T) -> Self
    where
        T: Clone,
    {
        self.transform(|iter| iter.firsts(n, default))
    }

    /// Exactly `n` elements from the tail, padded in front with `default`.
    ///
    /// The whole pipeline is read on the first pull.
    pub fn lasts(self, n: usize, default: T) -> Self
    where
        T: Clone,
    {
        self.transform(|iter| iter.lasts(n, default))
    }

    /// Drops elements already seen.
    pub fn skip_duplicates(self) -> Self
    where
        T: Clone + Hash + Eq,
    {
        self.transform(IteratorExt::skip_duplicates)
    }

    /// Drops elements whose `key` is already in `fingerprints`.
    ///
    /// Pass a fresh `HashSet::new()`, or `&mut set` to pre-seed the set or
    /// share it with later calls.
    pub fn skip_duplicates_by<F, K, S>(self, key: F, fingerprints: S) -> Self
    where
        F: FnMut(&T) -> K + 'a,
        K: Hash + Eq + 'a,
        S: BorrowMut<HashSet<K>> + 'a,
    {
        self.transform(|iter| iter.skip_duplicates_with(key, fingerprints))
    }

    /// Drops elements whose dynamic fingerprint was already seen.
    ///
    /// The first unhashable fingerprint is reported as
    /// [`Error::Unhashable`] and ends the pipeline.
    pub fn skip_duplicates_checked<F>(self, key: F) -> Pipeline<'a, Result<T>>
    where
        T: Debug,
        F: FnMut(&T) -> Fingerprint + 'a,
    {
        self.transform(|iter| iter.skip_duplicates_checked(key))
    }

    /// Drops elements until `condition` first holds.
    pub fn starts_when(self, condition: impl Into<Condition<'a, T>>) -> Self {
        let condition = condition.into();
        self.transform(|iter| tools::starts_when(iter, condition))
    }

    /// Stops before the first element for which `condition` holds.
    pub fn stops_when(self, condition: impl Into<Condition<'a, T>>) -> Self {
        let condition = condition.into();
        self.transform(|iter| tools::stops_when(iter, condition))
    }

    /// Every `step`-th element, starting with the first.
    pub fn stride(self, step: usize) -> Result<Self> {
        check_size("step", step)?;
        self.source
            .map(|iter| iter.stride(step).map(Self::new))
            .unwrap_or_else(|| Ok(Self::forked()))
    }

    // ------------------------------------------------------------------------
    // Eager operations
    // ------------------------------------------------------------------------

    /// Reads everything and yields it in ascending order.
    pub fn sorted(self) -> Result<Self>
    where
        T: Ord,
    {
        let mut items: Vec<T> = self.live()?.collect();
        items.sort();
        log::debug!("sorted {} elements", items.len());
        Ok(Self::new(items))
    }

    /// Reads everything and yields it ordered by `key`.
    ///
    /// The sort is stable in both directions.
    pub fn sorted_by_key<K, F>(self, mut key: F, options: SortOptions) -> Result<Self>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let mut items: Vec<T> = self.live()?.collect();
        if options.reverse {
            items.sort_by(|a, b| key(b).cmp(&key(a)));
        } else {
            items.sort_by_key(|item| key(item));
        }
        log::debug!("sorted {} elements by key", items.len());
        Ok(Self::new(items))
    }

    /// Groups all elements sharing a key into `Vec`s.
    ///
    /// Elements are sorted by key first, so groups hold every element with
    /// that key, not just adjacent runs.
    pub fn group_by<K, F>(self, key: F, options: GroupOptions) -> Result<Pipeline<'a, (K, Vec<T>)>>
    where
        K: Ord + 'a,
        F: FnMut(&T) -> K,
    {
        self.group_by_with(key, options, keep_vec)
    }

    /// Like [`group_by`](Self::group_by), building each group with `cast`.
    pub fn group_by_with<K, F, C, G>(
        self,
        key: F,
        options: GroupOptions,
        cast: C,
    ) -> Result<Pipeline<'a, (K, G)>>
    where
        K: Ord + 'a,
        F: FnMut(&T) -> K,
        C: FnMut(Vec<T>) -> G,
        G: 'a,
    {
        let groups = tools::groupby(self.live()?, key, options, cast);
        Ok(Pipeline::new(groups))
    }

    /// Folds the elements with `f`, using the first as the initial value.
    pub fn reduce<F>(self, f: F) -> Result<Option<T>>
    where
        F: FnMut(T, T) -> T,
    {
        Ok(self.live()?.reduce(f))
    }

    /// Folds the elements into `init` with `f`.
    pub fn fold<B, F>(self, init: B, f: F) -> Result<B>
    where
        F: FnMut(B, T) -> B,
    {
        Ok(self.live()?.fold(init, f))
    }

    /// Joins the elements' `Display` output with `separator`.
    pub fn join(self, separator: &str) -> Result<String>
    where
        T: Display,
    {
        self.join_with(&JoinOptions::separated(separator), TemplateFormatter)
    }

    /// Joins the elements, turning each into text with `formatter` and
    /// `options.template`.
    pub fn join_with<F>(self, options: &JoinOptions, mut formatter: F) -> Result<String>
    where
        F: ElementFormatter<T>,
    {
        let mut joined = String::new();
        for (position, item) in self.live()?.enumerate() {
            if position > 0 {
                joined.push_str(&options.separator);
            }
            joined.push_str(&formatter.format(&item, &options.template));
        }
        Ok(joined)
    }

    /// Number of remaining elements.
    ///
    /// Answered without reading when the source knows its exact length;
    /// otherwise every element is read.
    pub fn count(self) -> Result<usize> {
        let iter = self.live()?;
        if let Some(len) = iter.exact_size() {
            log::trace!("count: exact length {len} known without reading");
            return Ok(len);
        }
        Ok(iter.count())
    }

    /// Collects the remaining elements.
    pub fn to_vec(self) -> Result<Vec<T>> {
        Ok(self.live()?.collect())
    }

    /// Reads and discards `n` elements, or all of them when `n` is `None`.
    pub fn consume(&mut self, n: Option<usize>) -> Result<()> {
        let iter = self.live_mut()?;
        match n {
            Some(n) => iter.take(n).for_each(drop),
            None => iter.for_each(drop),
        }
        Ok(())
    }

    /// Draws `options.items` distinct elements at random.
    ///
    /// Fails with [`Error::SampleTooLarge`] when there are fewer elements,
    /// unless `options.truncate` is set.
    pub fn sample<R>(self, rng: &mut R, options: SampleOptions) -> Result<Vec<T>>
    where
        R: Rng + ?Sized,
        T: Clone,
    {
        options.validate()?;
        let items = self.to_vec()?;
        if items.len() < options.items && !options.truncate {
            return Err(Error::SampleTooLarge {
                requested: options.items,
                available: items.len(),
            });
        }
        Ok(items.choose_multiple(rng, options.items).cloned().collect())
    }

    /// Picks one element at random, or `default` from an empty pipeline.
    pub fn choose<R>(self, rng: &mut R, default: T) -> Result<T>
    where
        R: Rng + ?Sized,
    {
        let mut items = self.to_vec()?;
        if items.is_empty() {
            return Ok(default);
        }
        let index = rng.random_range(0..items.len());
        Ok(items.swap_remove(index))
    }
}

// ============================================================================
// Iteration
// ============================================================================

impl<T> Iterator for Pipeline<'_, T> {
    type Item = T;

    /// # Panics
    ///
    /// Panics if the pipeline was forked by `tee`. Use
    /// [`try_next`](Pipeline::try_next) to get an [`Error::Forked`] instead.
    fn next(&mut self) -> Option<T> {
        match self.source.as_mut() {
            Some(iter) => iter.next(),
            None => panic!("{}", Error::Forked),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source
            .as_ref()
            .map_or((0, None), |iter| iter.size_hint())
    }
}

impl<T> FusedIterator for Pipeline<'_, T> {}

impl<'a, T: 'a> Default for Pipeline<'a, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, T: 'a> From<Vec<T>> for Pipeline<'a, T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<'a, T: 'a> FromIterator<T> for Pipeline<'a, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> Debug for Pipeline<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("forked", &self.source.is_none())
            .field("size_hint", &self.size_hint())
            .finish()
    }
}

// ============================================================================
// Selection
// ============================================================================

/// What to pick out of a pipeline with [`Pipeline::select`].
pub enum Selector<'a, T> {
    /// The element at an index, from the end when negative.
    Index(isize),
    /// The first element satisfying a predicate.
    First(Predicate<'a, T>),
    /// A lazy slice.
    Slice(SliceSpec<'a, T>),
}

impl<'a, T> Selector<'a, T> {
    /// Selects the first element satisfying `predicate`.
    pub fn first<F>(predicate: F) -> Self
    where
        F: FnMut(&T) -> bool + 'a,
    {
        Self::First(Box::new(predicate))
    }
}

impl<T> Debug for Selector<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => f.debug_tuple("Index").field(index).finish(),
            Self::First(_) => f.write_str("First(<predicate>)"),
            Self::Slice(spec) => f.debug_tuple("Slice").field(spec).finish(),
        }
    }
}

impl<T> From<isize> for Selector<'_, T> {
    fn from(index: isize) -> Self {
        Self::Index(index)
    }
}

impl<T> From<i32> for Selector<'_, T> {
    fn from(index: i32) -> Self {
        Self::Index(index as isize)
    }
}

impl<'a, T> From<SliceSpec<'a, T>> for Selector<'a, T> {
    fn from(spec: SliceSpec<'a, T>) -> Self {
        Self::Slice(spec)
    }
}

impl<T> From<Range<usize>> for Selector<'_, T> {
    fn from(range: Range<usize>) -> Self {
        Self::Slice(range.into())
    }
}

impl<T> From<RangeFrom<usize>> for Selector<'_, T> {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::Slice(range.into())
    }
}

impl<T> From<RangeTo<usize>> for Selector<'_, T> {
    fn from(range: RangeTo<usize>) -> Self {
        Self::Slice(range.into())
    }
}

/// The result of [`Pipeline::select`].
#[derive(Debug)]
pub enum Selection<'a, T> {
    /// A single element, from an index or predicate lookup.
    Item(T),
    /// A lazy slice.
    Items(Pipeline<'a, T>),
}

impl<'a, T> Selection<'a, T> {
    /// The element, if this is a single-element selection.
    pub fn into_item(self) -> Option<T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Items(_) => None,
        }
    }

    /// The slice, if this is a slice selection.
    pub fn into_items(self) -> Option<Pipeline<'a, T>> {
        match self {
            Self::Item(_) => None,
            Self::Items(items) => Some(items),
        }
    }
}
