//! Free-standing iterator tools.
//!
//! These functions work on any `IntoIterator` and keep no state between
//! calls. [`Pipeline`](crate::core::pipeline::Pipeline) is built on them, but
//! they are just as usable on their own.

use core::cmp::Ordering;
use core::hash::Hash;
use std::collections::HashSet;

use crate::core::config::GroupOptions;
use crate::core::traits::Validate;
use crate::foundation::error::{Error, ErrorContext, Result};
use crate::foundation::iterator::{
    Chunks, Firsts, IteratorExt, Lasts, SkipDuplicates, SlidingWindow, StartsWhen, StopsWhen,
    VecCast, WindowVecCast,
};
use crate::foundation::memory::RingBuffer;
use crate::foundation::types::{BoxIter, Bound, Condition, Predicate, SliceSpec};

// ============================================================================
// Predicate boundaries
// ============================================================================

/// Drops items until `condition` first holds, then yields the rest.
///
/// `condition` is a predicate or, through [`Condition::equals`], a value to
/// compare against.
pub fn starts_when<'a, I>(
    iterable: I,
    condition: impl Into<Condition<'a, I::Item>>,
) -> StartsWhen<I::IntoIter, Predicate<'a, I::Item>>
where
    I: IntoIterator,
{
    StartsWhen::new(iterable.into_iter(), condition.into().into_predicate())
}

/// Yields items until `condition` first holds.
pub fn stops_when<'a, I>(
    iterable: I,
    condition: impl Into<Condition<'a, I::Item>>,
) -> StopsWhen<I::IntoIter, Predicate<'a, I::Item>>
where
    I: IntoIterator,
{
    StopsWhen::new(iterable.into_iter(), condition.into().into_predicate())
}

// ============================================================================
// Slicing
// ============================================================================

impl<T> Validate for SliceSpec<'_, T> {
    fn validate(&self) -> Result<()> {
        if self.step <= 0 {
            log::debug!("rejected slice step {}", self.step);
            return Err(Error::invalid_boundary(self.step, "step must be a positive integer"));
        }
        for bound in [&self.start, &self.stop] {
            if let Bound::Index(index) = bound {
                if *index < 0 {
                    log::debug!("rejected slice boundary {index}");
                    return Err(Error::invalid_boundary(
                        index,
                        "a lazy sequence can't be sliced from its end",
                    ));
                }
            }
        }
        Ok(())
    }
}

fn offset(index: isize) -> usize {
    usize::try_from(index).unwrap_or_default()
}

fn strided<'a, I>(iter: I, step: usize) -> Result<BoxIter<'a, I::Item>>
where
    I: Iterator + 'a,
{
    if step == 1 {
        Ok(Box::new(iter))
    } else {
        Ok(Box::new(iter.stride(step)?))
    }
}

/// Slices an iterable with integer or predicate boundaries.
///
/// The slice bounds are validated before anything is read:
/// [`Error::InvalidBoundary`] is returned for a step below 1 or a negative
/// integer boundary. Otherwise the result is lazy. Depending on the kind of
/// each boundary:
///
/// - `Index(start)` skips `start` items, `When(p)` drops items until `p`
///   first holds (that item is kept).
/// - `Index(stop)` stops at absolute position `stop` after an integer start,
///   or after `stop` items counted from the first match of a predicate start.
///   `When(q)` stops before the first item for which `q` holds.
///
/// The step thins the stream before predicates are tested, so a predicate
/// only sees every `step`-th item. With predicates on both ends the step is
/// applied to the bounded result instead.
///
/// ```
/// use ww_core::core::tools::iterslice;
/// use ww_core::foundation::types::SliceSpec;
///
/// let squares = (0..10).map(|x| x * x);
/// let spec = SliceSpec::new().start_when(|x: &i32| x % 10 == 5).stop(2);
/// let sliced: Vec<_> = iterslice(squares, spec).unwrap().collect();
/// assert_eq!(sliced, vec![25, 36]);
/// ```
pub fn iterslice<'a, I>(iterable: I, spec: SliceSpec<'a, I::Item>) -> Result<BoxIter<'a, I::Item>>
where
    I: IntoIterator,
    I::IntoIter: 'a,
    I::Item: 'a,
{
    spec.validate()?;
    let step = spec.step.unsigned_abs();
    let iter = iterable.into_iter();

    match (spec.start, spec.stop) {
        (Bound::When(start), Bound::When(stop)) => {
            strided(iter.starts_when(start).stops_when(stop), step)
        }
        (Bound::When(start), Bound::Index(stop)) => {
            let started = strided(iter, step)?.starts_when(start);
            Ok(Box::new(started.take(offset(stop))))
        }
        (Bound::When(start), Bound::Unbounded) => {
            Ok(Box::new(strided(iter, step)?.starts_when(start)))
        }
        (start, stop) => {
            let skip = match start {
                Bound::Index(start) => offset(start),
                _ => 0,
            };
            let skipped = iter.skip(skip);
            match stop {
                Bound::Unbounded => strided(skipped, step),
                Bound::Index(stop) => {
                    strided(skipped.take(offset(stop).saturating_sub(skip)), step)
                }
                Bound::When(stop) => Ok(Box::new(strided(skipped, step)?.stops_when(stop))),
            }
        }
    }
}

// ============================================================================
// Lookups
// ============================================================================

/// Returns the item at `index`, counting from the end when negative.
///
/// A non-negative index reads the iterable up to and including that
/// position. A negative one reads it to the end, keeping only the last
/// `|index|` items. [`Error::IndexOutOfRange`] is returned when there are too
/// few items.
pub fn at_index<I>(iterable: I, index: isize) -> Result<I::Item>
where
    I: IntoIterator,
{
    let mut iter = iterable.into_iter();
    if index >= 0 {
        return iter.nth(offset(index)).or_out_of_range(index);
    }

    let capacity = index.unsigned_abs();
    let mut tail = RingBuffer::from_tail(iter, capacity);
    if tail.len() < capacity {
        return Err(Error::IndexOutOfRange { index });
    }
    tail.pop().or_out_of_range(index)
}

/// Like [`at_index`], returning `default` when the index is out of range.
pub fn at_index_or<I>(iterable: I, index: isize, default: I::Item) -> I::Item
where
    I: IntoIterator,
{
    at_index(iterable, index).unwrap_or(default)
}

/// Returns the first item satisfying `predicate`.
///
/// Fails with [`Error::NoMatch`] naming the predicate's type when no item
/// does.
pub fn first_true<I, P>(iterable: I, predicate: P) -> Result<I::Item>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    iterable.into_iter().find(predicate).or_no_match::<P>()
}

// ============================================================================
// Streaming tools
// ============================================================================

/// Yields each item the first time it is seen.
pub fn skip_duplicates<I>(iterable: I) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    I::Item: Clone + Hash + Eq,
{
    iterable.into_iter().skip_duplicates()
}

/// Yields each item the first time its `key` is seen, recording keys in
/// `fingerprints`.
///
/// Pass `&mut set` to pre-seed the set or to share it between calls.
pub fn skip_duplicates_by<I, F, K, S>(
    iterable: I,
    key: F,
    fingerprints: S,
) -> SkipDuplicates<I::IntoIter, F, K, S>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> K,
    K: Hash + Eq,
    S: core::borrow::BorrowMut<HashSet<K>>,
{
    SkipDuplicates::new(iterable.into_iter(), key, fingerprints)
}

/// Splits an iterable into `Vec`s of `size` items; the last may be shorter.
pub fn chunks<I>(iterable: I, size: usize) -> Result<Chunks<I::IntoIter, VecCast<I::Item>>>
where
    I: IntoIterator,
{
    iterable.into_iter().chunks(size)
}

/// Yields overlapping windows of `size` items.
pub fn window<I>(
    iterable: I,
    size: usize,
) -> Result<SlidingWindow<I::IntoIter, WindowVecCast<I::Item>>>
where
    I: IntoIterator,
    I::Item: Clone,
{
    iterable.into_iter().window(size)
}

/// Yields exactly `n` items from the head, padded with `default`.
pub fn firsts<I>(iterable: I, n: usize, default: I::Item) -> Firsts<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Clone,
{
    Firsts::new(iterable.into_iter(), n, default)
}

/// Yields exactly `n` items from the tail, padded in front with `default`.
pub fn lasts<I>(iterable: I, n: usize, default: I::Item) -> Lasts<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Clone,
{
    Lasts::new(iterable.into_iter(), n, default)
}

// ============================================================================
// Grouping
// ============================================================================

/// Groups all items sharing a key.
///
/// Unlike a streaming group-by, the whole iterable is first sorted (stably)
/// by key, so every item with a given key lands in the same group no matter
/// where it appeared. Groups come out in key order, descending when
/// `options.reverse` is set, and each is built with `cast`.
pub fn groupby<I, F, K, C, G>(
    iterable: I,
    mut key: F,
    options: GroupOptions,
    mut cast: C,
) -> std::vec::IntoIter<(K, G)>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> K,
    K: Ord,
    C: FnMut(Vec<I::Item>) -> G,
{
    let mut keyed: Vec<(K, I::Item)> = iterable
        .into_iter()
        .map(|item| (key(&item), item))
        .collect();

    let order = |a: &(K, I::Item), b: &(K, I::Item)| -> Ordering {
        if options.reverse {
            b.0.cmp(&a.0)
        } else {
            a.0.cmp(&b.0)
        }
    };
    keyed.sort_by(order);
    log::debug!("groupby sorted {} items", keyed.len());

    let mut groups = Vec::new();
    let mut current: Option<(K, Vec<I::Item>)> = None;
    for (item_key, item) in keyed {
        match current.as_mut() {
            Some((group_key, members)) if *group_key == item_key => members.push(item),
            _ => {
                if let Some((group_key, members)) = current.take() {
                    groups.push((group_key, cast(members)));
                }
                current = Some((item_key, vec![item]));
            }
        }
    }
    if let Some((group_key, members)) = current {
        groups.push((group_key, cast(members)));
    }

    groups.into_iter()
}
