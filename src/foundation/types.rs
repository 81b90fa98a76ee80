//! Core type definitions for ww-core.
//!
//! The vocabulary shared by the adapters and the pipeline: slice boundaries,
//! start/stop conditions, tagged pipeline sources and dynamic fingerprints.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::foundation::error::{Error, Result};

/// A boxed one-argument test over borrowed items.
pub type Predicate<'a, T> = Box<dyn FnMut(&T) -> bool + 'a>;

/// A boxed, type-erased iterator.
pub type BoxIter<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

// ============================================================================
// Slice boundaries
// ============================================================================

/// One end of a slice: absent, an integer offset or a predicate.
///
/// Predicates are resolved against the stream at read time, never when the
/// slice is built.
pub enum Bound<'a, T> {
    /// No boundary on this side.
    Unbounded,
    /// An integer offset. Negative offsets are rejected when the slice is
    /// validated.
    Index(isize),
    /// The first element for which the predicate returns `true`.
    When(Predicate<'a, T>),
}

impl<'a, T> Bound<'a, T> {
    /// Creates a predicate boundary.
    pub fn when<F>(predicate: F) -> Self
    where
        F: FnMut(&T) -> bool + 'a,
    {
        Self::When(Box::new(predicate))
    }
}

impl<T> fmt::Debug for Bound<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("Unbounded"),
            Self::Index(index) => f.debug_tuple("Index").field(index).finish(),
            Self::When(_) => f.write_str("When(<predicate>)"),
        }
    }
}

impl<T> Default for Bound<'_, T> {
    fn default() -> Self {
        Self::Unbounded
    }
}

impl<T> From<isize> for Bound<'_, T> {
    fn from(index: isize) -> Self {
        Self::Index(index)
    }
}

impl<T> From<i32> for Bound<'_, T> {
    fn from(index: i32) -> Self {
        Self::Index(index as isize)
    }
}

impl<T> From<usize> for Bound<'_, T> {
    fn from(index: usize) -> Self {
        Self::Index(isize::try_from(index).unwrap_or(isize::MAX))
    }
}

impl<T> From<Option<isize>> for Bound<'_, T> {
    fn from(index: Option<isize>) -> Self {
        index.map_or(Self::Unbounded, Self::Index)
    }
}

/// A `[start:stop:step]` slice whose ends may be offsets or predicates.
///
/// The step defaults to 1; a step below 1 is rejected when the slice is
/// validated.
pub struct SliceSpec<'a, T> {
    /// Where the slice starts.
    pub start: Bound<'a, T>,
    /// Where the slice stops (exclusive).
    pub stop: Bound<'a, T>,
    /// Distance between yielded elements.
    pub step: isize,
}

impl<'a, T> SliceSpec<'a, T> {
    /// Creates a slice over the whole sequence (`[::]`).
    pub const fn new() -> Self {
        Self {
            start: Bound::Unbounded,
            stop: Bound::Unbounded,
            step: 1,
        }
    }

    /// Creates a `[start:stop]` slice.
    pub fn between(start: impl Into<Bound<'a, T>>, stop: impl Into<Bound<'a, T>>) -> Self {
        Self::new().start(start).stop(stop)
    }

    /// Sets the start boundary.
    #[must_use]
    pub fn start(mut self, start: impl Into<Bound<'a, T>>) -> Self {
        self.start = start.into();
        self
    }

    /// Sets the stop boundary.
    #[must_use]
    pub fn stop(mut self, stop: impl Into<Bound<'a, T>>) -> Self {
        self.stop = stop.into();
        self
    }

    /// Starts at the first element satisfying `predicate`.
    #[must_use]
    pub fn start_when<F>(self, predicate: F) -> Self
    where
        F: FnMut(&T) -> bool + 'a,
    {
        self.start(Bound::when(predicate))
    }

    /// Stops before the first element satisfying `predicate`.
    #[must_use]
    pub fn stop_when<F>(self, predicate: F) -> Self
    where
        F: FnMut(&T) -> bool + 'a,
    {
        self.stop(Bound::when(predicate))
    }

    /// Sets the step.
    #[must_use]
    pub fn step(mut self, step: isize) -> Self {
        self.step = step;
        self
    }
}

impl<T> fmt::Debug for SliceSpec<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceSpec")
            .field("start", &self.start)
            .field("stop", &self.stop)
            .field("step", &self.step)
            .finish()
    }
}

impl<T> Default for SliceSpec<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Range<usize>> for SliceSpec<'_, T> {
    fn from(range: Range<usize>) -> Self {
        Self::between(range.start, range.end)
    }
}

impl<T> From<RangeFrom<usize>> for SliceSpec<'_, T> {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::new().start(range.start)
    }
}

impl<T> From<RangeTo<usize>> for SliceSpec<'_, T> {
    fn from(range: RangeTo<usize>) -> Self {
        Self::new().stop(range.end)
    }
}

impl<T> From<RangeFull> for SliceSpec<'_, T> {
    fn from(_: RangeFull) -> Self {
        Self::new()
    }
}

// ============================================================================
// Conditions
// ============================================================================

/// A start/stop condition: either a predicate or equality with a value.
pub struct Condition<'a, T> {
    test: Predicate<'a, T>,
}

impl<'a, T> Condition<'a, T> {
    /// Matches items for which `predicate` returns `true`.
    pub fn when<F>(predicate: F) -> Self
    where
        F: FnMut(&T) -> bool + 'a,
    {
        Self {
            test: Box::new(predicate),
        }
    }

    /// Matches items equal to `value`.
    pub fn equals(value: T) -> Self
    where
        T: PartialEq + 'a,
    {
        Self::when(move |item| *item == value)
    }

    /// Tests one item.
    #[inline]
    pub fn test(&mut self, item: &T) -> bool {
        (self.test)(item)
    }

    /// Unwraps the underlying predicate.
    pub fn into_predicate(self) -> Predicate<'a, T> {
        self.test
    }
}

impl<'a, T, F> From<F> for Condition<'a, T>
where
    F: FnMut(&T) -> bool + 'a,
{
    fn from(predicate: F) -> Self {
        Self::when(predicate)
    }
}

impl<T> fmt::Debug for Condition<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Condition(<predicate>)")
    }
}

// ============================================================================
// Sources
// ============================================================================

/// A value handed to the pipeline at its boundary.
///
/// Replaces "is this thing iterable?" probing with an explicit tag, checked
/// once where the value enters the crate.
pub enum Source<'a, T> {
    /// A sequence of items.
    Sequence(BoxIter<'a, T>),
    /// A lone value that is not a sequence.
    Scalar(T),
}

impl<'a, T> Source<'a, T> {
    /// Tags an iterable as a sequence.
    pub fn sequence<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self::Sequence(Box::new(iterable.into_iter()))
    }

    /// Tags a lone value.
    pub const fn scalar(value: T) -> Self {
        Self::Scalar(value)
    }

    /// Returns the sequence, or [`Error::NotIterable`] naming `position`.
    pub fn require_sequence(self, position: usize) -> Result<BoxIter<'a, T>>
    where
        T: fmt::Debug,
    {
        match self {
            Self::Sequence(iter) => Ok(iter),
            Self::Scalar(value) => Err(Error::NotIterable {
                position,
                type_name: core::any::type_name::<T>(),
                value: format!("{value:?}"),
            }),
        }
    }

    /// Returns the items, promoting a scalar to a one-element sequence.
    pub fn into_items(self) -> BoxIter<'a, T>
    where
        T: 'a,
    {
        match self {
            Self::Sequence(iter) => iter,
            Self::Scalar(value) => Box::new(core::iter::once(value)),
        }
    }
}

impl<'a, T: 'a> From<Vec<T>> for Source<'a, T> {
    fn from(items: Vec<T>) -> Self {
        Self::sequence(items)
    }
}

impl<T> fmt::Debug for Source<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence(_) => f.write_str("Source::Sequence(..)"),
            Self::Scalar(_) => f.write_str("Source::Scalar(..)"),
        }
    }
}

// ============================================================================
// Fingerprints
// ============================================================================

/// A dynamically typed deduplication key.
///
/// Use it when the key of an element is only known at run time. Like the
/// values it models, some variants cannot be hashed: lists, sets and maps,
/// and any tuple containing one of them.
#[derive(Debug, Clone)]
pub enum Fingerprint {
    /// The empty value.
    Unit,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A float, compared by bit pattern (with `-0.0 == 0.0`).
    Float(f64),
    /// A piece of text.
    Text(String),
    /// An immutable sequence, hashable when all its parts are.
    Tuple(Vec<Fingerprint>),
    /// A mutable sequence. Never hashable.
    List(Vec<Fingerprint>),
    /// A mutable set. Never hashable.
    Set(Vec<Fingerprint>),
    /// A mutable mapping. Never hashable.
    Map(Vec<(Fingerprint, Fingerprint)>),
}

impl Fingerprint {
    /// Short name of the variant, used in diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Tuple(_) => "tuple",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
        }
    }

    /// Finds the component that makes this fingerprint unhashable, if any.
    pub fn unhashable_part(&self) -> Option<&Self> {
        match self {
            Self::List(_) | Self::Set(_) | Self::Map(_) => Some(self),
            Self::Tuple(parts) => parts.iter().find_map(Self::unhashable_part),
            _ => None,
        }
    }

    /// Returns `true` if the fingerprint can be stored in a fingerprint set.
    pub fn is_hashable(&self) -> bool {
        self.unhashable_part().is_none()
    }

    fn float_bits(value: f64) -> u64 {
        if value == 0.0 {
            0.0f64.to_bits()
        } else {
            value.to_bits()
        }
    }
}

impl PartialEq for Fingerprint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unit, Self::Unit) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => Self::float_bits(*a) == Self::float_bits(*b),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Tuple(a), Self::Tuple(b))
            | (Self::List(a), Self::List(b))
            | (Self::Set(a), Self::Set(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Fingerprint {}

impl Hash for Fingerprint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Unit => {}
            Self::Bool(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::Float(v) => Self::float_bits(*v).hash(state),
            Self::Text(v) => v.hash(state),
            Self::Tuple(parts) | Self::List(parts) | Self::Set(parts) => parts.hash(state),
            Self::Map(pairs) => pairs.hash(state),
        }
    }
}

impl From<()> for Fingerprint {
    fn from((): ()) -> Self {
        Self::Unit
    }
}

impl From<bool> for Fingerprint {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Fingerprint {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Fingerprint {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Fingerprint {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<char> for Fingerprint {
    fn from(v: char) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<&str> for Fingerprint {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Fingerprint {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<A, B> From<(A, B)> for Fingerprint
where
    A: Into<Fingerprint>,
    B: Into<Fingerprint>,
{
    fn from((a, b): (A, B)) -> Self {
        Self::Tuple(vec![a.into(), b.into()])
    }
}

impl<T: Into<Fingerprint>> From<Vec<T>> for Fingerprint {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}
