//! Operator sugar for [`Pipeline`].
//!
//! | Expression | Meaning |
//! |------------|---------|
//! | `p + other` | [`Pipeline::chain`] |
//! | `vec + p` | [`Pipeline::prepend`] |
//! | `p - other` | [`Pipeline::difference`] |
//! | `vec - p` | [`Pipeline::difference_from`] |
//! | `p * n`, `n * p` | [`Pipeline::repeat`] |
//!
//! `vec - p` reads `p` into a set right away. If `p` was forked the result
//! is forked too, so the error surfaces on its first read.

use core::hash::Hash;
use core::ops::{Add, Mul, Sub};

use crate::core::pipeline::Pipeline;

impl<'a, T, I> Add<I> for Pipeline<'a, T>
where
    T: 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
{
    type Output = Self;

    fn add(self, other: I) -> Self {
        self.chain(other)
    }
}

impl<'a, T: 'a> Add<Pipeline<'a, T>> for Vec<T> {
    type Output = Pipeline<'a, T>;

    fn add(self, pipeline: Pipeline<'a, T>) -> Pipeline<'a, T> {
        pipeline.prepend(self)
    }
}

impl<'a, T, I> Sub<I> for Pipeline<'a, T>
where
    T: Hash + Eq + 'a,
    I: IntoIterator<Item = T>,
{
    type Output = Self;

    fn sub(self, other: I) -> Self {
        self.difference(other)
    }
}

impl<'a, T> Sub<Pipeline<'a, T>> for Vec<T>
where
    T: Hash + Eq + 'a,
{
    type Output = Pipeline<'a, T>;

    fn sub(self, pipeline: Pipeline<'a, T>) -> Pipeline<'a, T> {
        pipeline.difference_from(self).unwrap_or_else(|error| {
            log::debug!("vec - pipeline: {error}");
            Pipeline::forked()
        })
    }
}

impl<'a, T: Clone + 'a> Mul<usize> for Pipeline<'a, T> {
    type Output = Self;

    fn mul(self, times: usize) -> Self {
        self.repeat(times)
    }
}

impl<'a, T: Clone + 'a> Mul<Pipeline<'a, T>> for usize {
    type Output = Pipeline<'a, T>;

    fn mul(self, pipeline: Pipeline<'a, T>) -> Pipeline<'a, T> {
        pipeline.repeat(self)
    }
}
