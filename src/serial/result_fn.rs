//! The generic success/error interception point.
//!
//! [`MapResult`] wraps a codec with a [`ResultFunction`] hook. Every
//! default-substitution combinator ([`or_else`](super::codecs::or_else),
//! [`or_else_get`](super::codecs::or_else_get)) is built on it.

use tracing::debug;

use crate::{DataOps, DataResult};

use super::{Decoder, Encoder};

/// Intercepts the outcome of a decode and the outcome of an encode.
///
/// On decode the hook may substitute a recovered value for a failure. On
/// encode the hook is invoked with the produced tree for side effects; the
/// default implementation passes it through untouched.
pub trait ResultFunction<A, O: DataOps> {
    /// Intercepts a decode outcome.
    fn apply(&self, ops: &O, input: &O::Value, result: DataResult<A>) -> DataResult<A>;

    /// Intercepts an encode outcome. Must not alter a successful tree.
    fn co_apply(&self, _ops: &O, _input: &A, result: DataResult<O::Value>) -> DataResult<O::Value> {
        result
    }
}

/// A codec whose outcomes pass through a [`ResultFunction`].
#[derive(Debug, Clone)]
pub struct MapResult<C, F> {
    inner: C,
    function: F,
}

impl<C, F> MapResult<C, F> {
    #[inline]
    pub fn new(inner: C, function: F) -> Self {
        MapResult { inner, function }
    }
}

impl<A, O, C, F> Decoder<A, O> for MapResult<C, F>
where
    O: DataOps,
    C: Decoder<A, O>,
    F: ResultFunction<A, O>,
{
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<A> {
        let result = self.inner.decode(ops, input);
        self.function.apply(ops, input, result)
    }
}

impl<A, O, C, F> Encoder<A, O> for MapResult<C, F>
where
    O: DataOps,
    C: Encoder<A, O>,
    F: ResultFunction<A, O>,
{
    fn encode(&self, ops: &O, input: &A, prefix: O::Value) -> DataResult<O::Value> {
        let result = self.inner.encode(ops, input, prefix);
        self.function.co_apply(ops, input, result)
    }
}

/// Substitutes a fixed fallback for any decode failure.
#[derive(Debug, Clone)]
pub struct OrElse<A> {
    fallback: A,
}

impl<A> OrElse<A> {
    #[inline]
    pub fn new(fallback: A) -> Self {
        OrElse { fallback }
    }
}

impl<A: Clone, O: DataOps> ResultFunction<A, O> for OrElse<A> {
    fn apply(&self, _ops: &O, _input: &O::Value, result: DataResult<A>) -> DataResult<A> {
        match result {
            success @ DataResult::Success { .. } => success,
            DataResult::Error {
                error, lifecycle, ..
            } => {
                debug!(%error, "substituting fallback for failed decode");
                DataResult::success_with(self.fallback.clone(), lifecycle)
            }
        }
    }
}

/// Substitutes a supplied fallback for any decode failure.
#[derive(Debug, Clone)]
pub struct OrElseGet<F> {
    supplier: F,
}

impl<F> OrElseGet<F> {
    #[inline]
    pub fn new(supplier: F) -> Self {
        OrElseGet { supplier }
    }
}

impl<A, O: DataOps, F: Fn() -> A> ResultFunction<A, O> for OrElseGet<F> {
    fn apply(&self, _ops: &O, _input: &O::Value, result: DataResult<A>) -> DataResult<A> {
        match result {
            success @ DataResult::Success { .. } => success,
            DataResult::Error {
                error, lifecycle, ..
            } => {
                debug!(%error, "substituting supplied fallback for failed decode");
                DataResult::success_with((self.supplier)(), lifecycle)
            }
        }
    }
}
