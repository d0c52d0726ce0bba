//! Bidirectional transforms over existing codecs.

use std::marker::PhantomData;

use crate::{DataOps, DataResult};

use super::{Codec, Decoder, Encoder};

/// A pure bidirectional transform: decode through `to`, encode through
/// `from`.
pub struct Xmap<C, F, G, A> {
    inner: C,
    to: F,
    from: G,
    _marker: PhantomData<fn(A) -> A>,
}

impl<C, F, G, A> Xmap<C, F, G, A> {
    #[inline]
    pub fn new(inner: C, to: F, from: G) -> Self {
        Xmap {
            inner,
            to,
            from,
            _marker: PhantomData,
        }
    }
}

impl<A, B, O, C, F, G> Decoder<B, O> for Xmap<C, F, G, A>
where
    O: DataOps,
    C: Codec<A, O>,
    F: Fn(A) -> B,
    G: Fn(&B) -> A,
{
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<B> {
        self.inner.decode(ops, input).map(|value| (self.to)(value))
    }
}

impl<A, B, O, C, F, G> Encoder<B, O> for Xmap<C, F, G, A>
where
    O: DataOps,
    C: Codec<A, O>,
    F: Fn(A) -> B,
    G: Fn(&B) -> A,
{
    fn encode(&self, ops: &O, input: &B, prefix: O::Value) -> DataResult<O::Value> {
        let value = (self.from)(input);
        self.inner.encode(ops, &value, prefix)
    }
}

/// A fallible bidirectional transform. Failures raised by `to` or `from`
/// propagate unchanged.
pub struct FlatXmap<C, F, G, A> {
    inner: C,
    to: F,
    from: G,
    _marker: PhantomData<fn(A) -> A>,
}

impl<C, F, G, A> FlatXmap<C, F, G, A> {
    #[inline]
    pub fn new(inner: C, to: F, from: G) -> Self {
        FlatXmap {
            inner,
            to,
            from,
            _marker: PhantomData,
        }
    }
}

impl<A, B, O, C, F, G> Decoder<B, O> for FlatXmap<C, F, G, A>
where
    O: DataOps,
    C: Codec<A, O>,
    F: Fn(A) -> DataResult<B>,
    G: Fn(&B) -> DataResult<A>,
{
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<B> {
        self.inner
            .decode(ops, input)
            .and_then(|value| (self.to)(value))
    }
}

impl<A, B, O, C, F, G> Encoder<B, O> for FlatXmap<C, F, G, A>
where
    O: DataOps,
    C: Codec<A, O>,
    F: Fn(A) -> DataResult<B>,
    G: Fn(&B) -> DataResult<A>,
{
    fn encode(&self, ops: &O, input: &B, prefix: O::Value) -> DataResult<O::Value> {
        (self.from)(input).and_then(|value| self.inner.encode(ops, &value, prefix))
    }
}
