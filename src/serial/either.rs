//! The two-branch fallback codec.

use crate::{DataOps, DataResult};

use super::{Codec, Decoder, Encoder};

/// A value occupying one of two branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    #[inline]
    pub fn left(self) -> Option<L> {
        match self {
            Either::Left(value) => Some(value),
            Either::Right(_) => None,
        }
    }

    #[inline]
    pub fn right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(value) => Some(value),
        }
    }
}

/// Tries the left codec unconditionally first on decode; any failure falls
/// back to the right codec. Encoding dispatches on the branch the value
/// occupies.
#[derive(Debug, Clone)]
pub struct EitherCodec<L, R> {
    left: L,
    right: R,
}

impl<L, R> EitherCodec<L, R> {
    #[inline]
    pub fn new(left: L, right: R) -> Self {
        EitherCodec { left, right }
    }
}

impl<A, B, O, L, R> Decoder<Either<A, B>, O> for EitherCodec<L, R>
where
    O: DataOps,
    L: Codec<A, O>,
    R: Codec<B, O>,
{
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<Either<A, B>> {
        match self.left.decode(ops, input) {
            DataResult::Success { value, lifecycle } => {
                DataResult::success_with(Either::Left(value), lifecycle)
            }
            DataResult::Error { .. } => self.right.decode(ops, input).map(Either::Right),
        }
    }
}

impl<A, B, O, L, R> Encoder<Either<A, B>, O> for EitherCodec<L, R>
where
    O: DataOps,
    L: Codec<A, O>,
    R: Codec<B, O>,
{
    fn encode(&self, ops: &O, input: &Either<A, B>, prefix: O::Value) -> DataResult<O::Value> {
        match input {
            Either::Left(value) => self.left.encode(ops, value, prefix),
            Either::Right(value) => self.right.encode(ops, value, prefix),
        }
    }
}
