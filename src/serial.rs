//! The format-generic serialization algebra.
//!
//! Two families of transformers live here:
//!
//! - **value codecs** ([`Encoder`] / [`Decoder`] / [`Codec`]) turn a value
//!   into one tree node and back. Encoding merges onto a caller-supplied
//!   prefix node so compound encoders can thread one accumulator through
//!   many writers.
//! - **field codecs** ([`MapEncoder`] / [`MapDecoder`] / [`MapCodec`]) read
//!   from a shared keyed [`MapView`](crate::MapView) and write through a
//!   shared [`MapBuilder`](crate::MapBuilder). They compose into whole-record
//!   codecs without per-field boilerplate (see [`bound`] and [`RecordCodec`]).
//!
//! Codec values are stateless and freely shareable; a codec instance never
//! mutates shared state and is safe to invoke concurrently.
//!
//! Primitive codecs and free-function combinators live in [`codecs`].
//!
//! # Example
//!
//! ```
//! use na_codec::{Decoder, Encoder, OwnedOps};
//! use na_codec::serial::codecs;
//!
//! let codec = codecs::list(codecs::INT);
//! let ops = OwnedOps;
//! let encoded = codec.encode_start(&ops, &vec![1, 2, 3]).result().unwrap();
//! let decoded = codec.decode(&ops, &encoded).result().unwrap();
//! assert_eq!(decoded, vec![1, 2, 3]);
//! ```

pub mod codecs;
mod dispatch;
mod either;
mod field;
mod list;
mod map;
mod record;
mod result_fn;
mod xmap;

pub use dispatch::{DispatchCodec, DispatchTarget};
pub use either::{Either, EitherCodec};
pub use field::{DefaultField, FieldCodec, OptionalFieldCodec};
pub use list::ListCodec;
pub use map::UnboundedMapCodec;
pub use record::{BoundField, FieldSet, PairFields, PointField, RecordCodec, bound, point};
pub use result_fn::{MapResult, OrElse, OrElseGet, ResultFunction};
pub use xmap::{FlatXmap, Xmap};

use crate::{DataOps, DataResult, MapBuilder, MapView};

/// Turns a value of type `A` into one tree node of format `O`.
pub trait Encoder<A, O: DataOps> {
    /// Encodes `input`, merging the produced node onto `prefix`.
    fn encode(&self, ops: &O, input: &A, prefix: O::Value) -> DataResult<O::Value>;

    /// Encodes `input` starting from the empty value.
    fn encode_start(&self, ops: &O, input: &A) -> DataResult<O::Value> {
        self.encode(ops, input, ops.empty())
    }
}

/// Turns one tree node of format `O` into a value of type `A`.
pub trait Decoder<A, O: DataOps> {
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<A>;
}

/// A paired encoder and decoder for one value type.
///
/// Implemented automatically for anything that both encodes and decodes.
pub trait Codec<A, O: DataOps>: Encoder<A, O> + Decoder<A, O> {}

impl<T, A, O: DataOps> Codec<A, O> for T where T: Encoder<A, O> + Decoder<A, O> {}

/// Writes a value as keyed entries through a shared [`MapBuilder`].
pub trait MapEncoder<A, O: DataOps> {
    fn encode_entries(&self, ops: &O, input: &A, builder: MapBuilder<O>) -> MapBuilder<O>;
}

/// Reads a value out of a shared keyed [`MapView`].
pub trait MapDecoder<A, O: DataOps> {
    fn decode_entries(&self, ops: &O, view: &MapView<O>) -> DataResult<A>;
}

/// A paired field encoder and decoder.
///
/// Implemented automatically for anything that both encodes and decodes
/// entries. Object safe, so heterogeneous field codecs can be boxed.
pub trait MapCodec<A, O: DataOps>: MapEncoder<A, O> + MapDecoder<A, O> {}

impl<T, A, O: DataOps> MapCodec<A, O> for T where T: MapEncoder<A, O> + MapDecoder<A, O> {}

/// Adapts a [`MapCodec`] into a whole-value [`Codec`].
///
/// Decoding reads the input through the format's keyed view; encoding
/// threads a fresh record builder and finalizes it onto the prefix.
#[derive(Debug, Clone)]
pub struct MapAsCodec<M> {
    inner: M,
}

impl<M> MapAsCodec<M> {
    #[inline]
    pub fn new(inner: M) -> Self {
        MapAsCodec { inner }
    }
}

impl<S, O: DataOps, M: MapDecoder<S, O>> Decoder<S, O> for MapAsCodec<M> {
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<S> {
        ops.get_map(input)
            .and_then(|view| self.inner.decode_entries(ops, &view))
    }
}

impl<S, O: DataOps, M: MapEncoder<S, O>> Encoder<S, O> for MapAsCodec<M> {
    fn encode(&self, ops: &O, input: &S, prefix: O::Value) -> DataResult<O::Value> {
        self.inner
            .encode_entries(ops, input, ops.map_builder())
            .build(prefix)
    }
}
