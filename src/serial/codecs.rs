//! Primitive codecs and the free-function combinator constructors.
//!
//! Primitives are zero-sized values usable with any format, exposed as
//! constants: [`BOOL`], [`BYTE`], [`SHORT`], [`INT`], [`LONG`], [`FLOAT`],
//! [`DOUBLE`], [`STRING`], [`BYTE_BUFFER`], [`INT_ARRAY`], [`LONG_ARRAY`].
//! A primitive decode is one accessor call; a primitive encode is one
//! constructor call merged onto the prefix, which must be empty (primitives
//! are leaves, not field carriers).
//!
//! # Example
//!
//! ```
//! use na_codec::{Decoder, Encoder, OwnedOps, OwnedValue};
//! use na_codec::serial::codecs;
//!
//! let ops = OwnedOps;
//! let person = codecs::compound(
//!     codecs::bound(codecs::field("name", codecs::STRING), |p: &(String, i32)| p.0.clone())
//!         .and(codecs::bound(
//!             codecs::field("age", codecs::ranged(codecs::INT, 0, 150)),
//!             |p: &(String, i32)| p.1,
//!         ))
//!         .build(|(name, age): (String, i32)| (name, age)),
//! );
//! let encoded = person
//!     .encode_start(&ops, &("Ada".to_string(), 36))
//!     .result()
//!     .unwrap();
//! assert_eq!(
//!     encoded,
//!     OwnedValue::Map(vec![
//!         (OwnedValue::from("name"), OwnedValue::from("Ada")),
//!         (OwnedValue::from("age"), OwnedValue::Int(36)),
//!     ])
//! );
//! assert_eq!(
//!     person.decode(&ops, &encoded).result().unwrap(),
//!     ("Ada".to_string(), 36)
//! );
//! ```

use bytes::Bytes;

use crate::{CodecError, DataOps, DataResult};

use super::{
    Decoder, DefaultField, DispatchCodec, DispatchTarget, Either, EitherCodec, Encoder,
    FieldCodec, FlatXmap, ListCodec, MapAsCodec, MapResult, OptionalFieldCodec, OrElse,
    OrElseGet, UnboundedMapCodec, Xmap,
};

pub use super::record::{bound, point};

/// Fails unless the prefix a primitive is merged onto is empty.
fn leaf<O: DataOps>(ops: &O, value: O::Value, prefix: O::Value) -> DataResult<O::Value> {
    if prefix == ops.empty() {
        DataResult::success(value)
    } else {
        DataResult::error(CodecError::Merge(format!(
            "cannot merge a primitive into non-empty prefix {prefix:?}"
        )))
    }
}

/// Codec for booleans.
#[derive(Debug, Clone, Copy)]
pub struct Bool;

impl<O: DataOps> Decoder<bool, O> for Bool {
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<bool> {
        ops.get_boolean(input)
    }
}

impl<O: DataOps> Encoder<bool, O> for Bool {
    fn encode(&self, ops: &O, input: &bool, prefix: O::Value) -> DataResult<O::Value> {
        leaf(ops, ops.create_boolean(*input), prefix)
    }
}

macro_rules! integral_codec {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $create:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl<O: DataOps> Decoder<$ty, O> for $name {
            fn decode(&self, ops: &O, input: &O::Value) -> DataResult<$ty> {
                ops.get_number(input).and_then(|number| match number.as_i64() {
                    Some(int) => match <$ty>::try_from(int) {
                        Ok(value) => DataResult::success(value),
                        Err(_) => DataResult::error(CodecError::Range {
                            value: int.to_string(),
                            min: <$ty>::MIN.to_string(),
                            max: <$ty>::MAX.to_string(),
                        }),
                    },
                    None => DataResult::error(CodecError::type_mismatch("an integer", input)),
                })
            }
        }

        impl<O: DataOps> Encoder<$ty, O> for $name {
            fn encode(&self, ops: &O, input: &$ty, prefix: O::Value) -> DataResult<O::Value> {
                leaf(ops, ops.$create(*input), prefix)
            }
        }
    };
}

integral_codec!(
    /// Codec for `i8`.
    Byte, i8, create_byte
);
integral_codec!(
    /// Codec for `i16`.
    Short, i16, create_short
);
integral_codec!(
    /// Codec for `i32`.
    Int, i32, create_int
);
integral_codec!(
    /// Codec for `i64`.
    Long, i64, create_long
);

/// Codec for `f32`.
#[derive(Debug, Clone, Copy)]
pub struct Float;

impl<O: DataOps> Decoder<f32, O> for Float {
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<f32> {
        ops.get_number(input).map(|number| number.as_f64() as f32)
    }
}

impl<O: DataOps> Encoder<f32, O> for Float {
    fn encode(&self, ops: &O, input: &f32, prefix: O::Value) -> DataResult<O::Value> {
        leaf(ops, ops.create_float(*input), prefix)
    }
}

/// Codec for `f64`.
#[derive(Debug, Clone, Copy)]
pub struct Double;

impl<O: DataOps> Decoder<f64, O> for Double {
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<f64> {
        ops.get_number(input).map(|number| number.as_f64())
    }
}

impl<O: DataOps> Encoder<f64, O> for Double {
    fn encode(&self, ops: &O, input: &f64, prefix: O::Value) -> DataResult<O::Value> {
        leaf(ops, ops.create_double(*input), prefix)
    }
}

/// Codec for strings.
#[derive(Debug, Clone, Copy)]
pub struct Str;

impl<O: DataOps> Decoder<String, O> for Str {
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<String> {
        ops.get_string(input)
    }
}

impl<O: DataOps> Encoder<String, O> for Str {
    fn encode(&self, ops: &O, input: &String, prefix: O::Value) -> DataResult<O::Value> {
        leaf(ops, ops.create_string(input), prefix)
    }
}

/// Codec for byte buffers.
#[derive(Debug, Clone, Copy)]
pub struct ByteBuffer;

impl<O: DataOps> Decoder<Bytes, O> for ByteBuffer {
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<Bytes> {
        ops.get_byte_buffer(input)
    }
}

impl<O: DataOps> Encoder<Bytes, O> for ByteBuffer {
    fn encode(&self, ops: &O, input: &Bytes, prefix: O::Value) -> DataResult<O::Value> {
        leaf(ops, ops.create_byte_buffer(input.clone()), prefix)
    }
}

/// Codec for int arrays.
#[derive(Debug, Clone, Copy)]
pub struct IntArray;

impl<O: DataOps> Decoder<Vec<i32>, O> for IntArray {
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<Vec<i32>> {
        ops.get_int_array(input)
    }
}

impl<O: DataOps> Encoder<Vec<i32>, O> for IntArray {
    fn encode(&self, ops: &O, input: &Vec<i32>, prefix: O::Value) -> DataResult<O::Value> {
        leaf(ops, ops.create_int_array(input.clone()), prefix)
    }
}

/// Codec for long arrays.
#[derive(Debug, Clone, Copy)]
pub struct LongArray;

impl<O: DataOps> Decoder<Vec<i64>, O> for LongArray {
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<Vec<i64>> {
        ops.get_long_array(input)
    }
}

impl<O: DataOps> Encoder<Vec<i64>, O> for LongArray {
    fn encode(&self, ops: &O, input: &Vec<i64>, prefix: O::Value) -> DataResult<O::Value> {
        leaf(ops, ops.create_long_array(input.clone()), prefix)
    }
}

pub const BOOL: Bool = Bool;
pub const BYTE: Byte = Byte;
pub const SHORT: Short = Short;
pub const INT: Int = Int;
pub const LONG: Long = Long;
pub const FLOAT: Float = Float;
pub const DOUBLE: Double = Double;
pub const STRING: Str = Str;
pub const BYTE_BUFFER: ByteBuffer = ByteBuffer;
pub const INT_ARRAY: IntArray = IntArray;
pub const LONG_ARRAY: LongArray = LongArray;

/// A codec for a fixed value. Encodes nothing (the prefix passes through)
/// and decodes to a clone of the value.
#[derive(Debug, Clone)]
pub struct UnitCodec<A> {
    value: A,
}

impl<A: Clone, O: DataOps> Decoder<A, O> for UnitCodec<A> {
    fn decode(&self, _ops: &O, _input: &O::Value) -> DataResult<A> {
        DataResult::success(self.value.clone())
    }
}

impl<A, O: DataOps> Encoder<A, O> for UnitCodec<A> {
    fn encode(&self, _ops: &O, _input: &A, prefix: O::Value) -> DataResult<O::Value> {
        DataResult::success(prefix)
    }
}

/// A codec for a fixed value.
pub fn unit<A: Clone>(value: A) -> UnitCodec<A> {
    UnitCodec { value }
}

/// Restricts a numeric codec to an inclusive range.
///
/// Both decode and encode reject out-of-range values.
#[derive(Debug, Clone)]
pub struct Ranged<C, N> {
    inner: C,
    min: N,
    max: N,
}

impl<C, N: PartialOrd + Copy + std::fmt::Display> Ranged<C, N> {
    fn check(&self, value: N) -> DataResult<N> {
        if value < self.min || value > self.max {
            DataResult::error(CodecError::Range {
                value: value.to_string(),
                min: self.min.to_string(),
                max: self.max.to_string(),
            })
        } else {
            DataResult::success(value)
        }
    }
}

impl<O, C, N> Decoder<N, O> for Ranged<C, N>
where
    O: DataOps,
    C: Decoder<N, O>,
    N: PartialOrd + Copy + std::fmt::Display,
{
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<N> {
        self.inner.decode(ops, input).and_then(|value| self.check(value))
    }
}

impl<O, C, N> Encoder<N, O> for Ranged<C, N>
where
    O: DataOps,
    C: Encoder<N, O>,
    N: PartialOrd + Copy + std::fmt::Display,
{
    fn encode(&self, ops: &O, input: &N, prefix: O::Value) -> DataResult<O::Value> {
        self.check(*input)
            .and_then(|value| self.inner.encode(ops, &value, prefix))
    }
}

/// Restricts a numeric codec to the inclusive range `[min, max]`.
pub fn ranged<C, N: PartialOrd + Copy + std::fmt::Display>(codec: C, min: N, max: N) -> Ranged<C, N> {
    Ranged { inner: codec, min, max }
}

/// A codec for homogeneous lists. Element failures fail the whole decode.
pub fn list<C>(element: C) -> ListCodec<C> {
    ListCodec::new(element)
}

/// A codec for maps with codec-typed keys and values, decoding to entries in
/// source order. Entry failures fail the whole decode.
pub fn unbounded_map<KC, VC>(key: KC, value: VC) -> UnboundedMapCodec<KC, VC> {
    UnboundedMapCodec::new(key, value)
}

/// A codec trying `left` first on decode and falling back to `right`.
pub fn either<L, R>(left: L, right: R) -> EitherCodec<L, R> {
    EitherCodec::new(left, right)
}

/// A pure bidirectional transform over an existing codec.
pub fn xmap<A, B, C, F, G>(codec: C, to: F, from: G) -> Xmap<C, F, G, A>
where
    F: Fn(A) -> B,
    G: Fn(&B) -> A,
{
    Xmap::new(codec, to, from)
}

/// A fallible bidirectional transform over an existing codec. Failures in
/// either direction propagate unchanged.
pub fn flat_xmap<A, B, C, F, G>(codec: C, to: F, from: G) -> FlatXmap<C, F, G, A>
where
    F: Fn(A) -> DataResult<B>,
    G: Fn(&B) -> DataResult<A>,
{
    FlatXmap::new(codec, to, from)
}

/// Intercepts decode and encode outcomes with a [`ResultFunction`] hook.
///
/// [`ResultFunction`]: super::ResultFunction
pub fn map_result<C, F>(codec: C, function: F) -> MapResult<C, F> {
    MapResult::new(codec, function)
}

/// Substitutes `fallback` for any decode failure.
pub fn or_else<C, A: Clone>(codec: C, fallback: A) -> MapResult<C, OrElse<A>> {
    MapResult::new(codec, OrElse::new(fallback))
}

/// Substitutes the supplier's value for any decode failure.
pub fn or_else_get<C, F>(codec: C, supplier: F) -> MapResult<C, OrElseGet<F>> {
    MapResult::new(codec, OrElseGet::new(supplier))
}

/// Binds a value codec to one required map key.
pub fn field<C>(name: impl Into<String>, value: C) -> FieldCodec<C> {
    FieldCodec::new(name, value)
}

/// Binds a value codec to one optional map key. A missing key and a
/// malformed value both decode to `None`.
pub fn optional_field<C>(name: impl Into<String>, value: C) -> OptionalFieldCodec<C> {
    OptionalFieldCodec::new(name, value)
}

/// An optional field collapsed with a default. Values equal to the default
/// are not written.
pub fn default_field<C, A>(name: impl Into<String>, value: C, default: A) -> DefaultField<C, A> {
    DefaultField::new(name, value, default)
}

/// Adapts a field codec into a whole-value codec.
pub fn compound<M>(map_codec: M) -> MapAsCodec<M> {
    MapAsCodec::new(map_codec)
}

/// A polymorphic codec resolving its target from a string-keyed
/// discriminator. See [`DispatchCodec`].
pub fn dispatch<K, V, O, KC>(
    type_key: impl Into<String>,
    key_codec: KC,
    key_for: impl Fn(&V) -> DataResult<K> + Send + Sync + 'static,
    target_for: impl Fn(&K) -> Option<DispatchTarget<V, O>> + Send + Sync + 'static,
) -> DispatchCodec<K, V, O, KC>
where
    O: DataOps,
{
    DispatchCodec::new(type_key, key_codec, key_for, target_for)
}

/// Wraps a value in [`Either::Left`].
pub fn left<L, R>(value: L) -> Either<L, R> {
    Either::Left(value)
}

/// Wraps a value in [`Either::Right`].
pub fn right<L, R>(value: R) -> Either<L, R> {
    Either::Right(value)
}
