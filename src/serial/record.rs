//! The record composition engine.
//!
//! A compound object with N independently declared fields gets one codec
//! from N bindings, each created once with [`bound`]: a pure getter from the
//! whole object plus a field codec. Bindings fold pairwise through
//! [`PairFields`], one generic reducer, so any field count works without
//! per-arity machinery. The folded decode output is a nested tuple that the
//! final constructor unpacks:
//!
//! ```
//! use na_codec::serial::codecs;
//! use na_codec::{Decoder, Encoder, OwnedOps};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! let codec = codecs::bound(codecs::field("name", codecs::STRING), |p: &Person| {
//!     p.name.clone()
//! })
//! .and(codecs::bound(
//!     codecs::field("age", codecs::ranged(codecs::INT, 0, 150)),
//!     |p: &Person| p.age,
//! ))
//! .build(|(name, age)| Person { name, age })
//! .codec();
//!
//! let ops = OwnedOps;
//! let ada = Person { name: "Ada".into(), age: 36 };
//! let encoded = codec.encode_start(&ops, &ada).result().unwrap();
//! assert_eq!(codec.decode(&ops, &encoded).result().unwrap(), ada);
//! ```
//!
//! Decoding runs every binding against the same keyed view and aggregates
//! every field failure. Encoding threads a single builder through every
//! binding in declaration order.

use crate::{DataOps, DataResult, MapBuilder, MapView};

use super::{MapAsCodec, MapCodec, MapDecoder, MapEncoder};

/// A set of field bindings for a record over `S`, folded to one decoded
/// output type.
pub trait FieldSet<S, O: DataOps> {
    /// The decoded output: a field value, or a nested tuple of them.
    type Out;

    /// Appends this set's entries to the shared builder, in declaration
    /// order.
    fn encode_fields(&self, ops: &O, input: &S, builder: MapBuilder<O>) -> MapBuilder<O>;

    /// Decodes this set's fields from the shared keyed view.
    fn decode_fields(&self, ops: &O, view: &MapView<O>) -> DataResult<Self::Out>;
}

/// One field binding: a getter from the whole object and a field codec.
///
/// The getter closes the encoder over the whole object, so a record encode
/// can be assembled before the decoded object ever exists, mirroring decode.
#[derive(Debug, Clone)]
pub struct BoundField<C, G> {
    codec: C,
    getter: G,
}

/// Binds a field codec to a getter from the whole object.
pub fn bound<C, G>(codec: C, getter: G) -> BoundField<C, G> {
    BoundField { codec, getter }
}

impl<S, A, O, C, G> FieldSet<S, O> for BoundField<C, G>
where
    O: DataOps,
    C: MapCodec<A, O>,
    G: Fn(&S) -> A,
{
    type Out = A;

    fn encode_fields(&self, ops: &O, input: &S, builder: MapBuilder<O>) -> MapBuilder<O> {
        self.codec.encode_entries(ops, &(self.getter)(input), builder)
    }

    fn decode_fields(&self, ops: &O, view: &MapView<O>) -> DataResult<A> {
        self.codec.decode_entries(ops, view)
    }
}

/// A derived field with no physical key. Encodes nothing and decodes to a
/// clone of its value.
#[derive(Debug, Clone)]
pub struct PointField<A> {
    value: A,
}

/// A keyless binding for pure or derived fields.
pub fn point<A: Clone>(value: A) -> PointField<A> {
    PointField { value }
}

impl<S, A: Clone, O: DataOps> FieldSet<S, O> for PointField<A> {
    type Out = A;

    fn encode_fields(&self, _ops: &O, _input: &S, builder: MapBuilder<O>) -> MapBuilder<O> {
        builder
    }

    fn decode_fields(&self, _ops: &O, _view: &MapView<O>) -> DataResult<A> {
        DataResult::success(self.value.clone())
    }
}

/// The single reducer folding two field sets into one.
#[derive(Debug, Clone)]
pub struct PairFields<F, G> {
    first: F,
    second: G,
}

impl<S, O, F, G> FieldSet<S, O> for PairFields<F, G>
where
    O: DataOps,
    F: FieldSet<S, O>,
    G: FieldSet<S, O>,
{
    type Out = (F::Out, G::Out);

    fn encode_fields(&self, ops: &O, input: &S, builder: MapBuilder<O>) -> MapBuilder<O> {
        let builder = self.first.encode_fields(ops, input, builder);
        self.second.encode_fields(ops, input, builder)
    }

    fn decode_fields(&self, ops: &O, view: &MapView<O>) -> DataResult<Self::Out> {
        self.first
            .decode_fields(ops, view)
            .and(self.second.decode_fields(ops, view))
    }
}

macro_rules! chainable {
    ($name:ident<$($param:ident),+>) => {
        impl<$($param),+> $name<$($param),+> {
            /// Folds another field set onto this one.
            pub fn and<T>(self, other: T) -> PairFields<Self, T> {
                PairFields { first: self, second: other }
            }

            /// Finishes the fold, applying `ctor` to the decoded output.
            pub fn build<Ctor>(self, ctor: Ctor) -> RecordCodec<Self, Ctor> {
                RecordCodec { fields: self, ctor }
            }
        }
    };
}

chainable!(BoundField<C, G>);
chainable!(PointField<A>);
chainable!(PairFields<F, G>);

/// A compound-object field codec: folded bindings plus an N-ary
/// constructor.
#[derive(Debug, Clone)]
pub struct RecordCodec<F, Ctor> {
    fields: F,
    ctor: Ctor,
}

impl<F, Ctor> RecordCodec<F, Ctor> {
    /// Adapts this record into a whole-value codec.
    pub fn codec(self) -> MapAsCodec<Self> {
        MapAsCodec::new(self)
    }
}

impl<S, O, F, Ctor> MapEncoder<S, O> for RecordCodec<F, Ctor>
where
    O: DataOps,
    F: FieldSet<S, O>,
    Ctor: Fn(F::Out) -> S,
{
    fn encode_entries(&self, ops: &O, input: &S, builder: MapBuilder<O>) -> MapBuilder<O> {
        self.fields.encode_fields(ops, input, builder)
    }
}

impl<S, O, F, Ctor> MapDecoder<S, O> for RecordCodec<F, Ctor>
where
    O: DataOps,
    F: FieldSet<S, O>,
    Ctor: Fn(F::Out) -> S,
{
    fn decode_entries(&self, ops: &O, view: &MapView<O>) -> DataResult<S> {
        self.fields
            .decode_fields(ops, view)
            .map(|out| (self.ctor)(out))
    }
}
