//! Field codecs: one value codec bound to one map key.

use tracing::debug;

use crate::{CodecError, DataOps, DataResult, MapBuilder, MapView};

use super::{Codec, MapAsCodec, MapDecoder, MapEncoder};

/// A required field. Decoding fails when the key is missing.
#[derive(Debug, Clone)]
pub struct FieldCodec<C> {
    name: String,
    value: C,
}

impl<C> FieldCodec<C> {
    #[inline]
    pub fn new(name: impl Into<String>, value: C) -> Self {
        FieldCodec {
            name: name.into(),
            value,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adapts this field into a whole-value codec.
    pub fn codec(self) -> MapAsCodec<Self> {
        MapAsCodec::new(self)
    }
}

impl<A, O: DataOps, C: Codec<A, O>> MapEncoder<A, O> for FieldCodec<C> {
    fn encode_entries(&self, ops: &O, input: &A, mut builder: MapBuilder<O>) -> MapBuilder<O> {
        builder.add_result(&self.name, self.value.encode_start(ops, input));
        builder
    }
}

impl<A, O: DataOps, C: Codec<A, O>> MapDecoder<A, O> for FieldCodec<C> {
    fn decode_entries(&self, ops: &O, view: &MapView<O>) -> DataResult<A> {
        match view.get(ops, &self.name) {
            Some(raw) => self.value.decode(ops, raw),
            None => DataResult::error(CodecError::MissingKey(self.name.clone())),
        }
    }
}

/// An optional field.
///
/// A missing key and a present-but-malformed value both decode to `None`;
/// the two are indistinguishable by design. An absent value encodes to no
/// key at all.
#[derive(Debug, Clone)]
pub struct OptionalFieldCodec<C> {
    name: String,
    value: C,
}

impl<C> OptionalFieldCodec<C> {
    #[inline]
    pub fn new(name: impl Into<String>, value: C) -> Self {
        OptionalFieldCodec {
            name: name.into(),
            value,
        }
    }

    /// Adapts this field into a whole-value codec.
    pub fn codec(self) -> MapAsCodec<Self> {
        MapAsCodec::new(self)
    }
}

impl<A, O: DataOps, C: Codec<A, O>> MapEncoder<Option<A>, O> for OptionalFieldCodec<C> {
    fn encode_entries(
        &self,
        ops: &O,
        input: &Option<A>,
        mut builder: MapBuilder<O>,
    ) -> MapBuilder<O> {
        if let Some(value) = input {
            builder.add_result(&self.name, self.value.encode_start(ops, value));
        }
        builder
    }
}

impl<A, O: DataOps, C: Codec<A, O>> MapDecoder<Option<A>, O> for OptionalFieldCodec<C> {
    fn decode_entries(&self, ops: &O, view: &MapView<O>) -> DataResult<Option<A>> {
        match view.get(ops, &self.name) {
            None => DataResult::success(None),
            Some(raw) => match self.value.decode(ops, raw) {
                DataResult::Success { value, lifecycle } => {
                    DataResult::success_with(Some(value), lifecycle)
                }
                DataResult::Error { error, .. } => {
                    debug!(field = %self.name, %error, "treating malformed optional field as absent");
                    DataResult::success(None)
                }
            },
        }
    }
}

/// An optional field collapsed with a default value.
///
/// Decoding substitutes the default for a missing key or a malformed value.
/// A value equal to the default is not written.
#[derive(Debug, Clone)]
pub struct DefaultField<C, A> {
    name: String,
    value: C,
    default: A,
}

impl<C, A> DefaultField<C, A> {
    #[inline]
    pub fn new(name: impl Into<String>, value: C, default: A) -> Self {
        DefaultField {
            name: name.into(),
            value,
            default,
        }
    }

    /// Adapts this field into a whole-value codec.
    pub fn codec(self) -> MapAsCodec<Self> {
        MapAsCodec::new(self)
    }
}

impl<A, O, C> MapEncoder<A, O> for DefaultField<C, A>
where
    O: DataOps,
    C: Codec<A, O>,
    A: Clone + PartialEq,
{
    fn encode_entries(&self, ops: &O, input: &A, mut builder: MapBuilder<O>) -> MapBuilder<O> {
        if *input != self.default {
            builder.add_result(&self.name, self.value.encode_start(ops, input));
        }
        builder
    }
}

impl<A, O, C> MapDecoder<A, O> for DefaultField<C, A>
where
    O: DataOps,
    C: Codec<A, O>,
    A: Clone + PartialEq,
{
    fn decode_entries(&self, ops: &O, view: &MapView<O>) -> DataResult<A> {
        match view.get(ops, &self.name) {
            None => DataResult::success(self.default.clone()),
            Some(raw) => match self.value.decode(ops, raw) {
                success @ DataResult::Success { .. } => success,
                DataResult::Error { error, .. } => {
                    debug!(field = %self.name, %error, "substituting default for malformed field");
                    DataResult::success(self.default.clone())
                }
            },
        }
    }
}
