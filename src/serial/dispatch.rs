//! Open polymorphic serialization through a discriminator key.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::{CodecError, DataOps, DataResult};

use super::{Codec, Decoder, Encoder, MapCodec};

/// Where the payload of one polymorphic variant lives.
///
/// `Flat` payloads share the map with the discriminator entry; `Nested`
/// payloads sit whole under the dispatch codec's value key.
pub enum DispatchTarget<V, O: DataOps> {
    Flat(Arc<dyn MapCodec<V, O> + Send + Sync>),
    Nested(Arc<dyn Codec<V, O> + Send + Sync>),
}

impl<V, O: DataOps> DispatchTarget<V, O> {
    /// A flattened target: the payload's fields merge into the same map as
    /// the discriminator.
    pub fn flat(codec: impl MapCodec<V, O> + Send + Sync + 'static) -> Self {
        DispatchTarget::Flat(Arc::new(codec))
    }

    /// A nested target: the whole payload sits under the value key.
    pub fn nested(codec: impl Codec<V, O> + Send + Sync + 'static) -> Self {
        DispatchTarget::Nested(Arc::new(codec))
    }
}

impl<V, O: DataOps> Clone for DispatchTarget<V, O> {
    fn clone(&self) -> Self {
        match self {
            DispatchTarget::Flat(codec) => DispatchTarget::Flat(codec.clone()),
            DispatchTarget::Nested(codec) => DispatchTarget::Nested(codec.clone()),
        }
    }
}

/// Resolves which sub-codec to use at encode and decode time from a
/// discriminator value stored under a fixed key.
///
/// Decoding is strict: a missing discriminator is a
/// [`MissingKey`](CodecError::MissingKey) error and an unresolved one is an
/// [`UnknownDiscriminator`](CodecError::UnknownDiscriminator) error.
/// Encoding is permissive: a value whose key or target does not resolve
/// leaves the prefix untouched.
///
/// When a flattened payload emits an entry under the discriminator's own
/// key, the entry is dropped; the discriminator written by this codec is
/// authoritative.
pub struct DispatchCodec<K, V, O: DataOps, KC> {
    type_key: String,
    value_key: String,
    key_codec: KC,
    key_for: Arc<dyn Fn(&V) -> DataResult<K> + Send + Sync>,
    target_for: Arc<dyn Fn(&K) -> Option<DispatchTarget<V, O>> + Send + Sync>,
}

impl<K, V, O: DataOps, KC> DispatchCodec<K, V, O, KC> {
    /// A dispatch codec reading its discriminator under `type_key`.
    ///
    /// `key_for` resolves the discriminator for a value at encode time;
    /// `target_for` resolves the sub-codec for a discriminator, typically
    /// from a caller-supplied registry.
    pub fn new(
        type_key: impl Into<String>,
        key_codec: KC,
        key_for: impl Fn(&V) -> DataResult<K> + Send + Sync + 'static,
        target_for: impl Fn(&K) -> Option<DispatchTarget<V, O>> + Send + Sync + 'static,
    ) -> Self {
        DispatchCodec {
            type_key: type_key.into(),
            value_key: "value".into(),
            key_codec,
            key_for: Arc::new(key_for),
            target_for: Arc::new(target_for),
        }
    }

    /// Overrides the key nested payloads are stored under.
    pub fn with_value_key(mut self, key: impl Into<String>) -> Self {
        self.value_key = key.into();
        self
    }

    #[inline]
    pub fn type_key(&self) -> &str {
        &self.type_key
    }
}

impl<K, V, O: DataOps, KC: Clone> Clone for DispatchCodec<K, V, O, KC> {
    fn clone(&self) -> Self {
        DispatchCodec {
            type_key: self.type_key.clone(),
            value_key: self.value_key.clone(),
            key_codec: self.key_codec.clone(),
            key_for: self.key_for.clone(),
            target_for: self.target_for.clone(),
        }
    }
}

impl<K, V, O, KC> Decoder<V, O> for DispatchCodec<K, V, O, KC>
where
    O: DataOps,
    KC: Codec<K, O>,
    K: fmt::Display,
{
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<V> {
        ops.get_map(input).and_then(|view| {
            let raw_key = match view.get(ops, &self.type_key) {
                Some(raw) => raw.clone(),
                None => {
                    return DataResult::error(CodecError::MissingKey(self.type_key.clone()));
                }
            };
            self.key_codec.decode(ops, &raw_key).and_then(|key| {
                let target = match (self.target_for)(&key) {
                    Some(target) => target,
                    None => {
                        return DataResult::error(CodecError::UnknownDiscriminator(
                            key.to_string(),
                        ));
                    }
                };
                match target {
                    DispatchTarget::Flat(codec) => codec.decode_entries(ops, &view),
                    DispatchTarget::Nested(codec) => match view.get(ops, &self.value_key) {
                        Some(payload) => codec.decode(ops, payload),
                        None => {
                            DataResult::error(CodecError::MissingKey(self.value_key.clone()))
                        }
                    },
                }
            })
        })
    }
}

impl<K, V, O, KC> Encoder<V, O> for DispatchCodec<K, V, O, KC>
where
    O: DataOps,
    KC: Codec<K, O>,
    K: fmt::Display,
{
    fn encode(&self, ops: &O, input: &V, prefix: O::Value) -> DataResult<O::Value> {
        let key = match (self.key_for)(input).ok() {
            Some(key) => key,
            None => {
                debug!("value has no discriminator, leaving encode output untouched");
                return DataResult::success(prefix);
            }
        };
        let target = match (self.target_for)(&key) {
            Some(target) => target,
            None => {
                debug!(%key, "no encoder registered for discriminator, leaving encode output untouched");
                return DataResult::success(prefix);
            }
        };
        let mut builder = ops.map_builder();
        builder.add_result(&self.type_key, self.key_codec.encode_start(ops, &key));
        match target {
            DispatchTarget::Flat(codec) => {
                let discriminator = ops.create_string(&self.type_key);
                codec
                    .encode_entries(ops, input, ops.map_builder())
                    .into_entries()
                    .and_then(move |entries| {
                        let mut builder = builder;
                        for (entry_key, entry_value) in entries {
                            if entry_key == discriminator {
                                warn!(
                                    key = %self.type_key,
                                    "payload entry collides with the discriminator key, dropping it"
                                );
                                continue;
                            }
                            builder.add_value(entry_key, entry_value);
                        }
                        builder.build(prefix)
                    })
            }
            DispatchTarget::Nested(codec) => {
                builder.add_result(&self.value_key, codec.encode_start(ops, input));
                builder.build(prefix)
            }
        }
    }
}
