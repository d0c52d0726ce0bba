//! The codec-keyed map codec.

use crate::{CodecError, DataOps, DataResult, Lifecycle};

use super::{Codec, Decoder, Encoder};

/// Encodes and decodes keyed entries through a format's map shape.
///
/// Decodes to `Vec<(K, V)>` in source entry order, keeping keys free of
/// `Hash`/`Ord` bounds. Like [`ListCodec`](super::ListCodec), decoding is
/// all-or-nothing over the entries.
#[derive(Debug, Clone)]
pub struct UnboundedMapCodec<KC, VC> {
    key: KC,
    value: VC,
}

impl<KC, VC> UnboundedMapCodec<KC, VC> {
    #[inline]
    pub fn new(key: KC, value: VC) -> Self {
        UnboundedMapCodec { key, value }
    }
}

impl<K, V, O, KC, VC> Decoder<Vec<(K, V)>, O> for UnboundedMapCodec<KC, VC>
where
    O: DataOps,
    KC: Codec<K, O>,
    VC: Codec<V, O>,
{
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<Vec<(K, V)>> {
        ops.get_map_entries(input).and_then(|entries| {
            let mut values = Vec::with_capacity(entries.len());
            let mut failures = Vec::new();
            let mut lifecycle = Lifecycle::Stable;
            for (raw_key, raw_value) in &entries {
                let decoded = self
                    .key
                    .decode(ops, raw_key)
                    .and(self.value.decode(ops, raw_value));
                match decoded {
                    DataResult::Success {
                        value,
                        lifecycle: inner,
                    } => {
                        lifecycle = lifecycle.join(inner);
                        values.push(value);
                    }
                    DataResult::Error {
                        error,
                        lifecycle: inner,
                        ..
                    } => {
                        lifecycle = lifecycle.join(inner);
                        failures.push(CodecError::Message(format!(
                            "entry {raw_key:?}: {error}"
                        )));
                    }
                }
            }
            if failures.is_empty() {
                DataResult::success_with(values, lifecycle)
            } else {
                DataResult::Error {
                    error: CodecError::aggregate(failures),
                    partial: None,
                    lifecycle,
                }
            }
        })
    }
}

impl<K, V, O, KC, VC> Encoder<Vec<(K, V)>, O> for UnboundedMapCodec<KC, VC>
where
    O: DataOps,
    KC: Codec<K, O>,
    VC: Codec<V, O>,
{
    fn encode(&self, ops: &O, input: &Vec<(K, V)>, prefix: O::Value) -> DataResult<O::Value> {
        let mut builder = ops.map_builder();
        for (key, value) in input {
            builder.add_result_pair(
                self.key.encode_start(ops, key),
                self.value.encode_start(ops, value),
            );
        }
        builder.build(prefix)
    }
}
