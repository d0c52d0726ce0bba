//! The homogeneous list codec.

use crate::{CodecError, DataOps, DataResult, Lifecycle};

use super::{Codec, Decoder, Encoder};

/// Encodes and decodes `Vec<A>` through a format's list shape.
///
/// Decoding is all-or-nothing: any element failure fails the whole decode,
/// and the aggregated error carries every failed raw element for
/// diagnostics. A successful decode preserves the source order.
#[derive(Debug, Clone)]
pub struct ListCodec<C> {
    element: C,
}

impl<C> ListCodec<C> {
    #[inline]
    pub fn new(element: C) -> Self {
        ListCodec { element }
    }
}

impl<A, O: DataOps, C: Codec<A, O>> Decoder<Vec<A>, O> for ListCodec<C> {
    fn decode(&self, ops: &O, input: &O::Value) -> DataResult<Vec<A>> {
        ops.get_list(input).and_then(|items| {
            let mut values = Vec::with_capacity(items.len());
            let mut failures = Vec::new();
            let mut lifecycle = Lifecycle::Stable;
            for item in &items {
                match self.element.decode(ops, item) {
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
                        failures.push(CodecError::Message(format!("element {item:?}: {error}")));
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

impl<A, O: DataOps, C: Codec<A, O>> Encoder<Vec<A>, O> for ListCodec<C> {
    fn encode(&self, ops: &O, input: &Vec<A>, prefix: O::Value) -> DataResult<O::Value> {
        let mut builder = ops.list_builder();
        for element in input {
            builder.push_result(self.element.encode_start(ops, element));
        }
        builder.build(prefix)
    }
}
