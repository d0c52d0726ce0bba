//! Incremental builders for list and map nodes.
//!
//! A builder is a mutable accumulator owned by exactly one encode call. It
//! accepts plain values and result-wrapped values; the first error latches
//! and surfaces when the builder is finalized, with later errors aggregated
//! onto it. [`ListBuilder::build`] and [`MapBuilder::build`] take a prefix
//! node: an empty prefix starts fresh, a prefix of the matching compound
//! shape is merged, and anything else is a merge error.
//!
//! Builders must never be shared across calls or threads.

use crate::{CodecError, DataOps, DataResult};

/// Accumulates elements for one list node.
#[derive(Debug)]
pub struct ListBuilder<O: DataOps> {
    ops: O,
    result: DataResult<Vec<O::Value>>,
}

impl<O: DataOps> ListBuilder<O> {
    #[inline]
    pub fn new(ops: O) -> Self {
        ListBuilder {
            ops,
            result: DataResult::success(Vec::new()),
        }
    }

    #[inline]
    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Appends an element.
    pub fn push(&mut self, value: O::Value) {
        self.push_result(DataResult::success(value));
    }

    /// Appends a result-wrapped element. Errors latch and aggregate.
    pub fn push_result(&mut self, value: DataResult<O::Value>) {
        let current = std::mem::replace(&mut self.result, DataResult::success(Vec::new()));
        self.result = current.and(value).map(|(mut items, item)| {
            items.push(item);
            items
        });
    }

    /// Finalizes the list, merging with the prefix node.
    pub fn build(self, prefix: O::Value) -> DataResult<O::Value> {
        let ops = self.ops;
        self.result.and_then(|items| {
            if prefix == ops.empty() {
                return DataResult::success(ops.create_list(items));
            }
            let shape = format!("{prefix:?}");
            ops.get_list(&prefix)
                .map_error(|_| {
                    CodecError::Merge(format!("cannot build list onto non-list {shape}"))
                })
                .map(|mut existing| {
                    existing.extend(items);
                    ops.create_list(existing)
                })
        })
    }
}

/// Accumulates keyed entries for one map node.
///
/// Duplicate keys keep the last write, applied at insertion time, so a built
/// map never contains two entries under one key.
#[derive(Debug)]
pub struct MapBuilder<O: DataOps> {
    ops: O,
    result: DataResult<Vec<(O::Value, O::Value)>>,
}

impl<O: DataOps> MapBuilder<O> {
    #[inline]
    pub fn new(ops: O) -> Self {
        MapBuilder {
            ops,
            result: DataResult::success(Vec::new()),
        }
    }

    #[inline]
    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Adds an entry under a string key.
    pub fn add(&mut self, key: &str, value: O::Value) {
        let key = self.ops.create_string(key);
        self.add_pair(DataResult::success((key, value)));
    }

    /// Adds an entry under a node key.
    pub fn add_value(&mut self, key: O::Value, value: O::Value) {
        self.add_pair(DataResult::success((key, value)));
    }

    /// Adds a result-wrapped entry under a string key.
    pub fn add_result(&mut self, key: &str, value: DataResult<O::Value>) {
        let key = self.ops.create_string(key);
        self.add_pair(value.map(|value| (key, value)));
    }

    /// Adds an entry whose key and value are both result-wrapped.
    pub fn add_result_pair(
        &mut self,
        key: DataResult<O::Value>,
        value: DataResult<O::Value>,
    ) {
        self.add_pair(key.and(value));
    }

    fn add_pair(&mut self, entry: DataResult<(O::Value, O::Value)>) {
        let current = std::mem::replace(&mut self.result, DataResult::success(Vec::new()));
        self.result = current.and(entry).map(|(mut entries, (key, value))| {
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(existing) => existing.1 = value,
                None => entries.push((key, value)),
            }
            entries
        });
    }

    /// The accumulated entries, consuming the builder without finalizing a
    /// node. Used where entries must be inspected before assembly.
    pub fn into_entries(self) -> DataResult<Vec<(O::Value, O::Value)>> {
        self.result
    }

    /// Finalizes the map, merging with the prefix node.
    ///
    /// Prefix entries come first; accumulated entries overwrite prefix
    /// entries under the same key.
    pub fn build(self, prefix: O::Value) -> DataResult<O::Value> {
        let ops = self.ops;
        self.result.and_then(|entries| {
            if prefix == ops.empty() {
                return DataResult::success(ops.create_map(entries));
            }
            let shape = format!("{prefix:?}");
            ops.get_map_entries(&prefix)
                .map_error(|_| {
                    CodecError::Merge(format!("cannot build map onto non-map {shape}"))
                })
                .map(|mut existing| {
                    for (key, value) in entries {
                        match existing.iter_mut().find(|(k, _)| *k == key) {
                            Some(entry) => entry.1 = value,
                            None => existing.push((key, value)),
                        }
                    }
                    ops.create_map(existing)
                })
        })
    }
}
