//! A lazily-failing cursor over an already-parsed tree value.
//!
//! [`Dynamic`] pairs a format handle with one of its nodes and lets callers
//! walk and read the tree without writing a codec. Keyed descent with
//! [`Dynamic::get`] returns an [`OptionalDynamic`]; chained `get` calls
//! short-circuit on the first missing key and defer the error until the
//! cursor is consumed. The `*_or` accessors swallow any error and
//! substitute a default, which is the sanctioned way to read data leniently
//! without touching the result channel directly.
//!
//! # Example
//!
//! ```
//! use na_codec::{Dynamic, OwnedOps, OwnedValue};
//!
//! let tree = OwnedValue::Map(vec![(
//!     OwnedValue::from("server"),
//!     OwnedValue::Map(vec![(OwnedValue::from("port"), OwnedValue::Int(9090))]),
//! )]);
//! let root = Dynamic::new(OwnedOps, tree);
//! assert_eq!(root.get("server").get("port").as_int_or(8080), 9090);
//! assert_eq!(root.get("server").get("host").as_string_or("localhost"), "localhost");
//! ```

use bytes::Bytes;

use crate::{
    CodecError, DataOps, DataResult, Decoder, MapView, Number,
};

/// A format handle paired with one of its nodes.
#[derive(Debug, Clone)]
pub struct Dynamic<O: DataOps> {
    ops: O,
    value: O::Value,
}

impl<O: DataOps> Dynamic<O> {
    #[inline]
    pub fn new(ops: O, value: O::Value) -> Self {
        Dynamic { ops, value }
    }

    /// A cursor over the format's empty value.
    #[inline]
    pub fn empty(ops: O) -> Self {
        let value = ops.empty();
        Dynamic { ops, value }
    }

    #[inline]
    pub fn ops(&self) -> &O {
        &self.ops
    }

    #[inline]
    pub fn value(&self) -> &O::Value {
        &self.value
    }

    #[inline]
    pub fn into_value(self) -> O::Value {
        self.value
    }

    /// Descends into a map entry. The failure, if any, is deferred until the
    /// returned cursor is consumed.
    pub fn get(&self, key: &str) -> OptionalDynamic<O> {
        let result = self.ops.get_map(&self.value).and_then(|view| {
            match view.get(&self.ops, key) {
                Some(value) => {
                    DataResult::success(Dynamic::new(self.ops.clone(), value.clone()))
                }
                None => DataResult::error(CodecError::MissingKey(key.to_string())),
            }
        });
        OptionalDynamic { result }
    }

    pub fn as_boolean(&self) -> DataResult<bool> {
        self.ops.get_boolean(&self.value)
    }

    pub fn as_number(&self) -> DataResult<Number> {
        self.ops.get_number(&self.value)
    }

    pub fn as_int(&self) -> DataResult<i64> {
        self.as_number().and_then(|number| match number.as_i64() {
            Some(int) => DataResult::success(int),
            None => DataResult::error(CodecError::type_mismatch("an integer", &self.value)),
        })
    }

    pub fn as_double(&self) -> DataResult<f64> {
        self.as_number().map(Number::as_f64)
    }

    pub fn as_string(&self) -> DataResult<String> {
        self.ops.get_string(&self.value)
    }

    pub fn as_byte_buffer(&self) -> DataResult<Bytes> {
        self.ops.get_byte_buffer(&self.value)
    }

    pub fn as_int_array(&self) -> DataResult<Vec<i32>> {
        self.ops.get_int_array(&self.value)
    }

    pub fn as_long_array(&self) -> DataResult<Vec<i64>> {
        self.ops.get_long_array(&self.value)
    }

    /// The node's list elements, each wrapped in its own cursor.
    pub fn as_list(&self) -> DataResult<Vec<Dynamic<O>>> {
        self.ops.get_list(&self.value).map(|items| {
            items
                .into_iter()
                .map(|item| Dynamic::new(self.ops.clone(), item))
                .collect()
        })
    }

    /// The node's map entries, each side wrapped in its own cursor.
    pub fn as_map_entries(&self) -> DataResult<Vec<(Dynamic<O>, Dynamic<O>)>> {
        self.ops.get_map_entries(&self.value).map(|entries| {
            entries
                .into_iter()
                .map(|(key, value)| {
                    (
                        Dynamic::new(self.ops.clone(), key),
                        Dynamic::new(self.ops.clone(), value),
                    )
                })
                .collect()
        })
    }

    /// The node's keyed view.
    pub fn as_map(&self) -> DataResult<MapView<O>> {
        self.ops.get_map(&self.value)
    }

    pub fn as_boolean_or(&self, default: bool) -> bool {
        self.as_boolean().unwrap_or(default)
    }

    pub fn as_int_or(&self, default: i64) -> i64 {
        self.as_int().unwrap_or(default)
    }

    pub fn as_double_or(&self, default: f64) -> f64 {
        self.as_double().unwrap_or(default)
    }

    pub fn as_string_or(&self, default: &str) -> String {
        self.as_string().unwrap_or_else(|| default.to_string())
    }

    /// Runs any decoder at this cursor.
    pub fn decode<A>(&self, decoder: &impl Decoder<A, O>) -> DataResult<A> {
        decoder.decode(&self.ops, &self.value)
    }

    /// A new cursor with `key` set to `value`. A node that cannot accept the
    /// entry is left unchanged.
    pub fn set(&self, key: &str, value: O::Value) -> Dynamic<O> {
        let key_value = self.ops.create_string(key);
        let merged = self
            .ops
            .merge_to_map(&self.value, key_value, value)
            .unwrap_or(self.value.clone());
        Dynamic::new(self.ops.clone(), merged)
    }

    /// A new cursor with `key` removed.
    pub fn remove(&self, key: &str) -> Dynamic<O> {
        Dynamic::new(self.ops.clone(), self.ops.remove(&self.value, key))
    }

    /// A new cursor with the entry under `key` rewritten by `f`. A missing
    /// key leaves the tree unchanged.
    pub fn update(&self, key: &str, f: impl FnOnce(Dynamic<O>) -> Dynamic<O>) -> Dynamic<O> {
        match self.get(key).into_result().ok() {
            Some(child) => self.set(key, f(child).into_value()),
            None => self.clone(),
        }
    }

    /// Carries this cursor into another format.
    pub fn convert<P: DataOps>(&self, target: &P) -> Dynamic<P> {
        Dynamic::new(target.clone(), self.ops.convert_to(target, &self.value))
    }
}

/// A result-wrapped cursor produced by keyed descent.
///
/// Errors ride along unconsumed; further descent keeps the first error.
#[derive(Debug, Clone)]
pub struct OptionalDynamic<O: DataOps> {
    result: DataResult<Dynamic<O>>,
}

impl<O: DataOps> OptionalDynamic<O> {
    #[inline]
    pub fn new(result: DataResult<Dynamic<O>>) -> Self {
        OptionalDynamic { result }
    }

    /// Descends further. The first error short-circuits.
    pub fn get(&self, key: &str) -> OptionalDynamic<O> {
        match &self.result {
            DataResult::Success { value, .. } => value.get(key),
            DataResult::Error { error, .. } => OptionalDynamic {
                result: DataResult::error(error.clone()),
            },
        }
    }

    #[inline]
    pub fn result(&self) -> &DataResult<Dynamic<O>> {
        &self.result
    }

    #[inline]
    pub fn into_result(self) -> DataResult<Dynamic<O>> {
        self.result
    }

    pub fn as_boolean(&self) -> DataResult<bool> {
        self.read(Dynamic::as_boolean)
    }

    pub fn as_number(&self) -> DataResult<Number> {
        self.read(Dynamic::as_number)
    }

    pub fn as_int(&self) -> DataResult<i64> {
        self.read(Dynamic::as_int)
    }

    pub fn as_double(&self) -> DataResult<f64> {
        self.read(Dynamic::as_double)
    }

    pub fn as_string(&self) -> DataResult<String> {
        self.read(Dynamic::as_string)
    }

    pub fn as_list(&self) -> DataResult<Vec<Dynamic<O>>> {
        self.read(Dynamic::as_list)
    }

    pub fn as_map_entries(&self) -> DataResult<Vec<(Dynamic<O>, Dynamic<O>)>> {
        self.read(Dynamic::as_map_entries)
    }

    pub fn as_boolean_or(&self, default: bool) -> bool {
        self.as_boolean().unwrap_or(default)
    }

    pub fn as_int_or(&self, default: i64) -> i64 {
        self.as_int().unwrap_or(default)
    }

    pub fn as_double_or(&self, default: f64) -> f64 {
        self.as_double().unwrap_or(default)
    }

    pub fn as_string_or(&self, default: &str) -> String {
        self.as_string().unwrap_or_else(|| default.to_string())
    }

    /// Runs any decoder at this cursor.
    pub fn decode<A>(&self, decoder: &impl Decoder<A, O>) -> DataResult<A> {
        self.read(|dynamic| dynamic.decode(decoder))
    }

    fn read<A>(&self, f: impl FnOnce(&Dynamic<O>) -> DataResult<A>) -> DataResult<A> {
        match &self.result {
            DataResult::Success { value, .. } => f(value),
            DataResult::Error { error, .. } => DataResult::error(error.clone()),
        }
    }
}
