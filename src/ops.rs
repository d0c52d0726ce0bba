//! The format bridge: the single seam between the codec algebra and one
//! concrete wire format.
//!
//! A format implements [`DataOps`] once. Everything else in this crate (the
//! codecs, the record engine, the dispatch codec, the [`Dynamic`] cursor) is
//! written against this trait and works unchanged on every format.
//!
//! The contract has three groups of operations:
//!
//! - **accessors** classify and extract. Each returns a
//!   [`DataResult`] and fails with a type-mismatch error when the node is not
//!   of the requested shape. An accessor never substitutes a default.
//! - **constructors** build nodes for each shape. The width-specific numeric
//!   constructors default to [`create_numeric`](DataOps::create_numeric);
//!   formats with native widths override them.
//! - **merge operations** append into an existing list or map node, rejecting
//!   any other existing shape.
//!
//! [`Dynamic`]: crate::Dynamic

use bytes::Bytes;

use crate::{
    CodecError, DataResult, ListBuilder, MapBuilder, MapView, Narrowed, Number,
};

/// Per-format contract for classifying, extracting and constructing tree
/// nodes.
///
/// Implementations are plain handles (usually zero-sized) that are cheap to
/// clone and hold no per-call state. The node type itself must be safe for
/// concurrent read access.
pub trait DataOps: Clone {
    /// The format's tree node type.
    type Value: Clone + PartialEq + std::fmt::Debug;

    /// The empty (absent) value of this format.
    fn empty(&self) -> Self::Value;

    /// Reads a boolean, failing on any other shape.
    fn get_boolean(&self, value: &Self::Value) -> DataResult<bool>;

    /// Reads a number, failing on any other shape.
    fn get_number(&self, value: &Self::Value) -> DataResult<Number>;

    /// Reads a string, failing on any other shape.
    fn get_string(&self, value: &Self::Value) -> DataResult<String>;

    /// Reads a byte buffer, failing on any other shape.
    fn get_byte_buffer(&self, value: &Self::Value) -> DataResult<Bytes>;

    /// Reads an int array, failing on any other shape.
    fn get_int_array(&self, value: &Self::Value) -> DataResult<Vec<i32>>;

    /// Reads a long array, failing on any other shape.
    fn get_long_array(&self, value: &Self::Value) -> DataResult<Vec<i64>>;

    /// Reads the elements of a list node, failing on any other shape.
    fn get_list(&self, value: &Self::Value) -> DataResult<Vec<Self::Value>>;

    /// Reads the entries of a map node in order, failing on any other shape.
    fn get_map_entries(&self, value: &Self::Value)
    -> DataResult<Vec<(Self::Value, Self::Value)>>;

    /// Reads a map node into a keyed [`MapView`].
    fn get_map(&self, value: &Self::Value) -> DataResult<MapView<Self>>
    where
        Self: Sized,
    {
        self.get_map_entries(value).map(MapView::new)
    }

    fn create_boolean(&self, value: bool) -> Self::Value;

    /// Creates a numeric node. Formats with native widths may narrow.
    fn create_numeric(&self, value: Number) -> Self::Value;

    fn create_byte(&self, value: i8) -> Self::Value {
        self.create_numeric(Number::Int(value as i64))
    }

    fn create_short(&self, value: i16) -> Self::Value {
        self.create_numeric(Number::Int(value as i64))
    }

    fn create_int(&self, value: i32) -> Self::Value {
        self.create_numeric(Number::Int(value as i64))
    }

    fn create_long(&self, value: i64) -> Self::Value {
        self.create_numeric(Number::Int(value))
    }

    fn create_float(&self, value: f32) -> Self::Value {
        self.create_numeric(Number::Float(value as f64))
    }

    fn create_double(&self, value: f64) -> Self::Value {
        self.create_numeric(Number::Float(value))
    }

    fn create_string(&self, value: &str) -> Self::Value;

    fn create_byte_buffer(&self, value: Bytes) -> Self::Value;

    fn create_int_array(&self, value: Vec<i32>) -> Self::Value;

    fn create_long_array(&self, value: Vec<i64>) -> Self::Value;

    fn create_list(&self, values: Vec<Self::Value>) -> Self::Value;

    fn create_map(&self, entries: Vec<(Self::Value, Self::Value)>) -> Self::Value;

    /// Appends a value to an existing list node.
    ///
    /// An empty existing node starts a fresh list. Any other non-list shape
    /// is a merge error.
    fn merge_to_list(&self, list: &Self::Value, value: Self::Value) -> DataResult<Self::Value> {
        if *list == self.empty() {
            return DataResult::success(self.create_list(vec![value]));
        }
        let shape = format!("{list:?}");
        self.get_list(list)
            .map_error(|_| CodecError::Merge(format!("cannot append to non-list {shape}")))
            .map(|mut items| {
                items.push(value);
                self.create_list(items)
            })
    }

    /// Inserts a key/value pair into an existing map node.
    ///
    /// An empty existing node starts a fresh map; an existing entry under the
    /// same key is replaced in place. Any other non-map shape is a merge
    /// error.
    fn merge_to_map(
        &self,
        map: &Self::Value,
        key: Self::Value,
        value: Self::Value,
    ) -> DataResult<Self::Value> {
        if *map == self.empty() {
            return DataResult::success(self.create_map(vec![(key, value)]));
        }
        let shape = format!("{map:?}");
        self.get_map_entries(map)
            .map_error(|_| CodecError::Merge(format!("cannot insert into non-map {shape}")))
            .map(|mut entries| {
                match entries.iter_mut().find(|(k, _)| *k == key) {
                    Some(entry) => entry.1 = value,
                    None => entries.push((key, value)),
                }
                self.create_map(entries)
            })
    }

    /// Removes a string key from a map node. Non-map nodes pass through
    /// unchanged.
    fn remove(&self, map: &Self::Value, key: &str) -> Self::Value {
        let key_value = self.create_string(key);
        match self.get_map_entries(map).ok() {
            Some(entries) => self.create_map(
                entries
                    .into_iter()
                    .filter(|(k, _)| *k != key_value)
                    .collect(),
            ),
            None => map.clone(),
        }
    }

    /// A fresh list builder for one encode call.
    fn list_builder(&self) -> ListBuilder<Self>
    where
        Self: Sized,
    {
        ListBuilder::new(self.clone())
    }

    /// A fresh record builder for one encode call.
    fn map_builder(&self) -> MapBuilder<Self>
    where
        Self: Sized,
    {
        MapBuilder::new(self.clone())
    }

    /// Deep structural translation of a value into another format.
    ///
    /// See [`convert`] for the shape trial order and the numeric narrowing
    /// rule.
    fn convert_to<P: DataOps>(&self, target: &P, value: &Self::Value) -> P::Value
    where
        Self: Sized,
    {
        convert(self, target, value)
    }
}

/// Deep structural translation between two formats.
///
/// Shapes are tried in order: map, byte buffer, int array, long array, list,
/// string, boolean, number. The specialized array shapes come before the
/// generic list so that a format representing arrays as plain lists still
/// translates them back into native arrays. A node matching no shape
/// translates to the target's empty value. Numbers take the narrowest exact
/// representation in the target: byte before short before int before long,
/// float or double only when no exact integral fit exists.
pub fn convert<O: DataOps, P: DataOps>(from: &O, to: &P, value: &O::Value) -> P::Value {
    if let Some(entries) = from.get_map_entries(value).ok() {
        return to.create_map(
            entries
                .iter()
                .map(|(k, v)| (convert(from, to, k), convert(from, to, v)))
                .collect(),
        );
    }
    if let Some(buffer) = from.get_byte_buffer(value).ok() {
        return to.create_byte_buffer(buffer);
    }
    if let Some(ints) = from.get_int_array(value).ok() {
        return to.create_int_array(ints);
    }
    if let Some(longs) = from.get_long_array(value).ok() {
        return to.create_long_array(longs);
    }
    if let Some(items) = from.get_list(value).ok() {
        return to.create_list(items.iter().map(|item| convert(from, to, item)).collect());
    }
    if let Some(string) = from.get_string(value).ok() {
        return to.create_string(&string);
    }
    if let Some(boolean) = from.get_boolean(value).ok() {
        return to.create_boolean(boolean);
    }
    if let Some(number) = from.get_number(value).ok() {
        return match number.narrow() {
            Narrowed::Byte(v) => to.create_byte(v),
            Narrowed::Short(v) => to.create_short(v),
            Narrowed::Int(v) => to.create_int(v),
            Narrowed::Long(v) => to.create_long(v),
            Narrowed::Float(v) => to.create_float(v),
            Narrowed::Double(v) => to.create_double(v),
        };
    }
    to.empty()
}
