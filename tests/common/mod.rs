//! Shared test support: a JSON-shaped backend with string keys and a single
//! number shape, next to the crate's own `OwnedOps`.

#![allow(dead_code)]

use bytes::Bytes;
use na_codec::{CodecError, DataOps, DataResult, Number, OwnedValue};

/// A JSON-style tree: null, booleans, one number shape, strings, arrays and
/// string-keyed objects. Byte buffers and int/long arrays are represented as
/// arrays of numbers, the way a JSON format has to.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<JsonValue>),
    Object(Vec<(String, JsonValue)>),
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Number(Number::Int(value))
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Number(Number::Float(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonOps;

impl DataOps for JsonOps {
    type Value = JsonValue;

    fn empty(&self) -> JsonValue {
        JsonValue::Null
    }

    fn get_boolean(&self, value: &JsonValue) -> DataResult<bool> {
        match value {
            JsonValue::Bool(boolean) => DataResult::success(*boolean),
            other => DataResult::error(CodecError::type_mismatch("a boolean", other)),
        }
    }

    fn get_number(&self, value: &JsonValue) -> DataResult<Number> {
        match value {
            JsonValue::Number(number) => DataResult::success(*number),
            other => DataResult::error(CodecError::type_mismatch("a number", other)),
        }
    }

    fn get_string(&self, value: &JsonValue) -> DataResult<String> {
        match value {
            JsonValue::String(string) => DataResult::success(string.clone()),
            other => DataResult::error(CodecError::type_mismatch("a string", other)),
        }
    }

    fn get_byte_buffer(&self, value: &JsonValue) -> DataResult<Bytes> {
        match value {
            JsonValue::Array(items) => {
                let mut bytes = Vec::with_capacity(items.len());
                for item in items {
                    let byte = match item {
                        JsonValue::Number(number) => number
                            .as_i64()
                            .and_then(|int| u8::try_from(int).ok()),
                        _ => None,
                    };
                    match byte {
                        Some(byte) => bytes.push(byte),
                        None => {
                            return DataResult::error(CodecError::type_mismatch(
                                "a byte buffer",
                                value,
                            ));
                        }
                    }
                }
                DataResult::success(Bytes::from(bytes))
            }
            other => DataResult::error(CodecError::type_mismatch("a byte buffer", other)),
        }
    }

    fn get_int_array(&self, value: &JsonValue) -> DataResult<Vec<i32>> {
        match value {
            JsonValue::Array(items) => {
                let mut ints = Vec::with_capacity(items.len());
                for item in items {
                    let int = match item {
                        JsonValue::Number(number) => number
                            .as_i64()
                            .and_then(|int| i32::try_from(int).ok()),
                        _ => None,
                    };
                    match int {
                        Some(int) => ints.push(int),
                        None => {
                            return DataResult::error(CodecError::type_mismatch(
                                "an int array",
                                value,
                            ));
                        }
                    }
                }
                DataResult::success(ints)
            }
            other => DataResult::error(CodecError::type_mismatch("an int array", other)),
        }
    }

    fn get_long_array(&self, value: &JsonValue) -> DataResult<Vec<i64>> {
        match value {
            JsonValue::Array(items) => {
                let mut longs = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        JsonValue::Number(number) if number.as_i64().is_some() => {
                            longs.push(number.as_i64().expect("checked"));
                        }
                        _ => {
                            return DataResult::error(CodecError::type_mismatch(
                                "a long array",
                                value,
                            ));
                        }
                    }
                }
                DataResult::success(longs)
            }
            other => DataResult::error(CodecError::type_mismatch("a long array", other)),
        }
    }

    fn get_list(&self, value: &JsonValue) -> DataResult<Vec<JsonValue>> {
        match value {
            JsonValue::Array(items) => DataResult::success(items.clone()),
            other => DataResult::error(CodecError::type_mismatch("a list", other)),
        }
    }

    fn get_map_entries(&self, value: &JsonValue) -> DataResult<Vec<(JsonValue, JsonValue)>> {
        match value {
            JsonValue::Object(entries) => DataResult::success(
                entries
                    .iter()
                    .map(|(key, value)| (JsonValue::String(key.clone()), value.clone()))
                    .collect(),
            ),
            other => DataResult::error(CodecError::type_mismatch("a map", other)),
        }
    }

    fn create_boolean(&self, value: bool) -> JsonValue {
        JsonValue::Bool(value)
    }

    fn create_numeric(&self, value: Number) -> JsonValue {
        JsonValue::Number(value)
    }

    fn create_string(&self, value: &str) -> JsonValue {
        JsonValue::String(value.to_string())
    }

    fn create_byte_buffer(&self, value: Bytes) -> JsonValue {
        JsonValue::Array(
            value
                .iter()
                .map(|byte| JsonValue::Number(Number::Int(*byte as i64)))
                .collect(),
        )
    }

    fn create_int_array(&self, value: Vec<i32>) -> JsonValue {
        JsonValue::Array(
            value
                .into_iter()
                .map(|int| JsonValue::Number(Number::Int(int as i64)))
                .collect(),
        )
    }

    fn create_long_array(&self, value: Vec<i64>) -> JsonValue {
        JsonValue::Array(
            value
                .into_iter()
                .map(|long| JsonValue::Number(Number::Int(long)))
                .collect(),
        )
    }

    fn create_list(&self, values: Vec<JsonValue>) -> JsonValue {
        JsonValue::Array(values)
    }

    fn create_map(&self, entries: Vec<(JsonValue, JsonValue)>) -> JsonValue {
        JsonValue::Object(
            entries
                .into_iter()
                .map(|(key, value)| {
                    let key = match key {
                        JsonValue::String(string) => string,
                        other => format!("{other:?}"),
                    };
                    (key, value)
                })
                .collect(),
        )
    }
}

/// Shorthand for a JSON object with string keys.
pub fn json_obj(entries: Vec<(&str, JsonValue)>) -> JsonValue {
    JsonValue::Object(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    )
}

/// Shorthand for an owned map with string keys.
pub fn owned_map(entries: Vec<(&str, OwnedValue)>) -> OwnedValue {
    OwnedValue::Map(
        entries
            .into_iter()
            .map(|(key, value)| (OwnedValue::from(key), value))
            .collect(),
    )
}
