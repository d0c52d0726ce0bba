//! The crate's own in-memory tree and its bridge implementation.
//!
//! [`OwnedValue`] is a neutral materialized tree with the full shape
//! vocabulary, including native numeric widths, and [`OwnedOps`] is the
//! reference implementation of [`DataOps`] over it. It backs the crate's
//! tests, benches and examples; concrete wire-format adapters live outside
//! this crate and only have to satisfy the same contract.

use bytes::Bytes;

use crate::{CodecError, DataOps, DataResult, Number};

/// A materialized tree node.
///
/// Maps preserve insertion order and never hold two entries under one key
/// when produced by this crate's builders.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedValue {
    Empty,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    ByteBuffer(Bytes),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    List(Vec<OwnedValue>),
    Map(Vec<(OwnedValue, OwnedValue)>),
}

impl OwnedValue {
    /// The shape name, for diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            OwnedValue::Empty => "empty",
            OwnedValue::Bool(_) => "boolean",
            OwnedValue::Byte(_) => "byte",
            OwnedValue::Short(_) => "short",
            OwnedValue::Int(_) => "int",
            OwnedValue::Long(_) => "long",
            OwnedValue::Float(_) => "float",
            OwnedValue::Double(_) => "double",
            OwnedValue::String(_) => "string",
            OwnedValue::ByteBuffer(_) => "byte buffer",
            OwnedValue::IntArray(_) => "int array",
            OwnedValue::LongArray(_) => "long array",
            OwnedValue::List(_) => "list",
            OwnedValue::Map(_) => "map",
        }
    }

    /// Whether this node is a numeric leaf.
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            OwnedValue::Byte(_)
                | OwnedValue::Short(_)
                | OwnedValue::Int(_)
                | OwnedValue::Long(_)
                | OwnedValue::Float(_)
                | OwnedValue::Double(_)
        )
    }
}

impl From<bool> for OwnedValue {
    fn from(value: bool) -> Self {
        OwnedValue::Bool(value)
    }
}

impl From<i32> for OwnedValue {
    fn from(value: i32) -> Self {
        OwnedValue::Int(value)
    }
}

impl From<i64> for OwnedValue {
    fn from(value: i64) -> Self {
        OwnedValue::Long(value)
    }
}

impl From<f64> for OwnedValue {
    fn from(value: f64) -> Self {
        OwnedValue::Double(value)
    }
}

impl From<&str> for OwnedValue {
    fn from(value: &str) -> Self {
        OwnedValue::String(value.to_string())
    }
}

impl From<String> for OwnedValue {
    fn from(value: String) -> Self {
        OwnedValue::String(value)
    }
}

/// The bridge over [`OwnedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OwnedOps;

impl DataOps for OwnedOps {
    type Value = OwnedValue;

    fn empty(&self) -> OwnedValue {
        OwnedValue::Empty
    }

    fn get_boolean(&self, value: &OwnedValue) -> DataResult<bool> {
        match value {
            OwnedValue::Bool(boolean) => DataResult::success(*boolean),
            other => DataResult::error(mismatch("a boolean", other)),
        }
    }

    fn get_number(&self, value: &OwnedValue) -> DataResult<Number> {
        match value {
            OwnedValue::Byte(v) => DataResult::success(Number::Int(*v as i64)),
            OwnedValue::Short(v) => DataResult::success(Number::Int(*v as i64)),
            OwnedValue::Int(v) => DataResult::success(Number::Int(*v as i64)),
            OwnedValue::Long(v) => DataResult::success(Number::Int(*v)),
            OwnedValue::Float(v) => DataResult::success(Number::Float(*v as f64)),
            OwnedValue::Double(v) => DataResult::success(Number::Float(*v)),
            other => DataResult::error(mismatch("a number", other)),
        }
    }

    fn get_string(&self, value: &OwnedValue) -> DataResult<String> {
        match value {
            OwnedValue::String(string) => DataResult::success(string.clone()),
            other => DataResult::error(mismatch("a string", other)),
        }
    }

    fn get_byte_buffer(&self, value: &OwnedValue) -> DataResult<Bytes> {
        match value {
            OwnedValue::ByteBuffer(buffer) => DataResult::success(buffer.clone()),
            other => DataResult::error(mismatch("a byte buffer", other)),
        }
    }

    fn get_int_array(&self, value: &OwnedValue) -> DataResult<Vec<i32>> {
        match value {
            OwnedValue::IntArray(ints) => DataResult::success(ints.clone()),
            other => DataResult::error(mismatch("an int array", other)),
        }
    }

    fn get_long_array(&self, value: &OwnedValue) -> DataResult<Vec<i64>> {
        match value {
            OwnedValue::LongArray(longs) => DataResult::success(longs.clone()),
            other => DataResult::error(mismatch("a long array", other)),
        }
    }

    fn get_list(&self, value: &OwnedValue) -> DataResult<Vec<OwnedValue>> {
        match value {
            OwnedValue::List(items) => DataResult::success(items.clone()),
            other => DataResult::error(mismatch("a list", other)),
        }
    }

    fn get_map_entries(&self, value: &OwnedValue) -> DataResult<Vec<(OwnedValue, OwnedValue)>> {
        match value {
            OwnedValue::Map(entries) => DataResult::success(entries.clone()),
            other => DataResult::error(mismatch("a map", other)),
        }
    }

    fn create_boolean(&self, value: bool) -> OwnedValue {
        OwnedValue::Bool(value)
    }

    /// Generic numbers take their narrowest exact shape.
    fn create_numeric(&self, value: Number) -> OwnedValue {
        match value.narrow() {
            crate::Narrowed::Byte(v) => OwnedValue::Byte(v),
            crate::Narrowed::Short(v) => OwnedValue::Short(v),
            crate::Narrowed::Int(v) => OwnedValue::Int(v),
            crate::Narrowed::Long(v) => OwnedValue::Long(v),
            crate::Narrowed::Float(v) => OwnedValue::Float(v),
            crate::Narrowed::Double(v) => OwnedValue::Double(v),
        }
    }

    fn create_byte(&self, value: i8) -> OwnedValue {
        OwnedValue::Byte(value)
    }

    fn create_short(&self, value: i16) -> OwnedValue {
        OwnedValue::Short(value)
    }

    fn create_int(&self, value: i32) -> OwnedValue {
        OwnedValue::Int(value)
    }

    fn create_long(&self, value: i64) -> OwnedValue {
        OwnedValue::Long(value)
    }

    fn create_float(&self, value: f32) -> OwnedValue {
        OwnedValue::Float(value)
    }

    fn create_double(&self, value: f64) -> OwnedValue {
        OwnedValue::Double(value)
    }

    fn create_string(&self, value: &str) -> OwnedValue {
        OwnedValue::String(value.to_string())
    }

    fn create_byte_buffer(&self, value: Bytes) -> OwnedValue {
        OwnedValue::ByteBuffer(value)
    }

    fn create_int_array(&self, value: Vec<i32>) -> OwnedValue {
        OwnedValue::IntArray(value)
    }

    fn create_long_array(&self, value: Vec<i64>) -> OwnedValue {
        OwnedValue::LongArray(value)
    }

    fn create_list(&self, values: Vec<OwnedValue>) -> OwnedValue {
        OwnedValue::List(values)
    }

    fn create_map(&self, entries: Vec<(OwnedValue, OwnedValue)>) -> OwnedValue {
        OwnedValue::Map(entries)
    }
}

fn mismatch(expected: &'static str, actual: &OwnedValue) -> CodecError {
    CodecError::TypeMismatch {
        expected,
        actual: format!("{} ({actual:?})", actual.kind()),
    }
}
