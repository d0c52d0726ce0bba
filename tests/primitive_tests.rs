//! Tests for the primitive codecs

mod common;

use bytes::Bytes;
use common::{JsonOps, JsonValue};
use na_codec::serial::codecs;
use na_codec::{CodecError, Decoder, Encoder, Number, OwnedOps, OwnedValue};

#[test]
fn test_bool_round_trip_on_both_backends() {
    let ops = OwnedOps;
    let encoded = codecs::BOOL.encode_start(&ops, &true).result().unwrap();
    assert_eq!(encoded, OwnedValue::Bool(true));
    assert!(codecs::BOOL.decode(&ops, &encoded).result().unwrap());

    let ops = JsonOps;
    let encoded = codecs::BOOL.encode_start(&ops, &false).result().unwrap();
    assert_eq!(encoded, JsonValue::Bool(false));
    assert!(!codecs::BOOL.decode(&ops, &encoded).result().unwrap());
}

#[test]
fn test_integral_codecs_use_native_widths_on_owned() {
    let ops = OwnedOps;
    assert_eq!(
        codecs::BYTE.encode_start(&ops, &7).result().unwrap(),
        OwnedValue::Byte(7)
    );
    assert_eq!(
        codecs::SHORT.encode_start(&ops, &7).result().unwrap(),
        OwnedValue::Short(7)
    );
    assert_eq!(
        codecs::INT.encode_start(&ops, &7).result().unwrap(),
        OwnedValue::Int(7)
    );
    assert_eq!(
        codecs::LONG.encode_start(&ops, &7).result().unwrap(),
        OwnedValue::Long(7)
    );
}

#[test]
fn test_integral_round_trip_on_json() {
    let ops = JsonOps;
    let encoded = codecs::INT.encode_start(&ops, &123_456).result().unwrap();
    assert_eq!(encoded, JsonValue::Number(Number::Int(123_456)));
    assert_eq!(codecs::INT.decode(&ops, &encoded).result().unwrap(), 123_456);
}

#[test]
fn test_integral_decode_overflow_is_range_error() {
    let ops = OwnedOps;
    let wide = OwnedValue::Int(300);
    match codecs::BYTE.decode(&ops, &wide).result() {
        Err(CodecError::Range { value, .. }) => assert_eq!(value, "300"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_integral_decode_rejects_fractional() {
    let ops = OwnedOps;
    let fractional = OwnedValue::Double(1.5);
    match codecs::INT.decode(&ops, &fractional).result() {
        Err(CodecError::TypeMismatch { .. }) => {}
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_float_and_double_round_trip() {
    let ops = OwnedOps;
    let encoded = codecs::FLOAT.encode_start(&ops, &1.5f32).result().unwrap();
    assert_eq!(encoded, OwnedValue::Float(1.5));
    assert_eq!(codecs::FLOAT.decode(&ops, &encoded).result().unwrap(), 1.5);

    let encoded = codecs::DOUBLE.encode_start(&ops, &0.1f64).result().unwrap();
    assert_eq!(encoded, OwnedValue::Double(0.1));
    assert_eq!(codecs::DOUBLE.decode(&ops, &encoded).result().unwrap(), 0.1);
}

#[test]
fn test_string_round_trip() {
    let ops = OwnedOps;
    let encoded = codecs::STRING
        .encode_start(&ops, &"hello".to_string())
        .result()
        .unwrap();
    assert_eq!(encoded, OwnedValue::from("hello"));
    assert_eq!(
        codecs::STRING.decode(&ops, &encoded).result().unwrap(),
        "hello"
    );
}

#[test]
fn test_byte_buffer_round_trip_on_both_backends() {
    let buffer = Bytes::from_static(&[1, 2, 250]);

    let ops = OwnedOps;
    let encoded = codecs::BYTE_BUFFER
        .encode_start(&ops, &buffer)
        .result()
        .unwrap();
    assert_eq!(encoded, OwnedValue::ByteBuffer(buffer.clone()));
    assert_eq!(
        codecs::BYTE_BUFFER.decode(&ops, &encoded).result().unwrap(),
        buffer
    );

    let ops = JsonOps;
    let encoded = codecs::BYTE_BUFFER
        .encode_start(&ops, &buffer)
        .result()
        .unwrap();
    assert_eq!(
        codecs::BYTE_BUFFER.decode(&ops, &encoded).result().unwrap(),
        buffer
    );
}

#[test]
fn test_int_and_long_array_round_trip() {
    let ops = OwnedOps;
    let encoded = codecs::INT_ARRAY
        .encode_start(&ops, &vec![1, -2, 3])
        .result()
        .unwrap();
    assert_eq!(encoded, OwnedValue::IntArray(vec![1, -2, 3]));
    assert_eq!(
        codecs::INT_ARRAY.decode(&ops, &encoded).result().unwrap(),
        vec![1, -2, 3]
    );

    let encoded = codecs::LONG_ARRAY
        .encode_start(&ops, &vec![1i64 << 40])
        .result()
        .unwrap();
    assert_eq!(
        codecs::LONG_ARRAY.decode(&ops, &encoded).result().unwrap(),
        vec![1i64 << 40]
    );
}

#[test]
fn test_accessor_mismatch_is_type_mismatch() {
    let ops = OwnedOps;
    match codecs::STRING
        .decode(&ops, &OwnedValue::Int(3))
        .result()
    {
        Err(CodecError::TypeMismatch { expected, .. }) => assert_eq!(expected, "a string"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_primitive_encode_requires_empty_prefix() {
    let ops = OwnedOps;
    let prefix = OwnedValue::Int(1);
    match codecs::BOOL.encode(&ops, &true, prefix).result() {
        Err(CodecError::Merge(_)) => {}
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_unit_codec_writes_nothing_and_decodes_value() {
    let ops = OwnedOps;
    let unit = codecs::unit(42i32);
    let encoded = unit.encode_start(&ops, &42).result().unwrap();
    assert_eq!(encoded, OwnedValue::Empty);
    assert_eq!(unit.decode(&ops, &OwnedValue::Bool(true)).result().unwrap(), 42);
}

#[test]
fn test_ranged_rejects_on_both_sides() {
    let ops = OwnedOps;
    let age = codecs::ranged(codecs::INT, 0, 150);
    assert_eq!(
        age.decode(&ops, &OwnedValue::Int(36)).result().unwrap(),
        36
    );
    match age.decode(&ops, &OwnedValue::Int(200)).result() {
        Err(CodecError::Range { value, min, max }) => {
            assert_eq!(value, "200");
            assert_eq!(min, "0");
            assert_eq!(max, "150");
        }
        other => panic!("unexpected: {other:?}"),
    }
    match age.encode_start(&ops, &-1).result() {
        Err(CodecError::Range { .. }) => {}
        other => panic!("unexpected: {other:?}"),
    }
}
