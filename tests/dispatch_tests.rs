//! Tests for the dispatch codec

mod common;

use common::owned_map;
use na_codec::serial::codecs;
use na_codec::serial::{DispatchCodec, DispatchTarget};
use na_codec::{
    CodecError, DataResult, Decoder, Dynamic, Encoder, OwnedOps, OwnedValue,
};

#[derive(Debug, Clone, PartialEq)]
enum Shape {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
    Mystery,
}

fn shape_codec() -> DispatchCodec<String, Shape, OwnedOps, codecs::Str> {
    codecs::dispatch(
        "type",
        codecs::STRING,
        |shape: &Shape| match shape {
            Shape::Circle { .. } => DataResult::success("circle".to_string()),
            Shape::Rectangle { .. } => DataResult::success("rectangle".to_string()),
            Shape::Mystery => DataResult::error(CodecError::UnknownDiscriminator(
                "mystery".to_string(),
            )),
        },
        |key: &String| match key.as_str() {
            "circle" => Some(DispatchTarget::flat(
                codecs::bound(codecs::field("radius", codecs::DOUBLE), |s: &Shape| {
                    match s {
                        Shape::Circle { radius } => *radius,
                        _ => unreachable!("circle target only encodes circles"),
                    }
                })
                .build(|radius| Shape::Circle { radius }),
            )),
            "rectangle" => Some(DispatchTarget::flat(
                codecs::bound(codecs::field("width", codecs::DOUBLE), |s: &Shape| match s {
                    Shape::Rectangle { width, .. } => *width,
                    _ => unreachable!("rectangle target only encodes rectangles"),
                })
                .and(codecs::bound(
                    codecs::field("height", codecs::DOUBLE),
                    |s: &Shape| match s {
                        Shape::Rectangle { height, .. } => *height,
                        _ => unreachable!("rectangle target only encodes rectangles"),
                    },
                ))
                .build(|(width, height)| Shape::Rectangle { width, height }),
            )),
            _ => None,
        },
    )
}

#[test]
fn test_flat_dispatch_round_trip() {
    let ops = OwnedOps;
    let codec = shape_codec();

    for shape in [
        Shape::Circle { radius: 2.5 },
        Shape::Rectangle {
            width: 3.0,
            height: 4.0,
        },
    ] {
        let encoded = codec.encode_start(&ops, &shape).result().unwrap();
        assert_eq!(codec.decode(&ops, &encoded).result().unwrap(), shape);
    }
}

#[test]
fn test_discriminator_entry_matches_registered_key() {
    let ops = OwnedOps;
    let codec = shape_codec();
    let encoded = codec
        .encode_start(&ops, &Shape::Circle { radius: 1.0 })
        .result()
        .unwrap();
    let cursor = Dynamic::new(ops, encoded);
    assert_eq!(cursor.get("type").as_string_or(""), "circle");
    assert_eq!(cursor.get("radius").as_double_or(0.0), 1.0);
}

#[test]
fn test_flat_payload_shares_the_map_with_the_discriminator() {
    let ops = OwnedOps;
    let codec = shape_codec();
    let encoded = codec
        .encode_start(
            &ops,
            &Shape::Rectangle {
                width: 3.0,
                height: 4.0,
            },
        )
        .result()
        .unwrap();
    assert_eq!(
        encoded,
        owned_map(vec![
            ("type", OwnedValue::from("rectangle")),
            ("width", OwnedValue::Double(3.0)),
            ("height", OwnedValue::Double(4.0)),
        ])
    );
}

#[test]
fn test_decode_missing_discriminator_is_missing_key() {
    let ops = OwnedOps;
    let codec = shape_codec();
    let input = owned_map(vec![("radius", OwnedValue::Double(1.0))]);
    match codec.decode(&ops, &input).result() {
        Err(CodecError::MissingKey(key)) => assert_eq!(key, "type"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_decode_unknown_discriminator_is_strict() {
    let ops = OwnedOps;
    let codec = shape_codec();
    let input = owned_map(vec![("type", OwnedValue::from("hexagon"))]);
    match codec.decode(&ops, &input).result() {
        Err(CodecError::UnknownDiscriminator(key)) => assert_eq!(key, "hexagon"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_encode_unregistered_value_leaves_prefix_untouched() {
    let ops = OwnedOps;
    let codec = shape_codec();
    let encoded = codec.encode_start(&ops, &Shape::Mystery).result().unwrap();
    assert_eq!(encoded, OwnedValue::Empty);

    let prefix = owned_map(vec![("kept", OwnedValue::Bool(true))]);
    let encoded = codec
        .encode(&ops, &Shape::Mystery, prefix.clone())
        .result()
        .unwrap();
    assert_eq!(encoded, prefix);
}

#[derive(Debug, Clone, PartialEq)]
enum Tagged {
    Num(i64),
    Text(String),
}

fn tagged_codec() -> DispatchCodec<String, Tagged, OwnedOps, codecs::Str> {
    codecs::dispatch(
        "type",
        codecs::STRING,
        |value: &Tagged| {
            DataResult::success(match value {
                Tagged::Num(_) => "num".to_string(),
                Tagged::Text(_) => "text".to_string(),
            })
        },
        |key: &String| match key.as_str() {
            "num" => Some(DispatchTarget::nested(codecs::xmap(
                codecs::LONG,
                Tagged::Num,
                |value: &Tagged| match value {
                    Tagged::Num(num) => *num,
                    _ => unreachable!("num target only encodes numbers"),
                },
            ))),
            "text" => Some(DispatchTarget::nested(codecs::xmap(
                codecs::STRING,
                Tagged::Text,
                |value: &Tagged| match value {
                    Tagged::Text(text) => text.clone(),
                    _ => unreachable!("text target only encodes text"),
                },
            ))),
            _ => None,
        },
    )
}

#[test]
fn test_nested_dispatch_round_trip() {
    let ops = OwnedOps;
    let codec = tagged_codec();

    for value in [Tagged::Num(99), Tagged::Text("hi".into())] {
        let encoded = codec.encode_start(&ops, &value).result().unwrap();
        assert_eq!(codec.decode(&ops, &encoded).result().unwrap(), value);
    }
}

#[test]
fn test_nested_dispatch_writes_payload_under_value_key() {
    let ops = OwnedOps;
    let codec = tagged_codec();
    let encoded = codec
        .encode_start(&ops, &Tagged::Num(99))
        .result()
        .unwrap();
    assert_eq!(
        encoded,
        owned_map(vec![
            ("type", OwnedValue::from("num")),
            ("value", OwnedValue::Long(99)),
        ])
    );
}

#[test]
fn test_nested_dispatch_missing_payload_is_missing_key() {
    let ops = OwnedOps;
    let codec = tagged_codec();
    let input = owned_map(vec![("type", OwnedValue::from("num"))]);
    match codec.decode(&ops, &input).result() {
        Err(CodecError::MissingKey(key)) => assert_eq!(key, "value"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Colliding {
    type_name: String,
}

#[test]
fn test_flat_payload_collision_drops_payload_entry() {
    let ops = OwnedOps;
    let codec: DispatchCodec<String, Colliding, OwnedOps, codecs::Str> = codecs::dispatch(
        "type",
        codecs::STRING,
        |_: &Colliding| DataResult::success("colliding".to_string()),
        |key: &String| {
            (key == "colliding").then(|| {
                DispatchTarget::flat(
                    codecs::bound(codecs::field("type", codecs::STRING), |c: &Colliding| {
                        c.type_name.clone()
                    })
                    .build(|type_name| Colliding { type_name }),
                )
            })
        },
    );

    let encoded = codec
        .encode_start(
            &ops,
            &Colliding {
                type_name: "impostor".into(),
            },
        )
        .result()
        .unwrap();
    // The discriminator written by the dispatch codec is authoritative.
    assert_eq!(
        encoded,
        owned_map(vec![("type", OwnedValue::from("colliding"))])
    );
}

#[test]
fn test_custom_value_key() {
    let ops = OwnedOps;
    let codec = tagged_codec().with_value_key("payload");
    let encoded = codec
        .encode_start(&ops, &Tagged::Text("hi".into()))
        .result()
        .unwrap();
    assert_eq!(
        encoded,
        owned_map(vec![
            ("type", OwnedValue::from("text")),
            ("payload", OwnedValue::from("hi")),
        ])
    );
    assert_eq!(
        codec.decode(&ops, &encoded).result().unwrap(),
        Tagged::Text("hi".into())
    );
}
