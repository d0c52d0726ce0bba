//! Tests for the navigation cursor

mod common;

use common::{JsonOps, json_obj, owned_map};
use na_codec::serial::codecs;
use na_codec::{CodecError, Dynamic, OwnedOps, OwnedValue};

fn sample() -> Dynamic<OwnedOps> {
    Dynamic::new(
        OwnedOps,
        owned_map(vec![
            (
                "server",
                owned_map(vec![
                    ("host", OwnedValue::from("example.net")),
                    ("port", OwnedValue::Int(25_565)),
                    ("hardcore", OwnedValue::Bool(true)),
                ]),
            ),
            (
                "players",
                OwnedValue::List(vec![OwnedValue::from("ada"), OwnedValue::from("grace")]),
            ),
        ]),
    )
}

#[test]
fn test_chained_get_reads_nested_values() {
    let root = sample();
    assert_eq!(
        root.get("server").get("host").as_string_or(""),
        "example.net"
    );
    assert_eq!(root.get("server").get("port").as_int_or(0), 25_565);
    assert!(root.get("server").get("hardcore").as_boolean_or(false));
}

#[test]
fn test_chained_get_short_circuits_on_first_missing_key() {
    let root = sample();
    let missing = root.get("cluster").get("host").get("name");
    match missing.result() {
        na_codec::DataResult::Error { error, .. } => {
            assert_eq!(*error, CodecError::MissingKey("cluster".to_string()));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_error_is_deferred_until_consumption() {
    let root = sample();
    // Building the cursor chain must not fail by itself.
    let cursor = root.get("nope").get("deeper");
    assert_eq!(cursor.as_int_or(-1), -1);
    assert!(cursor.as_int().is_error());
}

#[test]
fn test_defaults_swallow_type_errors_too() {
    let root = sample();
    // "players" exists but is not an int.
    assert_eq!(root.get("players").as_int_or(7), 7);
    assert_eq!(root.get("players").as_string_or("none"), "none");
}

#[test]
fn test_as_list_wraps_elements() {
    let root = sample();
    let players = root.get("players").as_list().result().unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].as_string_or(""), "ada");
    assert_eq!(players[1].as_string_or(""), "grace");
}

#[test]
fn test_as_map_entries_wraps_both_sides() {
    let root = sample();
    let entries = root
        .get("server")
        .into_result()
        .result()
        .unwrap()
        .as_map_entries()
        .result()
        .unwrap();
    assert_eq!(entries[0].0.as_string_or(""), "host");
    assert_eq!(entries[0].1.as_string_or(""), "example.net");
}

#[test]
fn test_decode_at_cursor() {
    let root = sample();
    let port = root
        .get("server")
        .get("port")
        .decode(&codecs::ranged(codecs::INT, 1, 65_535));
    assert_eq!(port.result().unwrap(), 25_565);
}

#[test]
fn test_set_remove_update_produce_new_cursors() {
    let root = sample();

    let with_motd = root.set("motd", OwnedValue::from("welcome"));
    assert_eq!(with_motd.get("motd").as_string_or(""), "welcome");
    // The original cursor is untouched.
    assert!(root.get("motd").as_string().is_error());

    let without_players = root.remove("players");
    assert!(without_players.get("players").as_list().is_error());
    assert!(root.get("players").as_list().is_success());

    let rewired = root.update("server", |server| {
        server.set("port", OwnedValue::Int(1_025))
    });
    assert_eq!(rewired.get("server").get("port").as_int_or(0), 1_025);
    assert_eq!(root.get("server").get("port").as_int_or(0), 25_565);
}

#[test]
fn test_set_on_non_map_is_a_no_op() {
    let leaf = Dynamic::new(OwnedOps, OwnedValue::Int(3));
    let unchanged = leaf.set("key", OwnedValue::Bool(true));
    assert_eq!(unchanged.value(), &OwnedValue::Int(3));
}

#[test]
fn test_update_missing_key_is_a_no_op() {
    let root = sample();
    let unchanged = root.update("missing", |child| child);
    assert_eq!(unchanged.value(), root.value());
}

#[test]
fn test_convert_carries_the_cursor_across_formats() {
    let root = sample();
    let json = root.convert(&JsonOps);
    assert_eq!(
        json.get("server").get("host").as_string_or(""),
        "example.net"
    );
    assert_eq!(json.get("server").get("port").as_int_or(0), 25_565);
}

#[test]
fn test_empty_cursor() {
    let empty = Dynamic::empty(OwnedOps);
    assert_eq!(empty.value(), &OwnedValue::Empty);
    assert!(empty.get("anything").as_int().is_error());
}

#[test]
fn test_json_cursor_reads() {
    let root = Dynamic::new(
        JsonOps,
        json_obj(vec![(
            "limits",
            json_obj(vec![("max", common::JsonValue::from(10i64))]),
        )]),
    );
    assert_eq!(root.get("limits").get("max").as_int_or(0), 10);
    assert_eq!(root.get("limits").get("min").as_int_or(0), 0);
}
