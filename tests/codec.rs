use chrono::SecondsFormat;
use serialized_attributes::cast::cast;
use serialized_attributes::{
    AttributeError, AttributeInput, AttributeKind, BlobFormat, RawNumber, RawValue, decode,
    decode_with, encode, encode_into, encode_with, raw_map,
};

fn all_kinds() -> serialized_attributes::RawMap {
    raw_map!({
        "title" => "abc",
        "age" => -5i64,
        "big" => u64::MAX,
        "average" => 5.1,
        "birthday" => "2020-01-01T00:00:00Z",
        "active" => true,
        "inactive" => false,
    })
}

#[test]
fn cbor_round_trips_every_scalar_kind() {
    let map = all_kinds();
    let blob = encode(&map).unwrap();
    assert_eq!(decode(Some(blob.as_slice())).unwrap(), map);
}

#[test]
fn json_round_trips_every_scalar_kind() {
    let map = all_kinds();
    let blob = encode_with(BlobFormat::Json, &map).unwrap();
    assert_eq!(decode_with(BlobFormat::Json, Some(blob.as_slice())).unwrap(), map);
}

#[test]
fn integral_floats_stay_floats() {
    let map = raw_map!({ "average" => 5.0 });
    for format in [BlobFormat::Cbor, BlobFormat::Json] {
        let blob = encode_with(format, &map).unwrap();
        let decoded = decode_with(format, Some(blob.as_slice())).unwrap();
        assert_eq!(
            decoded.get("average"),
            Some(&RawValue::Number(RawNumber::F64(5.0))),
            "{format:?}"
        );
    }
}

#[test]
fn absent_and_empty_blobs_decode_to_empty_maps() {
    assert!(decode(None).unwrap().is_empty());
    assert!(decode(Some(&[] as &[u8])).unwrap().is_empty());
    assert!(decode_with(BlobFormat::Json, None).unwrap().is_empty());
}

#[test]
fn empty_map_round_trips() {
    let blob = encode(&Default::default()).unwrap();
    assert!(!blob.is_empty());
    assert!(decode(Some(blob.as_slice())).unwrap().is_empty());
}

#[test]
fn malformed_blobs_fail() {
    assert!(matches!(
        decode_with(BlobFormat::Json, Some(&b"{\"title\":"[..])),
        Err(AttributeError::Decode(_))
    ));
    assert!(matches!(
        decode(Some(&b"\xbf\x61"[..])),
        Err(AttributeError::Decode(_))
    ));
}

#[test]
fn non_map_blobs_fail() {
    let list = serde_json::to_vec(&serde_json::json!([1, 2])).unwrap();
    assert!(matches!(
        decode_with(BlobFormat::Json, Some(list.as_slice())),
        Err(AttributeError::NotAMap)
    ));

    // text "abc"
    assert!(matches!(decode(Some(&b"\x63abc"[..])), Err(AttributeError::NotAMap)));
}

#[test]
fn integer_keys_are_rejected() {
    // {1: true}
    assert!(matches!(
        decode(Some(&b"\xa1\x01\xf5"[..])),
        Err(AttributeError::NonStringKey)
    ));
}

#[test]
fn nested_foreign_values_pass_through() {
    let json = br#"{"title":"abc","tags":["a","b"],"meta":{"x":1}}"#;
    let map = decode_with(BlobFormat::Json, Some(json)).unwrap();
    assert!(matches!(map.get("tags"), Some(RawValue::Array(items)) if items.len() == 2));

    let blob = encode(&map).unwrap();
    assert_eq!(decode(Some(blob.as_slice())).unwrap(), map);
}

#[test]
fn encode_into_reuses_the_buffer() {
    let mut buf = Vec::with_capacity(256);
    encode_into(BlobFormat::Cbor, &all_kinds(), &mut buf).unwrap();
    let first = buf.clone();
    encode_into(BlobFormat::Cbor, &all_kinds(), &mut buf).unwrap();
    assert_eq!(buf, first);
    assert!(buf.capacity() >= 256);
}

#[test]
fn serde_json_values_convert() {
    assert_eq!(RawValue::from(serde_json::json!("abc")), RawValue::from("abc"));
    let back = RawValue::from(serde_json::json!(5));
    assert_eq!(back.as_i64(), Some(5));
    assert_eq!(RawValue::from(serde_json::json!(null)), RawValue::Null);
}

#[test]
fn overflowing_floats_round_trip_in_both_formats() {
    let input = AttributeInput::from("1e400");
    let average = cast(AttributeKind::Float, &input, SecondsFormat::AutoSi).unwrap();
    let map = raw_map!({ "average" => average });
    for format in [BlobFormat::Cbor, BlobFormat::Json] {
        let blob = encode_with(format, &map).unwrap();
        assert_eq!(
            decode_with(format, Some(blob.as_slice())).unwrap(),
            map,
            "{format:?}"
        );
    }
}
