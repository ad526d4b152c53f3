// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Schema evolution: older decoders skip fields they do not know, newer
// decoders fill defaults for fields older producers never sent.

use safeparcel::harness::{assert_skip_exact, skip_offsets};
use safeparcel::schema::RecordDescriptorBuilder;
use safeparcel::{decode, encode, walk, FieldKind, Value, ValueMap};

#[test]
fn test_unknown_tag_skipped() {
    let newer = RecordDescriptorBuilder::new("Profile")
        .field(1, FieldKind::Int32)
        .field(2, FieldKind::String)
        .field(3, FieldKind::Int64)
        .build()
        .expect("newer");
    let older = RecordDescriptorBuilder::new("Profile")
        .field(1, FieldKind::Int32)
        .field(3, FieldKind::Int64)
        .build()
        .expect("older");

    let mut values = ValueMap::new();
    values.insert(1, Value::Int32(10));
    values.insert(2, Value::from("seven"));
    values.insert(3, Value::Int64(30));
    let bytes = encode(&newer, &values).expect("encode");

    // Tag 2 occupies header + length + "seven" + 3 bytes of padding.
    let entries: Vec<_> = walk(&bytes)
        .expect("envelope")
        .collect::<Result<_, _>>()
        .expect("entries");
    let tag2 = entries
        .iter()
        .position(|e| e.header.tag == 2)
        .expect("tag 2 on the wire");
    assert_eq!(entries[tag2 + 1].offset - entries[tag2].offset, 4 + 4 + 8);

    let decoded = decode(&older, &bytes).expect("older decode");
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded.get(&1), Some(&Value::Int32(10)));
    assert_eq!(decoded.get(&3), Some(&Value::Int64(30)));
    assert!(decoded.get(&2).is_none());
}

#[test]
fn test_unknown_nested_record_and_array_skipped() {
    let inner = RecordDescriptorBuilder::new("Inner")
        .field(1, FieldKind::StringArray)
        .build_handle()
        .expect("inner");
    let newer = RecordDescriptorBuilder::new("Outer")
        .field(1, FieldKind::Bool)
        .record(2, &inner)
        .record_array(3, &inner)
        .field(4, FieldKind::Int32)
        .build()
        .expect("newer");
    let older = RecordDescriptorBuilder::new("Outer")
        .field(1, FieldKind::Bool)
        .field(4, FieldKind::Int32)
        .build()
        .expect("older");

    let mut nested = ValueMap::new();
    nested.insert(1, Value::StringArray(vec!["x".into(), "yz".into()]));
    let mut values = ValueMap::new();
    values.insert(1, Value::Bool(true));
    values.insert(2, Value::Record(nested.clone()));
    values.insert(3, Value::RecordArray(vec![nested.clone(), nested]));
    values.insert(4, Value::Int32(-4));

    let decoded = decode(&older, &encode(&newer, &values).expect("encode")).expect("decode");
    assert_eq!(decoded.get(&1), Some(&Value::Bool(true)));
    assert_eq!(decoded.get(&4), Some(&Value::Int32(-4)));
    assert_eq!(decoded.len(), 2);
}

#[test]
fn test_new_optional_field_defaults_for_old_payload() {
    let older = RecordDescriptorBuilder::new("Settings")
        .field(1, FieldKind::Int32)
        .build()
        .expect("older");
    let newer = RecordDescriptorBuilder::new("Settings")
        .field(1, FieldKind::Int32)
        .optional(2, FieldKind::String, "")
        .optional(3, FieldKind::BoolArray, Vec::<bool>::new())
        .build()
        .expect("newer");

    let mut values = ValueMap::new();
    values.insert(1, Value::Int32(42));
    let decoded = decode(&newer, &encode(&older, &values).expect("encode")).expect("decode");

    let mut expected = ValueMap::new();
    expected.insert(1, Value::Int32(42));
    expected.insert(2, Value::String(String::new()));
    expected.insert(3, Value::BoolArray(Vec::new()));
    assert_eq!(decoded, expected);
}

#[test]
fn test_skip_consumes_exact_bytes_per_wire_type() {
    let point = RecordDescriptorBuilder::new("P")
        .field(1, FieldKind::Int32)
        .build_handle()
        .expect("p");
    let mut p = ValueMap::new();
    p.insert(1, Value::Int32(1));

    let cases = vec![
        (FieldKind::Bool, Value::Bool(true)),
        (FieldKind::Int32, Value::Int32(-1)),
        (FieldKind::Float32, Value::Float32(1.5)),
        (FieldKind::Int64, Value::Int64(i64::MAX)),
        (FieldKind::Float64, Value::Float64(-2.25)),
        (FieldKind::String, Value::from("odd")),
        (FieldKind::Bytes, Value::Bytes(Vec::new())),
        (FieldKind::Opaque, Value::Opaque(vec![1, 2, 3, 4, 5])),
        (FieldKind::Record(point.clone()), Value::Record(p.clone())),
        (FieldKind::RecordArray(point), Value::RecordArray(vec![p])),
        (
            FieldKind::ByteArrayArray,
            Value::ByteArrayArray(vec![vec![1], vec![2, 3]]),
        ),
        (FieldKind::LongArray, Value::LongArray(vec![1, 2, 3])),
    ];
    for (kind, value) in &cases {
        assert_skip_exact(1123, kind, value);
    }

    // Inline sizes are fixed by the wire type.
    assert_eq!(
        skip_offsets(1123, &FieldKind::Int32, &Value::Int32(0)).expect("fixed32"),
        (8, 8)
    );
    assert_eq!(
        skip_offsets(1123, &FieldKind::Int64, &Value::Int64(0)).expect("fixed64"),
        (12, 12)
    );
}
