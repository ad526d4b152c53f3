// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Failure paths: every malformed input must come back as a typed error,
// never as a partial or zero-filled record.

use safeparcel::schema::RecordDescriptorBuilder;
use safeparcel::{
    decode, encode, CodecConfig, Error, FieldKind, RecordCodec, RecordDescriptor,
    RecordDescriptorHandle, Value, ValueMap,
};

fn account() -> RecordDescriptor {
    RecordDescriptorBuilder::new("Account")
        .required(1, FieldKind::String)
        .field(2, FieldKind::Int64)
        .optional(3, FieldKind::Bool, false)
        .build()
        .expect("descriptor")
}

fn account_values() -> ValueMap {
    let mut values = ValueMap::new();
    values.insert(1, Value::from("alice@example.org"));
    values.insert(2, Value::Int64(1_700_000_000));
    values
}

#[test]
fn test_missing_required_field_on_decode() {
    // Envelope with only tag 2.
    let bytes: [u8; 16] = [12, 0, 0, 0, 0x11, 0, 0, 0, 5, 0, 0, 0, 0, 0, 0, 0];
    let err = decode(&account(), &bytes).unwrap_err();
    match err {
        Error::MissingRequiredField { record, tag } => {
            assert_eq!(&*record, "Account");
            assert_eq!(tag, 1);
        }
        other => panic!("expected MissingRequiredField, got {other:?}"),
    }
}

#[test]
fn test_missing_required_field_on_encode() {
    let mut values = account_values();
    values.remove(&1);
    assert!(matches!(
        encode(&account(), &values),
        Err(Error::MissingRequiredField { tag: 1, .. })
    ));
}

#[test]
fn test_truncated_by_one_byte() {
    let bytes = encode(&account(), &account_values()).expect("encode");
    let err = decode(&account(), &bytes[..bytes.len() - 1]).unwrap_err();
    assert!(matches!(err, Error::Truncated { .. }), "{err:?}");
}

#[test]
fn test_every_truncation_fails() {
    let bytes = encode(&account(), &account_values()).expect("encode");
    for len in 0..bytes.len() {
        assert!(
            decode(&account(), &bytes[..len]).is_err(),
            "prefix of {len} bytes decoded"
        );
    }
}

#[test]
fn test_inner_entry_truncated_mid_payload() {
    // Envelope length covers the buffer, but the string claims 16 bytes.
    let bytes: [u8; 16] = [12, 0, 0, 0, 0x0a, 0, 0, 0, 16, 0, 0, 0, b'a', b'b', 0, 0];
    assert!(matches!(
        decode(&account(), &bytes),
        Err(Error::Truncated { offset: 12, needed: 16, available: 4 })
    ));
}

#[test]
fn test_unaligned_envelope_is_malformed() {
    let bytes: [u8; 8] = [3, 0, 0, 0, 0, 0, 0, 0];
    assert!(matches!(
        decode(&account(), &bytes),
        Err(Error::Malformed { offset: 0, .. })
    ));
}

#[test]
fn test_nonzero_padding_is_alignment() {
    let mut bytes = encode(&account(), &account_values()).expect("encode");
    // "alice@example.org" is 17 bytes: 3 padding bytes follow at 12 + 17.
    bytes[12 + 17] = 0x7f;
    assert!(matches!(
        decode(&account(), &bytes),
        Err(Error::Alignment { offset: 29 })
    ));
}

#[test]
fn test_random_corruption_never_panics() {
    let clean = encode(&account(), &account_values()).expect("encode");
    let mut rng = fastrand::Rng::with_seed(0x5afe_9a2c);
    for _ in 0..2_000 {
        let mut bytes = clean.clone();
        for _ in 0..rng.usize(1..4) {
            let index = rng.usize(..bytes.len());
            bytes[index] = rng.u8(..);
        }
        if rng.bool() {
            bytes.truncate(rng.usize(..=bytes.len()));
        }
        // Any outcome is fine as long as it is a value, not a panic.
        let _ = decode(&account(), &bytes);
    }
}

fn child() -> RecordDescriptorHandle {
    RecordDescriptorBuilder::new("Child")
        .required(1, FieldKind::Int32)
        .build_handle()
        .expect("child")
}

#[test]
fn test_corrupt_array_element_fails_whole_record() {
    let parent = RecordDescriptorBuilder::new("Parent")
        .record_array(1, &child())
        .field(2, FieldKind::Int32)
        .build()
        .expect("parent");

    let element = |n: i32| {
        let mut map = ValueMap::new();
        map.insert(1, Value::Int32(n));
        map
    };
    let mut values = ValueMap::new();
    values.insert(
        1,
        Value::RecordArray(vec![element(1), element(2), element(3)]),
    );
    values.insert(2, Value::Int32(9));
    let mut bytes = encode(&parent, &values).expect("encode");

    // Second element's header (tag 1, fixed32) becomes tag 2, so the
    // element loses its required field.
    // envelope(4) + header(4) + len(4) + count(4) + element0(12) + len(4)
    let second_header = 4 + 4 + 4 + 4 + 12 + 4;
    assert_eq!(bytes[second_header], 0x08);
    bytes[second_header] = 0x10;

    match decode(&parent, &bytes) {
        Err(Error::MissingRequiredField { record, tag: 1 }) => assert_eq!(&*record, "Child"),
        other => panic!("expected the whole record to fail, got {other:?}"),
    }
}

#[test]
fn test_schema_mismatch_on_wire_type() {
    let writer_side = RecordDescriptorBuilder::new("V")
        .field(4, FieldKind::Int64)
        .build()
        .expect("writer");
    let reader_side = RecordDescriptorBuilder::new("V")
        .field(4, FieldKind::String)
        .build()
        .expect("reader");
    let mut values = ValueMap::new();
    values.insert(4, Value::Int64(1));
    let bytes = encode(&writer_side, &values).expect("encode");
    assert!(matches!(
        decode(&reader_side, &bytes),
        Err(Error::SchemaMismatch {
            tag: 4,
            expected: "length-prefixed",
            found: "fixed64",
            ..
        })
    ));
}

#[test]
fn test_nesting_limit_applies_to_encode_and_decode() {
    let leaf = child();
    let mid = RecordDescriptorBuilder::new("Mid")
        .record(1, &leaf)
        .build_handle()
        .expect("mid");
    let top = RecordDescriptorBuilder::new("Top")
        .record(1, &mid)
        .build()
        .expect("top");

    let mut leaf_values = ValueMap::new();
    leaf_values.insert(1, Value::Int32(1));
    let mut mid_values = ValueMap::new();
    mid_values.insert(1, Value::Record(leaf_values));
    let mut values = ValueMap::new();
    values.insert(1, Value::Record(mid_values));

    let shallow = RecordCodec::with_config(CodecConfig::default().with_max_depth(2));
    assert!(matches!(
        shallow.encode(&top, &values),
        Err(Error::NestingTooDeep { max_depth: 2, .. })
    ));

    let bytes = encode(&top, &values).expect("default depth");
    assert!(matches!(
        shallow.decode(&top, &bytes),
        Err(Error::NestingTooDeep { max_depth: 2, .. })
    ));
    assert!(RecordCodec::new().decode(&top, &bytes).is_ok());
}
