// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Round-trip law: decode(encode(v)) == v for every field kind, with the
// boundary values each kind is most likely to get wrong.

#![allow(clippy::float_cmp)]

use safeparcel::harness::{assert_deterministic, assert_round_trip, round_trip};
use safeparcel::schema::{ConstantSet, RecordDescriptorBuilder};
use safeparcel::{FieldKind, RecordDescriptor, RecordDescriptorHandle, Value, ValueMap};

fn point() -> RecordDescriptorHandle {
    RecordDescriptorBuilder::new("Point")
        .required(1, FieldKind::Float64)
        .required(2, FieldKind::Float64)
        .field(3, FieldKind::String)
        .build_handle()
        .expect("point descriptor")
}

fn everything(point: &RecordDescriptorHandle) -> RecordDescriptor {
    RecordDescriptorBuilder::new("Everything")
        .version()
        .field(1, FieldKind::Bool)
        .field(2, FieldKind::Int32)
        .field(3, FieldKind::Int64)
        .field(4, FieldKind::Float32)
        .field(5, FieldKind::Float64)
        .field(6, FieldKind::String)
        .field(7, FieldKind::Bytes)
        .field(8, FieldKind::ByteArrayArray)
        .record(9, point)
        .record_array(10, point)
        .field(11, FieldKind::StringArray)
        .field(12, FieldKind::IntArray)
        .field(13, FieldKind::LongArray)
        .field(14, FieldKind::FloatArray)
        .field(15, FieldKind::DoubleArray)
        .field(16, FieldKind::BoolArray)
        .constant(17, "Mode", vec![0, 1, 2])
        .field(18, FieldKind::Opaque)
        .build()
        .expect("everything descriptor")
}

fn point_value(x: f64, y: f64) -> ValueMap {
    let mut map = ValueMap::new();
    map.insert(1, Value::Float64(x));
    map.insert(2, Value::Float64(y));
    map
}

fn single(tag: u32, value: Value) -> ValueMap {
    let mut map = ValueMap::new();
    map.insert(tag, value);
    map
}

#[test]
fn test_every_kind_populated() {
    let point = point();
    let descriptor = everything(&point);

    let mut labelled = point_value(-0.5, 1e300);
    labelled.insert(3, Value::from("origin"));

    let mut values = ValueMap::new();
    values.insert(1000, Value::Int32(3));
    values.insert(1, Value::Bool(true));
    values.insert(2, Value::Int32(i32::MAX));
    values.insert(3, Value::Int64(i64::MIN));
    values.insert(4, Value::Float32(f32::EPSILON));
    values.insert(5, Value::Float64(std::f64::consts::PI));
    values.insert(6, Value::from("héllo, wörld ✓"));
    values.insert(7, Value::Bytes(vec![1, 2, 3, 4, 5]));
    values.insert(8, Value::ByteArrayArray(vec![vec![], vec![9], vec![1, 2, 3]]));
    values.insert(9, Value::Record(labelled));
    values.insert(
        10,
        Value::RecordArray(vec![point_value(1.0, 2.0), point_value(3.0, 4.0)]),
    );
    values.insert(
        11,
        Value::StringArray(vec!["a".into(), String::new(), "ünï".into()]),
    );
    values.insert(12, Value::IntArray(vec![-1, 0, i32::MAX, i32::MIN]));
    values.insert(13, Value::LongArray(vec![i64::MAX, -7]));
    values.insert(14, Value::FloatArray(vec![0.25, -8.5]));
    values.insert(15, Value::DoubleArray(vec![f64::MIN_POSITIVE]));
    values.insert(16, Value::BoolArray(vec![true, false, true]));
    values.insert(17, Value::Int32(2));
    values.insert(18, Value::Opaque(vec![0xca, 0xfe, 0xba]));

    assert_round_trip(&descriptor, &values);
    assert_deterministic(&descriptor, &values);
}

#[test]
fn test_bool_values() {
    let descriptor = everything(&point());
    for flag in [true, false] {
        assert_round_trip(&descriptor, &single(1, Value::Bool(flag)));
    }
}

#[test]
fn test_int32_boundaries() {
    let descriptor = everything(&point());
    for n in [-1, 0, 1, i32::MAX, i32::MIN] {
        assert_round_trip(&descriptor, &single(2, Value::Int32(n)));
    }
}

#[test]
fn test_strings_of_every_padding_length() {
    let descriptor = everything(&point());
    for text in ["", "a", "ab", "abc", "abcd", "日本", "ß"] {
        assert_round_trip(&descriptor, &single(6, Value::from(text)));
    }
}

#[test]
fn test_empty_collections() {
    let descriptor = everything(&point());
    assert_round_trip(&descriptor, &single(7, Value::Bytes(Vec::new())));
    assert_round_trip(&descriptor, &single(8, Value::ByteArrayArray(Vec::new())));
    assert_round_trip(&descriptor, &single(10, Value::RecordArray(Vec::new())));
    assert_round_trip(&descriptor, &single(11, Value::StringArray(Vec::new())));
    assert_round_trip(&descriptor, &single(16, Value::BoolArray(Vec::new())));
}

#[test]
fn test_nan_payload_preserved() {
    let descriptor = everything(&point());
    let decoded = round_trip(&descriptor, &single(5, Value::Float64(f64::NAN))).expect("nan");
    let Some(Value::Float64(v)) = decoded.get(&5) else {
        panic!("float64 expected, got {:?}", decoded.get(&5));
    };
    assert!(v.is_nan());
}

#[test]
fn test_unknown_constant_is_preserved() {
    let descriptor = RecordDescriptorBuilder::new("Modes")
        .field(
            1,
            FieldKind::Constant(ConstantSet::new("Mode", vec![0, 1])),
        )
        .build()
        .expect("descriptor");
    assert_round_trip(&descriptor, &single(1, Value::Int32(77)));
}

#[test]
fn test_deeply_nested_records() {
    let leaf = RecordDescriptorBuilder::new("Leaf")
        .field(1, FieldKind::Int32)
        .build_handle()
        .expect("leaf");
    let mid = RecordDescriptorBuilder::new("Mid")
        .record(1, &leaf)
        .record_array(2, &leaf)
        .build_handle()
        .expect("mid");
    let top = RecordDescriptorBuilder::new("Top")
        .record(1, &mid)
        .build()
        .expect("top");

    let mut inner = ValueMap::new();
    inner.insert(1, Value::Record(single(1, Value::Int32(5))));
    inner.insert(
        2,
        Value::RecordArray(vec![ValueMap::new(), single(1, Value::Int32(6))]),
    );
    assert_round_trip(&top, &single(1, Value::Record(inner)));
}
