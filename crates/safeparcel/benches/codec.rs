// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::missing_panics_doc)] // Benchmarks panic on failure
#![allow(clippy::cast_possible_truncation)] // Test parameters
#![allow(clippy::cast_possible_wrap)] // Test conversions

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use safeparcel::schema::RecordDescriptorBuilder;
use safeparcel::{
    decode, encode, walk, FieldKind, RecordDescriptor, RecordDescriptorHandle, SafeParcelable,
    Value, ValueMap,
};

// ============================================================================
// Fixtures
// ============================================================================

fn sample() -> RecordDescriptorHandle {
    RecordDescriptorBuilder::new("Sample")
        .required(1, FieldKind::Int64)
        .field(2, FieldKind::Float64)
        .field(3, FieldKind::String)
        .build_handle()
        .expect("sample")
}

fn batch(sample: &RecordDescriptorHandle) -> RecordDescriptor {
    RecordDescriptorBuilder::new("Batch")
        .version()
        .field(1, FieldKind::String)
        .record_array(2, sample)
        .field(3, FieldKind::Bytes)
        .build()
        .expect("batch")
}

fn batch_values(samples: usize) -> ValueMap {
    let items = (0..samples)
        .map(|i| {
            let mut item = ValueMap::new();
            item.insert(1, Value::Int64(i as i64));
            item.insert(2, Value::Float64(i as f64 * 0.5));
            item.insert(3, Value::String(format!("sensor-{i}")));
            item
        })
        .collect();
    let mut values = ValueMap::new();
    values.insert(1000, Value::Int32(1));
    values.insert(1, Value::from("telemetry"));
    values.insert(2, Value::RecordArray(items));
    values.insert(3, Value::Bytes(vec![0x5a; 256]));
    values
}

#[derive(SafeParcelable)]
struct Reading {
    #[parcel(tag = 1)]
    timestamp: i64,
    #[parcel(tag = 2)]
    celsius: f32,
    #[parcel(tag = 3, default)]
    location: String,
}

// ============================================================================
// Benchmarks
// ============================================================================

/// Benchmark: encode a record array of growing size
fn bench_encode(c: &mut Criterion) {
    let sample = sample();
    let descriptor = batch(&sample);
    let mut group = c.benchmark_group("encode_batch");
    for samples in [1usize, 16, 256] {
        let values = batch_values(samples);
        let size = encode(&descriptor, &values).expect("encode").len();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &values, |b, values| {
            b.iter(|| encode(black_box(&descriptor), black_box(values)).expect("encode"))
        });
    }
    group.finish();
}

/// Benchmark: decode the same payloads
fn bench_decode(c: &mut Criterion) {
    let sample = sample();
    let descriptor = batch(&sample);
    let mut group = c.benchmark_group("decode_batch");
    for samples in [1usize, 16, 256] {
        let bytes = encode(&descriptor, &batch_values(samples)).expect("encode");
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &bytes, |b, bytes| {
            b.iter(|| decode(black_box(&descriptor), black_box(bytes)).expect("decode"))
        });
    }
    group.finish();
}

/// Benchmark: schema-less walk over the 256-sample payload
fn bench_walk(c: &mut Criterion) {
    let sample = sample();
    let bytes = encode(&batch(&sample), &batch_values(256)).expect("encode");
    c.bench_function("walk_batch_256", |b| {
        b.iter(|| {
            walk(black_box(&bytes))
                .expect("envelope")
                .filter(Result::is_ok)
                .count()
        })
    });
}

/// Benchmark: derived binding, value map conversion included
fn bench_derived_round_trip(c: &mut Criterion) {
    let reading = Reading {
        timestamp: 1_700_000_000_000,
        celsius: 21.5,
        location: "greenhouse".into(),
    };
    c.bench_function("derived_round_trip", |b| {
        b.iter(|| {
            let bytes = black_box(&reading).write_to_parcel().expect("encode");
            Reading::create_from_parcel(&bytes).expect("decode")
        })
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_walk,
    bench_derived_round_trip
);
criterion_main!(benches);
