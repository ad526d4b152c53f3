// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Round-trip checks for descriptors and bound types.
//!
//! Used by this crate's tests and available to downstream crates that want
//! to verify their own record types. Nothing here is on the encode/decode
//! path.

use crate::binding::SafeParcelable;
use crate::codec::RecordCodec;
use crate::error::Result;
use crate::schema::{FieldKind, FieldTag, RecordDescriptor};
use crate::value::{Value, ValueMap};
use crate::wire::{ParcelReader, ParcelWriter};
use std::fmt::Debug;

/// The map a decode of `encode(values)` must return: `values` plus defaults.
pub fn expected_after_decode(descriptor: &RecordDescriptor, values: &ValueMap) -> ValueMap {
    let mut expected: ValueMap = values
        .iter()
        .filter(|(tag, _)| descriptor.field(**tag).is_some())
        .map(|(tag, value)| (*tag, value.clone()))
        .collect();
    for field in descriptor.fields() {
        if let Some(default) = &field.default {
            expected
                .entry(field.tag)
                .or_insert_with(|| default.clone());
        }
    }
    expected
}

/// Encode then decode `values`.
pub fn round_trip(descriptor: &RecordDescriptor, values: &ValueMap) -> Result<ValueMap> {
    let codec = RecordCodec::new();
    let bytes = codec.encode(descriptor, values)?;
    codec.decode(descriptor, &bytes)
}

/// Panic unless `values` survives encode/decode unchanged (modulo defaults).
pub fn assert_round_trip(descriptor: &RecordDescriptor, values: &ValueMap) {
    match round_trip(descriptor, values) {
        Ok(decoded) => assert_eq!(
            decoded,
            expected_after_decode(descriptor, values),
            "{} did not round-trip",
            descriptor.name()
        ),
        Err(err) => panic!("{} round-trip failed: {}", descriptor.name(), err),
    }
}

/// Panic unless a bound value survives `write_to_parcel`/`create_from_parcel`.
pub fn assert_parcelable_round_trip<T>(value: &T)
where
    T: SafeParcelable + PartialEq + Debug,
{
    let bytes = match value.write_to_parcel() {
        Ok(bytes) => bytes,
        Err(err) => panic!("encode of {:?} failed: {}", value, err),
    };
    match T::create_from_parcel(&bytes) {
        Ok(decoded) => assert_eq!(&decoded, value),
        Err(err) => panic!("decode of {:?} failed: {}", value, err),
    }
}

/// Write one entry, then skip it by header alone.
///
/// Returns `(offset after write, offset after skip)`; the two must match.
pub fn skip_offsets(tag: FieldTag, kind: &FieldKind, value: &Value) -> Result<(usize, usize)> {
    let mut writer = ParcelWriter::new();
    RecordCodec::new().encode_field(&mut writer, tag, kind, value)?;
    let written = writer.offset();

    let bytes = writer.into_bytes();
    let mut reader = ParcelReader::new(&bytes);
    let header = reader.read_header()?;
    reader.skip(header)?;
    Ok((written, reader.offset()))
}

/// Panic unless skipping consumes exactly the bytes written.
pub fn assert_skip_exact(tag: FieldTag, kind: &FieldKind, value: &Value) {
    match skip_offsets(tag, kind, value) {
        Ok((written, skipped)) => assert_eq!(
            written,
            skipped,
            "skip of {} consumed {} bytes, write produced {}",
            kind.name(),
            skipped,
            written
        ),
        Err(err) => panic!("{} entry failed: {}", kind.name(), err),
    }
}

/// Panic unless two encodes of `values` are byte-identical.
pub fn assert_deterministic(descriptor: &RecordDescriptor, values: &ValueMap) {
    let codec = RecordCodec::new();
    let first = codec.encode(descriptor, values);
    let second = codec.encode(descriptor, &values.clone());
    assert_eq!(first, second, "{} encodes nondeterministically", descriptor.name());
}
