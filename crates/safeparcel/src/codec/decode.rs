// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record decoder.
//!
//! A linear scan over the entries of one envelope: known tags are read with
//! their declared kind, unknown tags are skipped by wire type alone. Defaults
//! and required-field checks run once the envelope is exhausted.

use crate::config::{CodecConfig, LENGTH_PREFIX_SIZE};
use crate::error::{Error, Result};
use crate::schema::{FieldKind, RecordDescriptor};
use crate::value::{Value, ValueMap};
use crate::wire::{padding_for, ParcelReader};

pub(crate) struct Decoder<'c> {
    config: &'c CodecConfig,
}

impl<'c> Decoder<'c> {
    pub(crate) fn new(config: &'c CodecConfig) -> Self {
        Self { config }
    }

    /// Read one record envelope at nesting `depth` (top level is 1).
    pub(crate) fn record(
        &self,
        reader: &mut ParcelReader<'_>,
        descriptor: &RecordDescriptor,
        depth: usize,
    ) -> Result<ValueMap> {
        if depth > self.config.max_depth {
            return Err(Error::NestingTooDeep {
                offset: reader.offset(),
                max_depth: self.config.max_depth,
            });
        }

        let end = reader.begin_nested_record()?;
        let mut values = ValueMap::new();

        while reader.offset() < end {
            let header = reader.read_header()?;
            let Some(field) = descriptor.field(header.tag) else {
                let payload_offset = reader.offset();
                reader.skip(header)?;
                log::debug!(
                    "[codec] skipped unknown tag {} in {} ({}, {} bytes)",
                    header.tag,
                    descriptor.name(),
                    header.wire_type,
                    reader.offset() - payload_offset
                );
                continue;
            };

            let expected = field.kind.wire_type();
            if header.wire_type != expected {
                return Err(Error::SchemaMismatch {
                    record: descriptor.name_arc().clone(),
                    tag: header.tag,
                    expected: expected.name(),
                    found: header.wire_type.name(),
                });
            }

            let value = self.payload(reader, &field.kind, depth)?;
            if let FieldKind::Constant(set) = &field.kind {
                if let Value::Int32(raw) = value {
                    if !set.contains(raw) {
                        log::debug!(
                            "[codec] {} field {}: unknown {} constant {}",
                            descriptor.name(),
                            header.tag,
                            set.name,
                            raw
                        );
                    }
                }
            }
            // Repeated tags overwrite: last occurrence wins.
            values.insert(header.tag, value);
        }
        reader.end_nested_record(end)?;

        for field in descriptor.fields() {
            if values.contains_key(&field.tag) {
                continue;
            }
            if field.required {
                return Err(Error::MissingRequiredField {
                    record: descriptor.name_arc().clone(),
                    tag: field.tag,
                });
            }
            if let Some(default) = &field.default {
                values.insert(field.tag, default.clone());
            }
        }

        log::trace!("[codec] decoded {} ({} fields)", descriptor.name(), values.len());
        Ok(values)
    }

    fn payload(
        &self,
        reader: &mut ParcelReader<'_>,
        kind: &FieldKind,
        depth: usize,
    ) -> Result<Value> {
        let value = match kind {
            FieldKind::Bool => Value::Bool(reader.read_i32()? != 0),
            FieldKind::Int32 | FieldKind::Constant(_) => Value::Int32(reader.read_i32()?),
            FieldKind::Int64 => Value::Int64(reader.read_i64()?),
            FieldKind::Float32 => Value::Float32(reader.read_f32()?),
            FieldKind::Float64 => Value::Float64(reader.read_f64()?),
            FieldKind::String => Value::String(reader.read_string()?),
            FieldKind::Bytes => Value::Bytes(reader.read_length_prefixed()?.to_vec()),
            FieldKind::Opaque => Value::Opaque(reader.read_length_prefixed()?.to_vec()),
            FieldKind::Record(inner) => Value::Record(self.record(reader, inner, depth + 1)?),
            FieldKind::RecordArray(inner) => Value::RecordArray(array(reader, |r| {
                self.record(r, inner, depth + 1)
            })?),
            FieldKind::ByteArrayArray => Value::ByteArrayArray(array(reader, |r| {
                Ok(r.read_length_prefixed()?.to_vec())
            })?),
            FieldKind::StringArray => Value::StringArray(array(reader, |r| r.read_string())?),
            FieldKind::IntArray => Value::IntArray(array(reader, |r| r.read_i32())?),
            FieldKind::LongArray => Value::LongArray(array(reader, |r| r.read_i64())?),
            FieldKind::FloatArray => Value::FloatArray(array(reader, |r| r.read_f32())?),
            FieldKind::DoubleArray => Value::DoubleArray(array(reader, |r| r.read_f64())?),
            FieldKind::BoolArray => Value::BoolArray(array(reader, |r| Ok(r.read_i32()? != 0))?),
        };
        Ok(value)
    }
}

/// Read a length-prefixed `[count][elements]` payload.
///
/// Any element failure fails the whole array. The elements must end exactly
/// at the declared length.
fn array<'a, T>(
    reader: &mut ParcelReader<'a>,
    mut element: impl FnMut(&mut ParcelReader<'a>) -> Result<T>,
) -> Result<Vec<T>> {
    let length_offset = reader.offset();
    let len = reader.read_length()?;
    if len > reader.remaining() {
        return Err(Error::Truncated {
            offset: reader.offset(),
            needed: len,
            available: reader.remaining(),
        });
    }
    if len < LENGTH_PREFIX_SIZE {
        return Err(Error::Malformed {
            offset: length_offset,
            reason: format!("array payload of {} bytes has no count", len),
        });
    }
    let end = reader.offset() + len;

    let count_offset = reader.offset();
    let count = reader.read_i32()?;
    if count < 0 {
        return Err(Error::Malformed {
            offset: count_offset,
            reason: format!("negative array count {}", count),
        });
    }

    // Every element occupies at least 4 bytes.
    let mut items = Vec::with_capacity((count as usize).min(len / 4));
    for _ in 0..count {
        items.push(element(reader)?);
    }

    if reader.offset() != end {
        return Err(Error::Malformed {
            offset: reader.offset(),
            reason: format!("array elements end at {}, payload ends at {}", reader.offset(), end),
        });
    }
    let pad_offset = reader.offset();
    if reader
        .read_bytes(padding_for(len))?
        .iter()
        .any(|&b| b != 0)
    {
        return Err(Error::Alignment { offset: pad_offset });
    }
    Ok(items)
}
