// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record encoder.
//!
//! Fields are emitted in descriptor declaration order, so identical logical
//! content always yields identical bytes. Record and array payloads reserve
//! their length and backpatch it once the body is written.

use crate::config::CodecConfig;
use crate::error::{Error, Result};
use crate::schema::{FieldKind, FieldTag, RecordDescriptor};
use crate::value::{Value, ValueMap};
use crate::wire::{FieldHeader, ParcelWriter};

pub(crate) struct Encoder<'c> {
    config: &'c CodecConfig,
}

impl<'c> Encoder<'c> {
    pub(crate) fn new(config: &'c CodecConfig) -> Self {
        Self { config }
    }

    /// Write one record envelope at nesting `depth` (top level is 1).
    pub(crate) fn record(
        &self,
        writer: &mut ParcelWriter,
        descriptor: &RecordDescriptor,
        values: &ValueMap,
        depth: usize,
    ) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(Error::NestingTooDeep {
                offset: writer.offset(),
                max_depth: self.config.max_depth,
            });
        }

        let start = writer.begin_nested_record();
        for field in descriptor.fields() {
            let value = match values.get(&field.tag).or(field.default.as_ref()) {
                Some(value) => value,
                None if field.required => {
                    return Err(Error::MissingRequiredField {
                        record: descriptor.name_arc().clone(),
                        tag: field.tag,
                    });
                }
                None => continue,
            };
            if !field.kind.accepts(value) {
                return Err(Error::SchemaMismatch {
                    record: descriptor.name_arc().clone(),
                    tag: field.tag,
                    expected: field.kind.name(),
                    found: value.kind_name(),
                });
            }
            self.entry(writer, field.tag, &field.kind, value, depth)?;
        }
        writer.end_nested_record(start)?;

        for tag in values.keys().filter(|tag| descriptor.field(**tag).is_none()) {
            log::debug!(
                "[codec] {} has no field {}, value not encoded",
                descriptor.name(),
                tag
            );
        }
        Ok(())
    }

    /// Write `header + payload` for one field.
    pub(crate) fn entry(
        &self,
        writer: &mut ParcelWriter,
        tag: FieldTag,
        kind: &FieldKind,
        value: &Value,
        depth: usize,
    ) -> Result<()> {
        writer.write_header(FieldHeader::new(tag, kind.wire_type()));
        self.payload(writer, kind, value, depth)
    }

    fn payload(
        &self,
        writer: &mut ParcelWriter,
        kind: &FieldKind,
        value: &Value,
        depth: usize,
    ) -> Result<()> {
        match (kind, value) {
            (FieldKind::Bool, Value::Bool(v)) => writer.write_i32(i32::from(*v)),
            (FieldKind::Int32 | FieldKind::Constant(_), Value::Int32(v)) => writer.write_i32(*v),
            (FieldKind::Int64, Value::Int64(v)) => writer.write_i64(*v),
            (FieldKind::Float32, Value::Float32(v)) => writer.write_f32(*v),
            (FieldKind::Float64, Value::Float64(v)) => writer.write_f64(*v),
            (FieldKind::String, Value::String(v)) => writer.write_string(v)?,
            (FieldKind::Bytes, Value::Bytes(v)) | (FieldKind::Opaque, Value::Opaque(v)) => {
                writer.write_length_prefixed(v)?
            }
            (FieldKind::Record(inner), Value::Record(map)) => {
                self.record(writer, inner, map, depth + 1)?
            }
            (FieldKind::RecordArray(inner), Value::RecordArray(items)) => {
                array(writer, items, |w, item| self.record(w, inner, item, depth + 1))?
            }
            (FieldKind::ByteArrayArray, Value::ByteArrayArray(items)) => {
                array(writer, items, |w, item| w.write_length_prefixed(item))?
            }
            (FieldKind::StringArray, Value::StringArray(items)) => {
                array(writer, items, |w, item| w.write_string(item))?
            }
            (FieldKind::IntArray, Value::IntArray(items)) => array(writer, items, |w, item| {
                w.write_i32(*item);
                Ok(())
            })?,
            (FieldKind::LongArray, Value::LongArray(items)) => array(writer, items, |w, item| {
                w.write_i64(*item);
                Ok(())
            })?,
            (FieldKind::FloatArray, Value::FloatArray(items)) => {
                array(writer, items, |w, item| {
                    w.write_f32(*item);
                    Ok(())
                })?
            }
            (FieldKind::DoubleArray, Value::DoubleArray(items)) => {
                array(writer, items, |w, item| {
                    w.write_f64(*item);
                    Ok(())
                })?
            }
            (FieldKind::BoolArray, Value::BoolArray(items)) => array(writer, items, |w, item| {
                w.write_i32(i32::from(*item));
                Ok(())
            })?,
            (kind, value) => {
                return Err(Error::Malformed {
                    offset: writer.offset(),
                    reason: format!("cannot encode {} as {}", value.kind_name(), kind.name()),
                })
            }
        }
        Ok(())
    }
}

/// Length-prefixed `[count][elements]`.
///
/// Every element is a multiple of 4 bytes, so the content never needs
/// padding and the record length backpatch applies as-is.
fn array<T>(
    writer: &mut ParcelWriter,
    items: &[T],
    mut element: impl FnMut(&mut ParcelWriter, &T) -> Result<()>,
) -> Result<()> {
    let count = i32::try_from(items.len()).map_err(|_| Error::Malformed {
        offset: writer.offset(),
        reason: format!("array of {} elements does not fit in i32", items.len()),
    })?;
    let start = writer.begin_nested_record();
    writer.write_i32(count);
    for item in items {
        element(writer, item)?;
    }
    writer.end_nested_record(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RecordDescriptorBuilder;

    fn encode(descriptor: &RecordDescriptor, values: &ValueMap) -> Result<Vec<u8>> {
        let config = CodecConfig::default();
        let mut writer = ParcelWriter::new();
        Encoder::new(&config).record(&mut writer, descriptor, values, 1)?;
        Ok(writer.into_bytes())
    }

    #[test]
    fn test_default_fills_absent_field() {
        let descriptor = RecordDescriptorBuilder::new("Defaults")
            .optional(3, FieldKind::Int32, 9i32)
            .build()
            .expect("descriptor");
        let bytes = encode(&descriptor, &ValueMap::new()).expect("encode");
        assert_eq!(
            bytes,
            vec![8, 0, 0, 0, 0x18, 0, 0, 0, 9, 0, 0, 0],
            "header 3<<3|0 followed by the default"
        );
    }

    #[test]
    fn test_optional_without_default_is_omitted() {
        let descriptor = RecordDescriptorBuilder::new("Sparse")
            .field(1, FieldKind::String)
            .build()
            .expect("descriptor");
        assert_eq!(encode(&descriptor, &ValueMap::new()).expect("encode"), vec![0; 4]);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let descriptor = RecordDescriptorBuilder::new("Typed")
            .field(1, FieldKind::Int64)
            .build()
            .expect("descriptor");
        let mut values = ValueMap::new();
        values.insert(1, Value::Int32(1));
        let err = encode(&descriptor, &values).unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaMismatch {
                tag: 1,
                expected: "int64",
                found: "int32",
                ..
            }
        ));
    }

    #[test]
    fn test_array_framing() {
        let descriptor = RecordDescriptorBuilder::new("Arrays")
            .field(2, FieldKind::StringArray)
            .build()
            .expect("descriptor");
        let mut values = ValueMap::new();
        values.insert(2, Value::StringArray(vec!["ab".into()]));
        let bytes = encode(&descriptor, &values).expect("encode");
        assert_eq!(
            bytes,
            vec![
                20, 0, 0, 0, // envelope
                0x12, 0, 0, 0, // tag 2, length-prefixed
                12, 0, 0, 0, // array content length
                1, 0, 0, 0, // count
                2, 0, 0, 0, b'a', b'b', 0, 0, // element
            ]
        );
    }
}
