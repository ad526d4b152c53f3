// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record codec: value maps to envelopes and back.
//!
//! # Wire layout
//!
//! ```text
//! record  := i32 length, entry*            (length counts the entries)
//! entry   := u32 header, payload           (header = tag << 3 | wire type)
//! payload := 4 bytes                       (wire type 0)
//!          | 8 bytes                       (wire type 1)
//!          | i32 len, len bytes, pad to 4  (wire type 2)
//! ```
//!
//! Nested records are record envelopes. Arrays are length-prefixed payloads
//! holding an `i32` count followed by the elements.
//!
//! Encode and decode are pure functions over an exclusively owned buffer;
//! descriptors are shared read-only.

mod decode;
mod encode;
mod walk;

pub use walk::{walk, walk_with, Walk, WireEntry};

use crate::config::{CodecConfig, MAX_FIELD_TAG};
use crate::error::{Error, Result};
use crate::schema::{FieldKind, FieldTag, RecordDescriptor, SchemaError};
use crate::value::{Value, ValueMap};
use crate::wire::{ParcelReader, ParcelWriter};
use decode::Decoder;
use encode::Encoder;

/// Encoder/decoder bound to one [`CodecConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordCodec {
    config: CodecConfig,
}

impl RecordCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `values` into a fresh buffer.
    pub fn encode(&self, descriptor: &RecordDescriptor, values: &ValueMap) -> Result<Vec<u8>> {
        let mut writer = ParcelWriter::new();
        self.encode_into(&mut writer, descriptor, values)?;
        log::trace!(
            "[codec] encoded {} ({} bytes)",
            descriptor.name(),
            writer.offset()
        );
        Ok(writer.into_bytes())
    }

    /// Append one envelope to `writer`.
    ///
    /// On error the writer may hold a partial envelope and should be
    /// discarded.
    pub fn encode_into(
        &self,
        writer: &mut ParcelWriter,
        descriptor: &RecordDescriptor,
        values: &ValueMap,
    ) -> Result<()> {
        Encoder::new(&self.config).record(writer, descriptor, values, 1)
    }

    /// Append a single `header + payload` entry outside any envelope.
    pub fn encode_field(
        &self,
        writer: &mut ParcelWriter,
        tag: FieldTag,
        kind: &FieldKind,
        value: &Value,
    ) -> Result<()> {
        if tag > MAX_FIELD_TAG {
            return Err(Error::Schema(SchemaError::TagOutOfRange {
                record: "entry".into(),
                tag,
            }));
        }
        if !kind.accepts(value) {
            return Err(Error::Malformed {
                offset: writer.offset(),
                reason: format!("cannot encode {} as {}", value.kind_name(), kind.name()),
            });
        }
        Encoder::new(&self.config).entry(writer, tag, kind, value, 1)
    }

    /// Decode exactly one envelope from `bytes`.
    ///
    /// Trailing bytes are `Malformed` unless the config allows them.
    pub fn decode(&self, descriptor: &RecordDescriptor, bytes: &[u8]) -> Result<ValueMap> {
        let mut reader = ParcelReader::new(bytes).with_max_payload_len(self.config.max_payload_len);
        let values = self.decode_from(&mut reader, descriptor)?;
        if self.config.reject_trailing_bytes && !reader.is_eof() {
            return Err(Error::Malformed {
                offset: reader.offset(),
                reason: format!("{} trailing bytes after record", reader.remaining()),
            });
        }
        Ok(values)
    }

    /// Read one envelope at the reader's position, leaving it just past it.
    pub fn decode_from(
        &self,
        reader: &mut ParcelReader<'_>,
        descriptor: &RecordDescriptor,
    ) -> Result<ValueMap> {
        Decoder::new(&self.config).record(reader, descriptor, 1)
    }
}

/// Encode with the default config.
pub fn encode(descriptor: &RecordDescriptor, values: &ValueMap) -> Result<Vec<u8>> {
    RecordCodec::new().encode(descriptor, values)
}

/// Decode with the default config.
pub fn decode(descriptor: &RecordDescriptor, bytes: &[u8]) -> Result<ValueMap> {
    RecordCodec::new().decode(descriptor, bytes)
}
