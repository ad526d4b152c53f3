// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read/write cursors over parcel buffers.
//!
//! [`ParcelWriter`] appends to a growable buffer and backpatches record
//! lengths. [`ParcelReader`] is a bounds-checked, zero-copy view that never
//! reads past the end of its slice.

use super::{padding_for, FieldHeader, WireType};
use crate::config::{DEFAULT_MAX_PAYLOAD_LEN, LENGTH_PREFIX_SIZE, PAYLOAD_ALIGNMENT};
use crate::error::{Error, Result};

/// Generate little-endian append methods for fixed-width primitives.
macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) {
            self.buffer.extend_from_slice(&value.to_le_bytes());
        }
    };
}

/// Generate bounds-checked little-endian read methods.
///
/// Each generated method fails with `Error::Truncated` (reporting the offset
/// of the read) instead of reading out of bounds.
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> Result<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

fn length_to_i32(len: usize, offset: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| Error::Malformed {
        offset,
        reason: format!("length {} does not fit in i32", len),
    })
}

/// Append-only writer with length reservation.
#[derive(Debug, Default, Clone)]
pub struct ParcelWriter {
    buffer: Vec<u8>,
}

impl ParcelWriter {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    impl_write_le!(write_i32, i32);
    impl_write_le!(write_u32, u32);
    impl_write_le!(write_i64, i64);
    impl_write_le!(write_f32, f32);
    impl_write_le!(write_f64, f64);

    pub fn write_header(&mut self, header: FieldHeader) {
        self.write_u32(header.pack());
    }

    /// Append `[len][bytes][zero padding]`.
    ///
    /// The length counts content bytes only; padding brings the offset back
    /// to a 4-byte boundary relative to the start of the payload.
    pub fn write_length_prefixed(&mut self, bytes: &[u8]) -> Result<()> {
        let len = length_to_i32(bytes.len(), self.offset())?;
        self.write_i32(len);
        self.buffer.extend_from_slice(bytes);
        self.write_padding(bytes.len());
        Ok(())
    }

    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_length_prefixed(value.as_bytes())
    }

    /// Reserve a length placeholder and return the offset just after it.
    ///
    /// Pair with [`end_nested_record`](Self::end_nested_record).
    pub fn begin_nested_record(&mut self) -> usize {
        self.write_i32(0);
        self.offset()
    }

    /// Backpatch the placeholder reserved at `start` with the measured length.
    pub fn end_nested_record(&mut self, start: usize) -> Result<()> {
        let end = self.offset();
        if start < LENGTH_PREFIX_SIZE || start > end {
            return Err(Error::Malformed {
                offset: start,
                reason: "record start outside the written buffer".into(),
            });
        }
        let len = length_to_i32(end - start, start)?;
        self.buffer[start - LENGTH_PREFIX_SIZE..start].copy_from_slice(&len.to_le_bytes());
        Ok(())
    }

    fn write_padding(&mut self, content_len: usize) {
        let pad = padding_for(content_len);
        self.buffer.resize(self.buffer.len() + pad, 0);
    }

    pub fn offset(&self) -> usize {
        self.buffer.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

/// Bounds-checked reader over a parcel slice.
#[derive(Debug, Clone)]
pub struct ParcelReader<'a> {
    buffer: &'a [u8],
    offset: usize,
    max_payload_len: usize,
}

impl<'a> ParcelReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
        }
    }

    /// Cap accepted length prefixes; larger ones are reported as malformed.
    pub fn with_max_payload_len(mut self, max_payload_len: usize) -> Self {
        self.max_payload_len = max_payload_len;
        self
    }

    impl_read_le!(read_i32, i32, 4);
    impl_read_le!(read_u32, u32, 4);
    impl_read_le!(read_i64, i64, 8);
    impl_read_le!(read_f32, f32, 4);
    impl_read_le!(read_f64, f64, 8);

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::Truncated {
                offset: self.offset,
                needed: len,
                available: self.remaining(),
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn read_header(&mut self) -> Result<FieldHeader> {
        let offset = self.offset;
        let raw = self.read_u32()?;
        FieldHeader::unpack(raw, offset)
    }

    /// Read a length prefix, rejecting negative and oversized values.
    pub fn read_length(&mut self) -> Result<usize> {
        let offset = self.offset;
        let len = self.read_i32()?;
        if len < 0 {
            return Err(Error::Malformed {
                offset,
                reason: format!("negative length {}", len),
            });
        }
        let len = len as usize;
        if len > self.max_payload_len {
            return Err(Error::Malformed {
                offset,
                reason: format!("length {} exceeds limit {}", len, self.max_payload_len),
            });
        }
        Ok(len)
    }

    /// Read `[len][bytes][zero padding]` and return the content bytes.
    pub fn read_length_prefixed(&mut self) -> Result<&'a [u8]> {
        let len = self.read_length()?;
        let content = self.read_bytes(len)?;
        let pad_offset = self.offset;
        let padding = self.read_bytes(padding_for(len))?;
        if padding.iter().any(|&b| b != 0) {
            return Err(Error::Alignment { offset: pad_offset });
        }
        Ok(content)
    }

    pub fn read_string(&mut self) -> Result<String> {
        let offset = self.offset;
        let bytes = self.read_length_prefixed()?;
        String::from_utf8(bytes.to_vec()).map_err(|e| Error::Malformed {
            offset,
            reason: format!("invalid UTF-8: {}", e),
        })
    }

    /// Read a record length prefix and return the absolute end offset.
    ///
    /// The whole record must fit in the remaining buffer. Record bodies are
    /// sequences of 4-byte aligned entries, so a length that is not a
    /// multiple of 4 is malformed.
    pub fn begin_nested_record(&mut self) -> Result<usize> {
        let offset = self.offset;
        let len = self.read_length()?;
        if len % PAYLOAD_ALIGNMENT != 0 {
            return Err(Error::Malformed {
                offset,
                reason: format!("record length {} is not 4-byte aligned", len),
            });
        }
        if len > self.remaining() {
            return Err(Error::Truncated {
                offset: self.offset,
                needed: len,
                available: self.remaining(),
            });
        }
        Ok(self.offset + len)
    }

    /// Check that a record body ended exactly at `end`.
    pub fn end_nested_record(&self, end: usize) -> Result<()> {
        match self.offset.cmp(&end) {
            std::cmp::Ordering::Equal => Ok(()),
            std::cmp::Ordering::Greater => Err(Error::Malformed {
                offset: self.offset,
                reason: format!("overread record boundary {}", end),
            }),
            std::cmp::Ordering::Less => Err(Error::Malformed {
                offset: self.offset,
                reason: format!("{} unread bytes before record boundary", end - self.offset),
            }),
        }
    }

    /// Advance past a payload using only the wire type.
    pub fn skip(&mut self, header: FieldHeader) -> Result<()> {
        match header.wire_type.inline_size() {
            Some(size) => {
                self.read_bytes(size)?;
            }
            None => {
                self.read_length_prefixed()?;
            }
        }
        Ok(())
    }

    /// Slice of the payload for `header` without interpreting it.
    pub fn read_raw_payload(&mut self, header: FieldHeader) -> Result<&'a [u8]> {
        match header.wire_type {
            WireType::Fixed32 => self.read_bytes(4),
            WireType::Fixed64 => self.read_bytes(8),
            WireType::LengthPrefixed => self.read_length_prefixed(),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}
