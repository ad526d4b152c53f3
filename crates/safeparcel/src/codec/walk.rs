// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-less traversal of one envelope.

use crate::config::CodecConfig;
use crate::error::{Error, Result};
use crate::wire::{FieldHeader, ParcelReader};

/// One raw entry: header plus uninterpreted payload.
///
/// For length-prefixed entries `payload` is the content without its length
/// prefix or padding; for a nested record that is the record body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireEntry<'a> {
    /// Offset of the header within the walked buffer.
    pub offset: usize,
    pub header: FieldHeader,
    pub payload: &'a [u8],
}

/// Iterator over the entries of a record body.
///
/// Yields at most one error, then stops.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    reader: ParcelReader<'a>,
    end: usize,
    done: bool,
}

impl<'a> Walk<'a> {
    /// Walk a record body (entries only, no envelope length).
    pub fn body(body: &'a [u8]) -> Self {
        Self::body_with(body, &CodecConfig::default())
    }

    /// Walk a record body, applying `config`'s length-prefix limit.
    pub fn body_with(body: &'a [u8], config: &CodecConfig) -> Self {
        Self {
            reader: ParcelReader::new(body).with_max_payload_len(config.max_payload_len),
            end: body.len(),
            done: false,
        }
    }

    /// Offset reached so far.
    pub fn offset(&self) -> usize {
        self.reader.offset()
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Result<WireEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.reader.offset() >= self.end {
            self.done = true;
            return None;
        }
        let offset = self.reader.offset();
        let entry = self.reader.read_header().and_then(|header| {
            let payload = self.reader.read_raw_payload(header)?;
            Ok(WireEntry {
                offset,
                header,
                payload,
            })
        });
        if entry.is_err() {
            self.done = true;
        }
        Some(entry)
    }
}

/// Walk the entries of a top-level envelope.
///
/// Only the envelope framing is checked up front: the declared length must
/// be aligned and fit in `bytes`. Bytes after the envelope are ignored.
pub fn walk(bytes: &[u8]) -> Result<Walk<'_>> {
    walk_with(bytes, &CodecConfig::default())
}

/// [`walk`] with `config`'s length-prefix limit applied to the envelope and
/// every entry. Trailing bytes are still ignored; callers check them.
pub fn walk_with<'a>(bytes: &'a [u8], config: &CodecConfig) -> Result<Walk<'a>> {
    let mut reader = ParcelReader::new(bytes).with_max_payload_len(config.max_payload_len);
    let end = reader.begin_nested_record()?;
    let body = bytes.get(reader.offset()..end).ok_or(Error::Malformed {
        offset: reader.offset(),
        reason: "envelope outside buffer".into(),
    })?;
    Ok(Walk::body_with(body, config))
}
