// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire primitives: field headers, wire types and the byte cursors.
//!
//! Field entry layout:
//!
//! ```text
//! +--------------------------------+---------------------------------+
//! | header: i32 LE                 | payload                         |
//! |   bits [31:3] tag              |   wire type 0: 4 bytes          |
//! |   bits [2:0]  wire type        |   wire type 1: 8 bytes          |
//! |                                |   wire type 2: i32 len + bytes  |
//! |                                |                + zero padding   |
//! +--------------------------------+---------------------------------+
//! ```

pub mod cursor;

pub use cursor::{ParcelReader, ParcelWriter};

use crate::config::{PAYLOAD_ALIGNMENT, WIRE_TYPE_BITS, WIRE_TYPE_MASK};
use crate::error::{Error, Result};
use crate::schema::FieldTag;
use std::fmt;

/// Coarse payload shape, enough to skip a field without knowing its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    /// 4-byte inline value.
    Fixed32 = 0,
    /// 8-byte inline value.
    Fixed64 = 1,
    /// `i32` length, content, zero padding to 4 bytes.
    LengthPrefixed = 2,
}

impl WireType {
    /// Decode the low header bits. Returns `None` for reserved codes (3..=7).
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            0 => Some(Self::Fixed32),
            1 => Some(Self::Fixed64),
            2 => Some(Self::LengthPrefixed),
            _ => None,
        }
    }

    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Payload size for inline wire types.
    pub const fn inline_size(self) -> Option<usize> {
        match self {
            Self::Fixed32 => Some(4),
            Self::Fixed64 => Some(8),
            Self::LengthPrefixed => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Fixed32 => "fixed32",
            Self::Fixed64 => "fixed64",
            Self::LengthPrefixed => "length-prefixed",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Decoded field entry header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldHeader {
    pub tag: FieldTag,
    pub wire_type: WireType,
}

impl FieldHeader {
    pub const fn new(tag: FieldTag, wire_type: WireType) -> Self {
        Self { tag, wire_type }
    }

    /// Pack as `(tag << 3) | wire_type`.
    ///
    /// Tags above [`MAX_FIELD_TAG`](crate::config::MAX_FIELD_TAG) lose their
    /// high bits; descriptors and `RecordCodec::encode_field` reject them
    /// before a header is written.
    pub const fn pack(self) -> u32 {
        (self.tag << WIRE_TYPE_BITS) | self.wire_type.bits()
    }

    /// Split a raw header read at `offset`.
    pub fn unpack(raw: u32, offset: usize) -> Result<Self> {
        let bits = raw & WIRE_TYPE_MASK;
        let Some(wire_type) = WireType::from_bits(bits) else {
            return Err(Error::Malformed {
                offset,
                reason: format!("reserved wire type {} in header 0x{:08x}", bits, raw),
            });
        };
        Ok(Self {
            tag: raw >> WIRE_TYPE_BITS,
            wire_type,
        })
    }
}

/// Align an offset up to the given power-of-two boundary.
#[inline]
pub const fn align_offset(offset: usize, alignment: usize) -> usize {
    if alignment == 0 {
        offset
    } else {
        (offset + alignment - 1) & !(alignment - 1)
    }
}

/// Zero bytes needed after `len` content bytes of a length-prefixed payload.
#[inline]
pub const fn padding_for(len: usize) -> usize {
    align_offset(len, PAYLOAD_ALIGNMENT) - len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_FIELD_TAG;

    #[test]
    fn test_header_pack_unpack() {
        let header = FieldHeader::new(1123, WireType::LengthPrefixed);
        let raw = header.pack();
        assert_eq!(raw, (1123 << 3) | 2);
        assert_eq!(FieldHeader::unpack(raw, 0).expect("valid header"), header);
    }

    #[test]
    fn test_header_max_tag() {
        let header = FieldHeader::new(MAX_FIELD_TAG, WireType::Fixed64);
        assert_eq!(header.pack(), 0xFFFF_FFF9);
        let back = FieldHeader::unpack(header.pack(), 0).expect("valid header");
        assert_eq!(back.tag, MAX_FIELD_TAG);
    }

    #[test]
    fn test_reserved_wire_type_rejected() {
        for bits in 3..=7u32 {
            let err = FieldHeader::unpack((5 << 3) | bits, 16).unwrap_err();
            match err {
                Error::Malformed { offset, .. } => assert_eq!(offset, 16),
                other => panic!("unexpected error {:?}", other),
            }
        }
    }

    #[test]
    fn test_padding() {
        assert_eq!(padding_for(0), 0);
        assert_eq!(padding_for(1), 3);
        assert_eq!(padding_for(2), 2);
        assert_eq!(padding_for(3), 1);
        assert_eq!(padding_for(4), 0);
        assert_eq!(align_offset(13, 4), 16);
    }
}
