// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! SafeParcel configuration: wire constants and runtime codec limits.
//!
//! Every wire-format constant lives here. **Never hardcode them elsewhere.**
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: compile-time constants describing the bit-exact
//!   wire layout (header packing, framing sizes, alignment).
//! - **Level 2 (Dynamic)**: [`CodecConfig`] for per-codec limits, with an
//!   environment-driven default.
//!
//! # Example
//!
//! ```
//! use safeparcel::config::CodecConfig;
//!
//! let config = CodecConfig::default().with_max_depth(8);
//! assert_eq!(config.max_depth, 8);
//! ```

// =======================================================================
// Wire layout
// =======================================================================

/// Size of a field entry header (`i32`, little-endian).
pub const HEADER_SIZE: usize = 4;

/// Size of the length prefix in front of a record envelope or a
/// length-prefixed payload.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Length-prefixed payloads are zero-padded up to this boundary.
pub const PAYLOAD_ALIGNMENT: usize = 4;

/// Number of low header bits holding the wire type.
pub const WIRE_TYPE_BITS: u32 = 3;

/// Mask selecting the wire type out of a header (`bits [2:0]`).
pub const WIRE_TYPE_MASK: u32 = (1 << WIRE_TYPE_BITS) - 1;

/// Largest tag that fits in header bits `[31:3]`.
pub const MAX_FIELD_TAG: u32 = u32::MAX >> WIRE_TYPE_BITS;

/// Tag conventionally used for the record version field.
pub const VERSION_FIELD_TAG: u32 = 1000;

// =======================================================================
// Runtime limits
// =======================================================================

/// Default maximum nesting of records inside records.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default upper bound for a single length prefix (64 MiB).
///
/// Anything above it is treated as a corrupt ("absurd") length.
pub const DEFAULT_MAX_PAYLOAD_LEN: usize = 64 * 1024 * 1024;

/// Runtime limits applied by a [`RecordCodec`](crate::codec::RecordCodec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Maximum record nesting depth (top-level record is depth 1).
    pub max_depth: usize,
    /// Maximum accepted value of any length prefix.
    pub max_payload_len: usize,
    /// Fail top-level decode when bytes follow the record envelope.
    pub reject_trailing_bytes: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
            reject_trailing_bytes: true,
        }
    }
}

impl CodecConfig {
    /// Build a config from `SAFEPARCEL_*` environment variables.
    ///
    /// - `SAFEPARCEL_MAX_DEPTH`
    /// - `SAFEPARCEL_MAX_PAYLOAD_LEN`
    /// - `SAFEPARCEL_ALLOW_TRAILING` (any value disables the trailing check)
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_depth: std::env::var("SAFEPARCEL_MAX_DEPTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_depth),
            max_payload_len: std::env::var("SAFEPARCEL_MAX_PAYLOAD_LEN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_payload_len),
            reject_trailing_bytes: std::env::var("SAFEPARCEL_ALLOW_TRAILING").is_err(),
        }
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the maximum accepted length prefix.
    pub fn with_max_payload_len(mut self, max_payload_len: usize) -> Self {
        self.max_payload_len = max_payload_len;
        self
    }

    /// Allow or reject bytes after the top-level envelope.
    pub fn with_reject_trailing_bytes(mut self, reject: bool) -> Self {
        self.reject_trailing_bytes = reject;
        self
    }
}
