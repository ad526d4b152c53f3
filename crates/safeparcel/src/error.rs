// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec error taxonomy.
//!
//! Wire-level variants carry the byte offset at which the problem was
//! detected. Schema and binding failures are wrapped so one `?` chain covers
//! registration, codec and binding layers.

use crate::binding::BindingError;
use crate::schema::{FieldTag, SchemaError};
use std::fmt;
use std::sync::Arc;

/// Errors returned by encode/decode and the binding helpers.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Descriptor construction or registration failed.
    Schema(SchemaError),
    /// The buffer is shorter than its framing claims.
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// A length or header invariant is violated.
    Malformed { offset: usize, reason: String },
    /// Padding after a length-prefixed payload is not zero.
    Alignment { offset: usize },
    /// A declared field arrived (or was supplied) with the wrong shape.
    SchemaMismatch {
        record: Arc<str>,
        tag: FieldTag,
        expected: &'static str,
        found: &'static str,
    },
    /// A required field never appeared.
    MissingRequiredField { record: Arc<str>, tag: FieldTag },
    /// Records are nested deeper than the configured limit.
    NestingTooDeep { offset: usize, max_depth: usize },
    /// Converting between a value map and a typed instance failed.
    Binding(BindingError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Schema(err) => write!(f, "schema error: {}", err),
            Error::Truncated {
                offset,
                needed,
                available,
            } => write!(
                f,
                "truncated at offset {}: need {} bytes, have {}",
                offset, needed, available
            ),
            Error::Malformed { offset, reason } => {
                write!(f, "malformed at offset {}: {}", offset, reason)
            }
            Error::Alignment { offset } => {
                write!(f, "non-zero padding at offset {}", offset)
            }
            Error::SchemaMismatch {
                record,
                tag,
                expected,
                found,
            } => write!(
                f,
                "field {} of {}: expected {}, found {}",
                tag, record, expected, found
            ),
            Error::MissingRequiredField { record, tag } => {
                write!(f, "required field {} of {} is missing", tag, record)
            }
            Error::NestingTooDeep { offset, max_depth } => write!(
                f,
                "records nested deeper than {} at offset {}",
                max_depth, offset
            ),
            Error::Binding(err) => write!(f, "binding error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Schema(err) => Some(err),
            Error::Binding(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        Error::Schema(err)
    }
}

impl From<BindingError> for Error {
    fn from(err: BindingError) -> Self {
        Error::Binding(err)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
