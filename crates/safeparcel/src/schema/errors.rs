// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for descriptor construction and registration.

use super::FieldTag;
use std::fmt;

/// Schema failures. All of them surface when a descriptor is built or
/// registered, never while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two fields of one record share a tag.
    DuplicateTag { record: String, tag: FieldTag },
    /// Tag does not fit in the 29 header bits.
    TagOutOfRange { record: String, tag: FieldTag },
    /// Default value shape disagrees with the field kind, or the field is
    /// both required and defaulted.
    InvalidDefault {
        record: String,
        tag: FieldTag,
        reason: &'static str,
    },
    /// Version field is not `Int32`, or more than one is declared.
    InvalidVersionField { record: String, tag: FieldTag },
    /// A record type contains itself (directly or through other records).
    RecursiveType { record: String },
    /// A different schema is already registered under this name.
    ConflictingSchema { record: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::DuplicateTag { record, tag } => {
                write!(f, "tag {} is declared twice in {}", tag, record)
            }
            SchemaError::TagOutOfRange { record, tag } => {
                write!(f, "tag {} of {} exceeds the header tag range", tag, record)
            }
            SchemaError::InvalidDefault {
                record,
                tag,
                reason,
            } => write!(f, "invalid default for field {} of {}: {}", tag, record, reason),
            SchemaError::InvalidVersionField { record, tag } => write!(
                f,
                "version field {} of {} must be the only Int32 version field",
                tag, record
            ),
            SchemaError::RecursiveType { record } => {
                write!(f, "record {} contains itself", record)
            }
            SchemaError::ConflictingSchema { record } => {
                write!(f, "a different schema is already registered as {}", record)
            }
        }
    }
}

impl std::error::Error for SchemaError {}
