// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Errors raised while converting value maps to typed records.

use crate::schema::FieldTag;
use std::fmt;

/// Binding failures, distinct from wire-level codec errors.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingError {
    /// A field with no default and no `Option` wrapper is absent.
    MissingField {
        record: &'static str,
        field: &'static str,
        tag: FieldTag,
    },
    /// The value variant does not match the Rust field type.
    UnexpectedValue {
        expected: &'static str,
        found: &'static str,
    },
    /// An enum-like constant has no matching variant.
    UnknownConstant { name: &'static str, value: i32 },
    /// A field conversion failed; wraps the underlying cause.
    Field {
        record: &'static str,
        field: &'static str,
        tag: FieldTag,
        source: Box<BindingError>,
    },
    /// The value has the right variant but `target` cannot hold it, such as
    /// an out-of-range narrow integer.
    Invalid {
        target: &'static str,
        reason: String,
    },
}

impl BindingError {
    /// Attach field context to a conversion error.
    pub fn in_field(self, record: &'static str, field: &'static str, tag: FieldTag) -> Self {
        BindingError::Field {
            record,
            field,
            tag,
            source: Box::new(self),
        }
    }
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::MissingField { record, field, tag } => {
                write!(f, "{}.{} (tag {}) is missing", record, field, tag)
            }
            BindingError::UnexpectedValue { expected, found } => {
                write!(f, "expected {} value, found {}", expected, found)
            }
            BindingError::UnknownConstant { name, value } => {
                write!(f, "{} has no constant {}", name, value)
            }
            BindingError::Field {
                record,
                field,
                tag,
                source,
            } => write!(f, "{}.{} (tag {}): {}", record, field, tag, source),
            BindingError::Invalid { target, reason } => {
                write!(f, "cannot construct {}: {}", target, reason)
            }
        }
    }
}

impl std::error::Error for BindingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BindingError::Field { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
