// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record descriptors: per-type field tables.
//!
//! A [`RecordDescriptor`] lists the fields of one record type in declaration
//! order. It is validated once when built (unique tags, tag range, default
//! shapes) and is immutable afterwards, so it can be shared across threads
//! behind an `Arc` ([`RecordDescriptorHandle`]).
//!
//! # Example
//!
//! ```
//! use safeparcel::schema::{FieldKind, RecordDescriptorBuilder};
//! use safeparcel::Value;
//!
//! let descriptor = RecordDescriptorBuilder::new("Greeting")
//!     .field(1, FieldKind::Int32)
//!     .optional(2, FieldKind::String, Value::from(""))
//!     .build()
//!     .unwrap();
//! assert_eq!(descriptor.fields().len(), 2);
//! ```

mod builder;
mod errors;
mod registry;

pub use builder::RecordDescriptorBuilder;
pub use errors::SchemaError;
pub use registry::{register_schema, registry, SchemaRegistry};

use crate::config::MAX_FIELD_TAG;
use crate::value::Value;
use crate::wire::WireType;
use std::collections::HashMap;
use std::sync::Arc;

/// Field identifier within one record's encoding.
pub type FieldTag = u32;

/// Shared, immutable descriptor.
pub type RecordDescriptorHandle = Arc<RecordDescriptor>;

/// Closed set of named `i32` constants (enum-like field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantSet {
    pub name: Arc<str>,
    pub values: Arc<[i32]>,
}

impl ConstantSet {
    pub fn new(name: impl Into<Arc<str>>, values: impl Into<Arc<[i32]>>) -> Self {
        Self {
            name: name.into(),
            values: values.into(),
        }
    }

    pub fn contains(&self, value: i32) -> bool {
        self.values.contains(&value)
    }
}

/// Semantic type of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Bytes,
    ByteArrayArray,
    Record(RecordDescriptorHandle),
    RecordArray(RecordDescriptorHandle),
    StringArray,
    IntArray,
    LongArray,
    FloatArray,
    DoubleArray,
    BoolArray,
    /// Enum-like `i32` constant.
    Constant(ConstantSet),
    /// Platform payload, framed but never interpreted.
    Opaque,
}

impl FieldKind {
    /// Wire type used for fields of this kind.
    pub fn wire_type(&self) -> WireType {
        match self {
            Self::Bool | Self::Int32 | Self::Float32 | Self::Constant(_) => WireType::Fixed32,
            Self::Int64 | Self::Float64 => WireType::Fixed64,
            Self::String
            | Self::Bytes
            | Self::ByteArrayArray
            | Self::Record(_)
            | Self::RecordArray(_)
            | Self::StringArray
            | Self::IntArray
            | Self::LongArray
            | Self::FloatArray
            | Self::DoubleArray
            | Self::BoolArray
            | Self::Opaque => WireType::LengthPrefixed,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::ByteArrayArray => "byte-array-array",
            Self::Record(_) => "record",
            Self::RecordArray(_) => "record-array",
            Self::StringArray => "string-array",
            Self::IntArray => "int-array",
            Self::LongArray => "long-array",
            Self::FloatArray => "float-array",
            Self::DoubleArray => "double-array",
            Self::BoolArray => "bool-array",
            Self::Constant(_) => "constant",
            Self::Opaque => "opaque",
        }
    }

    /// Whether `value` has the variant this kind encodes from.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Bool, Value::Bool(_))
                | (Self::Int32 | Self::Constant(_), Value::Int32(_))
                | (Self::Int64, Value::Int64(_))
                | (Self::Float32, Value::Float32(_))
                | (Self::Float64, Value::Float64(_))
                | (Self::String, Value::String(_))
                | (Self::Bytes, Value::Bytes(_))
                | (Self::ByteArrayArray, Value::ByteArrayArray(_))
                | (Self::Record(_), Value::Record(_))
                | (Self::RecordArray(_), Value::RecordArray(_))
                | (Self::StringArray, Value::StringArray(_))
                | (Self::IntArray, Value::IntArray(_))
                | (Self::LongArray, Value::LongArray(_))
                | (Self::FloatArray, Value::FloatArray(_))
                | (Self::DoubleArray, Value::DoubleArray(_))
                | (Self::BoolArray, Value::BoolArray(_))
                | (Self::Opaque, Value::Opaque(_))
        )
    }
}

/// One declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub tag: FieldTag,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
    /// Source-level name, for diagnostics only.
    pub name: Option<Arc<str>>,
    /// Marks the record's version field.
    pub version: bool,
}

impl FieldDescriptor {
    /// Optional field without a default.
    pub fn new(tag: FieldTag, kind: FieldKind) -> Self {
        Self {
            tag,
            kind,
            required: false,
            default: None,
            name: None,
            version: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn named(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn version(mut self) -> Self {
        self.version = true;
        self
    }
}

/// Validated field table for one record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDescriptor {
    name: Arc<str>,
    fields: Vec<FieldDescriptor>,
    by_tag: HashMap<FieldTag, usize>,
    version_tag: Option<FieldTag>,
}

impl RecordDescriptor {
    /// Validate `fields` and build a descriptor.
    pub fn new(
        name: impl Into<Arc<str>>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut by_tag = HashMap::with_capacity(fields.len());
        let mut version_tag = None;

        for (index, field) in fields.iter().enumerate() {
            if field.tag > MAX_FIELD_TAG {
                return Err(SchemaError::TagOutOfRange {
                    record: name.to_string(),
                    tag: field.tag,
                });
            }
            if by_tag.insert(field.tag, index).is_some() {
                return Err(SchemaError::DuplicateTag {
                    record: name.to_string(),
                    tag: field.tag,
                });
            }
            if let Some(default) = &field.default {
                if field.required {
                    return Err(SchemaError::InvalidDefault {
                        record: name.to_string(),
                        tag: field.tag,
                        reason: "required fields cannot declare a default",
                    });
                }
                if !field.kind.accepts(default) {
                    return Err(SchemaError::InvalidDefault {
                        record: name.to_string(),
                        tag: field.tag,
                        reason: "default value does not match the field kind",
                    });
                }
            }
            if field.version {
                if field.kind != FieldKind::Int32 || version_tag.is_some() {
                    return Err(SchemaError::InvalidVersionField {
                        record: name.to_string(),
                        tag: field.tag,
                    });
                }
                version_tag = Some(field.tag);
            }
        }

        Ok(Self {
            name,
            fields,
            by_tag,
            version_tag,
        })
    }

    /// Type identity, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, tag: FieldTag) -> Option<&FieldDescriptor> {
        self.by_tag.get(&tag).map(|&index| &self.fields[index])
    }

    /// Tag of the version field, if one is declared.
    pub fn version_tag(&self) -> Option<FieldTag> {
        self.version_tag
    }

    /// Nested record descriptors referenced directly by this record.
    pub fn nested(&self) -> impl Iterator<Item = &RecordDescriptorHandle> {
        self.fields.iter().filter_map(|f| match &f.kind {
            FieldKind::Record(inner) | FieldKind::RecordArray(inner) => Some(inner),
            _ => None,
        })
    }
}
