// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic values moved between the binding layer and the codec.

use crate::schema::FieldTag;
use std::collections::BTreeMap;

/// Tag-to-value map for one record.
///
/// Ordered by tag so `Debug` output is stable; encoding order is always the
/// descriptor's declaration order, never the map's.
pub type ValueMap = BTreeMap<FieldTag, Value>;

/// A dynamically typed field value, one variant per wire kind.
///
/// Enum-like constants travel as [`Value::Int32`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    ByteArrayArray(Vec<Vec<u8>>),
    Record(ValueMap),
    RecordArray(Vec<ValueMap>),
    StringArray(Vec<String>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    BoolArray(Vec<bool>),
    /// Platform payload carried as an uninterpreted blob.
    Opaque(Vec<u8>),
}

impl Value {
    /// Variant name, used in mismatch diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::ByteArrayArray(_) => "byte-array-array",
            Self::Record(_) => "record",
            Self::RecordArray(_) => "record-array",
            Self::StringArray(_) => "string-array",
            Self::IntArray(_) => "int-array",
            Self::LongArray(_) => "long-array",
            Self::FloatArray(_) => "float-array",
            Self::DoubleArray(_) => "double-array",
            Self::BoolArray(_) => "bool-array",
            Self::Opaque(_) => "opaque",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the bytes of a `Bytes` or `Opaque` value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) | Self::Opaque(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&ValueMap> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record_array(&self) -> Option<&[ValueMap]> {
        match self {
            Self::RecordArray(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! impl_from_for_value {
    ($($type:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_for_value! {
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Vec<u8> => Bytes,
    Vec<Vec<u8>> => ByteArrayArray,
    ValueMap => Record,
    Vec<ValueMap> => RecordArray,
    Vec<String> => StringArray,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
    Vec<f32> => FloatArray,
    Vec<f64> => DoubleArray,
    Vec<bool> => BoolArray,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}
