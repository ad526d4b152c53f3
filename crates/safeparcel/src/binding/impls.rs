// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `ParcelField` / `ParcelElement` for scalars, strings and arrays.

use super::{unexpected, BindingError, Opaque, ParcelElement, ParcelField};
use crate::schema::{FieldKind, SchemaError};
use crate::value::Value;

macro_rules! impl_scalar_field {
    ($($type:ty => $kind:ident / $variant:ident, $label:literal);* $(;)?) => {
        $(
            impl ParcelField for $type {
                fn field_kind() -> Result<FieldKind, SchemaError> {
                    Ok(FieldKind::$kind)
                }

                fn to_value(&self) -> Option<Value> {
                    Some(Value::$variant(self.clone()))
                }

                fn from_value(value: Value) -> Result<Self, BindingError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(unexpected($label, &other)),
                    }
                }
            }
        )*
    };
}

impl_scalar_field! {
    bool => Bool / Bool, "bool";
    i32 => Int32 / Int32, "int32";
    i64 => Int64 / Int64, "int64";
    f32 => Float32 / Float32, "float32";
    f64 => Float64 / Float64, "float64";
    String => String / String, "string";
}

/// Narrow integers travel as 4-byte inline `int32` and are range-checked on
/// the way back.
macro_rules! impl_narrow_int_field {
    ($($type:ty),* $(,)?) => {
        $(
            impl ParcelField for $type {
                fn field_kind() -> Result<FieldKind, SchemaError> {
                    Ok(FieldKind::Int32)
                }

                fn to_value(&self) -> Option<Value> {
                    Some(Value::Int32(i32::from(*self)))
                }

                fn from_value(value: Value) -> Result<Self, BindingError> {
                    match value {
                        Value::Int32(v) => <$type>::try_from(v).map_err(|_| BindingError::Invalid {
                            target: stringify!($type),
                            reason: format!("{} is out of range", v),
                        }),
                        other => Err(unexpected("int32", &other)),
                    }
                }
            }
        )*
    };
}

impl_narrow_int_field!(i8, i16);

macro_rules! impl_array_element {
    ($($type:ty => $variant:ident, $label:literal);* $(;)?) => {
        $(
            impl ParcelElement for $type {
                fn array_kind() -> Result<FieldKind, SchemaError> {
                    Ok(FieldKind::$variant)
                }

                fn array_to_value(items: &[Self]) -> Value {
                    Value::$variant(items.to_vec())
                }

                fn array_from_value(value: Value) -> Result<Vec<Self>, BindingError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(unexpected($label, &other)),
                    }
                }
            }
        )*
    };
}

impl_array_element! {
    u8 => Bytes, "bytes";
    Vec<u8> => ByteArrayArray, "byte-array-array";
    String => StringArray, "string-array";
    i32 => IntArray, "int-array";
    i64 => LongArray, "long-array";
    f32 => FloatArray, "float-array";
    f64 => DoubleArray, "double-array";
    bool => BoolArray, "bool-array";
}

impl<T: ParcelElement> ParcelField for Vec<T> {
    fn field_kind() -> Result<FieldKind, SchemaError> {
        T::array_kind()
    }

    fn to_value(&self) -> Option<Value> {
        Some(T::array_to_value(self))
    }

    fn from_value(value: Value) -> Result<Self, BindingError> {
        T::array_from_value(value)
    }
}

impl<T: ParcelField> ParcelField for Option<T> {
    fn field_kind() -> Result<FieldKind, SchemaError> {
        T::field_kind()
    }

    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(T::to_value)
    }

    fn from_value(value: Value) -> Result<Self, BindingError> {
        T::from_value(value).map(Some)
    }

    fn absent() -> Option<Self> {
        Some(None)
    }
}

impl ParcelField for Opaque {
    fn field_kind() -> Result<FieldKind, SchemaError> {
        Ok(FieldKind::Opaque)
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Opaque(self.0.clone()))
    }

    fn from_value(value: Value) -> Result<Self, BindingError> {
        match value {
            Value::Opaque(bytes) => Ok(Opaque(bytes)),
            other => Err(unexpected("opaque", &other)),
        }
    }
}
