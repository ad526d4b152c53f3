// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed binding between Rust structs and value maps.
//!
//! A record type implements [`SafeParcelable`], usually through
//! `#[derive(SafeParcelable)]`. Each field type implements [`ParcelField`],
//! which names its [`FieldKind`] and converts to and from [`Value`]. Arrays
//! go through [`ParcelElement`], so `Vec<T>` is a field whenever `T` is an
//! element.
//!
//! ```
//! use safeparcel::SafeParcelable;
//!
//! #[derive(Debug, PartialEq, SafeParcelable)]
//! struct Ping {
//!     #[parcel(tag = 1)]
//!     seq: i32,
//!     #[parcel(tag = 2)]
//!     note: Option<String>,
//! }
//!
//! let ping = Ping { seq: 7, note: None };
//! let bytes = ping.write_to_parcel().unwrap();
//! assert_eq!(Ping::create_from_parcel(&bytes).unwrap(), ping);
//! ```

mod errors;
mod impls;

pub use errors::BindingError;

use crate::codec::RecordCodec;
use crate::error::Result;
use crate::schema::{
    registry, ConstantSet, FieldDescriptor, FieldKind, FieldTag, RecordDescriptor,
    RecordDescriptorHandle, SchemaError,
};
use crate::value::{Value, ValueMap};

/// A record type with a declared field table.
pub trait SafeParcelable: Sized + 'static {
    /// Build this type's descriptor. Called once per process by the registry.
    fn schema() -> std::result::Result<RecordDescriptor, SchemaError>;

    /// Present fields keyed by tag. Absent optional fields are left out.
    fn to_value_map(&self) -> ValueMap;

    /// Construct from a decoded map, defaults already applied.
    fn from_value_map(map: ValueMap) -> std::result::Result<Self, BindingError>;

    /// Memoized, shared descriptor.
    fn descriptor() -> std::result::Result<RecordDescriptorHandle, SchemaError> {
        registry().describe::<Self>()
    }

    /// Encode with the default codec settings.
    fn write_to_parcel(&self) -> Result<Vec<u8>> {
        self.write_with(&RecordCodec::new())
    }

    /// Decode with the default codec settings.
    fn create_from_parcel(bytes: &[u8]) -> Result<Self> {
        Self::create_with(&RecordCodec::new(), bytes)
    }

    fn write_with(&self, codec: &RecordCodec) -> Result<Vec<u8>> {
        let descriptor = Self::descriptor()?;
        codec.encode(&descriptor, &self.to_value_map())
    }

    fn create_with(codec: &RecordCodec, bytes: &[u8]) -> Result<Self> {
        let descriptor = Self::descriptor()?;
        let map = codec.decode(&descriptor, bytes)?;
        Ok(Self::from_value_map(map)?)
    }
}

/// A Rust type usable as a record field.
pub trait ParcelField: Sized {
    fn field_kind() -> std::result::Result<FieldKind, SchemaError>;

    /// `None` leaves the field off the wire.
    fn to_value(&self) -> Option<Value>;

    fn from_value(value: Value) -> std::result::Result<Self, BindingError>;

    /// Value used when the field is absent and has no default.
    ///
    /// `None` means absence is an error, which also marks the field
    /// required in derived descriptors.
    fn absent() -> Option<Self> {
        None
    }
}

/// A Rust type usable as an array element; `Vec<T>` is then a field.
pub trait ParcelElement: Sized {
    fn array_kind() -> std::result::Result<FieldKind, SchemaError>;
    fn array_to_value(items: &[Self]) -> Value;
    fn array_from_value(value: Value) -> std::result::Result<Vec<Self>, BindingError>;
}

/// Enum-like closed set of `i32` constants.
pub trait ParcelConstant: Sized + 'static {
    const NAME: &'static str;
    const VALUES: &'static [i32];

    fn to_constant(&self) -> i32;

    /// Variant for `value`, or the fallback variant when one is declared.
    fn from_constant(value: i32) -> Option<Self>;
}

/// Platform payload carried through as uninterpreted bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Opaque(pub Vec<u8>);

pub(crate) fn unexpected(expected: &'static str, found: &Value) -> BindingError {
    BindingError::UnexpectedValue {
        expected,
        found: found.kind_name(),
    }
}

// Helpers called by derived code. Public so generated impls in downstream
// crates can reach them; not part of the documented API.

#[doc(hidden)]
pub fn field_descriptor<T: ParcelField>(
    tag: FieldTag,
    name: &'static str,
    default: Option<T>,
    required: bool,
) -> std::result::Result<FieldDescriptor, SchemaError> {
    let mut field = FieldDescriptor::new(tag, T::field_kind()?).named(name);
    match default {
        Some(value) => {
            if let Some(value) = value.to_value() {
                field = field.with_default(value);
            }
        }
        None if required || T::absent().is_none() => field = field.required(),
        None => {}
    }
    Ok(field)
}

#[doc(hidden)]
pub fn take_field<T: ParcelField>(
    map: &mut ValueMap,
    record: &'static str,
    field: &'static str,
    tag: FieldTag,
) -> std::result::Result<Option<T>, BindingError> {
    match map.remove(&tag) {
        Some(value) => T::from_value(value)
            .map(Some)
            .map_err(|e| e.in_field(record, field, tag)),
        None => Ok(None),
    }
}

#[doc(hidden)]
pub fn absent_field<T: ParcelField>(
    record: &'static str,
    field: &'static str,
    tag: FieldTag,
) -> std::result::Result<T, BindingError> {
    T::absent().ok_or(BindingError::MissingField { record, field, tag })
}

#[doc(hidden)]
pub fn put_field<T: ParcelField>(map: &mut ValueMap, tag: FieldTag, value: &T) {
    if let Some(value) = value.to_value() {
        map.insert(tag, value);
    }
}

#[doc(hidden)]
pub fn record_kind<T: SafeParcelable>() -> std::result::Result<FieldKind, SchemaError> {
    Ok(FieldKind::Record(T::descriptor()?))
}

#[doc(hidden)]
pub fn record_array_kind<T: SafeParcelable>() -> std::result::Result<FieldKind, SchemaError> {
    Ok(FieldKind::RecordArray(T::descriptor()?))
}

#[doc(hidden)]
pub fn record_from_value<T: SafeParcelable>(value: Value) -> std::result::Result<T, BindingError> {
    match value {
        Value::Record(map) => T::from_value_map(map),
        other => Err(unexpected("record", &other)),
    }
}

#[doc(hidden)]
pub fn records_to_value<T: SafeParcelable>(items: &[T]) -> Value {
    Value::RecordArray(items.iter().map(T::to_value_map).collect())
}

#[doc(hidden)]
pub fn records_from_value<T: SafeParcelable>(
    value: Value,
) -> std::result::Result<Vec<T>, BindingError> {
    match value {
        Value::RecordArray(maps) => maps.into_iter().map(T::from_value_map).collect(),
        other => Err(unexpected("record-array", &other)),
    }
}

#[doc(hidden)]
pub fn constant_kind<T: ParcelConstant>() -> FieldKind {
    FieldKind::Constant(ConstantSet::new(T::NAME, T::VALUES))
}

#[doc(hidden)]
pub fn constant_from_value<T: ParcelConstant>(value: Value) -> std::result::Result<T, BindingError> {
    match value {
        Value::Int32(raw) => T::from_constant(raw).ok_or(BindingError::UnknownConstant {
            name: T::NAME,
            value: raw,
        }),
        other => Err(unexpected("constant", &other)),
    }
}
