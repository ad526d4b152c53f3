// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # SafeParcel - tagged record codec
//!
//! Encodes typed records into the SafeParcel wire format used for IPC
//! payloads, and decodes them back. Fields are identified by integer tags,
//! so an older decoder skips fields a newer producer added, and a newer
//! decoder fills defaults for fields an older producer never sent.
//!
//! ## Quick Start
//!
//! ```rust
//! use safeparcel::{ParcelEnum, SafeParcelable};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, ParcelEnum)]
//! enum Priority {
//!     Low = 0,
//!     High = 1,
//! }
//!
//! #[derive(Debug, PartialEq, SafeParcelable)]
//! struct Task {
//!     #[parcel(tag = 1000, version, default = "1")]
//!     version: i32,
//!     #[parcel(tag = 1)]
//!     id: i64,
//!     #[parcel(tag = 2, default)]
//!     title: String,
//!     #[parcel(tag = 3)]
//!     priority: Priority,
//!     #[parcel(tag = 4)]
//!     labels: Vec<String>,
//! }
//!
//! let task = Task {
//!     version: 1,
//!     id: 7,
//!     title: "ship it".into(),
//!     priority: Priority::High,
//!     labels: vec!["release".into()],
//! };
//! let bytes = task.write_to_parcel()?;
//! assert_eq!(Task::create_from_parcel(&bytes)?, task);
//! # Ok::<(), safeparcel::Error>(())
//! ```
//!
//! ## Layers
//!
//! ```text
//! +---------------------------------------------------------------+
//! |  binding   SafeParcelable / ParcelField, derive macros         |
//! +---------------------------------------------------------------+
//! |  codec     RecordCodec: ValueMap <-> envelope, walk            |
//! +---------------------------------------------------------------+
//! |  schema    RecordDescriptor, builder, process-wide registry    |
//! +---------------------------------------------------------------+
//! |  wire      ParcelWriter / ParcelReader, headers, padding       |
//! +---------------------------------------------------------------+
//! ```
//!
//! Descriptors can also be built by hand with
//! [`RecordDescriptorBuilder`](schema::RecordDescriptorBuilder) and used
//! with [`encode`] / [`decode`] on plain [`ValueMap`]s.

// Generated code refers to `::safeparcel`, including in this crate's tests.
extern crate self as safeparcel;

/// Typed binding traits and the helpers derived code calls.
pub mod binding;
/// Envelope encoder, decoder and schema-less walker.
pub mod codec;
/// Wire constants and runtime codec limits.
pub mod config;
/// Error taxonomy.
pub mod error;
/// Round-trip verification helpers.
pub mod harness;
/// Record descriptors and the descriptor registry.
pub mod schema;
/// Dynamic value model.
pub mod value;
/// Primitive cursors and header layout.
pub mod wire;

pub use binding::{BindingError, Opaque, ParcelConstant, ParcelElement, ParcelField};
pub use codec::{decode, encode, walk, walk_with, RecordCodec};
pub use config::CodecConfig;
pub use error::{Error, Result};
pub use schema::{
    register_schema, FieldDescriptor, FieldKind, FieldTag, RecordDescriptor,
    RecordDescriptorHandle, SchemaError,
};
pub use value::{Value, ValueMap};

pub use binding::SafeParcelable;
#[cfg(feature = "derive")]
pub use safeparcel_codegen::{ParcelEnum, SafeParcelable};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
