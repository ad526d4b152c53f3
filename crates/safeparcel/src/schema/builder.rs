// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for RecordDescriptor.

use super::{
    ConstantSet, FieldDescriptor, FieldKind, FieldTag, RecordDescriptor, RecordDescriptorHandle,
    SchemaError,
};
use crate::config::VERSION_FIELD_TAG;
use crate::value::Value;
use std::sync::Arc;

/// Builder for creating RecordDescriptor instances.
#[derive(Debug)]
pub struct RecordDescriptorBuilder {
    name: Arc<str>,
    fields: Vec<FieldDescriptor>,
}

impl RecordDescriptorBuilder {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add an optional field without a default.
    pub fn field(mut self, tag: FieldTag, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor::new(tag, kind));
        self
    }

    /// Add an optional field that decodes to `default` when absent.
    pub fn optional(mut self, tag: FieldTag, kind: FieldKind, default: impl Into<Value>) -> Self {
        self.fields
            .push(FieldDescriptor::new(tag, kind).with_default(default));
        self
    }

    /// Add a field that must be present on the wire.
    pub fn required(mut self, tag: FieldTag, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor::new(tag, kind).required());
        self
    }

    /// Add the version field at the conventional tag.
    pub fn version(self) -> Self {
        self.version_at(VERSION_FIELD_TAG)
    }

    /// Add the version field at a custom tag.
    pub fn version_at(mut self, tag: FieldTag) -> Self {
        self.fields
            .push(FieldDescriptor::new(tag, FieldKind::Int32).version());
        self
    }

    /// Add a nested record field.
    pub fn record(self, tag: FieldTag, nested: &RecordDescriptorHandle) -> Self {
        self.field(tag, FieldKind::Record(Arc::clone(nested)))
    }

    /// Add an array-of-record field.
    pub fn record_array(self, tag: FieldTag, nested: &RecordDescriptorHandle) -> Self {
        self.field(tag, FieldKind::RecordArray(Arc::clone(nested)))
    }

    /// Add an enum-like constant field.
    pub fn constant(
        self,
        tag: FieldTag,
        name: impl Into<Arc<str>>,
        values: impl Into<Arc<[i32]>>,
    ) -> Self {
        self.field(tag, FieldKind::Constant(ConstantSet::new(name, values)))
    }

    /// Add a fully specified field.
    pub fn push(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Validate and build the descriptor.
    pub fn build(self) -> Result<RecordDescriptor, SchemaError> {
        RecordDescriptor::new(self.name, self.fields)
    }

    /// Validate, build and wrap in a shareable handle.
    pub fn build_handle(self) -> Result<RecordDescriptorHandle, SchemaError> {
        self.build().map(Arc::new)
    }
}
