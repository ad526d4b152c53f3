// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-wide descriptor table.
//!
//! Descriptors are built outside any lock and published first-wins, so two
//! threads racing on the first use of a type may both build one, but only
//! one instance is ever returned to callers. Building never holds a map
//! lock, which lets a descriptor build the descriptors of its nested
//! records.

use super::{FieldDescriptor, RecordDescriptor, RecordDescriptorHandle, SchemaError};
use crate::binding::SafeParcelable;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

thread_local! {
    /// Types whose descriptor is being built on this thread.
    static BUILDING: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

/// Pops the build stack even if the schema function panics.
struct BuildGuard;

impl Drop for BuildGuard {
    fn drop(&mut self) {
        BUILDING.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Memoized descriptors keyed by Rust type and by registered name.
#[derive(Default)]
pub struct SchemaRegistry {
    by_type: DashMap<TypeId, RecordDescriptorHandle>,
    by_name: RwLock<HashMap<String, RecordDescriptorHandle>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor for a bound type, built on first use.
    pub fn describe<T: SafeParcelable>(&self) -> Result<RecordDescriptorHandle, SchemaError> {
        self.describe_with(TypeId::of::<T>(), std::any::type_name::<T>(), T::schema)
    }

    /// Descriptor for `type_id`, calling `build` only when none is published.
    pub fn describe_with<F>(
        &self,
        type_id: TypeId,
        type_name: &str,
        build: F,
    ) -> Result<RecordDescriptorHandle, SchemaError>
    where
        F: FnOnce() -> Result<RecordDescriptor, SchemaError>,
    {
        if let Some(existing) = self.by_type.get(&type_id) {
            return Ok(Arc::clone(existing.value()));
        }

        let reentered = BUILDING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.contains(&type_id) {
                true
            } else {
                stack.push(type_id);
                false
            }
        });
        if reentered {
            return Err(SchemaError::RecursiveType {
                record: type_name.to_owned(),
            });
        }

        let built = {
            let _guard = BuildGuard;
            build()?
        };
        Ok(self.publish(type_id, built))
    }

    /// Register an explicit field table for a Rust type.
    ///
    /// Registering the same table twice returns the published handle; a
    /// different table for an already published type is a conflict.
    pub fn register_type(
        &self,
        type_id: TypeId,
        name: &str,
        fields: Vec<FieldDescriptor>,
    ) -> Result<RecordDescriptorHandle, SchemaError> {
        let descriptor = Arc::new(RecordDescriptor::new(name, fields)?);
        let published = self.publish_handle(type_id, Arc::clone(&descriptor));
        if Arc::ptr_eq(&published, &descriptor) || *published == *descriptor {
            Ok(published)
        } else {
            Err(SchemaError::ConflictingSchema {
                record: name.to_owned(),
            })
        }
    }

    /// Register a dynamically declared record under `name`.
    pub fn register(
        &self,
        name: &str,
        fields: Vec<FieldDescriptor>,
    ) -> Result<RecordDescriptorHandle, SchemaError> {
        let descriptor = RecordDescriptor::new(name, fields)?;
        let mut by_name = self.by_name.write();
        if let Some(existing) = by_name.get(name) {
            return if **existing == descriptor {
                Ok(Arc::clone(existing))
            } else {
                Err(SchemaError::ConflictingSchema {
                    record: name.to_owned(),
                })
            };
        }
        let handle = Arc::new(descriptor);
        by_name.insert(name.to_owned(), Arc::clone(&handle));
        log::debug!("[registry] registered {} ({} fields)", name, handle.fields().len());
        Ok(handle)
    }

    /// Look up a record registered by name.
    pub fn lookup(&self, name: &str) -> Option<RecordDescriptorHandle> {
        self.by_name.read().get(name).cloned()
    }

    /// Number of published descriptors (by type and by name).
    pub fn len(&self) -> usize {
        self.by_type.len() + self.by_name.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn publish(&self, type_id: TypeId, descriptor: RecordDescriptor) -> RecordDescriptorHandle {
        self.publish_handle(type_id, Arc::new(descriptor))
    }

    fn publish_handle(
        &self,
        type_id: TypeId,
        descriptor: RecordDescriptorHandle,
    ) -> RecordDescriptorHandle {
        let entry = self.by_type.entry(type_id).or_insert_with(|| {
            log::debug!(
                "[registry] published {} ({} fields)",
                descriptor.name(),
                descriptor.fields().len()
            );
            Arc::clone(&descriptor)
        });
        Arc::clone(entry.value())
    }
}

/// The process-wide registry used by [`SafeParcelable::descriptor`].
pub fn registry() -> &'static SchemaRegistry {
    static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
    REGISTRY.get_or_init(SchemaRegistry::new)
}

/// Register an explicit field table for `type_id` in the process-wide registry.
pub fn register_schema(
    type_id: TypeId,
    name: &str,
    fields: Vec<FieldDescriptor>,
) -> Result<RecordDescriptorHandle, SchemaError> {
    registry().register_type(type_id, name, fields)
}
