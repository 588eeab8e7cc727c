// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema provider abstraction and the shared schema registry.
//!
//! The decode engine never looks schemas up itself; callers obtain an
//! `Arc<Schema>` from a [`SchemaProvider`] and share it read-only across any
//! number of decode calls.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::error::{CodecError, Result};
use crate::schema::Schema;

/// Source of schemas by fully-qualified type name.
pub trait SchemaProvider {
    /// Resolve the schema for `type_name` (e.g. `"geometry_msgs/Point"`).
    fn schema(&self, type_name: &str) -> Result<Arc<Schema>>;
}

/// Thread-safe registry of resolved values keyed by type name.
///
/// Uses RwLock for concurrent read access with exclusive write access.
pub struct TypeRegistry<T> {
    inner: RwLock<HashMap<String, T>>,
}

impl<T> TypeRegistry<T> {
    /// Create a new empty type registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Register a value under `name`, replacing any previous entry.
    pub fn register(&self, name: impl Into<String>, value: T) -> Result<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| CodecError::Other(format!("Registry lock poisoned: {e}")))?;
        inner.insert(name.into(), value);
        Ok(())
    }

    /// Get a value by name.
    pub fn get(&self, name: &str) -> Result<Option<T>>
    where
        T: Clone,
    {
        let inner = self
            .inner
            .read()
            .map_err(|e| CodecError::Other(format!("Registry lock poisoned: {e}")))?;
        Ok(inner.get(name).cloned())
    }

    /// Check if a name is registered.
    pub fn contains(&self, name: &str) -> Result<bool> {
        let inner = self
            .inner
            .read()
            .map_err(|e| CodecError::Other(format!("Registry lock poisoned: {e}")))?;
        Ok(inner.contains_key(name))
    }

    /// Get all registered names, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| CodecError::Other(format!("Registry lock poisoned: {e}")))?;
        let mut names: Vec<String> = inner.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Get the number of registered entries.
    pub fn len(&self) -> Result<usize> {
        let inner = self
            .inner
            .read()
            .map_err(|e| CodecError::Other(format!("Registry lock poisoned: {e}")))?;
        Ok(inner.len())
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<T> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaProvider for TypeRegistry<Arc<Schema>> {
    fn schema(&self, type_name: &str) -> Result<Arc<Schema>> {
        self.get(type_name)?
            .ok_or_else(|| CodecError::type_not_found(type_name))
    }
}
