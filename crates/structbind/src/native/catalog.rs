// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory schema catalog implementing [`Connection`].
//!
//! Useful for tests and for embedding a fixed schema snapshot. Counts every
//! describe call so callers can observe cache behavior.

use crate::native::{
    ArrayDescriptor, Connection, ConnectionError, NativeClass, StructDescriptor,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Catalog of native types keyed by uppercase type name.
#[derive(Debug, Default)]
pub struct CatalogConnection {
    structs: HashMap<String, StructDescriptor>,
    arrays: HashMap<String, ArrayDescriptor>,
    struct_queries: AtomicUsize,
    array_queries: AtomicUsize,
    closed: AtomicBool,
}

impl CatalogConnection {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a composite type.
    #[must_use]
    pub fn with_struct(mut self, descriptor: StructDescriptor) -> Self {
        self.structs
            .insert(descriptor.type_name.to_uppercase(), descriptor);
        self
    }

    /// Add a collection type.
    #[must_use]
    pub fn with_array(mut self, descriptor: ArrayDescriptor) -> Self {
        self.arrays
            .insert(descriptor.type_name.to_uppercase(), descriptor);
        self
    }

    /// Add a collection of composites, inheriting the schema of the element type.
    #[must_use]
    pub fn with_struct_array(self, type_name: &str, element_type: &str) -> Self {
        let schema = self
            .structs
            .get(&element_type.to_uppercase())
            .map(|s| s.schema.clone())
            .unwrap_or_default();
        self.with_array(ArrayDescriptor::new(
            type_name,
            schema,
            element_type,
            NativeClass::Struct,
        ))
    }

    /// Number of `describe_struct` calls served so far.
    pub fn struct_queries(&self) -> usize {
        self.struct_queries.load(Ordering::Relaxed)
    }

    /// Number of `describe_array` calls served so far.
    pub fn array_queries(&self) -> usize {
        self.array_queries.load(Ordering::Relaxed)
    }

    /// Simulate a dropped connection: every later call fails.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
    }

    fn check_open(&self) -> Result<(), ConnectionError> {
        if self.closed.load(Ordering::Relaxed) {
            return Err(ConnectionError::Closed);
        }
        Ok(())
    }
}

impl Connection for CatalogConnection {
    fn describe_struct(&self, type_name: &str) -> Result<StructDescriptor, ConnectionError> {
        self.check_open()?;
        self.struct_queries.fetch_add(1, Ordering::Relaxed);
        let key = type_name.to_uppercase();
        match self.structs.get(&key) {
            Some(desc) => Ok(desc.clone()),
            None if self.arrays.contains_key(&key) => Err(ConnectionError::WrongKind {
                name: type_name.to_string(),
                expected: "struct",
            }),
            None => Err(ConnectionError::UnknownType(type_name.to_string())),
        }
    }

    fn describe_array(&self, type_name: &str) -> Result<ArrayDescriptor, ConnectionError> {
        self.check_open()?;
        self.array_queries.fetch_add(1, Ordering::Relaxed);
        let key = type_name.to_uppercase();
        match self.arrays.get(&key) {
            Some(desc) => Ok(desc.clone()),
            None if self.structs.contains_key(&key) => Err(ConnectionError::WrongKind {
                name: type_name.to_string(),
                expected: "collection",
            }),
            None => Err(ConnectionError::UnknownType(type_name.to_string())),
        }
    }
}
