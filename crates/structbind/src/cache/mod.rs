// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptor cache.
//!
//! Resolves native struct and collection descriptors by name and keeps them
//! for the life of the process. A miss checks the optional
//! [`DescriptorStore`] first, then queries the connection (and writes the
//! result back to the store).
//!
//! Concurrent first resolutions of one name may both query the connection;
//! the first insert wins and the other descriptor is dropped. Descriptors
//! are immutable behind `Arc`, so readers never observe partial state.

mod store;

pub use store::{DescriptorStore, StoredDescriptor};

use std::sync::Arc;

use dashmap::DashMap;
use log::{debug, info};

use crate::config::StoreConfig;
use crate::error::{MappingError, Result};
use crate::native::{ArrayDescriptor, Connection, ConnectionError, StructDescriptor};

/// Process-wide descriptor cache keyed by uppercase type name.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    structs: DashMap<String, Arc<StructDescriptor>>,
    arrays: DashMap<String, Arc<ArrayDescriptor>>,
    store: Option<DescriptorStore>,
}

impl DescriptorCache {
    /// In-memory cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache backed by a descriptor folder.
    pub fn with_store(config: StoreConfig) -> Result<Self> {
        Ok(Self {
            store: Some(DescriptorStore::open(config)?),
            ..Self::default()
        })
    }

    pub fn store(&self) -> Option<&DescriptorStore> {
        self.store.as_ref()
    }

    /// Resolve a struct descriptor.
    pub fn struct_descriptor(
        &self,
        type_name: &str,
        conn: &dyn Connection,
    ) -> Result<Arc<StructDescriptor>> {
        self.resolve(
            &self.structs,
            type_name,
            "Struct",
            |stored| match stored {
                StoredDescriptor::Struct(desc) => Some(desc),
                StoredDescriptor::Array(_) => None,
            },
            StoredDescriptor::Struct,
            || conn.describe_struct(type_name),
        )
    }

    /// Resolve a collection descriptor.
    pub fn array_descriptor(
        &self,
        type_name: &str,
        conn: &dyn Connection,
    ) -> Result<Arc<ArrayDescriptor>> {
        self.resolve(
            &self.arrays,
            type_name,
            "Array",
            |stored| match stored {
                StoredDescriptor::Array(desc) => Some(desc),
                StoredDescriptor::Struct(_) => None,
            },
            StoredDescriptor::Array,
            || conn.describe_array(type_name),
        )
    }

    /// Memory, then the store file, then the connection.
    fn resolve<D: Clone>(
        &self,
        map: &DashMap<String, Arc<D>>,
        type_name: &str,
        kind: &str,
        unwrap_stored: impl FnOnce(StoredDescriptor) -> Option<D>,
        wrap_stored: impl FnOnce(D) -> StoredDescriptor,
        describe: impl FnOnce() -> std::result::Result<D, ConnectionError>,
    ) -> Result<Arc<D>> {
        let key = type_name.to_uppercase();
        if let Some(hit) = map.get(&key) {
            return Ok(Arc::clone(hit.value()));
        }

        let stored = self
            .store
            .as_ref()
            .and_then(|s| s.load(&key))
            .and_then(|stored| {
                let desc = unwrap_stored(stored);
                if desc.is_none() {
                    debug!("Descriptor file {} is not a {} descriptor, ignoring", key, kind);
                }
                desc
            });

        let descriptor = match stored {
            Some(desc) => desc,
            None => {
                let desc =
                    describe().map_err(|source| MappingError::resolution(type_name, source))?;
                info!("{} descriptor {} read from database", kind, key);
                if let Some(store) = &self.store {
                    store.save(&key, &wrap_stored(desc.clone()));
                }
                desc
            }
        };

        let entry = map.entry(key).or_insert(Arc::new(descriptor));
        Ok(Arc::clone(entry.value()))
    }

    /// Number of cached descriptors (structs and collections).
    pub fn len(&self) -> usize {
        self.structs.len() + self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
