// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Explicit wiring of cache, collector, registry and codecs.

use std::sync::Arc;

use log::info;

use crate::cache::DescriptorCache;
use crate::config::MapperConfig;
use crate::entity::{ElementKind, Entity, EntityType, Scope};
use crate::error::Result;
use crate::mapper::{ArrayCodec, ArrayMapper, MappingContext, StructCodec, StructMapper};
use crate::metadata::{CachedMetadataCollector, MappingRegistry, MetadataCollector, MetadataStore};
use crate::native::Connection;

/// Owner of one mapping registry and one descriptor cache.
///
/// Cheap to clone; clones share both.
#[derive(Debug, Clone)]
pub struct MapperService {
    registry: Arc<MappingRegistry>,
    cache: Arc<DescriptorCache>,
}

impl MapperService {
    pub fn new(registry: MappingRegistry, cache: DescriptorCache) -> Self {
        Self {
            registry: Arc::new(registry),
            cache: Arc::new(cache),
        }
    }

    /// Build the cache, the collector and the registry, in that order.
    pub fn from_config(
        config: &MapperConfig,
        scopes: &[Scope],
        conn: &dyn Connection,
    ) -> Result<Self> {
        config.validate()?;

        let cache = match &config.descriptor_store {
            Some(store) => DescriptorCache::with_store(store.clone())?,
            None => DescriptorCache::new(),
        };

        let registry = match &config.metadata_store {
            Some(store) => {
                let collector = CachedMetadataCollector::new(
                    MetadataCollector::new(),
                    MetadataStore::open(store.clone())?,
                );
                MappingRegistry::build(scopes, &collector, conn)?
            }
            None => MappingRegistry::build(scopes, &MetadataCollector::new(), conn)?,
        };

        info!(
            "Mapper ready: {} entities in {} scopes",
            registry.len(),
            registry.scopes().len()
        );
        Ok(Self::new(registry, cache))
    }

    pub fn context(&self) -> MappingContext<'_> {
        MappingContext::new(&self.registry, &self.cache)
    }

    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &DescriptorCache {
        &self.cache
    }

    /// Typed struct codec for `T`.
    pub fn struct_codec<T: Entity>(&self) -> Result<StructCodec<'_, T>> {
        StructCodec::new(self.context())
    }

    /// Typed array codec for collections of `T` stored as `collection_type`.
    pub fn array_codec<T: Entity>(&self, collection_type: &str) -> Result<ArrayCodec<'_, T>> {
        ArrayCodec::new(self.context(), collection_type)
    }

    /// Untyped struct codec.
    pub fn struct_mapper(&self, entity: &EntityType) -> Result<StructMapper<'_>> {
        self.context().struct_mapper(entity)
    }

    /// Untyped array codec for scalar collections.
    pub fn scalar_array_mapper(&self, collection_type: &str) -> ArrayMapper<'_> {
        self.context()
            .array_mapper(ElementKind::Scalar, collection_type)
    }
}
