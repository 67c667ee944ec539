// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::collections::HashMap;

use log::{debug, info};

use crate::entity::{EntityFactory, EntityType, Scope};
use crate::error::{MappingError, Result};
use crate::metadata::{CollectMetadata, StructMetadata};
use crate::native::Connection;

// ---------------------------------------------------------------------------
// MappingRegistry
// ---------------------------------------------------------------------------

/// Struct metadata of every discovered entity, unique by entity type and by
/// native type name.
///
/// Built once, then shared read-only by all codecs.
#[derive(Debug, Default)]
pub struct MappingRegistry {
    structs: Vec<StructMetadata>,
    by_entity: HashMap<EntityType, usize>,
    /// Keyed by uppercase native type name.
    by_native: HashMap<String, usize>,
    factories: HashMap<EntityType, EntityFactory>,
    scopes: Vec<String>,
}

impl MappingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover every scope, in order.
    pub fn build(
        scopes: &[Scope],
        collector: &dyn CollectMetadata,
        conn: &dyn Connection,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for scope in scopes {
            registry.load_scope(scope, collector, conn)?;
        }
        Ok(registry)
    }

    /// Register one struct mapping with the factory that instantiates its
    /// entity.
    ///
    /// Both keys are checked before anything is inserted, so a rejected
    /// registration leaves the registry untouched.
    pub fn register(&mut self, metadata: StructMetadata, factory: EntityFactory) -> Result<()> {
        let native_key = metadata.native_name.to_uppercase();
        if self.by_entity.contains_key(&metadata.entity) {
            return Err(MappingError::DuplicateMapping(format!(
                "entity {}",
                metadata.entity
            )));
        }
        if let Some(&index) = self.by_native.get(&native_key) {
            return Err(MappingError::DuplicateMapping(format!(
                "native type {} (already mapped to {})",
                metadata.native_name, self.structs[index].entity
            )));
        }

        debug!(
            "Register {} <-> {}",
            metadata.entity.short_name(),
            metadata.native_name
        );
        let index = self.structs.len();
        self.by_entity.insert(metadata.entity.clone(), index);
        self.by_native.insert(native_key, index);
        self.factories.insert(metadata.entity.clone(), factory);
        self.structs.push(metadata);
        Ok(())
    }

    /// Collect and register every entity of `scope`.
    ///
    /// A scope already scanned is skipped. On error nothing from this scope
    /// is kept.
    pub fn load_scope(
        &mut self,
        scope: &Scope,
        collector: &dyn CollectMetadata,
        conn: &dyn Connection,
    ) -> Result<()> {
        if self.is_scanned(scope.name()) {
            debug!("Scope {} already scanned", scope.name());
            return Ok(());
        }

        let collected = collector.collect_scope(scope, conn)?;
        let mut staged = Self::new();
        for metadata in collected {
            let declaration = scope.declaration(&metadata.entity).ok_or_else(|| {
                MappingError::NotFound(format!(
                    "entity {} in scope {}",
                    metadata.entity,
                    scope.name()
                ))
            })?;
            let factory = declaration.factory();
            // Check against this registry first so the error names the
            // earlier mapping.
            self.check_vacant(&metadata)?;
            staged.register(metadata, factory)?;
        }

        let count = staged.structs.len();
        for metadata in staged.structs {
            let factory = staged.factories[&metadata.entity];
            self.register(metadata, factory)?;
        }
        self.scopes.push(scope.name().to_string());
        info!("Scope {} discovered: {} entities", scope.name(), count);
        Ok(())
    }

    fn check_vacant(&self, metadata: &StructMetadata) -> Result<()> {
        if self.by_entity.contains_key(&metadata.entity)
            || self
                .by_native
                .contains_key(&metadata.native_name.to_uppercase())
        {
            return Err(MappingError::DuplicateMapping(format!(
                "{} / {}",
                metadata.entity, metadata.native_name
            )));
        }
        Ok(())
    }

    /// Whether the named scope has been discovered.
    pub fn is_scanned(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// Names of the discovered scopes, in discovery order.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Mapping of an entity type.
    pub fn find_by_entity(&self, entity: &EntityType) -> Result<&StructMetadata> {
        self.get_by_entity(entity)
            .ok_or_else(|| MappingError::NotFound(format!("entity {entity}")))
    }

    /// Mapping of a native composite type (case-insensitive).
    pub fn find_by_native_name(&self, native_name: &str) -> Result<&StructMetadata> {
        self.get_by_native_name(native_name)
            .ok_or_else(|| MappingError::NotFound(format!("native type {native_name}")))
    }

    pub fn get_by_entity(&self, entity: &EntityType) -> Option<&StructMetadata> {
        self.by_entity.get(entity).map(|&i| &self.structs[i])
    }

    pub fn get_by_native_name(&self, native_name: &str) -> Option<&StructMetadata> {
        self.by_native
            .get(&native_name.to_uppercase())
            .map(|&i| &self.structs[i])
    }

    /// Factory for a registered entity type.
    pub fn factory(&self, entity: &EntityType) -> Result<EntityFactory> {
        self.factories
            .get(entity)
            .copied()
            .ok_or_else(|| MappingError::NotFound(format!("entity {entity}")))
    }

    /// All mappings in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &StructMetadata> {
        self.structs.iter()
    }

    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
