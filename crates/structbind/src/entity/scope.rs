// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Discovery scopes: named groups of entity declarations.

use crate::config::validate_scope_name;
use crate::entity::{default_boxed, Entity, EntityFactory, EntitySchema, EntityType};
use crate::error::ConfigError;
use std::fmt;

/// An entity type ready for discovery: its schema plus a factory.
#[derive(Clone)]
pub struct EntityDeclaration {
    schema: EntitySchema,
    factory: EntityFactory,
}

impl EntityDeclaration {
    /// Declaration for `T`.
    pub fn of<T: Entity>() -> Self {
        Self {
            schema: T::schema(),
            factory: default_boxed::<T>,
        }
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    pub fn entity_type(&self) -> &EntityType {
        &self.schema.entity
    }

    pub fn factory(&self) -> EntityFactory {
        self.factory
    }
}

impl fmt::Debug for EntityDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDeclaration")
            .field("entity", &self.schema.entity)
            .field("native_name", &self.schema.native_name)
            .finish_non_exhaustive()
    }
}

/// A named discovery unit sharing one mapping registry.
#[derive(Debug, Clone)]
pub struct Scope {
    name: String,
    entities: Vec<EntityDeclaration>,
}

impl Scope {
    /// Create an empty scope. The name must be a dotted identifier
    /// (`sales.model`).
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        validate_scope_name(&name)?;
        Ok(Self {
            name,
            entities: Vec::new(),
        })
    }

    /// Add an entity type.
    #[must_use]
    pub fn with<T: Entity>(mut self) -> Self {
        self.entities.push(EntityDeclaration::of::<T>());
        self
    }

    /// Add a prepared declaration.
    #[must_use]
    pub fn with_declaration(mut self, declaration: EntityDeclaration) -> Self {
        self.entities.push(declaration);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entities(&self) -> &[EntityDeclaration] {
        &self.entities
    }

    /// Find a declaration by entity type.
    pub fn declaration(&self, entity: &EntityType) -> Option<&EntityDeclaration> {
        self.entities.iter().find(|d| d.entity_type() == entity)
    }
}
