// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declarative entity schemas.

use crate::entity::{Entity, EntityType};
use serde::{Deserialize, Serialize};

/// Element type of a collection field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// Scalars passed through as-is.
    Scalar,
    /// Entities converted through their own struct mapping.
    Entity(EntityType),
}

/// How a field's value crosses the native boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Plain scalar.
    Scalar,
    /// Nested entity mapped to a native composite.
    Entity(EntityType),
    /// Native collection.
    ///
    /// Without an explicit collection type name, the bound column's native
    /// type name is used.
    Collection {
        element: ElementKind,
        collection_type: Option<String>,
    },
}

impl FieldKind {
    /// Check if this is a collection field.
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection { .. })
    }
}

/// One declared field of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    /// Property name on the entity.
    pub name: String,
    /// Explicit native column override.
    pub column: Option<String>,
    /// Value kind.
    pub kind: FieldKind,
    /// Type-level field; never bound.
    pub is_static: bool,
}

impl FieldSchema {
    /// Scalar field bound by its own name.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: None,
            kind: FieldKind::Scalar,
            is_static: false,
        }
    }

    /// Nested entity field.
    pub fn nested<T: Entity>(name: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Entity(EntityType::of::<T>()),
            ..Self::scalar(name)
        }
    }

    /// Collection of entities stored in `collection_type`.
    pub fn collection_of<T: Entity>(
        name: impl Into<String>,
        collection_type: impl Into<String>,
    ) -> Self {
        Self {
            kind: FieldKind::Collection {
                element: ElementKind::Entity(EntityType::of::<T>()),
                collection_type: non_blank(collection_type.into()),
            },
            ..Self::scalar(name)
        }
    }

    /// Collection of scalars stored in `collection_type`.
    pub fn scalar_collection(name: impl Into<String>, collection_type: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Collection {
                element: ElementKind::Scalar,
                collection_type: non_blank(collection_type.into()),
            },
            ..Self::scalar(name)
        }
    }

    /// Type-level field, ignored by binding.
    pub fn static_field(name: impl Into<String>) -> Self {
        Self {
            is_static: true,
            ..Self::scalar(name)
        }
    }

    /// Override the native column this field binds to.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = non_blank(column.into());
        self
    }

    /// Name used to find the native column: the override when present,
    /// otherwise the field name.
    pub fn column_hint(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Full mapping description of one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    /// Entity identity.
    pub entity: EntityType,
    /// Native composite type name.
    pub native_name: String,
    /// Declared fields, in declaration order.
    pub fields: Vec<FieldSchema>,
}

impl EntitySchema {
    /// Start a schema for `T` mapped to `native_name`.
    pub fn builder<T: Entity>(native_name: impl Into<String>) -> EntitySchemaBuilder {
        EntitySchemaBuilder {
            entity: EntityType::of::<T>(),
            native_name: native_name.into(),
            fields: Vec::new(),
        }
    }

    /// Get declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Fluent builder for [`EntitySchema`].
#[derive(Debug)]
pub struct EntitySchemaBuilder {
    entity: EntityType,
    native_name: String,
    fields: Vec<FieldSchema>,
}

impl EntitySchemaBuilder {
    /// Add a scalar field bound by name.
    pub fn field(self, name: impl Into<String>) -> Self {
        self.with(FieldSchema::scalar(name))
    }

    /// Add a scalar field bound to an explicit column.
    pub fn column(self, name: impl Into<String>, column: impl Into<String>) -> Self {
        self.with(FieldSchema::scalar(name).column(column))
    }

    /// Add a nested entity field.
    pub fn nested<T: Entity>(self, name: impl Into<String>) -> Self {
        self.with(FieldSchema::nested::<T>(name))
    }

    /// Add a collection-of-entities field.
    pub fn collection<T: Entity>(
        self,
        name: impl Into<String>,
        collection_type: impl Into<String>,
    ) -> Self {
        self.with(FieldSchema::collection_of::<T>(name, collection_type))
    }

    /// Add a collection-of-scalars field.
    pub fn scalar_collection(
        self,
        name: impl Into<String>,
        collection_type: impl Into<String>,
    ) -> Self {
        self.with(FieldSchema::scalar_collection(name, collection_type))
    }

    /// Add a type-level field that binding ignores.
    pub fn static_field(self, name: impl Into<String>) -> Self {
        self.with(FieldSchema::static_field(name))
    }

    /// Add a fully specified field.
    pub fn with(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the schema.
    pub fn build(self) -> EntitySchema {
        EntitySchema {
            entity: self.entity,
            native_name: self.native_name,
            fields: self.fields,
        }
    }
}
