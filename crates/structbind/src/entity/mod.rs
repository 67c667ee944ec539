// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Application entities and their declarative mapping description.
//!
//! An entity supplies three things: a `Default` constructor, property
//! accessors (`read` / `write` over [`Value`]) and an [`EntitySchema`]
//! naming its native composite type and describing each field. No runtime
//! reflection is involved; the schema is resolved once at discovery time.
//!
//! # Example
//!
//! ```rust
//! use structbind::entity::{Entity, EntitySchema, Value};
//! use structbind::error::ValueError;
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Order {
//!     id: i64,
//! }
//!
//! impl Entity for Order {
//!     fn schema() -> EntitySchema {
//!         EntitySchema::builder::<Self>("ORDER_T").field("id").build()
//!     }
//!
//!     fn read(&self, property: &str) -> Option<Value> {
//!         match property {
//!             "id" => Some(self.id.into()),
//!             _ => None,
//!         }
//!     }
//!
//!     fn write(&mut self, property: &str, value: Value) -> Result<(), ValueError> {
//!         match property {
//!             "id" => self.id = value.extract(property)?,
//!             _ => return Err(ValueError::UnknownProperty(property.to_string())),
//!         }
//!         Ok(())
//!     }
//! }
//! ```

mod schema;
mod scope;
mod value;

pub use schema::{ElementKind, EntitySchema, EntitySchemaBuilder, FieldKind, FieldSchema};
pub use scope::{EntityDeclaration, Scope};
pub use value::{FromValue, Value};

use crate::error::ValueError;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Stable identity of an entity type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    /// Identity of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(std::any::type_name::<T>().to_string())
    }

    /// Build from a raw name.
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, for log lines.
    pub fn short_name(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An application type mapped to a native composite type.
pub trait Entity: Default + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Declarative mapping description.
    fn schema() -> EntitySchema;

    /// Read a property; `None` when the entity has no readable property
    /// with that name.
    fn read(&self, property: &str) -> Option<Value>;

    /// Assign a property.
    fn write(&mut self, property: &str, value: Value) -> Result<(), ValueError>;
}

/// Object-safe view of an [`Entity`], used while recursing through nested
/// values of heterogeneous types.
pub trait DynEntity: fmt::Debug + Send + Sync + 'static {
    fn entity_type(&self) -> EntityType;

    fn get_property(&self, property: &str) -> Option<Value>;

    fn set_property(&mut self, property: &str, value: Value) -> Result<(), ValueError>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn clone_box(&self) -> Box<dyn DynEntity>;

    fn eq_dyn(&self, other: &dyn DynEntity) -> bool;
}

impl<T: Entity> DynEntity for T {
    fn entity_type(&self) -> EntityType {
        EntityType::of::<T>()
    }

    fn get_property(&self, property: &str) -> Option<Value> {
        Entity::read(self, property)
    }

    fn set_property(&mut self, property: &str, value: Value) -> Result<(), ValueError> {
        Entity::write(self, property, value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_box(&self) -> Box<dyn DynEntity> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn DynEntity) -> bool {
        other.as_any().downcast_ref::<T>() == Some(self)
    }
}

impl Clone for Box<dyn DynEntity> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for dyn DynEntity {
    fn eq(&self, other: &Self) -> bool {
        self.eq_dyn(other)
    }
}

/// Creates a default instance of a registered entity type.
pub type EntityFactory = fn() -> Box<dyn DynEntity>;

pub(crate) fn default_boxed<T: Entity>() -> Box<dyn DynEntity> {
    Box::new(T::default())
}
