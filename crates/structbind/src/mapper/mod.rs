// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct and array codecs.
//!
//! [`StructMapper`] and [`ArrayMapper`] call each other for nested values.
//! Neither owns the other: both carry a [`MappingContext`], two shared
//! references to the read-only registry and the descriptor cache.
//!
//! Typed wrappers ([`StructCodec`], [`ArrayCodec`]) and parameter adapters
//! sit on top. [`MapperService`] wires everything from configuration.
//!
//! # Example
//!
//! ```rust,ignore
//! let service = MapperService::from_config(&config, &[scope], &conn)?;
//! let codec = service.struct_codec::<Customer>()?;
//!
//! let native = codec.encode(&customer, &conn)?;
//! let back: Customer = codec.decode(&native)?;
//! ```

mod arrays;
mod params;
mod service;
mod structs;


pub use arrays::{ArrayCodec, ArrayMapper};
pub use params::{ArrayParam, ReturnStruct, ScalarArrayParam, StructParam, TypeValue};
pub use service::MapperService;
pub use structs::{StructCodec, StructMapper};

use chrono::{TimeZone, Utc};

use crate::cache::DescriptorCache;
use crate::entity::{ElementKind, EntityType, Value};
use crate::error::Result;
use crate::metadata::MappingRegistry;
use crate::native::NativeValue;

/// Shared, read-only state of every codec.
#[derive(Debug, Clone, Copy)]
pub struct MappingContext<'a> {
    pub registry: &'a MappingRegistry,
    pub cache: &'a DescriptorCache,
}

impl<'a> MappingContext<'a> {
    pub fn new(registry: &'a MappingRegistry, cache: &'a DescriptorCache) -> Self {
        Self { registry, cache }
    }

    /// Struct mapper of a registered entity type.
    pub fn struct_mapper(&self, entity: &EntityType) -> Result<StructMapper<'a>> {
        let metadata = self.registry.find_by_entity(entity)?;
        Ok(StructMapper::new(*self, metadata))
    }

    /// Struct mapper of a registered native composite type.
    pub fn struct_mapper_for_native(&self, native_name: &str) -> Result<StructMapper<'a>> {
        let metadata = self.registry.find_by_native_name(native_name)?;
        Ok(StructMapper::new(*self, metadata))
    }

    /// Array mapper for a native collection type.
    pub fn array_mapper(
        &self,
        element: ElementKind,
        collection_type: impl Into<String>,
    ) -> ArrayMapper<'a> {
        ArrayMapper::new(*self, element, collection_type)
    }
}

/// Convert a scalar value. Entities and lists are handed back.
pub(crate) fn scalar_to_native(value: Value) -> std::result::Result<NativeValue, Value> {
    Ok(match value {
        Value::Null => NativeValue::Null,
        Value::Bool(v) => NativeValue::Bool(v),
        Value::Integer(v) => NativeValue::Integer(v),
        Value::Decimal(v) => NativeValue::Decimal(v),
        Value::Float(v) => NativeValue::Float(v),
        Value::Text(v) => NativeValue::Text(v),
        Value::Bytes(v) => NativeValue::Raw(v),
        Value::Timestamp(v) => NativeValue::Date(v.naive_utc()),
        other @ (Value::Entity(_) | Value::List(_)) => return Err(other),
    })
}

/// Convert a scalar native value. Structs and arrays yield `None`.
pub(crate) fn scalar_from_native(value: &NativeValue) -> Option<Value> {
    Some(match value {
        NativeValue::Null => Value::Null,
        NativeValue::Bool(v) => Value::Bool(*v),
        NativeValue::Integer(v) => Value::Integer(*v),
        NativeValue::Decimal(v) => Value::Decimal(*v),
        NativeValue::Float(v) => Value::Float(*v),
        NativeValue::Text(v) => Value::Text(v.clone()),
        NativeValue::Raw(v) => Value::Bytes(v.clone()),
        NativeValue::Date(v) => Value::Timestamp(Utc.from_utc_datetime(v)),
        NativeValue::Struct(_) | NativeValue::Array(_) => return None,
    })
}
