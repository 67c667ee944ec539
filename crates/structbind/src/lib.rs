// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! structbind - database composite type mapping
//!
//! Converts application entities to and from database-native composite
//! (struct) and collection (array) values, for use as stored-procedure
//! parameters and results.
//!
//! # Features
//!
//! - **Discovery** -- each entity's native type is described once and its
//!   fields are bound to native columns by normalized name
//! - **Mapping registry** -- one mapping per entity type and per native type
//! - **Descriptor cache** -- native descriptors resolved once per process,
//!   optionally persisted to a folder
//! - **Codecs** -- struct and array codecs recursing through nested entities
//!   and collections, preserving column order, element order and nulls
//!
//! # Architecture
//!
//! ```text
//! MapperService
//! +-- DescriptorCache     (DashMap, optional DescriptorStore)
//! +-- MappingRegistry     (built by MetadataCollector + bind_fields)
//! +-- StructCodec / ArrayCodec  (borrow both through MappingContext)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use structbind::{MapperConfig, MapperService, Scope};
//!
//! let scope = Scope::new("sales.model")?
//!     .with::<Order>()
//!     .with::<Customer>();
//!
//! let service = MapperService::from_config(&MapperConfig::default(), &[scope], &conn)?;
//! let codec = service.struct_codec::<Customer>()?;
//!
//! let native = codec.encode(&customer, &conn)?;
//! assert_eq!(codec.decode(&native)?, customer);
//! ```

pub mod cache;
pub mod config;
pub mod entity;
pub mod error;
pub mod mapper;
pub mod metadata;
pub mod native;

pub use cache::DescriptorCache;
pub use config::{MapperConfig, StoreConfig};
pub use entity::{Entity, EntitySchema, EntityType, Scope, Value};
pub use error::{MappingError, Result};
pub use mapper::{ArrayCodec, MapperService, StructCodec};
pub use metadata::{MappingRegistry, StructMetadata};
pub use native::{Connection, NativeArray, NativeStruct, NativeValue};
