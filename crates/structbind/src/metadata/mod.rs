// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping metadata: discovery, binding and the mapping registry.
//!
//! Discovery runs once per scope:
//!
//! ```text
//! Scope --collector--> StructMetadata (unbound) --binder--> StructMetadata --> MappingRegistry
//! ```
//!
//! The registry is read-only once built and is shared by every codec.

mod binder;
mod collector;
mod model;
mod persistence;
mod registry;

pub use binder::bind_fields;
pub use collector::{CollectMetadata, MetadataCollector};
pub use model::{normalize, FieldBinding, NativeField, StructMetadata, UnmappedField};
pub use persistence::{CachedMetadataCollector, MetadataStore, ScopeMetadata};
pub use registry::MappingRegistry;
