// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema metadata collector.
//!
//! Describes each entity's native composite type over a live connection and
//! binds the entity's fields to the reported columns. Results are not cached
//! here; see [`CachedMetadataCollector`](crate::metadata::CachedMetadataCollector).

use crate::entity::{EntitySchema, Scope};
use crate::error::{ConfigError, MappingError, Result};
use crate::metadata::{bind_fields, NativeField, StructMetadata};
use crate::native::Connection;
use log::{debug, info};

/// Source of struct metadata for a discovery scope.
pub trait CollectMetadata {
    /// Produce bound metadata for every entity declared in `scope`.
    fn collect_scope(&self, scope: &Scope, conn: &dyn Connection) -> Result<Vec<StructMetadata>>;
}

/// Collector that always introspects the live schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetadataCollector;

impl MetadataCollector {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Describe the entity's native type. Columns come back in native
    /// order, all unbound.
    pub fn read_struct(
        &self,
        schema: &EntitySchema,
        conn: &dyn Connection,
    ) -> Result<StructMetadata> {
        if schema.native_name.trim().is_empty() {
            return Err(ConfigError::MissingNativeName(schema.entity.to_string()).into());
        }

        let descriptor = conn
            .describe_struct(&schema.native_name)
            .map_err(|source| MappingError::SchemaLookup {
                entity: schema.entity.to_string(),
                native_type: schema.native_name.clone(),
                source,
            })?;

        let mut metadata = StructMetadata::new(schema.entity.clone(), schema.native_name.clone());
        metadata.fields = descriptor
            .attributes
            .into_iter()
            .map(|attr| NativeField {
                column_name: attr.name,
                type_name: attr.type_name,
                class: attr.class,
                schema: attr.schema,
                binding: None,
            })
            .collect();
        Ok(metadata)
    }

    /// Describe and bind one entity.
    pub fn collect_struct(
        &self,
        schema: &EntitySchema,
        conn: &dyn Connection,
    ) -> Result<StructMetadata> {
        let mut metadata = self.read_struct(schema, conn)?;
        bind_fields(&mut metadata, schema)?;
        debug!(
            "Collected {} ({}): {}/{} columns bound, {} unmapped fields",
            schema.entity.short_name(),
            schema.native_name,
            metadata.mapped_count(),
            metadata.fields.len(),
            metadata.unmapped_fields.len()
        );
        Ok(metadata)
    }
}

impl CollectMetadata for MetadataCollector {
    fn collect_scope(&self, scope: &Scope, conn: &dyn Connection) -> Result<Vec<StructMetadata>> {
        scope
            .entities()
            .iter()
            .map(|declaration| {
                info!("Loading entity {}", declaration.entity_type());
                self.collect_struct(declaration.schema(), conn)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityType, FieldSchema};
    use crate::native::{CatalogConnection, ConnectionError, StructDescriptorBuilder};

    fn conn() -> CatalogConnection {
        CatalogConnection::new().with_struct(
            StructDescriptorBuilder::new("ORDER_T")
                .schema("SALES")
                .scalar("ID", "NUMBER")
                .scalar("AMOUNT", "NUMBER")
                .scalar("CREATED_AT", "DATE")
                .build(),
        )
    }

    fn schema(native_name: &str) -> EntitySchema {
        EntitySchema {
            entity: EntityType::named("Order"),
            native_name: native_name.into(),
            fields: vec![
                FieldSchema::scalar("id"),
                FieldSchema::scalar("amount"),
                FieldSchema::scalar("createdAt"),
            ],
        }
    }

    #[test]
    fn read_struct_keeps_native_order_unbound() {
        let meta = MetadataCollector::new()
            .read_struct(&schema("ORDER_T"), &conn())
            .unwrap();
        let columns: Vec<_> = meta.fields.iter().map(|f| f.column_name.as_str()).collect();
        assert_eq!(columns, vec!["ID", "AMOUNT", "CREATED_AT"]);
        assert!(meta.fields.iter().all(|f| !f.is_mapped()));
        assert_eq!(meta.fields[2].type_name, "DATE");
        assert_eq!(meta.fields[0].schema, "SALES");
    }

    #[test]
    fn collect_struct_binds() {
        let meta = MetadataCollector::new()
            .collect_struct(&schema("ORDER_T"), &conn())
            .unwrap();
        assert_eq!(meta.mapped_count(), 3);
        assert_eq!(meta.fields[2].field_name(), Some("createdAt"));
    }

    #[test]
    fn unknown_native_type_is_schema_lookup_error() {
        let err = MetadataCollector::new()
            .collect_struct(&schema("MISSING_T"), &conn())
            .unwrap_err();
        match err {
            MappingError::SchemaLookup {
                entity,
                native_type,
                source,
            } => {
                assert_eq!(entity, "Order");
                assert_eq!(native_type, "MISSING_T");
                assert_eq!(source, ConnectionError::UnknownType("MISSING_T".into()));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn blank_native_name_is_configuration_error() {
        let err = MetadataCollector::new()
            .collect_struct(&schema(" "), &conn())
            .unwrap_err();
        assert!(matches!(
            err,
            MappingError::Configuration(ConfigError::MissingNativeName(_))
        ));
    }
}
