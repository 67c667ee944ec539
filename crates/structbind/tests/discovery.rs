// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Discovery, binding and registry integration tests

mod common;

use common::{catalog, init_logging, sales_scope, Account, Customer, Order};
use structbind::cache::DescriptorCache;
use structbind::entity::{Entity, EntitySchema, EntityType, Scope, Value};
use structbind::error::{ConfigError, MappingError, ValueError};
use structbind::mapper::MapperService;
use structbind::metadata::{MappingRegistry, MetadataCollector};
use structbind::native::{CatalogConnection, Connection, StructDescriptorBuilder};

/// Single-field entity bound by name to whatever the catalog calls it.
#[derive(Debug, Clone, Default, PartialEq)]
struct Invoice {
    order_id: i64,
}

impl Entity for Invoice {
    fn schema() -> EntitySchema {
        EntitySchema::builder::<Self>("INVOICE_T")
            .field("orderId")
            .build()
    }

    fn read(&self, property: &str) -> Option<Value> {
        (property == "orderId").then(|| self.order_id.into())
    }

    fn write(&mut self, property: &str, value: Value) -> Result<(), ValueError> {
        match property {
            "orderId" => self.order_id = value.extract(property)?,
            _ => return Err(ValueError::UnknownProperty(property.to_string())),
        }
        Ok(())
    }
}

fn invoice_catalog(columns: &[&str]) -> CatalogConnection {
    let mut builder = StructDescriptorBuilder::new("INVOICE_T");
    for column in columns {
        builder = builder.scalar(*column, "NUMBER");
    }
    CatalogConnection::new().with_struct(builder.build())
}

fn invoice_scope() -> Scope {
    Scope::new("billing").unwrap().with::<Invoice>()
}

// ============================================================================
// Binding
// ============================================================================

#[test]
fn test_binding_ignores_case_and_underscores() {
    init_logging();
    for column in ["ORDER_ID", "orderid", "Order_Id"] {
        let conn = invoice_catalog(&[column]);
        let service = MapperService::new(
            MappingRegistry::build(&[invoice_scope()], &MetadataCollector::new(), &conn).unwrap(),
            DescriptorCache::new(),
        );

        let meta = service
            .registry()
            .find_by_entity(&EntityType::of::<Invoice>())
            .unwrap();
        assert_eq!(meta.fields[0].field_name(), Some("orderId"), "{column}");

        let codec = service.struct_codec::<Invoice>().unwrap();
        let invoice = Invoice { order_id: 77 };
        let native = codec.encode(&invoice, &conn).unwrap();
        assert_eq!(codec.decode(&native).unwrap(), invoice, "{column}");
    }
}

#[test]
fn test_columns_normalizing_alike_are_ambiguous() {
    let conn = invoice_catalog(&["ORDER_ID", "ORDERID"]);
    let err = MappingRegistry::build(&[invoice_scope()], &MetadataCollector::new(), &conn)
        .unwrap_err();
    assert!(matches!(err, MappingError::AmbiguousFieldBinding { .. }));
}

#[test]
fn test_override_and_unmapped_recorded() {
    let conn = catalog();
    let registry =
        MappingRegistry::build(&[sales_scope()], &MetadataCollector::new(), &conn).unwrap();

    let account = registry
        .find_by_entity(&EntityType::of::<Account>())
        .unwrap();
    let columns: Vec<_> = account.fields.iter().map(|f| f.column_name.as_str()).collect();
    assert_eq!(
        columns,
        vec!["ACCOUNT_NO", "OWNER", "ADDRESS", "OPENED_AT", "TAGS", "BAL", "LEGACY_FLAG"]
    );
    assert_eq!(account.field_by_property("balance").unwrap().column_name, "BAL");
    assert!(!account.field_by_column("LEGACY_FLAG").unwrap().is_mapped());
    assert_eq!(account.field_by_column("TAGS").unwrap().collection_type(), "TAG_ARR_T");
    // Static field never bound nor reported.
    assert!(account.field_by_property("version").is_none());
    assert_eq!(account.unmapped_fields.len(), 1);
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_registry_lookups() {
    let conn = catalog();
    let registry =
        MappingRegistry::build(&[sales_scope()], &MetadataCollector::new(), &conn).unwrap();

    assert_eq!(registry.len(), 4);
    assert!(registry.is_scanned("sales.model"));
    assert_eq!(
        registry.find_by_native_name("customer_t").unwrap().entity,
        EntityType::of::<Customer>()
    );
    assert!(matches!(
        registry.find_by_native_name("INVOICE_T"),
        Err(MappingError::NotFound(_))
    ));
}

#[test]
fn test_duplicate_registration_keeps_prior_state() {
    let conn = catalog();
    let mut registry =
        MappingRegistry::build(&[sales_scope()], &MetadataCollector::new(), &conn).unwrap();
    let before: Vec<_> = registry.iter().map(|m| m.entity.clone()).collect();

    let order = registry
        .find_by_entity(&EntityType::of::<Order>())
        .unwrap()
        .clone();
    let factory = registry.factory(&EntityType::of::<Order>()).unwrap();

    let err = registry.register(order, factory).unwrap_err();
    assert!(matches!(err, MappingError::DuplicateMapping(_)));

    let after: Vec<_> = registry.iter().map(|m| m.entity.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_unknown_native_type_is_schema_lookup_error() {
    let conn = CatalogConnection::new();
    let err = MappingRegistry::build(&[invoice_scope()], &MetadataCollector::new(), &conn)
        .unwrap_err();
    match err {
        MappingError::SchemaLookup {
            entity,
            native_type,
            ..
        } => {
            assert!(entity.ends_with("Invoice"));
            assert_eq!(native_type, "INVOICE_T");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_invalid_scope_name_rejected() {
    assert_eq!(
        Scope::new("sales-model").unwrap_err(),
        ConfigError::InvalidScopeName("sales-model".into())
    );
}

#[test]
fn test_codec_for_unregistered_type_is_not_found() {
    let conn = catalog();
    let service = MapperService::new(
        MappingRegistry::build(&[sales_scope()], &MetadataCollector::new(), &conn).unwrap(),
        DescriptorCache::new(),
    );
    assert!(matches!(
        service.struct_codec::<Invoice>(),
        Err(MappingError::NotFound(_))
    ));
    assert!(matches!(
        service.array_codec::<Invoice>("INVOICE_ARR_T"),
        Err(MappingError::NotFound(_))
    ));
}

// ============================================================================
// Descriptor cache
// ============================================================================

#[test]
fn test_descriptor_resolved_once() {
    let conn = catalog();
    let cache = DescriptorCache::new();

    let first = cache.struct_descriptor("CUSTOMER_T", &conn).unwrap();
    let queries = conn.struct_queries();
    let second = cache.struct_descriptor("CUSTOMER_T", &conn).unwrap();

    assert_eq!(first.type_name, second.type_name);
    assert_eq!(first.attributes, second.attributes);
    assert_eq!(conn.struct_queries(), queries);
    assert_eq!(*first, conn.describe_struct("CUSTOMER_T").unwrap());
}
