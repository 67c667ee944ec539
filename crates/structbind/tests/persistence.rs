// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Persisted descriptor and metadata store integration tests
//!
//! A warm restart must not query the schema again; damaged files must fall
//! back to the database.

mod common;

use std::fs;
use std::path::Path;

use common::{ann, catalog, drifted_catalog, init_logging, order, sales_scope, Customer, Order};
use structbind::config::{MapperConfig, StoreConfig};
use structbind::error::{ConfigError, ConversionError, MappingError};
use structbind::mapper::MapperService;

fn config(root: &Path) -> MapperConfig {
    MapperConfig::builder()
        .descriptor_store(StoreConfig::new(root.join("descriptors")).with_prefix("test"))
        .metadata_store(StoreConfig::new(root.join("metadata")).with_prefix("test"))
        .build()
        .unwrap()
}

#[test]
fn test_warm_start_uses_files() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());

    let cold_conn = catalog();
    let cold = MapperService::from_config(&config, &[sales_scope()], &cold_conn).unwrap();
    let native = cold
        .struct_codec::<Customer>()
        .unwrap()
        .encode(&ann(), &cold_conn)
        .unwrap();
    assert!(cold_conn.struct_queries() > 0);

    assert!(dir
        .path()
        .join("metadata/test-metadata-sales-model.json")
        .exists());
    for name in ["CUSTOMER_T", "ORDER_T", "ORDER_ARR_T"] {
        assert!(
            dir.path().join(format!("descriptors/test-{name}.json")).exists(),
            "{name}"
        );
    }

    let warm_conn = catalog();
    let warm = MapperService::from_config(&config, &[sales_scope()], &warm_conn).unwrap();
    let codec = warm.struct_codec::<Customer>().unwrap();
    assert_eq!(codec.encode(&ann(), &warm_conn).unwrap(), native);
    assert_eq!(codec.decode(&native).unwrap(), ann());
    assert_eq!(warm_conn.struct_queries(), 0);
    assert_eq!(warm_conn.array_queries(), 0);
}

#[test]
fn test_corrupt_files_fall_back_to_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());

    let first = catalog();
    MapperService::from_config(&config, &[sales_scope()], &first)
        .unwrap()
        .struct_codec::<Customer>()
        .unwrap()
        .encode(&ann(), &first)
        .unwrap();

    fs::write(
        dir.path().join("metadata/test-metadata-sales-model.json"),
        "{\"scope\":",
    )
    .unwrap();
    fs::write(dir.path().join("descriptors/test-CUSTOMER_T.json"), [0xff, 0x00]).unwrap();

    let conn = catalog();
    let service = MapperService::from_config(&config, &[sales_scope()], &conn).unwrap();
    assert_eq!(service.registry().len(), 4);
    let discovery_queries = conn.struct_queries();
    assert_eq!(discovery_queries, 4);

    let codec = service.struct_codec::<Customer>().unwrap();
    let native = codec.encode(&ann(), &conn).unwrap();
    assert_eq!(codec.decode(&native).unwrap(), ann());
    // Only the damaged descriptor was read again.
    assert_eq!(conn.struct_queries(), discovery_queries + 1);
    assert_eq!(conn.array_queries(), 0);
}

#[test]
fn test_deleted_folder_is_recreated() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());

    let conn = catalog();
    MapperService::from_config(&config, &[sales_scope()], &conn).unwrap();
    fs::remove_dir_all(dir.path().join("metadata")).unwrap();

    let conn = catalog();
    let service = MapperService::from_config(&config, &[sales_scope()], &conn).unwrap();
    assert_eq!(service.registry().len(), 4);
    assert!(dir
        .path()
        .join("metadata/test-metadata-sales-model.json")
        .exists());
}

fn assert_column_mismatch(err: MappingError, expected: &str, found: &str) {
    match err {
        MappingError::Conversion {
            entity,
            source: ConversionError::ColumnMismatch {
                type_name,
                position,
                expected: want,
                found: got,
            },
            ..
        } => {
            assert!(entity.ends_with("Order"));
            assert_eq!(type_name, "ORDER_T");
            assert_eq!(position, 0);
            assert_eq!(want, expected);
            assert_eq!(got, found);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_stale_metadata_rejects_reordered_columns() {
    let dir = tempfile::tempdir().unwrap();
    let config = MapperConfig::builder()
        .metadata_store(StoreConfig::new(dir.path().join("metadata")))
        .build()
        .unwrap();
    MapperService::from_config(&config, &[sales_scope()], &catalog()).unwrap();

    let conn = drifted_catalog();
    let service = MapperService::from_config(&config, &[sales_scope()], &conn).unwrap();
    // Metadata came from the file, still in the old column order.
    assert_eq!(conn.struct_queries(), 0);

    let err = service
        .struct_codec::<Order>()
        .unwrap()
        .encode(&order(10, "5"), &conn)
        .unwrap_err();
    assert_column_mismatch(err, "ID", "AMOUNT");
}

#[test]
fn test_stale_descriptor_file_rejects_reordered_columns() {
    let dir = tempfile::tempdir().unwrap();
    let config = MapperConfig::builder()
        .descriptor_store(StoreConfig::new(dir.path().join("descriptors")))
        .build()
        .unwrap();

    let first = catalog();
    MapperService::from_config(&config, &[sales_scope()], &first)
        .unwrap()
        .struct_codec::<Order>()
        .unwrap()
        .encode(&order(10, "5"), &first)
        .unwrap();
    assert!(dir.path().join("descriptors/ORDER_T.json").exists());

    let conn = drifted_catalog();
    let service = MapperService::from_config(&config, &[sales_scope()], &conn).unwrap();
    let err = service
        .struct_codec::<Order>()
        .unwrap()
        .encode(&order(10, "5"), &conn)
        .unwrap_err();
    assert_column_mismatch(err, "AMOUNT", "ID");
}

#[test]
fn test_config_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapper.json");
    fs::write(
        &path,
        format!(
            r#"{{ "descriptor_store": {{ "folder": {:?} }} }}"#,
            dir.path().join("desc").display().to_string()
        ),
    )
    .unwrap();

    let config = MapperConfig::from_json_file(&path).unwrap();
    let conn = catalog();
    let service = MapperService::from_config(&config, &[sales_scope()], &conn).unwrap();
    service
        .struct_codec::<Customer>()
        .unwrap()
        .encode(&ann(), &conn)
        .unwrap();
    assert!(dir.path().join("desc/CUSTOMER_T.json").exists());
}

#[test]
fn test_bad_prefix_in_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapper.json");
    fs::write(
        &path,
        r#"{ "metadata_store": { "folder": "/tmp/unused", "prefix": "not valid" } }"#,
    )
    .unwrap();

    assert!(matches!(
        MapperConfig::from_json_file(&path),
        Err(MappingError::Configuration(ConfigError::InvalidPrefix(_)))
    ));
}
