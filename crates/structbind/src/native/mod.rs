// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native side of the mapping: descriptors, values and the connection seam.
//!
//! # Features
//!
//! - **StructDescriptor / ArrayDescriptor**: shapes reported by schema introspection
//! - **NativeValue**: scalars plus positional composites and ordered collections
//! - **Connection**: the two describe capabilities the engine depends on
//! - **CatalogConnection**: in-memory catalog for tests and fixed snapshots
//!
//! # Example
//!
//! ```rust
//! use structbind::native::{
//!     CatalogConnection, Connection, NativeStruct, NativeValue, StructDescriptorBuilder,
//! };
//! use std::sync::Arc;
//!
//! let conn = CatalogConnection::new().with_struct(
//!     StructDescriptorBuilder::new("POINT_T")
//!         .scalar("X", "NUMBER")
//!         .scalar("Y", "NUMBER")
//!         .build(),
//! );
//!
//! let desc = Arc::new(conn.describe_struct("POINT_T").unwrap());
//! let point = NativeStruct::new(desc, vec![NativeValue::Integer(1), NativeValue::Integer(2)])
//!     .unwrap();
//! assert_eq!(point.get("Y"), Some(&NativeValue::Integer(2)));
//! ```

mod builder;
mod catalog;
mod connection;
mod descriptor;
mod value;

pub use builder::StructDescriptorBuilder;
pub use catalog::CatalogConnection;
pub use connection::{Connection, ConnectionError};
pub use descriptor::{ArrayDescriptor, AttributeDescriptor, NativeClass, StructDescriptor};
pub use value::{NativeArray, NativeError, NativeStruct, NativeValue};
