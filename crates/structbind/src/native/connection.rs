// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Connection collaborator: the only schema capabilities the engine needs.

use crate::native::{ArrayDescriptor, StructDescriptor};
use thiserror::Error;

/// Errors reported by a [`Connection`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// The schema has no type with that name.
    #[error("unknown native type {0}")]
    UnknownType(String),

    /// The type exists but is not of the requested kind.
    #[error("native type {name} is not a {expected}")]
    WrongKind { name: String, expected: &'static str },

    /// The connection is closed or unusable.
    #[error("connection closed")]
    Closed,

    /// Driver-level failure.
    #[error("driver error: {0}")]
    Driver(String),
}

/// Schema introspection over a live database connection.
///
/// Implementations must be side-effect free: describing the same name twice
/// yields equivalent descriptors. The engine never retains a connection
/// beyond the call it was handed to.
pub trait Connection {
    /// Describe a composite type by name.
    ///
    /// Attributes are returned in native (positional) order.
    fn describe_struct(&self, type_name: &str) -> Result<StructDescriptor, ConnectionError>;

    /// Describe a collection type by name.
    fn describe_array(&self, type_name: &str) -> Result<ArrayDescriptor, ConnectionError>;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn describe_struct(&self, type_name: &str) -> Result<StructDescriptor, ConnectionError> {
        (**self).describe_struct(type_name)
    }

    fn describe_array(&self, type_name: &str) -> Result<ArrayDescriptor, ConnectionError> {
        (**self).describe_array(type_name)
    }
}
