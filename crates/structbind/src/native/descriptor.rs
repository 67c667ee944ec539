// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native type descriptors as reported by schema introspection.

use serde::{Deserialize, Serialize};

/// Runtime class of a native attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeClass {
    /// Plain scalar (number, text, date, raw).
    Scalar,
    /// Nested composite type.
    Struct,
    /// Native collection type.
    Array,
}

impl NativeClass {
    /// Check if values of this class are native collections.
    pub fn is_array(self) -> bool {
        matches!(self, Self::Array)
    }

    /// Check if values of this class are native composites.
    pub fn is_struct(self) -> bool {
        matches!(self, Self::Struct)
    }
}

/// One attribute of a native composite type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    /// Attribute (column) name.
    pub name: String,
    /// Native type name (`NUMBER`, `VARCHAR2`, `ORDER_ARR_T`, ...).
    pub type_name: String,
    /// Runtime class of values stored in the attribute.
    pub class: NativeClass,
    /// Owning schema name.
    pub schema: String,
}

impl AttributeDescriptor {
    /// Create a new attribute descriptor.
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        class: NativeClass,
        schema: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            class,
            schema: schema.into(),
        }
    }
}

/// Shape of a native composite type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDescriptor {
    /// Native type name.
    pub type_name: String,
    /// Owning schema name.
    pub schema: String,
    /// Attributes in native (positional) order.
    pub attributes: Vec<AttributeDescriptor>,
}

impl StructDescriptor {
    /// Create a struct descriptor.
    pub fn new(
        type_name: impl Into<String>,
        schema: impl Into<String>,
        attributes: Vec<AttributeDescriptor>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            schema: schema.into(),
            attributes,
        }
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the type has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Get attribute by exact name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Get attribute position by exact name.
    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }
}

/// Shape of a native collection type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayDescriptor {
    /// Native collection type name.
    pub type_name: String,
    /// Owning schema name.
    pub schema: String,
    /// Element type name.
    pub element_type: String,
    /// Runtime class of elements.
    pub element_class: NativeClass,
}

impl ArrayDescriptor {
    /// Create an array descriptor.
    pub fn new(
        type_name: impl Into<String>,
        schema: impl Into<String>,
        element_type: impl Into<String>,
        element_class: NativeClass,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            schema: schema.into(),
            element_type: element_type.into(),
            element_class,
        }
    }
}
