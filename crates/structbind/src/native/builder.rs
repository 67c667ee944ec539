// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for StructDescriptor.

use crate::native::{AttributeDescriptor, NativeClass, StructDescriptor};

/// Builder for creating StructDescriptor instances.
///
/// Attributes inherit the owning schema of the struct.
#[derive(Debug)]
pub struct StructDescriptorBuilder {
    type_name: String,
    schema: String,
    attributes: Vec<AttributeDescriptor>,
}

impl StructDescriptorBuilder {
    /// Create a new builder for a composite type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            schema: String::new(),
            attributes: Vec::new(),
        }
    }

    /// Set the owning schema.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Add a scalar attribute.
    pub fn scalar(self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.attribute(name, type_name, NativeClass::Scalar)
    }

    /// Add a nested struct attribute.
    pub fn nested(self, name: impl Into<String>, struct_type: impl Into<String>) -> Self {
        self.attribute(name, struct_type, NativeClass::Struct)
    }

    /// Add a collection attribute.
    pub fn array(self, name: impl Into<String>, collection_type: impl Into<String>) -> Self {
        self.attribute(name, collection_type, NativeClass::Array)
    }

    /// Add an attribute of any class.
    pub fn attribute(
        mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        class: NativeClass,
    ) -> Self {
        let attr = AttributeDescriptor::new(name, type_name, class, self.schema.clone());
        self.attributes.push(attr);
        self
    }

    /// Build the StructDescriptor.
    pub fn build(self) -> StructDescriptor {
        StructDescriptor::new(self.type_name, self.schema, self.attributes)
    }
}
