// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native composite and collection values.

use crate::native::{ArrayDescriptor, NativeClass, StructDescriptor};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while constructing native values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NativeError {
    /// Attribute count does not match the descriptor.
    #[error("struct {type_name} expects {expected} attributes, got {found}")]
    Arity {
        type_name: String,
        expected: usize,
        found: usize,
    },

    /// An array element does not fit the declared element class.
    #[error("array {type_name} element {index}: expected {expected:?}, found {found}")]
    Element {
        type_name: String,
        index: usize,
        expected: NativeClass,
        found: &'static str,
    },
}

/// A value as exchanged with the database.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Null,
    Bool(bool),
    Integer(i64),
    Decimal(Decimal),
    Float(f64),
    Text(String),
    Raw(Vec<u8>),
    /// Native DATE (second precision is the driver's concern, not ours).
    Date(NaiveDateTime),
    Struct(NativeStruct),
    Array(NativeArray),
}

impl NativeValue {
    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short kind name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Raw(_) => "raw",
            Self::Date(_) => "date",
            Self::Struct(_) => "struct",
            Self::Array(_) => "array",
        }
    }

    /// Try to get as nested struct.
    pub fn as_struct(&self) -> Option<&NativeStruct> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as collection.
    pub fn as_array(&self) -> Option<&NativeArray> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl From<NativeStruct> for NativeValue {
    fn from(v: NativeStruct) -> Self {
        Self::Struct(v)
    }
}

impl From<NativeArray> for NativeValue {
    fn from(v: NativeArray) -> Self {
        Self::Array(v)
    }
}

/// A native composite value: a descriptor plus positional attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeStruct {
    descriptor: Arc<StructDescriptor>,
    attributes: Vec<NativeValue>,
}

impl NativeStruct {
    /// Build a struct from positional values.
    ///
    /// Values must be given in the descriptor's attribute order.
    pub fn new(
        descriptor: Arc<StructDescriptor>,
        attributes: Vec<NativeValue>,
    ) -> Result<Self, NativeError> {
        if attributes.len() != descriptor.len() {
            return Err(NativeError::Arity {
                type_name: descriptor.type_name.clone(),
                expected: descriptor.len(),
                found: attributes.len(),
            });
        }
        Ok(Self {
            descriptor,
            attributes,
        })
    }

    /// Native type name.
    pub fn type_name(&self) -> &str {
        &self.descriptor.type_name
    }

    /// The descriptor this value was built with.
    pub fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }

    /// Positional attribute values.
    pub fn attributes(&self) -> &[NativeValue] {
        &self.attributes
    }

    /// Attribute value by exact column name.
    pub fn get(&self, column: &str) -> Option<&NativeValue> {
        let index = self.descriptor.attribute_index(column)?;
        self.attributes.get(index)
    }
}

/// A native collection value.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeArray {
    descriptor: Arc<ArrayDescriptor>,
    elements: Vec<NativeValue>,
}

impl NativeArray {
    /// Build a collection, checking non-null elements against the element class.
    pub fn new(
        descriptor: Arc<ArrayDescriptor>,
        elements: Vec<NativeValue>,
    ) -> Result<Self, NativeError> {
        for (index, element) in elements.iter().enumerate() {
            let fits = match (descriptor.element_class, element) {
                (_, NativeValue::Null) => true,
                (NativeClass::Struct, NativeValue::Struct(_)) => true,
                (NativeClass::Array, NativeValue::Array(_)) => true,
                (NativeClass::Scalar, NativeValue::Struct(_) | NativeValue::Array(_)) => false,
                (NativeClass::Scalar, _) => true,
                _ => false,
            };
            if !fits {
                return Err(NativeError::Element {
                    type_name: descriptor.type_name.clone(),
                    index,
                    expected: descriptor.element_class,
                    found: element.kind_name(),
                });
            }
        }
        Ok(Self {
            descriptor,
            elements,
        })
    }

    /// Native collection type name.
    pub fn type_name(&self) -> &str {
        &self.descriptor.type_name
    }

    /// The descriptor this value was built with.
    pub fn descriptor(&self) -> &Arc<ArrayDescriptor> {
        &self.descriptor
    }

    /// Elements in order.
    pub fn elements(&self) -> &[NativeValue] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::AttributeDescriptor;

    fn point() -> Arc<StructDescriptor> {
        Arc::new(StructDescriptor::new(
            "POINT_T",
            "GEO",
            vec![
                AttributeDescriptor::new("X", "NUMBER", NativeClass::Scalar, "GEO"),
                AttributeDescriptor::new("Y", "NUMBER", NativeClass::Scalar, "GEO"),
            ],
        ))
    }

    #[test]
    fn test_struct_arity_checked() {
        let err = NativeStruct::new(point(), vec![NativeValue::Integer(1)]).unwrap_err();
        assert_eq!(
            err,
            NativeError::Arity {
                type_name: "POINT_T".into(),
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_struct_get_by_column() {
        let s = NativeStruct::new(point(), vec![NativeValue::Integer(1), NativeValue::Integer(2)])
            .unwrap();
        assert_eq!(s.get("Y").and_then(NativeValue::as_i64), Some(2));
        assert_eq!(s.type_name(), "POINT_T");
    }

    #[test]
    fn test_array_element_class_checked() {
        let desc = Arc::new(ArrayDescriptor::new(
            "POINT_ARR_T",
            "GEO",
            "POINT_T",
            NativeClass::Struct,
        ));
        let err = NativeArray::new(desc.clone(), vec![NativeValue::Integer(3)]).unwrap_err();
        assert!(matches!(err, NativeError::Element { index: 0, .. }));

        let arr = NativeArray::new(desc, vec![NativeValue::Null]).unwrap();
        assert_eq!(arr.len(), 1);
    }
}
