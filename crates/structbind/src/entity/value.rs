// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Application-side property values.

use crate::entity::{DynEntity, Entity, EntityType};
use crate::error::ValueError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A property value read from or written to an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Decimal(Decimal),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    /// Temporal value; stored natively as a DATE.
    Timestamp(DateTime<Utc>),
    /// Nested entity.
    Entity(Box<dyn DynEntity>),
    /// Ordered collection; `Null` elements keep their slot.
    List(Vec<Value>),
}

impl Value {
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
            Self::Bytes(_) => "bytes",
            Self::Timestamp(_) => "timestamp",
            Self::Entity(_) => "entity",
            Self::List(_) => "list",
        }
    }

    /// Wrap an entity.
    pub fn from_entity<T: Entity>(entity: T) -> Self {
        Self::Entity(Box::new(entity))
    }

    /// Wrap an optional entity (`None` becomes `Null`).
    pub fn from_optional_entity<T: Entity>(entity: Option<T>) -> Self {
        entity.map_or(Self::Null, Self::from_entity)
    }

    /// Wrap an optional list of optional entities.
    ///
    /// `None` becomes `Null`; an empty list stays an empty `List`.
    pub fn from_entity_list<T: Entity>(items: Option<Vec<Option<T>>>) -> Self {
        match items {
            None => Self::Null,
            Some(items) => Self::List(items.into_iter().map(Self::from_optional_entity).collect()),
        }
    }

    /// Entity type of a nested entity value.
    pub fn entity_type(&self) -> Option<EntityType> {
        match self {
            Self::Entity(e) => Some(e.entity_type()),
            _ => None,
        }
    }

    /// Extract a scalar (or list of scalars) for `property`.
    pub fn extract<T: FromValue>(self, property: &str) -> Result<T, ValueError> {
        T::from_value(self).map_err(|found| ValueError::Incompatible {
            property: property.to_string(),
            expected: T::EXPECTED,
            found: found.kind_name().to_string(),
        })
    }

    /// Extract an optional nested entity for `property`.
    pub fn into_entity<T: Entity>(self, property: &str) -> Result<Option<T>, ValueError> {
        match self {
            Self::Null => Ok(None),
            Self::Entity(boxed) => {
                let found = boxed.entity_type();
                boxed
                    .into_any()
                    .downcast::<T>()
                    .map(|e| Some(*e))
                    .map_err(|_| ValueError::WrongEntity {
                        expected: EntityType::of::<T>().to_string(),
                        found: found.to_string(),
                    })
            }
            other => Err(ValueError::Incompatible {
                property: property.to_string(),
                expected: "entity",
                found: other.kind_name().to_string(),
            }),
        }
    }

    /// Extract an optional list of optional nested entities for `property`.
    pub fn into_entity_list<T: Entity>(
        self,
        property: &str,
    ) -> Result<Option<Vec<Option<T>>>, ValueError> {
        match self {
            Self::Null => Ok(None),
            Self::List(items) => items
                .into_iter()
                .map(|item| item.into_entity::<T>(property))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            other => Err(ValueError::Incompatible {
                property: property.to_string(),
                expected: "list",
                found: other.kind_name().to_string(),
            }),
        }
    }
}

/// Conversion out of a [`Value`] for scalar property types.
///
/// On mismatch the input value is handed back for diagnostics.
pub trait FromValue: Sized {
    /// Expected kind, for error messages.
    const EXPECTED: &'static str;

    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! impl_from_value {
    ($ty:ty, $expected:literal, $($pat:pat => $out:expr),+ $(,)?) => {
        impl FromValue for $ty {
            const EXPECTED: &'static str = $expected;

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    $($pat => Ok($out),)+
                    other => Err(other),
                }
            }
        }
    };
}

impl_from_value!(bool, "bool", Value::Bool(v) => v);
impl_from_value!(i64, "integer", Value::Integer(v) => v);
impl_from_value!(String, "text", Value::Text(v) => v);
impl_from_value!(DateTime<Utc>, "timestamp", Value::Timestamp(v) => v);
impl_from_value!(f64, "float", Value::Float(v) => v, Value::Integer(v) => v as f64);
impl_from_value!(
    Decimal,
    "decimal",
    Value::Decimal(v) => v,
    Value::Integer(v) => Decimal::from(v),
);

impl FromValue for i32 {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Integer(v) => i32::try_from(v).map_err(|_| Value::Integer(v)),
            other => Err(other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "list";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(T::from_value(item)?);
                }
                Ok(out)
            }
            other => Err(other),
        }
    }
}

// Conversion traits
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}
