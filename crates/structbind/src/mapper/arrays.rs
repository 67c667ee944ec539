// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Array codec: ordered sequence <-> native collection value.

use std::marker::PhantomData;

use log::trace;

use crate::entity::{ElementKind, Entity, EntityType, Value};
use crate::error::{ConversionError, MappingError, Result};
use crate::mapper::{scalar_from_native, scalar_to_native, MappingContext, StructMapper};
use crate::native::{Connection, NativeArray, NativeStruct, NativeValue};

/// Untyped array codec for one native collection type.
///
/// Element order and `null` slots are preserved both ways.
#[derive(Debug, Clone)]
pub struct ArrayMapper<'a> {
    ctx: MappingContext<'a>,
    element: ElementKind,
    collection_type: String,
}

impl<'a> ArrayMapper<'a> {
    pub fn new(
        ctx: MappingContext<'a>,
        element: ElementKind,
        collection_type: impl Into<String>,
    ) -> Self {
        Self {
            ctx,
            element,
            collection_type: collection_type.into(),
        }
    }

    pub fn collection_type(&self) -> &str {
        &self.collection_type
    }

    pub fn element(&self) -> &ElementKind {
        &self.element
    }

    fn label(&self) -> String {
        format!("collection {}", self.collection_type)
    }

    fn error(&self, message: String) -> MappingError {
        MappingError::conversion(self.label(), None, ConversionError::Shape(message))
    }

    /// Encode a sequence.
    ///
    /// The first non-null element decides whether elements go through the
    /// struct codec or pass through as scalars. An empty sequence yields an
    /// empty native collection.
    pub fn to_array(&self, items: Vec<Value>, conn: &dyn Connection) -> Result<NativeArray> {
        let structured = matches!(items.iter().find(|v| !v.is_null()), Some(Value::Entity(_)));

        let mut elements = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let native = match item {
                Value::Null => NativeValue::Null,
                Value::Entity(entity) if structured => {
                    let mapper = self.ctx.struct_mapper(&entity.entity_type())?;
                    mapper.to_struct(&*entity, conn)?.into()
                }
                other if structured => {
                    return Err(self.error(format!(
                        "element {index} is a {} in a collection of entities",
                        other.kind_name()
                    )))
                }
                other => scalar_to_native(other).map_err(|v| {
                    self.error(format!(
                        "element {index} is a {} in a collection of scalars",
                        v.kind_name()
                    ))
                })?,
            };
            elements.push(native);
        }

        trace!(
            "Encoded {} elements into {}",
            elements.len(),
            self.collection_type
        );
        let descriptor = self
            .ctx
            .cache
            .array_descriptor(&self.collection_type, conn)
            .map_err(|e| e.within(&self.label(), None))?;
        NativeArray::new(descriptor, elements)
            .map_err(|e| MappingError::conversion(self.label(), None, e))
    }

    /// Encode an optional sequence; `None` is a native `Null`.
    pub fn to_value(
        &self,
        items: Option<Vec<Value>>,
        conn: &dyn Connection,
    ) -> Result<NativeValue> {
        match items {
            Some(items) => Ok(self.to_array(items, conn)?.into()),
            None => Ok(NativeValue::Null),
        }
    }

    /// Decode a native collection, element by element, in order.
    pub fn from_array(&self, array: &NativeArray) -> Result<Vec<Value>> {
        array
            .elements()
            .iter()
            .enumerate()
            .map(|(index, element)| match element {
                NativeValue::Struct(native) => {
                    let mapper = self.element_mapper(native)?;
                    Ok(Value::Entity(mapper.from_struct(native)?))
                }
                scalar => scalar_from_native(scalar).ok_or_else(|| {
                    self.error(format!(
                        "element {index} is a nested {}",
                        scalar.kind_name()
                    ))
                }),
            })
            .collect()
    }

    /// Decode an optional native collection; `Null` is `None`, never an
    /// empty sequence.
    pub fn from_value(&self, value: &NativeValue) -> Result<Option<Vec<Value>>> {
        match value {
            NativeValue::Null => Ok(None),
            NativeValue::Array(array) => self.from_array(array).map(Some),
            other => Err(self.error(format!(
                "expected a collection, got {}",
                other.kind_name()
            ))),
        }
    }

    fn element_mapper(&self, native: &NativeStruct) -> Result<StructMapper<'a>> {
        match &self.element {
            ElementKind::Entity(entity) => self.ctx.struct_mapper(entity),
            ElementKind::Scalar => self.ctx.struct_mapper_for_native(native.type_name()),
        }
    }
}

/// Array codec for collections of entity type `T`.
#[derive(Debug)]
pub struct ArrayCodec<'a, T> {
    mapper: ArrayMapper<'a>,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T: Entity> ArrayCodec<'a, T> {
    /// Codec for `T` elements; fails with `NotFound` if `T` is not
    /// registered.
    pub fn new(ctx: MappingContext<'a>, collection_type: impl Into<String>) -> Result<Self> {
        let entity = EntityType::of::<T>();
        ctx.registry.find_by_entity(&entity)?;
        Ok(Self {
            mapper: ctx.array_mapper(ElementKind::Entity(entity), collection_type),
            _entity: PhantomData,
        })
    }

    pub fn mapper(&self) -> &ArrayMapper<'a> {
        &self.mapper
    }

    pub fn encode(&self, items: &[Option<T>], conn: &dyn Connection) -> Result<NativeArray> {
        let values = items
            .iter()
            .cloned()
            .map(Value::from_optional_entity)
            .collect();
        self.mapper.to_array(values, conn)
    }

    /// Encode an optional sequence; `None` is a native `Null`.
    pub fn encode_value(
        &self,
        items: Option<&[Option<T>]>,
        conn: &dyn Connection,
    ) -> Result<NativeValue> {
        match items {
            Some(items) => Ok(self.encode(items, conn)?.into()),
            None => Ok(NativeValue::Null),
        }
    }

    pub fn decode(&self, array: &NativeArray) -> Result<Vec<Option<T>>> {
        self.mapper
            .from_array(array)?
            .into_iter()
            .map(|value| {
                value
                    .into_entity::<T>("element")
                    .map_err(|e| MappingError::conversion(self.mapper.label(), None, e))
            })
            .collect()
    }

    /// Decode an optional native collection; `Null` is `None`.
    pub fn decode_value(&self, value: &NativeValue) -> Result<Option<Vec<Option<T>>>> {
        match value {
            NativeValue::Null => Ok(None),
            NativeValue::Array(array) => self.decode(array).map(Some),
            other => Err(self.mapper.error(format!(
                "expected a collection, got {}",
                other.kind_name()
            ))),
        }
    }
}
