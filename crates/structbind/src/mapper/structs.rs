// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct codec: one entity <-> one native composite value.

use std::marker::PhantomData;

use log::{debug, trace, warn};

use crate::entity::{DynEntity, ElementKind, Entity, EntityType, FieldKind, Value};
use crate::error::{ConversionError, MappingError, Result, ValueError};
use crate::mapper::{scalar_from_native, scalar_to_native, MappingContext};
use crate::metadata::{normalize, FieldBinding, NativeField, StructMetadata};
use crate::native::{Connection, NativeStruct, NativeValue, StructDescriptor};

/// Untyped struct codec bound to one [`StructMetadata`].
#[derive(Debug, Clone, Copy)]
pub struct StructMapper<'a> {
    ctx: MappingContext<'a>,
    metadata: &'a StructMetadata,
}

impl<'a> StructMapper<'a> {
    pub fn new(ctx: MappingContext<'a>, metadata: &'a StructMetadata) -> Self {
        Self { ctx, metadata }
    }

    pub fn metadata(&self) -> &'a StructMetadata {
        self.metadata
    }

    pub fn entity_type(&self) -> &'a EntityType {
        &self.metadata.entity
    }

    fn entity_name(&self) -> String {
        self.metadata.entity.to_string()
    }

    /// Encode an entity into a native struct.
    ///
    /// Columns are produced in native order and an unbound column yields
    /// `Null` in its position. A bound property the entity cannot read is an
    /// error, as is a descriptor whose columns no longer line up with the
    /// mapping.
    pub fn to_struct(
        &self,
        entity: &dyn DynEntity,
        conn: &dyn Connection,
    ) -> Result<NativeStruct> {
        let found = entity.entity_type();
        if found != self.metadata.entity {
            return Err(MappingError::TypeMismatch {
                expected: self.entity_name(),
                found: found.to_string(),
            });
        }

        let mut values = Vec::with_capacity(self.metadata.fields.len());
        for column in &self.metadata.fields {
            values.push(self.encode_column(entity, column, conn)?);
        }

        let descriptor = self
            .ctx
            .cache
            .struct_descriptor(&self.metadata.native_name, conn)
            .map_err(|e| e.within(&self.entity_name(), None))?;
        self.check_layout(&descriptor)?;
        NativeStruct::new(descriptor, values)
            .map_err(|e| MappingError::conversion(self.entity_name(), None, e))
    }

    /// Every mapped position must name the same column in the descriptor.
    fn check_layout(&self, descriptor: &StructDescriptor) -> Result<()> {
        let pairs = self.metadata.fields.iter().zip(&descriptor.attributes);
        for (position, (column, attribute)) in pairs.enumerate() {
            if normalize(&column.column_name) != normalize(&attribute.name) {
                return Err(MappingError::conversion(
                    self.entity_name(),
                    column.binding.as_ref().map(|b| b.field_name.as_str()),
                    ConversionError::ColumnMismatch {
                        type_name: descriptor.type_name.clone(),
                        position,
                        expected: column.column_name.clone(),
                        found: attribute.name.clone(),
                    },
                ));
            }
        }
        Ok(())
    }

    fn encode_column(
        &self,
        entity: &dyn DynEntity,
        column: &NativeField,
        conn: &dyn Connection,
    ) -> Result<NativeValue> {
        let Some(binding) = &column.binding else {
            warn!(
                "{}: column {} has no entity field, sending null",
                self.metadata.entity.short_name(),
                column.column_name
            );
            return Ok(NativeValue::Null);
        };

        let Some(value) = entity.get_property(&binding.field_name) else {
            return Err(MappingError::conversion(
                self.entity_name(),
                Some(&binding.field_name),
                ValueError::UnknownProperty(binding.field_name.clone()),
            ));
        };

        trace!(
            "{}.{} -> {} ({})",
            self.metadata.entity.short_name(),
            binding.field_name,
            column.column_name,
            value.kind_name()
        );
        self.encode_value(value, column, binding, conn)
    }

    fn encode_value(
        &self,
        value: Value,
        column: &NativeField,
        binding: &FieldBinding,
        conn: &dyn Connection,
    ) -> Result<NativeValue> {
        let field = binding.field_name.as_str();
        let entity = self.entity_name();
        let shape = |message: String| {
            MappingError::conversion(entity.clone(), Some(field), ConversionError::Shape(message))
        };

        match value {
            Value::List(items) => {
                if !column.class.is_array() {
                    return Err(shape(format!(
                        "list value for non-collection column {}",
                        column.column_name
                    )));
                }
                let element = match &binding.kind {
                    FieldKind::Collection { element, .. } => element.clone(),
                    _ => ElementKind::Scalar,
                };
                debug!(
                    "{}.{}: encoding {} elements as {}",
                    self.metadata.entity.short_name(),
                    field,
                    items.len(),
                    column.collection_type()
                );
                let array = self
                    .ctx
                    .array_mapper(element, column.collection_type())
                    .to_array(items, conn)
                    .map_err(|e| e.within(&entity, Some(field)))?;
                Ok(array.into())
            }
            Value::Entity(nested) => {
                let mapper = self.ctx.struct_mapper(&nested.entity_type())?;
                debug!(
                    "{}.{}: encoding nested {}",
                    self.metadata.entity.short_name(),
                    field,
                    mapper.metadata.native_name
                );
                let native = mapper
                    .to_struct(&*nested, conn)
                    .map_err(|e| e.within(&entity, Some(field)))?;
                Ok(native.into())
            }
            scalar if column.class.is_array() && !scalar.is_null() => Err(shape(format!(
                "collection column {} got a {} value",
                column.column_name,
                scalar.kind_name()
            ))),
            scalar => scalar_to_native(scalar)
                .map_err(|other| shape(format!("unsupported {} value", other.kind_name()))),
        }
    }

    /// Decode a native struct into a new entity instance.
    ///
    /// Attributes without a bound field are logged and skipped.
    pub fn from_struct(&self, native: &NativeStruct) -> Result<Box<dyn DynEntity>> {
        if !native
            .type_name()
            .eq_ignore_ascii_case(&self.metadata.native_name)
        {
            return Err(MappingError::TypeMismatch {
                expected: self.metadata.native_name.clone(),
                found: native.type_name().to_string(),
            });
        }

        let factory = self.ctx.registry.factory(&self.metadata.entity)?;
        let mut entity = factory();

        let attributes = native.descriptor().attributes.iter();
        for (attribute, raw) in attributes.zip(native.attributes()) {
            let Some(column) = self.metadata.field_by_column(&attribute.name) else {
                warn!(
                    "{}: native column {} is not mapped, skipping",
                    self.metadata.entity.short_name(),
                    attribute.name
                );
                continue;
            };
            let Some(binding) = &column.binding else {
                warn!(
                    "{}: native column {} has no entity field, skipping",
                    self.metadata.entity.short_name(),
                    attribute.name
                );
                continue;
            };

            let value = self.decode_value(raw, column, binding)?;
            trace!(
                "{} -> {}.{} ({})",
                attribute.name,
                self.metadata.entity.short_name(),
                binding.field_name,
                value.kind_name()
            );
            entity
                .set_property(&binding.field_name, value)
                .map_err(|e| {
                    MappingError::conversion(self.entity_name(), Some(&binding.field_name), e)
                })?;
        }

        Ok(entity)
    }

    fn decode_value(
        &self,
        raw: &NativeValue,
        column: &NativeField,
        binding: &FieldBinding,
    ) -> Result<Value> {
        let field = binding.field_name.as_str();
        match raw {
            NativeValue::Struct(nested) => {
                let mapper = match &binding.kind {
                    FieldKind::Entity(entity) => self.ctx.struct_mapper(entity)?,
                    _ => self.ctx.struct_mapper_for_native(nested.type_name())?,
                };
                debug!(
                    "{}.{}: decoding nested {}",
                    self.metadata.entity.short_name(),
                    binding.field_name,
                    nested.type_name()
                );
                let decoded = mapper
                    .from_struct(nested)
                    .map_err(|e| e.within(&self.entity_name(), Some(field)))?;
                Ok(Value::Entity(decoded))
            }
            NativeValue::Array(array) => {
                let element = match &binding.kind {
                    FieldKind::Collection { element, .. } => element.clone(),
                    _ => ElementKind::Scalar,
                };
                let items = self
                    .ctx
                    .array_mapper(element, column.collection_type())
                    .from_array(array)
                    .map_err(|e| e.within(&self.entity_name(), Some(field)))?;
                Ok(Value::List(items))
            }
            scalar => scalar_from_native(scalar).ok_or_else(|| {
                MappingError::conversion(
                    self.entity_name(),
                    Some(&binding.field_name),
                    ConversionError::Shape(format!("unsupported native {}", scalar.kind_name())),
                )
            }),
        }
    }
}

/// Struct codec for one entity type `T`.
#[derive(Debug)]
pub struct StructCodec<'a, T> {
    mapper: StructMapper<'a>,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T: Entity> StructCodec<'a, T> {
    /// Codec for `T`; fails with `NotFound` if `T` is not registered.
    pub fn new(ctx: MappingContext<'a>) -> Result<Self> {
        Ok(Self {
            mapper: ctx.struct_mapper(&EntityType::of::<T>())?,
            _entity: PhantomData,
        })
    }

    pub fn mapper(&self) -> &StructMapper<'a> {
        &self.mapper
    }

    pub fn encode(&self, entity: &T, conn: &dyn Connection) -> Result<NativeStruct> {
        self.mapper.to_struct(entity, conn)
    }

    /// Encode any entity; fails with `TypeMismatch` unless it is a `T`.
    pub fn encode_dyn(
        &self,
        entity: &dyn DynEntity,
        conn: &dyn Connection,
    ) -> Result<NativeStruct> {
        self.mapper.to_struct(entity, conn)
    }

    /// Encode an optional entity; `None` is a native `Null`.
    pub fn encode_value(&self, entity: Option<&T>, conn: &dyn Connection) -> Result<NativeValue> {
        match entity {
            Some(entity) => Ok(self.encode(entity, conn)?.into()),
            None => Ok(NativeValue::Null),
        }
    }

    pub fn decode(&self, native: &NativeStruct) -> Result<T> {
        let decoded = self.mapper.from_struct(native)?;
        let found = decoded.entity_type();
        decoded
            .into_any()
            .downcast::<T>()
            .map(|entity| *entity)
            .map_err(|_| MappingError::TypeMismatch {
                expected: EntityType::of::<T>().to_string(),
                found: found.to_string(),
            })
    }

    /// Decode an optional native struct; `Null` is `None`.
    pub fn decode_value(&self, native: &NativeValue) -> Result<Option<T>> {
        match native {
            NativeValue::Null => Ok(None),
            NativeValue::Struct(s) => self.decode(s).map(Some),
            other => Err(MappingError::conversion(
                self.mapper.entity_name(),
                None,
                ConversionError::Shape(format!("expected a struct, got {}", other.kind_name())),
            )),
        }
    }
}
