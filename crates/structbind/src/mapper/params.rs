// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Stored-procedure parameter adapters.
//!
//! IN parameters hold an application value and encode it only when the
//! caller supplies a connection. OUT parameters decode what the call
//! returned.

use crate::entity::{Entity, Value};
use crate::error::Result;
use crate::mapper::{ArrayCodec, ArrayMapper, StructCodec};
use crate::native::{Connection, NativeValue};

/// A value that becomes a native value on a given connection.
pub trait TypeValue {
    fn create_value(&self, conn: &dyn Connection) -> Result<NativeValue>;
}

/// IN parameter carrying an optional entity.
#[derive(Debug)]
pub struct StructParam<'a, T> {
    codec: StructCodec<'a, T>,
    value: Option<T>,
}

impl<'a, T: Entity> StructParam<'a, T> {
    pub fn new(codec: StructCodec<'a, T>, value: Option<T>) -> Self {
        Self { codec, value }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T: Entity> TypeValue for StructParam<'_, T> {
    fn create_value(&self, conn: &dyn Connection) -> Result<NativeValue> {
        self.codec.encode_value(self.value.as_ref(), conn)
    }
}

/// IN parameter carrying an optional collection of entities.
#[derive(Debug)]
pub struct ArrayParam<'a, T> {
    codec: ArrayCodec<'a, T>,
    values: Option<Vec<Option<T>>>,
}

impl<'a, T: Entity> ArrayParam<'a, T> {
    pub fn new(codec: ArrayCodec<'a, T>, values: Option<Vec<Option<T>>>) -> Self {
        Self { codec, values }
    }
}

impl<T: Entity> TypeValue for ArrayParam<'_, T> {
    fn create_value(&self, conn: &dyn Connection) -> Result<NativeValue> {
        self.codec.encode_value(self.values.as_deref(), conn)
    }
}

/// IN parameter carrying an optional collection of scalars.
#[derive(Debug)]
pub struct ScalarArrayParam<'a> {
    mapper: ArrayMapper<'a>,
    values: Option<Vec<Value>>,
}

impl<'a> ScalarArrayParam<'a> {
    pub fn new(mapper: ArrayMapper<'a>, values: Option<Vec<Value>>) -> Self {
        Self { mapper, values }
    }
}

impl TypeValue for ScalarArrayParam<'_> {
    fn create_value(&self, conn: &dyn Connection) -> Result<NativeValue> {
        self.mapper.to_value(self.values.clone(), conn)
    }
}

/// OUT parameter decoding an optional native struct.
#[derive(Debug)]
pub struct ReturnStruct<'a, T> {
    codec: StructCodec<'a, T>,
}

impl<'a, T: Entity> ReturnStruct<'a, T> {
    pub fn new(codec: StructCodec<'a, T>) -> Self {
        Self { codec }
    }

    /// Decode the returned value. An absent or `Null` value is `None`.
    pub fn get_value(&self, returned: Option<&NativeValue>) -> Result<Option<T>> {
        match returned {
            Some(value) => self.codec.decode_value(value),
            None => Ok(None),
        }
    }
}
