// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared fixtures: a small sales model and the catalog describing it.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use structbind::entity::{Entity, EntitySchema, Scope, Value};
use structbind::error::ValueError;
use structbind::native::{
    ArrayDescriptor, CatalogConnection, NativeClass, StructDescriptorBuilder,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Entities
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub id: i64,
    pub amount: Decimal,
}

impl Entity for Order {
    fn schema() -> EntitySchema {
        EntitySchema::builder::<Self>("ORDER_T")
            .field("id")
            .field("amount")
            .build()
    }

    fn read(&self, property: &str) -> Option<Value> {
        match property {
            "id" => Some(self.id.into()),
            "amount" => Some(self.amount.into()),
            _ => None,
        }
    }

    fn write(&mut self, property: &str, value: Value) -> Result<(), ValueError> {
        match property {
            "id" => self.id = value.extract(property)?,
            "amount" => self.amount = value.extract(property)?,
            _ => return Err(ValueError::UnknownProperty(property.to_string())),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub orders: Option<Vec<Option<Order>>>,
}

impl Entity for Customer {
    fn schema() -> EntitySchema {
        EntitySchema::builder::<Self>("CUSTOMER_T")
            .field("id")
            .field("name")
            .collection::<Order>("orders", "ORDER_ARR_T")
            .build()
    }

    fn read(&self, property: &str) -> Option<Value> {
        match property {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.clone().into()),
            "orders" => Some(Value::from_entity_list(self.orders.clone())),
            _ => None,
        }
    }

    fn write(&mut self, property: &str, value: Value) -> Result<(), ValueError> {
        match property {
            "id" => self.id = value.extract(property)?,
            "name" => self.name = value.extract(property)?,
            "orders" => self.orders = value.into_entity_list(property)?,
            _ => return Err(ValueError::UnknownProperty(property.to_string())),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub street: String,
    pub zip_code: Option<String>,
}

impl Entity for Address {
    fn schema() -> EntitySchema {
        EntitySchema::builder::<Self>("ADDRESS_T")
            .field("street")
            .field("zipCode")
            .build()
    }

    fn read(&self, property: &str) -> Option<Value> {
        match property {
            "street" => Some(self.street.clone().into()),
            "zipCode" => Some(self.zip_code.clone().into()),
            _ => None,
        }
    }

    fn write(&mut self, property: &str, value: Value) -> Result<(), ValueError> {
        match property {
            "street" => self.street = value.extract(property)?,
            "zipCode" => self.zip_code = value.extract(property)?,
            _ => return Err(ValueError::UnknownProperty(property.to_string())),
        }
        Ok(())
    }
}

/// Exercises every field kind: nested struct holding a collection, a plain
/// nested struct, a timestamp, a scalar collection, a column override, an
/// unmapped field and a static field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Account {
    pub account_no: String,
    pub owner: Option<Customer>,
    pub address: Option<Address>,
    pub opened_at: Option<DateTime<Utc>>,
    pub tags: Option<Vec<Option<String>>>,
    pub balance: f64,
    /// No native column.
    pub nickname: String,
}

impl Account {
    pub const VERSION: i64 = 3;
}

impl Entity for Account {
    fn schema() -> EntitySchema {
        EntitySchema::builder::<Self>("ACCOUNT_T")
            .field("accountNo")
            .nested::<Customer>("owner")
            .nested::<Address>("address")
            .field("openedAt")
            // Collection type taken from the bound column.
            .scalar_collection("tags", "")
            .column("balance", "BAL")
            .field("nickname")
            .static_field("version")
            .build()
    }

    fn read(&self, property: &str) -> Option<Value> {
        match property {
            "accountNo" => Some(self.account_no.clone().into()),
            "owner" => Some(Value::from_optional_entity(self.owner.clone())),
            "address" => Some(Value::from_optional_entity(self.address.clone())),
            "openedAt" => Some(self.opened_at.into()),
            "tags" => Some(self.tags.clone().into()),
            "balance" => Some(self.balance.into()),
            "nickname" => Some(self.nickname.clone().into()),
            "version" => Some(Self::VERSION.into()),
            _ => None,
        }
    }

    fn write(&mut self, property: &str, value: Value) -> Result<(), ValueError> {
        match property {
            "accountNo" => self.account_no = value.extract(property)?,
            "owner" => self.owner = value.into_entity(property)?,
            "address" => self.address = value.into_entity(property)?,
            "openedAt" => self.opened_at = value.extract(property)?,
            "tags" => self.tags = value.extract(property)?,
            "balance" => self.balance = value.extract(property)?,
            "nickname" => self.nickname = value.extract(property)?,
            _ => return Err(ValueError::UnknownProperty(property.to_string())),
        }
        Ok(())
    }
}

// ============================================================================
// Native schema
// ============================================================================

pub fn catalog() -> CatalogConnection {
    CatalogConnection::new()
        .with_struct(
            StructDescriptorBuilder::new("ORDER_T")
                .schema("SALES")
                .scalar("ID", "NUMBER")
                .scalar("AMOUNT", "NUMBER")
                .build(),
        )
        .with_struct_array("ORDER_ARR_T", "ORDER_T")
        .with_struct(
            StructDescriptorBuilder::new("CUSTOMER_T")
                .schema("SALES")
                .scalar("ID", "NUMBER")
                .scalar("NAME", "VARCHAR2")
                .array("ORDERS", "ORDER_ARR_T")
                .build(),
        )
        .with_struct(
            StructDescriptorBuilder::new("ADDRESS_T")
                .schema("SALES")
                .scalar("STREET", "VARCHAR2")
                .scalar("ZIP_CODE", "VARCHAR2")
                .build(),
        )
        .with_array(ArrayDescriptor::new(
            "TAG_ARR_T",
            "SALES",
            "VARCHAR2",
            NativeClass::Scalar,
        ))
        .with_struct(
            StructDescriptorBuilder::new("ACCOUNT_T")
                .schema("SALES")
                .scalar("ACCOUNT_NO", "VARCHAR2")
                .nested("OWNER", "CUSTOMER_T")
                .nested("ADDRESS", "ADDRESS_T")
                .scalar("OPENED_AT", "DATE")
                .array("TAGS", "TAG_ARR_T")
                .scalar("BAL", "NUMBER")
                .scalar("LEGACY_FLAG", "CHAR")
                .build(),
        )
}

/// The sales catalog after `ORDER_T` swapped its two columns.
pub fn drifted_catalog() -> CatalogConnection {
    catalog().with_struct(
        StructDescriptorBuilder::new("ORDER_T")
            .schema("SALES")
            .scalar("AMOUNT", "NUMBER")
            .scalar("ID", "NUMBER")
            .build(),
    )
}

pub fn sales_scope() -> Scope {
    Scope::new("sales.model")
        .expect("valid scope name")
        .with::<Order>()
        .with::<Customer>()
        .with::<Address>()
        .with::<Account>()
}

// ============================================================================
// Values
// ============================================================================

pub fn order(id: i64, amount: &str) -> Order {
    Order {
        id,
        amount: amount.parse().expect("decimal literal"),
    }
}

pub fn ann() -> Customer {
    Customer {
        id: 1,
        name: "Ann".into(),
        orders: Some(vec![Some(order(10, "5.0")), None]),
    }
}

pub fn account() -> Account {
    Account {
        account_no: "ACC-001".into(),
        owner: Some(ann()),
        address: Some(Address {
            street: "1 Main St".into(),
            zip_code: None,
        }),
        opened_at: Some(
            DateTime::parse_from_rfc3339("2024-03-01T09:30:00Z")
                .expect("timestamp literal")
                .with_timezone(&Utc),
        ),
        tags: Some(vec![Some("vip".into()), None, Some("eu".into())]),
        balance: 1250.5,
        nickname: String::new(),
    }
}
