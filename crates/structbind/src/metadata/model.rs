// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct mapping metadata.

use crate::entity::{EntityType, FieldKind};
use crate::native::NativeClass;
use serde::{Deserialize, Serialize};

/// Canonical form used to compare column names with field names:
/// uppercase, underscores removed.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Entity field a native column is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    /// Property name on the entity.
    pub field_name: String,
    /// Value kind of the property.
    pub kind: FieldKind,
}

/// One native attribute of a composite type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeField {
    /// Native column name.
    pub column_name: String,
    /// Native type name.
    pub type_name: String,
    /// Runtime class of the column's values.
    pub class: NativeClass,
    /// Owning schema.
    pub schema: String,
    /// Bound entity field, set once during binding.
    pub binding: Option<FieldBinding>,
}

impl NativeField {
    /// Whether an entity field is bound to this column.
    pub fn is_mapped(&self) -> bool {
        self.binding.is_some()
    }

    /// Bound property name.
    pub fn field_name(&self) -> Option<&str> {
        self.binding.as_ref().map(|b| b.field_name.as_str())
    }

    /// Native collection type used for this column: the field's explicit
    /// collection type, falling back to the column's own type name.
    pub fn collection_type(&self) -> &str {
        match &self.binding {
            Some(FieldBinding {
                kind:
                    FieldKind::Collection {
                        collection_type: Some(name),
                        ..
                    },
                ..
            }) => name,
            _ => &self.type_name,
        }
    }
}

/// Entity field with no native counterpart; kept for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedField {
    /// Property name on the entity.
    pub field_name: String,
    /// Column name the binder looked for.
    pub column_hint: String,
}

/// Complete mapping of one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructMetadata {
    /// Entity identity.
    pub entity: EntityType,
    /// Native composite type name.
    pub native_name: String,
    /// Native columns in positional order.
    pub fields: Vec<NativeField>,
    /// Entity fields without a native column.
    pub unmapped_fields: Vec<UnmappedField>,
}

impl StructMetadata {
    /// Create metadata with no fields yet.
    pub fn new(entity: EntityType, native_name: impl Into<String>) -> Self {
        Self {
            entity,
            native_name: native_name.into(),
            fields: Vec::new(),
            unmapped_fields: Vec::new(),
        }
    }

    /// Find a native column by normalized name.
    pub fn field_by_column(&self, column: &str) -> Option<&NativeField> {
        let wanted = normalize(column);
        self.fields
            .iter()
            .find(|f| normalize(&f.column_name) == wanted)
    }

    /// Find the column bound to an entity property.
    pub fn field_by_property(&self, property: &str) -> Option<&NativeField> {
        self.fields
            .iter()
            .find(|f| f.field_name() == Some(property))
    }

    /// Number of bound columns.
    pub fn mapped_count(&self) -> usize {
        self.fields.iter().filter(|f| f.is_mapped()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ElementKind;

    fn column(name: &str, binding: Option<FieldBinding>) -> NativeField {
        NativeField {
            column_name: name.into(),
            type_name: "ORDER_ARR_T".into(),
            class: NativeClass::Array,
            schema: "SALES".into(),
            binding,
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("ORDER_ID"), "ORDERID");
        assert_eq!(normalize("orderid"), "ORDERID");
        assert_eq!(normalize("Order_Id"), "ORDERID");
        assert_eq!(normalize("orderId"), "ORDERID");
        assert_eq!(normalize("__a_b__"), "AB");
    }

    #[test]
    fn test_collection_type_fallback() {
        let plain = column(
            "ORDERS",
            Some(FieldBinding {
                field_name: "orders".into(),
                kind: FieldKind::Collection {
                    element: ElementKind::Scalar,
                    collection_type: None,
                },
            }),
        );
        assert_eq!(plain.collection_type(), "ORDER_ARR_T");

        let explicit = column(
            "ORDERS",
            Some(FieldBinding {
                field_name: "orders".into(),
                kind: FieldKind::Collection {
                    element: ElementKind::Scalar,
                    collection_type: Some("OTHER_ARR_T".into()),
                },
            }),
        );
        assert_eq!(explicit.collection_type(), "OTHER_ARR_T");
    }

    #[test]
    fn test_lookup_by_column_and_property() {
        let mut meta = StructMetadata::new(EntityType::named("Customer"), "CUSTOMER_T");
        meta.fields.push(column(
            "ORDER_LIST",
            Some(FieldBinding {
                field_name: "orders".into(),
                kind: FieldKind::Scalar,
            }),
        ));
        meta.fields.push(column("EXTRA", None));

        assert_eq!(
            meta.field_by_column("orderList").map(|f| f.column_name.as_str()),
            Some("ORDER_LIST")
        );
        assert_eq!(
            meta.field_by_property("orders").map(|f| f.column_name.as_str()),
            Some("ORDER_LIST")
        );
        assert_eq!(meta.mapped_count(), 1);
    }
}
