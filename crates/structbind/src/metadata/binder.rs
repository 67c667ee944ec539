// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field binder: matches entity fields to native columns by normalized name.

use crate::entity::{EntitySchema, FieldKind};
use crate::error::{MappingError, Result};
use crate::metadata::{normalize, FieldBinding, StructMetadata, UnmappedField};
use crate::native::NativeClass;
use log::{debug, trace, warn};
use std::collections::HashMap;

/// Bind every non-static field of `schema` to exactly one column of
/// `metadata`.
///
/// - one normalized match: the column is bound to the field
/// - no match: the field is recorded in `unmapped_fields`
/// - several matches, or a column claimed twice: `AmbiguousFieldBinding`
///
/// Two native columns that normalize identically are rejected up front,
/// since decode looks columns up by normalized name.
pub fn bind_fields(metadata: &mut StructMetadata, schema: &EntitySchema) -> Result<()> {
    let ambiguous = |detail: String| MappingError::AmbiguousFieldBinding {
        entity: schema.entity.to_string(),
        native_type: schema.native_name.clone(),
        detail,
    };

    let mut seen: HashMap<String, &str> = HashMap::with_capacity(metadata.fields.len());
    for column in &metadata.fields {
        let key = normalize(&column.column_name);
        if let Some(previous) = seen.insert(key.clone(), &column.column_name) {
            return Err(ambiguous(format!(
                "native columns {} and {} both normalize to {}",
                previous, column.column_name, key
            )));
        }
    }

    for field in &schema.fields {
        if field.is_static {
            trace!("Ignoring static field {}", field.name);
            continue;
        }

        let wanted = normalize(field.column_hint());
        let candidates: Vec<usize> = metadata
            .fields
            .iter()
            .enumerate()
            .filter(|(_, column)| normalize(&column.column_name) == wanted)
            .map(|(index, _)| index)
            .collect();

        match candidates.as_slice() {
            [index] => {
                let column = &mut metadata.fields[*index];
                if let Some(existing) = &column.binding {
                    return Err(ambiguous(format!(
                        "fields {} and {} both claim column {}",
                        existing.field_name, field.name, column.column_name
                    )));
                }
                check_class(schema, &field.name, &field.kind, column.class);
                debug!(
                    "Bind {}.{} -> {}",
                    schema.entity.short_name(),
                    field.name,
                    column.column_name
                );
                column.binding = Some(FieldBinding {
                    field_name: field.name.clone(),
                    kind: field.kind.clone(),
                });
            }
            [] => {
                debug!(
                    "Field {}.{} has no column {} in {}",
                    schema.entity.short_name(),
                    field.name,
                    field.column_hint(),
                    schema.native_name
                );
                metadata.unmapped_fields.push(UnmappedField {
                    field_name: field.name.clone(),
                    column_hint: field.column_hint().to_string(),
                });
            }
            many => {
                let names: Vec<&str> = many
                    .iter()
                    .map(|i| metadata.fields[*i].column_name.as_str())
                    .collect();
                return Err(ambiguous(format!(
                    "multiple candidates for field {}: {}",
                    field.name,
                    names.join(", ")
                )));
            }
        }
    }

    Ok(())
}

fn check_class(schema: &EntitySchema, field: &str, kind: &FieldKind, class: NativeClass) {
    let consistent = match kind {
        FieldKind::Collection { .. } => class.is_array(),
        FieldKind::Entity(_) => class.is_struct(),
        FieldKind::Scalar => true,
    };
    if !consistent {
        warn!(
            "Field {}.{} declared as {:?} but native column class is {:?}",
            schema.entity.short_name(),
            field,
            kind,
            class
        );
    }
}
