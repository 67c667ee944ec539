// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy for discovery, registration and conversion.
//!
//! Nothing in this crate retries: every error terminates the operation in
//! progress and is handed back to the caller unchanged.

use crate::native::{ConnectionError, NativeError};
use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = MappingError> = std::result::Result<T, E>;

/// Errors produced by the mapping engine.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Invalid discovery input or configuration value.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The native schema could not describe the composite type an entity
    /// declares.
    #[error(
        "entity {entity} references native type {native_type} which cannot be described: {source}"
    )]
    SchemaLookup {
        entity: String,
        native_type: String,
        #[source]
        source: ConnectionError,
    },

    /// A field or column resolved to more than one counterpart.
    #[error("ambiguous binding in {entity} ({native_type}): {detail}")]
    AmbiguousFieldBinding {
        entity: String,
        native_type: String,
        detail: String,
    },

    /// A native type name or entity type registered twice.
    #[error("duplicate mapping for {0}")]
    DuplicateMapping(String),

    /// No mapping registered for the requested entity or native type.
    #[error("no mapping registered for {0}")]
    NotFound(String),

    /// A native struct/array descriptor could not be resolved.
    ///
    /// `entity` and `field` name the outermost conversion that needed the
    /// descriptor; `field` is a dotted path through nested entities.
    #[error(
        "error reading descriptor {type_name}{}: {source}",
        context_suffix(.entity, .field)
    )]
    DescriptorResolution {
        type_name: String,
        entity: Option<String>,
        field: Option<String>,
        #[source]
        source: ConnectionError,
    },

    /// The caller handed an entity of the wrong runtime type to a codec.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A lower-level failure while converting one field of an entity.
    #[error("error mapping {entity}{}: {source}", field_suffix(.field))]
    Conversion {
        entity: String,
        field: Option<String>,
        #[source]
        source: ConversionError,
    },

    /// Persisted store could not be opened.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn field_suffix(field: &Option<String>) -> String {
    match field {
        Some(name) => format!(" (field {name})"),
        None => String::new(),
    }
}

fn context_suffix(entity: &Option<String>, field: &Option<String>) -> String {
    match entity {
        Some(entity) => format!(" while mapping {entity}{}", field_suffix(field)),
        None => String::new(),
    }
}

/// `outer.inner`, keeping whichever side is present.
fn join_path(outer: Option<&str>, inner: Option<String>) -> Option<String> {
    match (outer, inner) {
        (Some(outer), Some(inner)) => Some(format!("{outer}.{inner}")),
        (Some(outer), None) => Some(outer.to_string()),
        (None, inner) => inner,
    }
}

impl MappingError {
    pub(crate) fn resolution(type_name: impl Into<String>, source: ConnectionError) -> Self {
        Self::DescriptorResolution {
            type_name: type_name.into(),
            entity: None,
            field: None,
            source,
        }
    }

    /// Re-attribute a conversion or descriptor failure to an enclosing
    /// entity, prefixing `field` to the field path. Other kinds pass
    /// through unchanged.
    pub(crate) fn within(self, entity: &str, field: Option<&str>) -> Self {
        match self {
            Self::DescriptorResolution {
                type_name,
                field: inner,
                source,
                ..
            } => Self::DescriptorResolution {
                type_name,
                entity: Some(entity.to_string()),
                field: join_path(field, inner),
                source,
            },
            Self::Conversion {
                field: inner,
                source,
                ..
            } => Self::Conversion {
                entity: entity.to_string(),
                field: join_path(field, inner),
                source,
            },
            other => other,
        }
    }

    pub(crate) fn conversion(
        entity: impl Into<String>,
        field: Option<&str>,
        source: impl Into<ConversionError>,
    ) -> Self {
        Self::Conversion {
            entity: entity.into(),
            field: field.map(str::to_string),
            source: source.into(),
        }
    }
}

/// Underlying cause of a [`MappingError::Conversion`].
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Native value construction rejected the values.
    #[error(transparent)]
    Native(#[from] NativeError),

    /// The entity property accessor rejected a value.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// Value shape does not fit the native column.
    #[error("{0}")]
    Shape(String),

    /// The mapping and the native descriptor disagree on a column position.
    #[error(
        "native type {type_name} has {found} at position {position}, mapping expects {expected}"
    )]
    ColumnMismatch {
        type_name: String,
        position: usize,
        expected: String,
        found: String,
    },
}

/// Errors raised by entity property accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The entity has no writable property with that name.
    #[error("unknown property {0}")]
    UnknownProperty(String),

    /// The value kind cannot be assigned to the property.
    #[error("property {property} expects {expected}, got {found}")]
    Incompatible {
        property: String,
        expected: &'static str,
        found: String,
    },

    /// A nested entity downcast failed.
    #[error("expected entity {expected}, got {found}")]
    WrongEntity { expected: String, found: String },
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Scope names must be dotted identifiers.
    #[error("invalid scope name '{0}'")]
    InvalidScopeName(String),

    /// File prefixes must be word characters and dashes.
    #[error("invalid file prefix '{0}'")]
    InvalidPrefix(String),

    /// An entity declares an empty native type name.
    #[error("entity {0} declares no native type name")]
    MissingNativeName(String),

    /// Configuration file could not be parsed.
    #[error("cannot parse configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },
}
