// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapper configuration
//!
//! Both persisted stores are optional. Without them every descriptor and
//! every scope is read from the database once per process.
//!
//! ```json
//! {
//!   "descriptor_store": { "folder": "/var/cache/app/descriptors", "prefix": "prod" },
//!   "metadata_store": { "folder": "/var/cache/app/metadata" }
//! }
//! ```

use crate::error::{ConfigError, MappingError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Location of a persisted cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Folder holding the cache files (created on open).
    pub folder: PathBuf,

    /// Optional file name prefix, `{prefix}-...`.
    #[serde(default)]
    pub prefix: Option<String>,
}

impl StoreConfig {
    /// Create a store config without prefix.
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            prefix: None,
        }
    }

    /// Set the file name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Check the prefix.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.prefix {
            Some(prefix) => validate_prefix(prefix),
            None => Ok(()),
        }
    }

    /// Compose `{prefix}-{stem}` (or just `stem` without a prefix).
    pub(crate) fn file_name(&self, stem: &str) -> String {
        match self.prefix.as_deref().map(str::trim) {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}-{stem}"),
            _ => stem.to_string(),
        }
    }

    /// Full path of a store file.
    pub(crate) fn path(&self, stem: &str) -> PathBuf {
        self.folder.join(self.file_name(stem))
    }

    /// Validate and create the folder if it does not exist.
    pub(crate) fn prepare(&self) -> Result<(), MappingError> {
        self.validate()?;
        if !self.folder.exists() {
            fs::create_dir_all(&self.folder).map_err(|source| MappingError::Io {
                path: self.folder.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

/// Mapper configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Persisted native descriptor cache (one file per type name).
    #[serde(default)]
    pub descriptor_store: Option<StoreConfig>,

    /// Persisted struct metadata cache (one file per scope).
    #[serde(default)]
    pub metadata_store: Option<StoreConfig>,
}

impl MapperConfig {
    /// Create a new config builder
    pub fn builder() -> MapperConfigBuilder {
        MapperConfigBuilder::default()
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MappingError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| MappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate store prefixes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for store in [&self.descriptor_store, &self.metadata_store]
            .into_iter()
            .flatten()
        {
            store.validate()?;
        }
        Ok(())
    }
}

/// Config builder for fluent API
#[derive(Debug, Default)]
pub struct MapperConfigBuilder {
    descriptor_store: Option<StoreConfig>,
    metadata_store: Option<StoreConfig>,
}

impl MapperConfigBuilder {
    /// Persist native descriptors under `store`.
    pub fn descriptor_store(mut self, store: StoreConfig) -> Self {
        self.descriptor_store = Some(store);
        self
    }

    /// Persist discovered struct metadata under `store`.
    pub fn metadata_store(mut self, store: StoreConfig) -> Self {
        self.metadata_store = Some(store);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<MapperConfig, ConfigError> {
        let config = MapperConfig {
            descriptor_store: self.descriptor_store,
            metadata_store: self.metadata_store,
        };
        config.validate()?;
        Ok(config)
    }
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Scope names are dotted identifiers: each segment starts with a letter
/// and continues with letters, digits or underscores.
pub fn validate_scope_name(name: &str) -> Result<(), ConfigError> {
    let valid = name.split('.').all(|segment| {
        let mut chars = segment.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic()) && chars.all(is_word)
    });
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidScopeName(name.to_string()))
    }
}

/// File prefixes are blank, or a word character followed by word
/// characters and dashes.
pub fn validate_prefix(prefix: &str) -> Result<(), ConfigError> {
    if prefix.trim().is_empty() {
        return Ok(());
    }
    let mut chars = prefix.chars();
    let valid =
        matches!(chars.next(), Some(c) if is_word(c)) && chars.all(|c| is_word(c) || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidPrefix(prefix.to_string()))
    }
}
