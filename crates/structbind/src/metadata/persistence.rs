// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::entity::{EntityType, Scope};
use crate::error::Result;
use crate::metadata::{CollectMetadata, StructMetadata};
use crate::native::Connection;

// ---------------------------------------------------------------------------
// MetadataStore
// ---------------------------------------------------------------------------

/// Persisted content of one discovered scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeMetadata {
    pub scope: String,
    pub structs: Vec<StructMetadata>,
}

/// JSON store of discovered struct metadata, one file per scope:
///   `{folder}/{prefix}-metadata-{scope with '.' as '-'}.json`
///
/// After construction no failure is fatal: unreadable files are a miss and
/// unwritable files are only logged.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    config: StoreConfig,
}

impl MetadataStore {
    /// Open the store, creating its folder when needed.
    pub fn open(config: StoreConfig) -> Result<Self> {
        config.prepare()?;
        Ok(Self { config })
    }

    /// File holding `scope`.
    pub fn path_for(&self, scope: &str) -> PathBuf {
        self.config
            .path(&format!("metadata-{}.json", scope.replace('.', "-")))
    }

    /// Read a scope back. Missing or corrupt files return `None`.
    pub fn load(&self, scope: &str) -> Option<ScopeMetadata> {
        let path = self.path_for(scope);
        if !path.exists() {
            return None;
        }
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                warn!("Cannot read metadata file {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str::<ScopeMetadata>(&json) {
            Ok(stored) if stored.scope == scope => Some(stored),
            Ok(stored) => {
                warn!(
                    "Metadata file {} belongs to scope {}, ignoring",
                    path.display(),
                    stored.scope
                );
                None
            }
            Err(e) => {
                warn!("Corrupt metadata file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Write a scope. Failures are logged, not returned.
    pub fn save(&self, metadata: &ScopeMetadata) {
        let path = self.path_for(&metadata.scope);
        let json = match serde_json::to_string_pretty(metadata) {
            Ok(json) => json,
            Err(e) => {
                warn!("Cannot serialize metadata of {}: {}", metadata.scope, e);
                return;
            }
        };
        match fs::write(&path, json) {
            Ok(()) => info!("Metadata of scope {} written to {}", metadata.scope, path.display()),
            Err(e) => warn!("Cannot write metadata file {}: {}", path.display(), e),
        }
    }
}

// ---------------------------------------------------------------------------
// CachedMetadataCollector
// ---------------------------------------------------------------------------

/// Collector that serves scopes from a [`MetadataStore`] and falls back to
/// an inner collector when the stored file is missing, corrupt, or no
/// longer matches the scope's declared entities.
#[derive(Debug)]
pub struct CachedMetadataCollector<C> {
    inner: C,
    store: MetadataStore,
}

impl<C: CollectMetadata> CachedMetadataCollector<C> {
    pub fn new(inner: C, store: MetadataStore) -> Self {
        Self { inner, store }
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }
}

fn declared_keys(scope: &Scope) -> BTreeSet<(EntityType, String)> {
    scope
        .entities()
        .iter()
        .map(|d| (d.entity_type().clone(), d.schema().native_name.to_uppercase()))
        .collect()
}

fn stored_keys(structs: &[StructMetadata]) -> BTreeSet<(EntityType, String)> {
    structs
        .iter()
        .map(|m| (m.entity.clone(), m.native_name.to_uppercase()))
        .collect()
}

impl<C: CollectMetadata> CollectMetadata for CachedMetadataCollector<C> {
    fn collect_scope(&self, scope: &Scope, conn: &dyn Connection) -> Result<Vec<StructMetadata>> {
        if let Some(stored) = self.store.load(scope.name()) {
            if stored_keys(&stored.structs) == declared_keys(scope)
                && stored.structs.len() == scope.entities().len()
            {
                info!("Scope {} loaded from metadata file", scope.name());
                return Ok(stored.structs);
            }
            warn!(
                "Metadata file for scope {} is stale, rediscovering",
                scope.name()
            );
        }

        let structs = self.inner.collect_scope(scope, conn)?;
        self.store.save(&ScopeMetadata {
            scope: scope.name().to_string(),
            structs: structs.clone(),
        });
        Ok(structs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
