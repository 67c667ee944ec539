// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! File-backed descriptor store.
//!
//! One JSON file per native type name:
//!   `{folder}/{prefix}-{TYPE}.json`

use std::fs;
use std::path::PathBuf;

use log::{info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::native::{ArrayDescriptor, StructDescriptor};

/// Persisted descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "descriptor")]
pub enum StoredDescriptor {
    Struct(StructDescriptor),
    Array(ArrayDescriptor),
}

/// Descriptor files in one folder.
#[derive(Debug)]
pub struct DescriptorStore {
    config: StoreConfig,
    /// Serializes writes from concurrent first resolutions.
    write_lock: Mutex<()>,
}

impl DescriptorStore {
    /// Open the store, creating its folder when needed.
    pub fn open(config: StoreConfig) -> Result<Self> {
        config.prepare()?;
        Ok(Self {
            config,
            write_lock: Mutex::new(()),
        })
    }

    /// File holding `type_name`.
    pub fn path_for(&self, type_name: &str) -> PathBuf {
        self.config
            .path(&format!("{}.json", type_name.to_uppercase()))
    }

    /// Read a descriptor. Missing, unreadable or corrupt files are a miss.
    pub fn load(&self, type_name: &str) -> Option<StoredDescriptor> {
        let path = self.path_for(type_name);
        if !path.exists() {
            return None;
        }
        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| serde_json::from_str(&json).map_err(|e| e.to_string()));
        match parsed {
            Ok(stored) => {
                info!("Descriptor {} read from {}", type_name, path.display());
                Some(stored)
            }
            Err(e) => {
                warn!("Ignoring descriptor file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Write a descriptor. Failures are logged, not returned.
    pub fn save(&self, type_name: &str, descriptor: &StoredDescriptor) {
        let path = self.path_for(type_name);
        let json = match serde_json::to_string_pretty(descriptor) {
            Ok(json) => json,
            Err(e) => {
                warn!("Cannot serialize descriptor {}: {}", type_name, e);
                return;
            }
        };

        let _guard = self.write_lock.lock();
        if let Err(e) = fs::write(&path, json) {
            warn!("Cannot write descriptor file {}: {}", path.display(), e);
        }
    }
}
