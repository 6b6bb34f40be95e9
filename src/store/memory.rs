//! In-process key-value store
//!
//! Synchronous map behind a mutex. Used as the fallback when no durable
//! backend opens, and handy in tests.

use crate::store::backend::{BackendKind, KvBackend};
use crate::store::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a value, e.g. to simulate an existing blob
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.into(), value.into());
        }
        self
    }

    pub fn get_sync(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::read(key, e))?;
        Ok(entries.get(key).cloned())
    }

    pub fn set_sync(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::write(key, e))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.get_sync(key)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.set_sync(key, value)
    }
}
