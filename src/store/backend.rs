//! Key-value backends
//!
//! The tracker persists through a tiny async key-value interface so the
//! rest of the crate never cares where the bytes go. Two implementations
//! exist and are picked once at startup by [`select_backend`].

use crate::store::error::{StoreError, StoreResult};
use crate::store::file::FileBackend;
use crate::store::memory::MemoryBackend;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Which backend implementation to use
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// JSON files in a data directory (async)
    File,
    /// Process-local map (sync, not durable)
    Memory,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::File => write!(f, "file"),
            BackendKind::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(BackendKind::File),
            "memory" => Ok(BackendKind::Memory),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}

/// Uniform async access to a string key-value store
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Which implementation this is
    fn kind(&self) -> BackendKind;

    /// Read the value stored under `key`, `None` if nothing was ever written
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrite the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Open the first usable backend from `preference`
///
/// Backends that fail to open are skipped with a warning. An empty list,
/// or a list where nothing opens, yields [`StoreError::Unavailable`].
pub async fn select_backend(
    preference: &[BackendKind],
    data_dir: impl Into<PathBuf>,
) -> StoreResult<Arc<dyn KvBackend>> {
    let data_dir = data_dir.into();

    for kind in preference {
        match kind {
            BackendKind::File => match FileBackend::open(&data_dir).await {
                Ok(backend) => {
                    tracing::info!("Using file backend at {:?}", data_dir);
                    return Ok(Arc::new(backend));
                }
                Err(e) => {
                    tracing::warn!("File backend unavailable: {}", e);
                }
            },
            BackendKind::Memory => {
                tracing::info!("Using in-memory backend (data will not survive restarts)");
                return Ok(Arc::new(MemoryBackend::new()));
            }
        }
    }

    Err(StoreError::Unavailable(format!(
        "none of the configured backends could be opened ({})",
        preference
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )))
}
