//! Tracked-token persistence
//!
//! The whole collection lives under one key as a versioned JSON envelope:
//!
//! ```text
//! {"version": 1, "tokens": [ {...}, {...} ]}
//! ```
//!
//! A bare JSON array (the unversioned layout) still loads as version 0.

use crate::store::backend::{BackendKind, KvBackend};
use crate::store::error::{StoreError, StoreResult};
use crate::tracker::types::{assign_unique_ids, TrackedToken};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Key the collection is stored under
pub const TOKENS_KEY: &str = "solana-tokens";

/// Envelope version written by this build
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    tokens: &'a [TrackedToken],
}

#[derive(Deserialize)]
struct OwnedEnvelope {
    version: u32,
    tokens: Vec<TrackedToken>,
}

/// Load/save of the tracked-token collection over any [`KvBackend`]
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn KvBackend>,
    key: String,
}

impl TokenStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            backend,
            key: TOKENS_KEY.to_string(),
        }
    }

    /// Use a different storage key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Read the collection, reporting why it could not be read
    ///
    /// A key that was never written is an empty collection, not an error.
    pub async fn try_load(&self) -> StoreResult<Vec<TrackedToken>> {
        let Some(raw) = self.backend.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        let tokens = decode(&self.key, &raw)?;
        tracing::debug!("Loaded {} tokens from {}", tokens.len(), self.key);
        Ok(tokens)
    }

    /// Read the collection, treating any failure as "no data"
    pub async fn load(&self) -> Vec<TrackedToken> {
        match self.try_load().await {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!("Ignoring unreadable token store: {}", e);
                Vec::new()
            }
        }
    }

    /// Overwrite the stored collection with `tokens`
    pub async fn save(&self, tokens: &[TrackedToken]) -> StoreResult<()> {
        let envelope = Envelope {
            version: SCHEMA_VERSION,
            tokens,
        };
        let content =
            serde_json::to_string(&envelope).map_err(|e| StoreError::write(&self.key, e))?;

        self.backend.set(&self.key, &content).await?;
        tracing::debug!("Saved {} tokens to {}", tokens.len(), self.key);
        Ok(())
    }
}

fn decode(key: &str, raw: &str) -> StoreResult<Vec<TrackedToken>> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| StoreError::read(key, e))?;

    let mut tokens: Vec<TrackedToken> = if value.is_array() {
        serde_json::from_value(value).map_err(|e| StoreError::read(key, e))?
    } else {
        let envelope: OwnedEnvelope =
            serde_json::from_value(value).map_err(|e| StoreError::read(key, e))?;
        if envelope.version > SCHEMA_VERSION {
            return Err(StoreError::read(
                key,
                format!(
                    "schema version {} is newer than supported version {}",
                    envelope.version, SCHEMA_VERSION
                ),
            ));
        }
        envelope.tokens
    };

    let rekeyed = assign_unique_ids(&mut tokens);
    if rekeyed > 0 {
        tracing::warn!("Re-keyed {} tokens with duplicate ids in {}", rekeyed, key);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::file::FileBackend;
    use crate::store::memory::MemoryBackend;
    use crate::tracker::types::{test_token, TokenId};
    use async_trait::async_trait;
    use tempfile::tempdir;

    struct BrokenBackend;

    #[async_trait]
    impl KvBackend for BrokenBackend {
        fn kind(&self) -> BackendKind {
            BackendKind::Memory
        }

        async fn get(&self, key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::read(key, "backend offline"))
        }

        async fn set(&self, key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::write(key, "backend offline"))
        }
    }

    fn memory_store(seed: Option<&str>) -> TokenStore {
        let backend = match seed {
            Some(raw) => MemoryBackend::new().with_entry(TOKENS_KEY, raw),
            None => MemoryBackend::new(),
        };
        TokenStore::new(Arc::new(backend))
    }

    #[tokio::test]
    async fn test_round_trip() {
        let store = memory_store(None);
        let tokens = vec![
            test_token(1, "Solana", "So1111"),
            test_token(2, "BONK", "Addr123"),
        ];

        store.save(&tokens).await.unwrap();
        assert_eq!(store.try_load().await.unwrap(), tokens);
    }

    #[tokio::test]
    async fn test_round_trip_empty() {
        let store = memory_store(None);
        store.save(&[]).await.unwrap();
        assert!(store.try_load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_file_backend() {
        let dir = tempdir().unwrap();
        let tokens = vec![test_token(1_700_000_000_000, "BONK", "Addr123")];

        let store = TokenStore::new(Arc::new(FileBackend::open(dir.path()).await.unwrap()));
        store.save(&tokens).await.unwrap();

        // Fresh backend over the same directory
        let reopened = TokenStore::new(Arc::new(FileBackend::open(dir.path()).await.unwrap()));
        assert_eq!(reopened.load().await, tokens);
        assert!(dir.path().join("solana-tokens.json").exists());
    }

    #[tokio::test]
    async fn test_save_writes_versioned_envelope() {
        let backend = Arc::new(MemoryBackend::new());
        let store = TokenStore::new(backend.clone());
        store.save(&[test_token(1, "A", "a")]).await.unwrap();

        let raw = backend.get_sync(TOKENS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], SCHEMA_VERSION);
        assert_eq!(value["tokens"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_key_is_empty() {
        let store = memory_store(None);
        assert!(store.try_load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupted_value_loads_empty() {
        let store = memory_store(Some("{not json"));

        assert!(matches!(
            store.try_load().await,
            Err(StoreError::ReadFailure { .. })
        ));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_legacy_array_loads() {
        let legacy = serde_json::to_string(&vec![test_token(3, "RustToken", "R")]).unwrap();
        let store = memory_store(Some(&legacy));

        let tokens = store.try_load().await.unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].name, "RustToken");
    }

    #[tokio::test]
    async fn test_duplicate_ids_rekeyed_on_load() {
        let legacy = serde_json::to_string(&vec![
            test_token(1000, "Solana", "So1111"),
            test_token(1000, "RustToken", "Rust2"),
        ])
        .unwrap();
        let store = memory_store(Some(&legacy));

        let tokens = store.try_load().await.unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].id, TokenId(1000));
        assert_eq!(tokens[1].id, TokenId(1001));
        assert_eq!(tokens[1].name, "RustToken");
    }

    #[tokio::test]
    async fn test_newer_schema_rejected() {
        let store = memory_store(Some(r#"{"version": 99, "tokens": []}"#));

        let err = store.try_load().await.unwrap_err();
        assert!(err.to_string().contains("schema version 99"));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_backend_failures() {
        let store = TokenStore::new(Arc::new(BrokenBackend));

        assert!(store.load().await.is_empty());
        assert!(matches!(
            store.save(&[]).await,
            Err(StoreError::WriteFailure { .. })
        ));
    }

    #[tokio::test]
    async fn test_custom_key() {
        let backend = Arc::new(MemoryBackend::new());
        let store = TokenStore::new(backend.clone()).with_key("watchlist");
        store.save(&[test_token(1, "A", "a")]).await.unwrap();

        assert_eq!(store.key(), "watchlist");
        assert!(backend.get_sync(TOKENS_KEY).unwrap().is_none());
        assert!(backend.get_sync("watchlist").unwrap().is_some());
    }
}
