//! File-backed key-value store
//!
//! One JSON document per key under a data directory. Values are written to a
//! sibling temp file and renamed into place, so readers only ever see a
//! complete previous or complete new value.

use crate::store::backend::{BackendKind, KvBackend};
use crate::store::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Async backend storing each key as `<data_dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    /// Open (creating if needed) the data directory
    pub async fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| StoreError::Unavailable(format!("{:?}: {}", data_dir, e)))?;

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.data_dir.join(format!("{}.json", file_name))
    }
}

#[async_trait]
impl KvBackend for FileBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::File
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                tracing::debug!("Read {} bytes from {:?}", content.len(), path);
                Ok(Some(content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::read(key, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        tokio::fs::write(&tmp_path, value)
            .await
            .map_err(|e| StoreError::write(key, e))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| StoreError::write(key, e))?;

        tracing::debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).await.unwrap();
        assert_eq!(backend.get("solana-tokens").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).await.unwrap();

        backend.set("solana-tokens", "[1]").await.unwrap();
        backend.set("solana-tokens", "[2]").await.unwrap();

        assert_eq!(
            backend.get("solana-tokens").await.unwrap().as_deref(),
            Some("[2]")
        );
        assert!(!backend.path_for("solana-tokens").with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_open_creates_nested_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let backend = FileBackend::open(&nested).await.unwrap();
        assert!(nested.is_dir());
        assert_eq!(backend.data_dir(), nested.as_path());
    }

    #[test]
    fn test_path_sanitizes_key() {
        let backend = FileBackend {
            data_dir: PathBuf::from("/data"),
        };
        assert_eq!(
            backend.path_for("../etc/passwd"),
            PathBuf::from("/data/___etc_passwd.json")
        );
        assert_eq!(
            backend.path_for("solana-tokens"),
            PathBuf::from("/data/solana-tokens.json")
        );
    }

    #[tokio::test]
    async fn test_write_into_removed_dir_fails() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let backend = FileBackend::open(&data_dir).await.unwrap();
        std::fs::remove_dir_all(&data_dir).unwrap();

        let err = backend.set("solana-tokens", "[]").await.unwrap_err();
        assert!(matches!(err, StoreError::WriteFailure { .. }));
    }
}
