//! Key-value storage for user preferences

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::StorageError;

/// Abstract storage interface for string preferences
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Load the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be written
    async fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory preference storage (non-persistent)
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-based preference storage
///
/// Values live in a flat JSON object. The whole file is rewritten on every
/// `set`; reads are served from the cache loaded at open.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    cache: HashMap<String, String>,
}

impl FilePreferenceStore {
    /// Open file storage at the given path
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or the file is unreadable
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let cache = Self::load_all(&path).await?;

        Ok(Self { path, cache })
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_all(path: &Path) -> Result<HashMap<String, String>, StorageError> {
        if !tokio::fs::try_exists(path).await? {
            return Ok(HashMap::new());
        }

        let bytes = tokio::fs::read(path).await?;
        if bytes.is_empty() {
            return Ok(HashMap::new());
        }

        let cache = tokio::task::spawn_blocking(move || serde_json::from_slice(&bytes))
            .await
            .map_err(|e| StorageError::Serialization(format!("Deserialization task failed: {e}")))?
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        Ok(cache)
    }

    async fn save_all(&self) -> Result<(), StorageError> {
        let path = self.path.clone();
        let cache = self.cache.clone();

        let bytes = tokio::task::spawn_blocking(move || serde_json::to_vec_pretty(&cache))
            .await
            .map_err(|e| StorageError::Serialization(format!("Serialization task failed: {e}")))?
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        tokio::fs::write(path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.cache.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.cache.insert(key.to_string(), value.to_string());
        self.save_all().await
    }
}
