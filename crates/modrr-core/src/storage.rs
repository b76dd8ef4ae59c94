//! Storage layer for the regulations text
//!
//! A flat key/value document holding at most one active regulations value
//! under [`DEFAULT_REGULATIONS_KEY`]. The file backend persists the whole
//! document as pretty-printed JSON; the memory backend keeps it in process.

use crate::config::{CoreSettings, RegulationsBackend, DEFAULT_REGULATIONS_KEY};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error during JSON serialization or deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Standard I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The document on disk is valid JSON but not an object
    #[error("Regulations file {0} does not contain a JSON object")]
    NotAnObject(PathBuf),
}

/// Interface for regulations storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegulationsStore: Send + Sync {
    /// Get the active regulations text, if any
    async fn get_regulations(&self) -> Result<Option<String>, StorageError>;
    /// Replace the active regulations text wholesale
    async fn save_regulations(&self, text: String) -> Result<(), StorageError>;
}

/// Regulations persisted as a JSON document on local disk
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open the store, loading the document if it exists.
    ///
    /// A missing or empty file yields an empty document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let data = load_document(&path).await?;
        info!(
            "Regulations file {} loaded ({} keys).",
            path.display(),
            data.len()
        );
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Path of the backing document
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn load_document(path: &Path) -> Result<Map<String, Value>, StorageError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                "Regulations file {} not found, starting empty.",
                path.display()
            );
            return Ok(Map::new());
        }
        Err(e) => return Err(e.into()),
    };

    if raw.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(&raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(StorageError::NotAnObject(path.to_path_buf())),
    }
}

#[async_trait]
impl RegulationsStore for JsonFileStore {
    async fn get_regulations(&self) -> Result<Option<String>, StorageError> {
        let data = self.data.read().await;
        Ok(data
            .get(DEFAULT_REGULATIONS_KEY)
            .and_then(Value::as_str)
            .map(ToString::to_string))
    }

    async fn save_regulations(&self, text: String) -> Result<(), StorageError> {
        // Held across the write so concurrent uploads hit the disk in order
        let mut data = self.data.write().await;
        let mut next = data.clone();
        next.insert(DEFAULT_REGULATIONS_KEY.to_string(), Value::String(text));

        // serde_json keeps non-ASCII text as-is
        let serialized = serde_json::to_string_pretty(&next)?;
        tokio::fs::write(&self.path, serialized).await?;
        *data = next;
        info!("Regulations saved to {}.", self.path.display());
        Ok(())
    }
}

/// Regulations kept in process memory only
#[derive(Default)]
pub struct InMemoryStore {
    regulations: RwLock<Option<String>>,
}

impl InMemoryStore {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegulationsStore for InMemoryStore {
    async fn get_regulations(&self) -> Result<Option<String>, StorageError> {
        Ok(self.regulations.read().await.clone())
    }

    async fn save_regulations(&self, text: String) -> Result<(), StorageError> {
        *self.regulations.write().await = Some(text);
        Ok(())
    }
}

/// Open the store selected by `regulations_backend`.
///
/// # Errors
///
/// Returns an error if the file backend cannot load its document.
pub async fn open_store(
    settings: &CoreSettings,
) -> Result<Arc<dyn RegulationsStore>, StorageError> {
    match settings.regulations_backend {
        RegulationsBackend::File => {
            let store = JsonFileStore::open(settings.regulations_file.clone()).await?;
            Ok(Arc::new(store))
        }
        RegulationsBackend::Memory => {
            info!("Regulations kept in memory only; they will be lost on restart.");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}
