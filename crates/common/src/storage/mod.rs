//! Persistence of the entry store
//!
//! The whole collection is written as one JSON document on every mutation.
//! Writes go to a sibling temp file first and are renamed into place so an
//! interrupted save never leaves a truncated data file behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::StorageConfig;
use crate::errors::{AppError, Result};
use crate::models::Entry;
use crate::store::EntryStore;

/// On-disk document shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageEnvelope {
    pub entries: Vec<Entry>,

    #[serde(default = "Utc::now")]
    pub last_saved: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_question: Option<String>,
}

impl StorageEnvelope {
    pub fn from_store(store: &EntryStore) -> Self {
        Self {
            entries: store.entries().to_vec(),
            last_saved: Utc::now(),
            research_question: store.research_question().map(str::to_string),
        }
    }

    pub fn into_store(self) -> Result<EntryStore> {
        Ok(EntryStore::from_entries(self.entries)?.with_research_question(self.research_question))
    }
}

/// Where the entry store lives between runs
pub trait StoreBackend {
    /// Load the stored collection; None when nothing has been saved yet
    fn load(&self) -> Result<Option<EntryStore>>;

    /// Persist the full collection, replacing what was stored
    fn save(&self, store: &EntryStore) -> Result<()>;

    /// Human-readable location for log output
    fn describe(&self) -> String;
}

/// JSON file backend
pub struct JsonFileStorage {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            path: config.data_file.clone(),
            pretty: config.pretty,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, message: impl ToString) -> AppError {
        AppError::Storage {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "littrack".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StoreBackend for JsonFileStorage {
    fn load(&self) -> Result<Option<EntryStore>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No data file yet");
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.storage_error(e))?;
        let envelope: StorageEnvelope = serde_json::from_str(&content)
            .map_err(|e| self.storage_error(format!("unreadable data file: {}", e)))?;

        let store = envelope.into_store()?;
        tracing::debug!(path = %self.path.display(), entries = store.len(), "Loaded entries");
        Ok(Some(store))
    }

    fn save(&self, store: &EntryStore) -> Result<()> {
        let envelope = StorageEnvelope::from_store(store);
        let body = if self.pretty {
            serde_json::to_string_pretty(&envelope)?
        } else {
            serde_json::to_string(&envelope)?
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
        }

        let temp = self.temp_path();
        fs::write(&temp, body).map_err(|e| self.storage_error(e))?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(self.storage_error(e));
        }

        tracing::info!(path = %self.path.display(), entries = store.len(), "Data saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory backend holding the last saved envelope as JSON
#[derive(Default)]
pub struct InMemoryStorage {
    saved: Mutex<Option<String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreBackend for InMemoryStorage {
    fn load(&self) -> Result<Option<EntryStore>> {
        let saved = self.saved.lock().map_err(|_| AppError::Internal {
            message: "in-memory storage lock poisoned".to_string(),
        })?;

        match saved.as_deref() {
            Some(body) => {
                let envelope: StorageEnvelope = serde_json::from_str(body)?;
                Ok(Some(envelope.into_store()?))
            }
            None => Ok(None),
        }
    }

    fn save(&self, store: &EntryStore) -> Result<()> {
        let body = serde_json::to_string(&StorageEnvelope::from_store(store))?;
        let mut saved = self.saved.lock().map_err(|_| AppError::Internal {
            message: "in-memory storage lock poisoned".to_string(),
        })?;
        *saved = Some(body);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
