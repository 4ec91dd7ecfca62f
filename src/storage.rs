//! Durable game state storage
//!
//! The whole `{balance, history}` record is read and written as one JSON document.
//! `load` creates and persists the default state when nothing exists yet.

use crate::{
    errors::{StorageError, StorageResult},
    games::PersistedState,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Backing store for the single persisted game state
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Read the current state, creating the default one if none exists
    async fn load(&self) -> StorageResult<PersistedState>;

    /// Replace the stored state wholesale
    async fn save(&self, state: &PersistedState) -> StorageResult<()>;
}

/// JSON file store compatible with the `data.json` layout
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Unique per write, so concurrent writers never share a temp file
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PersistenceStore for JsonFileStore {
    async fn load(&self) -> StorageResult<PersistedState> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No state at {}, creating default", self.path.display());
                let state = PersistedState::default();
                self.save(&state).await?;
                return Ok(state);
            }
            Err(source) => {
                return Err(StorageError::ReadFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StorageError::CorruptedData {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, state: &PersistedState) -> StorageResult<()> {
        let bytes = serde_json::to_vec(state)?;
        let temp_path = self.temp_path();

        tokio::fs::write(&temp_path, bytes)
            .await
            .map_err(|source| StorageError::WriteFailed {
                path: temp_path.clone(),
                source,
            })?;

        // Atomic rename
        if let Err(source) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::WriteFailed {
                path: self.path.clone(),
                source,
            });
        }

        tracing::debug!(
            balance = state.balance,
            records = state.history.len(),
            "Saved state to {}",
            self.path.display()
        );
        Ok(())
    }
}

/// In-process store, used by tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<PersistedState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing state instead of the default
    pub fn with_state(state: PersistedState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }
}

#[async_trait]
impl PersistenceStore for MemoryStore {
    async fn load(&self) -> StorageResult<PersistedState> {
        let mut guard = self.state.lock().await;
        Ok(guard.get_or_insert_with(PersistedState::default).clone())
    }

    async fn save(&self, state: &PersistedState) -> StorageResult<()> {
        *self.state.lock().await = Some(state.clone());
        Ok(())
    }
}
