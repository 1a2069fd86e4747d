//! services/api/src/adapters/json_store.rs
//!
//! This module contains the file-backed storage adapter, the concrete
//! implementation of the `RecordStore` port from the `core` crate. Each
//! instance owns exactly one JSON file holding one entity's full collection
//! as a pretty-printed array.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use agendas_core::ports::{PortError, PortResult, RecordStore};

/// A whole-file JSON store for one entity collection.
///
/// There is no locking: concurrent writers race and the last write wins,
/// which is the accepted single-process model of this service. A failed
/// write leaves the previous file contents intact.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory and seeds the file with an empty array
    /// if it does not exist yet. Called once at startup for each store.
    pub async fn init(&self) -> PortResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PortError::Storage(e.to_string()))?;
        }
        if tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| PortError::Storage(e.to_string()))?
        {
            return Ok(());
        }
        tokio::fs::write(&self.path, "[]")
            .await
            .map_err(|e| PortError::Storage(e.to_string()))
    }
}

#[async_trait]
impl<T> RecordStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load_all(&self) -> Vec<T> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                // A store that cannot be read behaves as an empty collection.
                if e.kind() != std::io::ErrorKind::NotFound {
                    error!("Failed to read {}: {}", self.path.display(), e);
                }
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                error!("Failed to parse {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    async fn persist_all(&self, records: &[T]) -> PortResult<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| PortError::Storage(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| PortError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agendas_core::domain::Message;
    use tempfile::tempdir;

    fn message(id: &str, lu: bool) -> Message {
        Message {
            id: id.into(),
            nom: "Claire Dubois".into(),
            email: "claire@example.com".into(),
            sujet: "Créneau".into(),
            message: "Bonjour".into(),
            date_envoi: "2025-06-02T10:00:00.000Z".into(),
            lu,
        }
    }

    #[tokio::test]
    async fn init_creates_directory_and_seeds_empty_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("messages.json");
        let store: JsonFileStore<Message> = JsonFileStore::new(&path);

        store.init().await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        let records = store.load_all().await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn init_leaves_existing_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("messages.json");
        let store: JsonFileStore<Message> = JsonFileStore::new(&path);

        store.persist_all(&[message("1", false)]).await.unwrap();
        store.init().await.unwrap();

        assert_eq!(store.load_all().await.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty_collection() {
        let dir = tempdir().unwrap();
        let store: JsonFileStore<Message> = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.load_all().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_as_empty_collection() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("messages.json");
        std::fs::write(&path, "not json at all {").unwrap();

        let store: JsonFileStore<Message> = JsonFileStore::new(&path);
        assert!(store.load_all().await.is_empty());
    }

    #[tokio::test]
    async fn persist_writes_pretty_printed_wire_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("messages.json");
        let store: JsonFileStore<Message> = JsonFileStore::new(&path);

        store.persist_all(&[message("42", true)]).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        // Indented output with the historical camelCase keys.
        assert!(raw.contains("\n  {"));
        assert!(raw.contains("\"dateEnvoi\""));
        assert!(raw.contains("\"lu\": true"));

        let reloaded = store.load_all().await;
        assert_eq!(reloaded, vec![message("42", true)]);
    }
}
