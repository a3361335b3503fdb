use anyhow::Result;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::error::PersistenceError;
use crate::models::StorageSettings;

pub mod memory;
pub mod queries;
pub mod schema;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Persisted keys. Each store owns exactly one.
pub mod keys {
    pub const THEME: &str = "app_theme";
    pub const PROFILE: &str = "user_profile";
    pub const CHAT_MESSAGES: &str = "chat_demo_messages";
    pub const ACTIVITY_PLANS: &str = "activity_plans";
}

pub fn init_database(db_path: &Path, settings: &StorageSettings) -> Result<Connection> {
    let conn = Connection::open(db_path)?;

    if settings.wal_mode {
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        log::debug!("SQLite journal mode: {}", mode);
    }
    conn.pragma_update(None, "synchronous", &"NORMAL")?;

    schema::create_tables(&conn)?;

    Ok(conn)
}

pub fn init_in_memory_database() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    schema::create_tables(&conn)?;
    Ok(conn)
}

/// Uniform key-value medium: text in, text out.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// Cloneable async handle over a `KeyValueStore`. Backend calls run on the
/// blocking pool so callers may await them from any task.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new<S: KeyValueStore + 'static>(backend: S) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let backend = Arc::clone(&self.backend);
        let key = key.to_string();
        tokio::task::spawn_blocking(move || backend.get(&key))
            .await
            .map_err(|e| PersistenceError::Task(e.to_string()))?
    }

    pub async fn set(&self, key: &str, value: impl Into<String>) -> Result<(), PersistenceError> {
        let backend = Arc::clone(&self.backend);
        let key = key.to_string();
        let value = value.into();
        tokio::task::spawn_blocking(move || backend.set(&key, &value))
            .await
            .map_err(|e| PersistenceError::Task(e.to_string()))?
    }

    pub async fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let backend = Arc::clone(&self.backend);
        let key = key.to_string();
        tokio::task::spawn_blocking(move || backend.remove(&key))
            .await
            .map_err(|e| PersistenceError::Task(e.to_string()))?
    }

    /// Strict read: malformed content is reported as `PersistenceError::Deserialize`.
    pub async fn read_json<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, PersistenceError> {
        match self.get(key).await? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| PersistenceError::Deserialize {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    /// Lenient read used by every store: a failed or malformed read is the
    /// same as nothing stored.
    pub async fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.read_json(key).await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Treating `{}` as missing: {}", key, e);
                None
            }
        }
    }

    pub async fn write_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string(value).map_err(|source| PersistenceError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.set(key, raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn json_helpers_round_trip() {
        let storage = Storage::in_memory();
        storage
            .write_json(keys::ACTIVITY_PLANS, &vec!["a", "b"])
            .await
            .unwrap();
        let loaded: Option<Vec<String>> = storage.load_json(keys::ACTIVITY_PLANS).await;
        assert_eq!(loaded, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[tokio::test]
    async fn malformed_json_is_an_error_for_strict_reads_only() {
        let storage = Storage::in_memory();
        storage.set(keys::PROFILE, "{not json").await.unwrap();

        let strict = storage.read_json::<serde_json::Value>(keys::PROFILE).await;
        assert!(matches!(strict, Err(PersistenceError::Deserialize { .. })));

        let lenient: Option<serde_json::Value> = storage.load_json(keys::PROFILE).await;
        assert!(lenient.is_none());
    }

    #[tokio::test]
    async fn remove_of_absent_key_is_ok() {
        let storage = Storage::in_memory();
        storage.remove(keys::PROFILE).await.unwrap();
        assert_eq!(storage.get(keys::PROFILE).await.unwrap(), None);
    }

    #[test]
    fn file_database_creates_kv_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("init.db");
        let conn = init_database(&path, &StorageSettings::default()).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_store'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
        assert!(path.exists());
    }
}
