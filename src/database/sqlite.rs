use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::{init_database, init_in_memory_database, queries, KeyValueStore};
use crate::error::PersistenceError;
use crate::models::StorageSettings;

/// SQLite-backed key-value medium. A single connection is shared behind a mutex.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(db_path: &Path, settings: &StorageSettings) -> Result<Self> {
        let conn = init_database(db_path, settings)?;
        log::info!("Opened database at {}", db_path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Mutex::new(init_in_memory_database()?),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, String> {
        self.conn
            .lock()
            .map_err(|_| "database connection lock poisoned".to_string())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let read = |message: String| PersistenceError::Read {
            key: key.to_string(),
            message,
        };
        let conn = self.lock().map_err(read)?;
        queries::get_value(&conn, key).map_err(|e| read(e.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let write = |message: String| PersistenceError::Write {
            key: key.to_string(),
            message,
        };
        let conn = self.lock().map_err(write)?;
        queries::set_value(&conn, key, value).map_err(|e| write(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let remove = |message: String| PersistenceError::Remove {
            key: key.to_string(),
            message,
        };
        let conn = self.lock().map_err(remove)?;
        queries::remove_value(&conn, key)
            .map(|_| ())
            .map_err(|e| remove(e.to_string()))
    }
}
