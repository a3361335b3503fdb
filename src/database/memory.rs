use std::collections::HashMap;
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::PersistenceError;

/// Process-local medium for previews and tests. Nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> String {
    "memory store lock poisoned".to_string()
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let entries = self.entries.lock().map_err(|_| PersistenceError::Read {
            key: key.to_string(),
            message: poisoned(),
        })?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut entries = self.entries.lock().map_err(|_| PersistenceError::Write {
            key: key.to_string(),
            message: poisoned(),
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let mut entries = self.entries.lock().map_err(|_| PersistenceError::Remove {
            key: key.to_string(),
            message: poisoned(),
        })?;
        entries.remove(key);
        Ok(())
    }
}
