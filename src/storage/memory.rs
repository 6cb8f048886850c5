use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::errors::{LedgerError, Result};

use super::SnapshotStore;

/// Process-local store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `key` with a raw value, bypassing any ledger.
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.entries.write() {
            guard.insert(key.to_string(), value.to_string());
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|guard| guard.get(key).cloned())
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let guard = self
            .entries
            .read()
            .map_err(|_| LedgerError::PersistenceCorruption("memory store poisoned".into()))?;
        Ok(guard.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| LedgerError::PersistenceCorruption("memory store poisoned".into()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn preserve_unreadable(&self, key: &str) -> Result<Option<String>> {
        let Some(value) = self.read(key)? else {
            return Ok(None);
        };
        let copy_key = format!("{key}.unreadable");
        self.write(&copy_key, &value)?;
        Ok(Some(copy_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.write("ledger", "[]").unwrap();
        assert_eq!(other.read("ledger").unwrap().as_deref(), Some("[]"));
        assert_eq!(other.read("missing").unwrap(), None);
    }

    #[test]
    fn unreadable_value_is_copied_aside() {
        let store = MemoryStore::new();
        assert_eq!(store.preserve_unreadable("ledger").unwrap(), None);
        store.insert_raw("ledger", "{bad");
        let copy_key = store.preserve_unreadable("ledger").unwrap().unwrap();
        assert_eq!(store.raw(&copy_key).as_deref(), Some("{bad"));
    }
}
