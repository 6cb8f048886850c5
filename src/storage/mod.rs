pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Key-value port the ledger persists its snapshot through.
pub trait SnapshotStore: Send + Sync {
    /// Returns the raw value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>>;
    /// Replaces the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
    /// Keeps a copy of the value under `key` that no later write or pruning touches.
    /// Returns where the copy went, or `None` when the store keeps no copies.
    fn preserve_unreadable(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
