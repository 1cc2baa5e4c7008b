//! Key-value persistence
//!
//! The wallet state is written through a synchronous string key-value store
//! (`get` / `set` / `remove`), the same narrow contract a browser's local
//! storage offers. Two backends ship with the crate:
//! - `MemoryStore` - process-local map, used by tests and ephemeral sessions
//! - `JsonFileStore` - one JSON object on disk

use std::collections::BTreeMap;

use crate::core::errors::WalletError;

mod file;
pub mod snapshot;

pub use file::JsonFileStore;

/// Synchronous, blocking key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, WalletError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), WalletError>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), WalletError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, WalletError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), WalletError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), WalletError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("wallets").unwrap(), None);
        store.set("wallets", "[]").unwrap();
        assert_eq!(store.get("wallets").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);
        store.remove("wallets").unwrap();
        store.remove("wallets").unwrap();
        assert!(store.is_empty());
    }
}
