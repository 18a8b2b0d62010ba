//! In-memory ledger store

use absflow_core::{LedgerStore, StoreError};
use std::collections::BTreeMap;

/// World state held in a sorted map
#[derive(Debug, Clone, Default)]
pub struct MemoryLedgerStore {
    data: BTreeMap<String, Vec<u8>>,
}

impl MemoryLedgerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Keys starting with `prefix`, sorted
    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.data
            .range(prefix.to_string()..)
            .map(|(k, _)| k.as_str())
            .take_while(move |k| k.starts_with(prefix))
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey {
                reason: "Key cannot be empty".to_string(),
            });
        }
        self.data.insert(key.to_string(), value);
        Ok(())
    }
}
