//! Fault-injecting ledger store

use absflow_core::{LedgerStore, StoreError};
use std::collections::{BTreeMap, HashSet};

/// In-memory store that fails on demand
///
/// Writes to keys registered with [`FaultyStore::fail_put_on`] fail without
/// touching state; [`FaultyStore::fail_reads`] makes every `get` fail.
#[derive(Debug, Default, Clone)]
pub struct FaultyStore {
    entries: BTreeMap<String, Vec<u8>>,
    failing_puts: HashSet<String>,
    reads_fail: bool,
    puts: usize,
}

impl FaultyStore {
    /// Empty store with no faults armed
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every write to `key`
    pub fn fail_put_on(mut self, key: impl Into<String>) -> Self {
        self.failing_puts.insert(key.into());
        self
    }

    /// Arm a write failure on an existing store
    pub fn arm_put_failure(&mut self, key: impl Into<String>) {
        self.failing_puts.insert(key.into());
    }

    /// Let writes to `key` succeed again
    pub fn disarm_put_failure(&mut self, key: &str) {
        self.failing_puts.remove(key);
    }

    /// Fail every read
    pub fn fail_reads(&mut self, fail: bool) {
        self.reads_fail = fail;
    }

    /// Raw view of the stored value
    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Number of successful writes so far
    pub fn put_count(&self) -> usize {
        self.puts
    }
}

impl LedgerStore for FaultyStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.reads_fail {
            return Err(StoreError::ReadFailed(format!("injected read fault on {key}")));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        if self.failing_puts.contains(key) {
            tracing::debug!(key, "Injecting write fault");
            return Err(StoreError::WriteFailed(format!(
                "injected write fault on {key}"
            )));
        }
        self.entries.insert(key.to_string(), value);
        self.puts += 1;
        Ok(())
    }
}
