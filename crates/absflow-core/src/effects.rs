//! Ledger store effects
//!
//! The ledger's key-value world state is an external collaborator. The
//! contract only issues `get` and `put` through this trait; durability and
//! per-transaction atomicity belong to the implementation.

use crate::errors::AbsError;

/// Errors raised by a ledger store implementation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Read failed
    #[error("Read failed: {0}")]
    ReadFailed(String),
    /// Write failed
    #[error("Write failed: {0}")]
    WriteFailed(String),
    /// Key rejected by the backend
    #[error("Invalid key: {reason}")]
    InvalidKey {
        /// Why the key was rejected
        reason: String,
    },
}

impl From<StoreError> for AbsError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ReadFailed(_) => AbsError::store_read(err.to_string()),
            StoreError::WriteFailed(_) | StoreError::InvalidKey { .. } => {
                AbsError::store_write(err.to_string())
            }
        }
    }
}

/// Synchronous key-value access to the ledger world state
pub trait LedgerStore {
    /// Read a value; `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write a value, replacing any previous one
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}

impl<T: LedgerStore + ?Sized> LedgerStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, value)
    }
}

impl<T: LedgerStore + ?Sized> LedgerStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, value)
    }
}
