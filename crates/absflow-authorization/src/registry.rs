//! Operator registry
//!
//! Maps organization codes to their registered public key fingerprints. The
//! registered bytes are already canonical DER, so lookups never re-encode.

use absflow_core::{AbsError, ContractConfig, Fingerprint, LedgerStore, Result, StateKey};
use std::collections::BTreeMap;

/// Lookup of registered operator keys
pub trait OperatorRegistry {
    /// Fingerprint registered for `org_code`, if any
    fn lookup_fingerprint(&self, org_code: &str) -> Result<Option<Fingerprint>>;
}

/// Registry held in memory, typically built from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticOperatorRegistry {
    entries: BTreeMap<String, Fingerprint>,
}

impl StaticOperatorRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw `(org, DER key)` pairs
    pub fn from_raw_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<u8>)>,
    {
        let entries = keys
            .into_iter()
            .map(|(org, der)| (org, Fingerprint::from_der(&der)))
            .collect();
        Self { entries }
    }

    /// Build from the operator table of a deployment configuration
    pub fn from_config(config: &ContractConfig) -> Result<Self> {
        Ok(Self::from_raw_keys(config.operator_keys()?))
    }

    /// Register or replace an organization's key
    pub fn register(&mut self, org_code: impl Into<String>, fingerprint: Fingerprint) {
        self.entries.insert(org_code.into(), fingerprint);
    }

    /// Registered organization codes
    pub fn org_codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl OperatorRegistry for StaticOperatorRegistry {
    fn lookup_fingerprint(&self, org_code: &str) -> Result<Option<Fingerprint>> {
        Ok(self.entries.get(org_code).cloned())
    }
}

/// Registry reading `operator/<org>` entries from the world state
#[derive(Debug)]
pub struct StoreOperatorRegistry<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S: LedgerStore + ?Sized> StoreOperatorRegistry<'s, S> {
    /// Registry over the given store
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }
}

impl<S: LedgerStore + ?Sized> OperatorRegistry for StoreOperatorRegistry<'_, S> {
    fn lookup_fingerprint(&self, org_code: &str) -> Result<Option<Fingerprint>> {
        let key = StateKey::Operator(org_code).render();
        let raw = self.store.get(&key).map_err(|e| {
            AbsError::store_read(format!("Get state (public key of {org_code}) failed: {e}"))
        })?;
        Ok(raw
            .filter(|bytes| !bytes.is_empty())
            .map(|bytes| Fingerprint::from_der(&bytes)))
    }
}

/// Persist every operator key of a configuration
pub fn register_operators<S: LedgerStore + ?Sized>(
    store: &mut S,
    config: &ContractConfig,
) -> Result<usize> {
    let keys = config.operator_keys()?;
    for (org, der) in &keys {
        let key = StateKey::Operator(org).render();
        store.put(&key, der.clone()).map_err(|e| {
            AbsError::store_write(format!("Put state (public key of {org}) failed: {e}"))
        })?;
        tracing::debug!(org = %org, key = %key, "Registered operator key");
    }
    Ok(keys.len())
}
