//! Canonical public key fingerprints

use crate::errors::{AbsError, Result};
use std::fmt;

/// Lowercase hex encoding of a DER SubjectPublicKeyInfo
///
/// Both registered keys and keys extracted from caller certificates are
/// reduced to this form, so identity comparison is plain string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint raw DER public key bytes
    pub fn from_der(der: &[u8]) -> Self {
        Self(hex::encode(der))
    }

    /// Parse a hex fingerprint, normalizing to lowercase
    pub fn from_hex(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AbsError::invalid_configuration("Empty public key fingerprint"));
        }
        hex::decode(trimmed).map_err(|e| {
            AbsError::invalid_configuration(format!("Invalid public key hex: {e}"))
        })?;
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Hex string form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against another fingerprint
    pub fn matches(&self, other: &Fingerprint) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Leading characters for log lines
    pub fn short(&self) -> &str {
        let end = self.0.len().min(16);
        &self.0[..end]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
