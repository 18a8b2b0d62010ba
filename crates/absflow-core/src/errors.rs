//! Unified error system for absflow
//!
//! Every failure carries a stable [`ErrorKind`] for machine checks plus a
//! free-form message for operators. Callers match on the kind, never on the
//! message text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable classification of every failure the contract can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The identity envelope could not be decoded
    MalformedIdentity,
    /// No PEM block or an unparseable X.509 certificate
    MalformedCertificate,
    /// The certificate key is not a supported elliptic-curve key
    UnsupportedKeyType,
    /// The requested stage is not part of the workflow
    NoSuchStage,
    /// The claimed organization is not the stage operator
    OperatorMismatch,
    /// No public key is registered for the claimed organization
    UnknownOperator,
    /// The caller key does not match the registered key
    IdentityMismatch,
    /// The caller fingerprint could not be extracted from the credential
    IdentityExtractionFailed,
    /// The declared category differs from the stage category
    IncorrectCategory,
    /// The asset's recorded stage is not a legal predecessor
    IncorrectSequence,
    /// A read from the ledger store failed
    StoreReadFailed,
    /// A write to the ledger store failed
    StoreWriteFailed,
    /// The workflow definition has not been initialized
    MissingWorkflowDefinition,
    /// Wrong number of positional arguments
    ArgumentCountMismatch,
    /// The asset batch payload is malformed
    InvalidPayload,
    /// The deployment configuration or workflow definition is invalid
    InvalidConfiguration,
    /// No asset is recorded under the queried identifier
    AssetNotFound,
}

impl ErrorKind {
    /// Stable code string for this kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedIdentity => "MALFORMED_IDENTITY",
            Self::MalformedCertificate => "MALFORMED_CERTIFICATE",
            Self::UnsupportedKeyType => "UNSUPPORTED_KEY_TYPE",
            Self::NoSuchStage => "NO_SUCH_STAGE",
            Self::OperatorMismatch => "OPERATOR_MISMATCH",
            Self::UnknownOperator => "UNKNOWN_OPERATOR",
            Self::IdentityMismatch => "IDENTITY_MISMATCH",
            Self::IdentityExtractionFailed => "IDENTITY_EXTRACTION_FAILED",
            Self::IncorrectCategory => "INCORRECT_CATEGORY",
            Self::IncorrectSequence => "INCORRECT_SEQUENCE",
            Self::StoreReadFailed => "STORE_READ_FAILED",
            Self::StoreWriteFailed => "STORE_WRITE_FAILED",
            Self::MissingWorkflowDefinition => "MISSING_WORKFLOW_DEFINITION",
            Self::ArgumentCountMismatch => "ARGUMENT_COUNT_MISMATCH",
            Self::InvalidPayload => "INVALID_PAYLOAD",
            Self::InvalidConfiguration => "INVALID_CONFIGURATION",
            Self::AssetNotFound => "ASSET_NOT_FOUND",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Unified error type for all absflow operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct AbsError {
    /// Machine-checkable failure kind
    pub kind: ErrorKind,
    /// Human-readable detail
    pub message: String,
}

impl AbsError {
    /// Create an error of the given kind
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Create a store read error
    pub fn store_read(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreReadFailed, message)
    }

    /// Create a store write error
    pub fn store_write(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreWriteFailed, message)
    }

    /// Create an invalid payload error
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPayload, message)
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfiguration, message)
    }

    /// Create an argument count error
    pub fn argument_count(expected: usize, actual: usize) -> Self {
        Self::new(
            ErrorKind::ArgumentCountMismatch,
            format!("Incorrect number of arguments: expected {expected}, got {actual}"),
        )
    }
}

/// Standard Result type for absflow operations
pub type Result<T> = std::result::Result<T, AbsError>;
