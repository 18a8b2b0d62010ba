//! Identity extraction errors

use absflow_core::{AbsError, ErrorKind};

/// Why a caller fingerprint could not be produced
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The serialized identity envelope could not be decoded
    #[error("Malformed identity: {details}")]
    MalformedIdentity {
        /// Decoder detail
        details: String,
    },

    /// No PEM block, or the certificate inside it does not parse
    #[error("Malformed certificate: {details}")]
    MalformedCertificate {
        /// Parser detail
        details: String,
    },

    /// The certificate key is not an elliptic-curve key on a supported curve
    #[error("Unsupported key type: {details}")]
    UnsupportedKeyType {
        /// Key algorithm detail
        details: String,
    },
}

impl IdentityError {
    /// Stable kind of this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedIdentity { .. } => ErrorKind::MalformedIdentity,
            Self::MalformedCertificate { .. } => ErrorKind::MalformedCertificate,
            Self::UnsupportedKeyType { .. } => ErrorKind::UnsupportedKeyType,
        }
    }
}

impl From<IdentityError> for AbsError {
    fn from(err: IdentityError) -> Self {
        AbsError::new(err.kind(), err.to_string())
    }
}
