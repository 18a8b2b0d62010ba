//! Serialized identity envelope
//!
//! The transaction envelope hands the contract the creator identity as a
//! protobuf message: the member service provider id plus the PEM-encoded
//! certificate.

use crate::errors::IdentityError;
use prost::Message;

/// Wire form of a caller identity
#[derive(Clone, PartialEq, Message)]
pub struct SerializedIdentity {
    /// Member service provider the identity belongs to
    #[prost(string, tag = "1")]
    pub mspid: String,
    /// PEM-encoded certificate
    #[prost(bytes = "vec", tag = "2")]
    pub id_bytes: Vec<u8>,
}

impl SerializedIdentity {
    /// Build an identity from an MSP id and a PEM certificate
    pub fn new(mspid: impl Into<String>, certificate_pem: impl Into<Vec<u8>>) -> Self {
        Self {
            mspid: mspid.into(),
            id_bytes: certificate_pem.into(),
        }
    }

    /// Decode an envelope from raw credential bytes
    pub fn from_bytes(credential: &[u8]) -> Result<Self, IdentityError> {
        Self::decode(credential).map_err(|e| IdentityError::MalformedIdentity {
            details: e.to_string(),
        })
    }

    /// Encode to the wire form
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }
}
