//! Caller fingerprint extraction
//!
//! credential bytes -> [`SerializedIdentity`] -> first PEM block -> X.509
//! certificate -> EC public key -> canonical DER SubjectPublicKeyInfo -> hex.
//!
//! The key is decoded and re-encoded rather than hashed from the certificate
//! bytes, so a compressed point in the certificate still yields the same
//! fingerprint as the uncompressed key registered on the ledger.

use crate::envelope::SerializedIdentity;
use crate::errors::IdentityError;
use absflow_core::Fingerprint;
use p256::pkcs8::{DecodePublicKey, EncodePublicKey};
use x509_parser::pem::parse_x509_pem;
use x509_parser::public_key::PublicKey;

/// A caller identity recovered from a credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Member service provider named by the envelope
    pub msp_id: String,
    /// Canonical public key fingerprint
    pub fingerprint: Fingerprint,
}

/// Seam for turning a credential into a fingerprint
pub trait IdentityExtractor {
    /// Extract the caller fingerprint from an opaque credential
    fn extract(&self, credential: &[u8]) -> Result<Fingerprint, IdentityError>;
}

/// Production extractor for X.509 certificates in serialized identities
#[derive(Debug, Clone, Copy, Default)]
pub struct X509IdentityExtractor;

impl IdentityExtractor for X509IdentityExtractor {
    fn extract(&self, credential: &[u8]) -> Result<Fingerprint, IdentityError> {
        extract_fingerprint(credential)
    }
}

/// Extract the canonical fingerprint of the caller's public key
pub fn extract_fingerprint(credential: &[u8]) -> Result<Fingerprint, IdentityError> {
    extract_identity(credential).map(|identity| identity.fingerprint)
}

/// Extract the caller's MSP id and public key fingerprint
pub fn extract_identity(credential: &[u8]) -> Result<CallerIdentity, IdentityError> {
    let identity = SerializedIdentity::from_bytes(credential)?;
    let fingerprint = fingerprint_certificate_pem(&identity.id_bytes)?;

    tracing::debug!(
        msp_id = %identity.mspid,
        fingerprint = %fingerprint.short(),
        "Extracted caller identity"
    );

    Ok(CallerIdentity {
        msp_id: identity.mspid,
        fingerprint,
    })
}

/// Fingerprint the public key of the first certificate in a PEM document
pub fn fingerprint_certificate_pem(pem_bytes: &[u8]) -> Result<Fingerprint, IdentityError> {
    let (_, pem) = parse_x509_pem(pem_bytes).map_err(|e| IdentityError::MalformedCertificate {
        details: format!("Could not decode the PEM structure: {e}"),
    })?;

    let certificate = pem
        .parse_x509()
        .map_err(|e| IdentityError::MalformedCertificate {
            details: format!("Certificate parse failed: {e}"),
        })?;

    let spki = certificate.public_key();
    match spki.parsed() {
        Ok(PublicKey::EC(_)) => {}
        Ok(_) => {
            return Err(IdentityError::UnsupportedKeyType {
                details: format!(
                    "Expected an elliptic-curve key, found algorithm {}",
                    spki.algorithm.algorithm.to_id_string()
                ),
            })
        }
        Err(e) => {
            return Err(IdentityError::MalformedCertificate {
                details: format!("Public key parse failed: {e}"),
            })
        }
    }

    canonical_spki(spki.raw).map(|der| Fingerprint::from_der(&der))
}

/// Re-encode an EC SubjectPublicKeyInfo in canonical DER form
pub fn canonical_spki(spki_der: &[u8]) -> Result<Vec<u8>, IdentityError> {
    let encoded = if let Ok(key) = p256::PublicKey::from_public_key_der(spki_der) {
        key.to_public_key_der()
    } else if let Ok(key) = p384::PublicKey::from_public_key_der(spki_der) {
        key.to_public_key_der()
    } else {
        return Err(IdentityError::UnsupportedKeyType {
            details: "Elliptic curve is not P-256 or P-384".to_string(),
        });
    };

    encoded
        .map(|document| document.as_bytes().to_vec())
        .map_err(|e| IdentityError::MalformedCertificate {
            details: format!("Marshal public key failed: {e}"),
        })
}
