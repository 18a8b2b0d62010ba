//! # absflow identity
//!
//! Recovers a canonical public key fingerprint from the opaque credential
//! attached to each invocation. Pure functions only: no store access, no
//! authorization decisions.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod envelope;
pub mod errors;
pub mod extractor;

pub use envelope::SerializedIdentity;
pub use errors::IdentityError;
pub use extractor::{
    canonical_spki, extract_fingerprint, extract_identity, fingerprint_certificate_pem,
    CallerIdentity, IdentityExtractor, X509IdentityExtractor,
};
