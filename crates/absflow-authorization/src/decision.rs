//! Authorization decisions

use absflow_core::{AbsError, ErrorKind, Fingerprint};
use std::fmt;

/// Why a request was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenialReason {
    /// The workflow has no such stage
    NoSuchStage,
    /// The claimed organization is not the stage operator
    OperatorMismatch,
    /// The credential did not yield a fingerprint
    IdentityExtractionFailed,
    /// No key is registered for the claimed organization
    UnknownOperator,
    /// The caller key differs from the registered key
    IdentityMismatch,
    /// The declared category is not the stage category
    IncorrectCategory,
    /// The asset's recorded stage is not a legal predecessor
    IncorrectSequence,
}

impl DenialReason {
    /// Error kind reported for this denial
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoSuchStage => ErrorKind::NoSuchStage,
            Self::OperatorMismatch => ErrorKind::OperatorMismatch,
            Self::IdentityExtractionFailed => ErrorKind::IdentityExtractionFailed,
            Self::UnknownOperator => ErrorKind::UnknownOperator,
            Self::IdentityMismatch => ErrorKind::IdentityMismatch,
            Self::IncorrectCategory => ErrorKind::IncorrectCategory,
            Self::IncorrectSequence => ErrorKind::IncorrectSequence,
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().code())
    }
}

/// A denial with its operator-facing detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    /// Reason kind
    pub reason: DenialReason,
    /// Detail for logs and error messages
    pub detail: String,
}

impl Denial {
    /// Create a denial
    pub fn new(reason: DenialReason, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: detail.into(),
        }
    }
}

impl From<Denial> for AbsError {
    fn from(denial: Denial) -> Self {
        AbsError::new(denial.reason.kind(), denial.detail)
    }
}

/// Outcome of an authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    /// The mutation may proceed
    Granted,
    /// The mutation must not happen
    Denied(Denial),
}

/// Ephemeral record of one authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationDecision {
    /// Stage the caller asked for
    pub requested_stage: String,
    /// Organization the caller claimed to act as
    pub claimed_org: String,
    /// Caller fingerprint, when extraction was reached and succeeded
    pub caller_fingerprint: Option<Fingerprint>,
    /// Grant or denial
    pub outcome: AuthorizationOutcome,
}

impl AuthorizationDecision {
    /// Whether the request was granted
    pub fn is_granted(&self) -> bool {
        matches!(self.outcome, AuthorizationOutcome::Granted)
    }

    /// Denial reason, if denied
    pub fn denial_reason(&self) -> Option<DenialReason> {
        match &self.outcome {
            AuthorizationOutcome::Granted => None,
            AuthorizationOutcome::Denied(denial) => Some(denial.reason),
        }
    }

    /// Convert into a result, turning a denial into an error
    pub fn into_result(self) -> Result<(), AbsError> {
        match self.outcome {
            AuthorizationOutcome::Granted => Ok(()),
            AuthorizationOutcome::Denied(denial) => Err(denial.into()),
        }
    }
}
