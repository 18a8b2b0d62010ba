//! Authorization engine
//!
//! Decides whether a caller may move assets into a stage. The check runs in
//! two layers: the declared organization must be the stage operator, then the
//! caller's certificate key must be the key registered for that organization.
//! The first layer never touches cryptographic material.
//!
//! Store read failures while consulting the registry are returned as errors,
//! not denials: they say nothing about the caller.

use crate::decision::{AuthorizationDecision, AuthorizationOutcome, Denial, DenialReason};
use crate::registry::OperatorRegistry;
use crate::workflow::Workflow;
use absflow_core::{Fingerprint, Result, Stage};
use absflow_identity::{IdentityExtractor, X509IdentityExtractor};

/// Stateless decision function over a workflow and an operator registry
#[derive(Debug)]
pub struct AuthorizationEngine<'a, R: ?Sized, E = X509IdentityExtractor> {
    workflow: &'a Workflow,
    registry: &'a R,
    extractor: E,
}

impl<'a, R: OperatorRegistry + ?Sized> AuthorizationEngine<'a, R> {
    /// Engine using the X.509 identity extractor
    pub fn new(workflow: &'a Workflow, registry: &'a R) -> Self {
        Self {
            workflow,
            registry,
            extractor: X509IdentityExtractor,
        }
    }
}

impl<'a, R: OperatorRegistry + ?Sized, E: IdentityExtractor> AuthorizationEngine<'a, R, E> {
    /// Replace the identity extractor
    pub fn with_extractor<X: IdentityExtractor>(self, extractor: X) -> AuthorizationEngine<'a, R, X> {
        AuthorizationEngine {
            workflow: self.workflow,
            registry: self.registry,
            extractor,
        }
    }

    /// Workflow this engine decides against
    pub fn workflow(&self) -> &Workflow {
        self.workflow
    }

    /// Decide whether `claimed_org`, presenting `credential`, may execute `stage_name`
    pub fn authorize(
        &self,
        stage_name: &str,
        claimed_org: &str,
        credential: &[u8],
    ) -> Result<AuthorizationDecision> {
        let decision = |fingerprint: Option<Fingerprint>, outcome: AuthorizationOutcome| {
            AuthorizationDecision {
                requested_stage: stage_name.to_string(),
                claimed_org: claimed_org.to_string(),
                caller_fingerprint: fingerprint,
                outcome,
            }
        };
        let deny = |fingerprint: Option<Fingerprint>, reason: DenialReason, detail: String| {
            tracing::warn!(
                stage = %stage_name,
                org = %claimed_org,
                reason = %reason,
                detail = %detail,
                "Authorization denied"
            );
            decision(
                fingerprint,
                AuthorizationOutcome::Denied(Denial::new(reason, detail)),
            )
        };

        let Some(stage) = self.workflow.lookup_stage(stage_name) else {
            return Ok(deny(
                None,
                DenialReason::NoSuchStage,
                format!("No stage instance found for {stage_name}"),
            ));
        };

        if stage.operator != claimed_org {
            return Ok(deny(
                None,
                DenialReason::OperatorMismatch,
                format!("Wanted {}, but got {claimed_org}", stage.operator),
            ));
        }

        let caller = match self.extractor.extract(credential) {
            Ok(fingerprint) => fingerprint,
            Err(e) => {
                return Ok(deny(
                    None,
                    DenialReason::IdentityExtractionFailed,
                    format!("Get creator public key failed ({}): {e}", e.kind()),
                ))
            }
        };

        let Some(registered) = self.registry.lookup_fingerprint(claimed_org)? else {
            return Ok(deny(
                Some(caller),
                DenialReason::UnknownOperator,
                format!("No public key registered for {claimed_org}"),
            ));
        };

        if !caller.matches(&registered) {
            return Ok(deny(
                Some(caller.clone()),
                DenialReason::IdentityMismatch,
                format!(
                    "Creator key {} does not match the key registered for {claimed_org}",
                    caller.short()
                ),
            ));
        }

        tracing::info!(
            stage = %stage_name,
            org = %claimed_org,
            fingerprint = %caller.short(),
            "Access check passed"
        );
        Ok(decision(Some(caller), AuthorizationOutcome::Granted))
    }

    /// The declared category must be the stage's own category
    pub fn check_category(&self, stage: &Stage, declared: &str) -> std::result::Result<(), Denial> {
        if stage.category == declared {
            return Ok(());
        }
        tracing::warn!(stage = %stage.name, declared, expected = %stage.category, "Incorrect category");
        Err(Denial::new(
            DenialReason::IncorrectCategory,
            format!(
                "Stage {} belongs to category {}, not {declared}",
                stage.name, stage.category
            ),
        ))
    }

    /// The asset's recorded stage must be a legal predecessor of `stage`
    ///
    /// An asset with no recorded stage may only enter an initial stage.
    pub fn check_sequence(
        &self,
        stage: &Stage,
        asset_id: &str,
        current: Option<&str>,
    ) -> std::result::Result<(), Denial> {
        let legal = match current {
            Some(previous) => stage.allows_predecessor(previous),
            None => stage.is_initial(),
        };
        if legal {
            return Ok(());
        }

        let detail = match current {
            Some(previous) => format!(
                "Asset {asset_id} is at stage {previous}, which may not precede {}",
                stage.name
            ),
            None => format!(
                "Asset {asset_id} has no recorded stage and {} is not an initial stage",
                stage.name
            ),
        };
        tracing::warn!(stage = %stage.name, asset = %asset_id, "Incorrect sequence");
        Err(Denial::new(DenialReason::IncorrectSequence, detail))
    }
}
