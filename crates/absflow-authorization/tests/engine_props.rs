//! Property tests for the authorization engine

#![allow(clippy::unwrap_used, missing_docs)]

use absflow_authorization::{
    AuthorizationEngine, DenialReason, StaticOperatorRegistry, StoreOperatorRegistry, Workflow,
};
use absflow_core::{ErrorKind, Fingerprint};
use absflow_testkit::*;
use proptest::prelude::*;

fn workflow() -> Workflow {
    Workflow::from_definition(fixture_workflow()).unwrap()
}

fn registry() -> StaticOperatorRegistry {
    StaticOperatorRegistry::from_config(&fixture_config()).unwrap()
}

fn any_credential() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        Just(jyzb_credential()),
        Just(cloud_factory_credential()),
        Just(outsider_credential()),
        prop::collection::vec(any::<u8>(), 0..64),
    ]
}

proptest! {
    #[test]
    fn unknown_stage_is_always_no_such_stage(
        stage in "[A-Z_]{1,16}",
        org in "[a-zA-Z]{1,12}",
        credential in any_credential(),
    ) {
        let workflow = workflow();
        prop_assume!(workflow.lookup_stage(&stage).is_none());
        let registry = registry();
        let decision = AuthorizationEngine::new(&workflow, &registry)
            .authorize(&stage, &org, &credential)
            .unwrap();
        prop_assert_eq!(decision.denial_reason(), Some(DenialReason::NoSuchStage));
        prop_assert!(decision.caller_fingerprint.is_none());
    }

    #[test]
    fn claiming_another_org_is_always_operator_mismatch(
        stage_index in 0usize..3,
        org in "[a-zA-Z]{1,12}",
        credential in any_credential(),
    ) {
        let workflow = workflow();
        let stage = &workflow.stages()[stage_index];
        prop_assume!(stage.operator != org);
        let registry = registry();
        let decision = AuthorizationEngine::new(&workflow, &registry)
            .authorize(&stage.name, &org, &credential)
            .unwrap();
        prop_assert_eq!(decision.denial_reason(), Some(DenialReason::OperatorMismatch));
    }

    #[test]
    fn registered_key_differing_in_one_byte_is_identity_mismatch(
        index in 27usize..91,
        mask in 1u8..=255,
    ) {
        let mut der = hex::decode(JYZB_PUBLIC_KEY_HEX).unwrap();
        der[index] ^= mask;
        let mut registry = StaticOperatorRegistry::new();
        registry.register(ORG_JYZB, Fingerprint::from_der(&der));

        let workflow = workflow();
        let decision = AuthorizationEngine::new(&workflow, &registry)
            .authorize(STAGE_ASSET_UPLOAD, ORG_JYZB, &jyzb_credential())
            .unwrap();
        prop_assert_eq!(decision.denial_reason(), Some(DenialReason::IdentityMismatch));
    }
}

#[test]
fn each_stage_operator_is_granted_with_own_credential() {
    let workflow = workflow();
    let registry = registry();
    let engine = AuthorizationEngine::new(&workflow, &registry);

    for stage in workflow.stages() {
        let credential = if stage.operator == ORG_JYZB {
            jyzb_credential()
        } else {
            cloud_factory_credential()
        };
        let decision = engine
            .authorize(&stage.name, &stage.operator, &credential)
            .unwrap();
        assert!(decision.is_granted(), "{} should be granted", stage.name);
    }
}

#[test]
fn uppercase_registered_key_still_matches() {
    let mut registry = StaticOperatorRegistry::new();
    registry.register(
        ORG_JYZB,
        Fingerprint::from_hex(&JYZB_PUBLIC_KEY_HEX.to_ascii_uppercase()).unwrap(),
    );
    let workflow = workflow();
    let decision = AuthorizationEngine::new(&workflow, &registry)
        .authorize(STAGE_ASSET_UPLOAD, ORG_JYZB, &jyzb_credential())
        .unwrap();
    assert!(decision.is_granted());
}

#[test]
fn registry_read_failure_is_an_error_not_a_denial() {
    let mut store = FaultyStore::new();
    store.fail_reads(true);
    let registry = StoreOperatorRegistry::new(&store);
    let workflow = workflow();
    let err = AuthorizationEngine::new(&workflow, &registry)
        .authorize(STAGE_ASSET_UPLOAD, ORG_JYZB, &jyzb_credential())
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::StoreReadFailed);
}
