//! End-to-end contract behaviour over in-memory, faulty and filesystem stores

#![allow(clippy::unwrap_used, missing_docs)]

use absflow_contract::{AbsContract, FilesystemLedgerStore, Invocation, MemoryLedgerStore};
use absflow_core::{ContractConfig, ErrorKind, LedgerStore, StateKey};
use absflow_testkit::*;
use assert_matches::assert_matches;

fn contract() -> AbsContract {
    AbsContract::new(fixture_config())
}

fn initialized() -> MemoryLedgerStore {
    let mut store = MemoryLedgerStore::new();
    contract().init(&mut store, &[]).unwrap();
    store
}

fn upload(credential: Vec<u8>, org: &str, biz: &str) -> Invocation {
    Invocation::new(STAGE_ASSET_UPLOAD, stage_args(org, CAT_ASSET_UPLOAD, biz))
        .with_creator(credential)
        .with_tx_id("tx-upload")
}

fn query(store: &MemoryLedgerStore, id: &str) -> serde_json::Value {
    let body = contract()
        .invoke(&mut store.clone(), &Invocation::new("query", vec![id.to_string()]))
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn asset_count(store: &MemoryLedgerStore) -> usize {
    store.keys_with_prefix("asset/").count()
}

#[test]
fn granted_upload_is_readable_verbatim() {
    let mut store = initialized();
    contract()
        .invoke(&mut store, &upload(jyzb_credential(), ORG_JYZB, &sample_biz_content()))
        .unwrap();

    let response = query(&store, ASSET_ID_1);
    assert_eq!(response["Key"], ASSET_ID_1);
    assert_eq!(response["Value"], ASSET_DETAIL_1);
    assert_eq!(query(&store, ASSET_ID_2)["Value"], ASSET_DETAIL_2);
}

#[test]
fn wrong_operator_writes_nothing() {
    let mut store = initialized();
    let err = contract()
        .invoke(
            &mut store,
            &upload(cloud_factory_credential(), ORG_CLOUD_FACTORY, &sample_biz_content()),
        )
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::OperatorMismatch);
    assert_eq!(asset_count(&store), 0);
}

#[test]
fn foreign_certificate_claiming_registered_org_is_identity_mismatch() {
    let mut store = initialized();
    let err = contract()
        .invoke(&mut store, &upload(outsider_credential(), ORG_JYZB, &sample_biz_content()))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::IdentityMismatch);
    assert_eq!(asset_count(&store), 0);
}

#[test]
fn garbage_credential_is_extraction_failure() {
    let mut store = initialized();
    let err = contract()
        .invoke(&mut store, &upload(vec![0xff, 0x00, 0x13], ORG_JYZB, &sample_biz_content()))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::IdentityExtractionFailed);
}

#[test]
fn unregistered_stage_operator_is_unknown_operator() {
    let mut config = fixture_config();
    config.operators.retain(|entry| entry.org_code != ORG_CLOUD_FACTORY);
    let contract = AbsContract::new(config);
    let mut store = MemoryLedgerStore::new();
    contract.init(&mut store, &[]).unwrap();

    let audit = Invocation::new(
        STAGE_ASSET_AUDIT,
        stage_args(ORG_CLOUD_FACTORY, CAT_ASSET_AUDIT, &sample_biz_content()),
    )
    .with_creator(cloud_factory_credential());
    let err = contract.invoke(&mut store, &audit).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownOperator);
}

#[test]
fn unknown_stage_is_rejected() {
    let mut store = initialized();
    let invocation = Invocation::new(
        "ASSET_BURN",
        stage_args(ORG_JYZB, CAT_ASSET_UPLOAD, &sample_biz_content()),
    )
    .with_creator(jyzb_credential());
    let err = contract().invoke(&mut store, &invocation).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NoSuchStage);
}

#[test]
fn second_write_failure_keeps_first_entry() {
    let mut store = FaultyStore::new();
    contract().init(&mut store, &[]).unwrap();
    store.arm_put_failure(StateKey::Asset(ASSET_ID_2).render());

    let err = contract()
        .invoke(&mut store, &upload(jyzb_credential(), ORG_JYZB, &sample_biz_content()))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::StoreWriteFailed);
    assert_eq!(
        store.raw(&StateKey::Asset(ASSET_ID_1).render()),
        Some(ASSET_DETAIL_1.as_bytes())
    );
    assert!(store.raw(&StateKey::Asset(ASSET_ID_2).render()).is_none());
}

#[test]
fn failed_stage_record_can_be_completed_by_reuploading_that_asset() {
    let mut store = FaultyStore::new();
    contract().init(&mut store, &[]).unwrap();
    let stage_key = StateKey::Stage(ASSET_ID_2).render();
    store.arm_put_failure(stage_key.clone());

    let err = contract()
        .invoke(&mut store, &upload(jyzb_credential(), ORG_JYZB, &sample_biz_content()))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::StoreWriteFailed);
    assert!(store.raw(&StateKey::Asset(ASSET_ID_2).render()).is_some());
    assert!(store.raw(&stage_key).is_none());

    store.disarm_put_failure(&stage_key);
    let retry = biz_content(&[(ASSET_ID_2, ASSET_DETAIL_2)]);
    contract()
        .invoke(&mut store, &upload(jyzb_credential(), ORG_JYZB, &retry))
        .unwrap();
    let record = absflow_contract::mutator::current_stage(&store, ASSET_ID_2)
        .unwrap()
        .unwrap();
    assert_eq!(record.stage, STAGE_ASSET_UPLOAD);
}

#[test]
fn denied_invocation_never_calls_put() {
    let mut store = FaultyStore::new();
    contract().init(&mut store, &[]).unwrap();
    let before = store.put_count();

    let err = contract()
        .invoke(
            &mut store,
            &upload(cloud_factory_credential(), ORG_JYZB, &sample_biz_content()),
        )
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::IdentityMismatch);

    let err = contract()
        .invoke(
            &mut store,
            &upload(jyzb_credential(), ORG_JYZB, r#"{"assets":"nope"}"#),
        )
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidPayload);

    assert_eq!(store.put_count(), before);
    assert!(store.keys().iter().all(|key| !key.starts_with("asset/")));
}

#[test]
fn repeated_upload_is_out_of_sequence() {
    let mut store = initialized();
    let invocation = upload(jyzb_credential(), ORG_JYZB, &sample_biz_content());
    contract().invoke(&mut store, &invocation).unwrap();

    let err = contract().invoke(&mut store, &invocation).unwrap_err();
    assert_eq!(err.kind, ErrorKind::IncorrectSequence);
}

#[test]
fn duplicate_asset_within_one_batch_is_out_of_sequence() {
    let mut store = initialized();
    let biz = biz_content(&[(ASSET_ID_1, ASSET_DETAIL_1), (ASSET_ID_1, "changed")]);
    let err = contract()
        .invoke(&mut store, &upload(jyzb_credential(), ORG_JYZB, &biz))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::IncorrectSequence);
    assert_eq!(asset_count(&store), 0);
}

#[test]
fn declared_category_must_match_stage() {
    let mut store = initialized();
    let invocation = Invocation::new(
        STAGE_ASSET_UPLOAD,
        stage_args(ORG_JYZB, CAT_ASSET_AUDIT, &sample_biz_content()),
    )
    .with_creator(jyzb_credential());
    let err = contract().invoke(&mut store, &invocation).unwrap_err();
    assert_eq!(err.kind, ErrorKind::IncorrectCategory);
}

#[test]
fn malformed_payload_is_rejected_before_writes() {
    let mut store = initialized();
    for biz in ["not json", r#"{"assets":[]}"#, r#"{"assetDetails":"x"}"#] {
        let err = contract()
            .invoke(&mut store, &upload(jyzb_credential(), ORG_JYZB, biz))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidPayload, "payload {biz}");
    }
    assert_eq!(asset_count(&store), 0);
}

#[test]
fn invoke_before_init_has_no_workflow() {
    let mut store = MemoryLedgerStore::new();
    let err = contract()
        .invoke(&mut store, &upload(jyzb_credential(), ORG_JYZB, &sample_biz_content()))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingWorkflowDefinition);
}

#[test]
fn argument_counts_are_enforced() {
    let mut store = initialized();

    let short = Invocation::new(STAGE_ASSET_UPLOAD, vec![ORG_JYZB.to_string()])
        .with_creator(jyzb_credential());
    assert_matches!(
        contract().invoke(&mut store, &short),
        Err(e) if e.kind == ErrorKind::ArgumentCountMismatch
    );

    let err = contract()
        .invoke(&mut store, &Invocation::new("query", Vec::new()))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ArgumentCountMismatch);

    let err = contract()
        .init(&mut store, &["extra".to_string()])
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ArgumentCountMismatch);
}

#[test]
fn query_of_unknown_asset_is_not_found() {
    let mut store = initialized();
    let err = contract()
        .invoke(&mut store, &Invocation::new("query", vec!["missing".to_string()]))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AssetNotFound);
}

#[test]
fn full_flow_alternates_operators() {
    let mut store = initialized();
    let biz = sample_biz_content();

    let audit = Invocation::new(
        STAGE_ASSET_AUDIT,
        stage_args(ORG_CLOUD_FACTORY, CAT_ASSET_AUDIT, &biz),
    )
    .with_creator(cloud_factory_credential())
    .with_tx_id("tx-audit");
    let err = contract().invoke(&mut store, &audit).unwrap_err();
    assert_eq!(err.kind, ErrorKind::IncorrectSequence);

    contract()
        .invoke(&mut store, &upload(jyzb_credential(), ORG_JYZB, &biz))
        .unwrap();
    contract().invoke(&mut store, &audit).unwrap();

    let transfer = Invocation::new(
        STAGE_ASSET_TRANSFER,
        stage_args(ORG_JYZB, CAT_ASSET_TRANSFER, &biz),
    )
    .with_creator(jyzb_credential())
    .with_tx_id("tx-transfer");
    contract().invoke(&mut store, &transfer).unwrap();

    let record = absflow_contract::mutator::current_stage(&store, ASSET_ID_2)
        .unwrap()
        .unwrap();
    assert_eq!(record.stage, STAGE_ASSET_TRANSFER);
    assert_eq!(record.operator, ORG_JYZB);
    assert_eq!(record.tx_id, "tx-transfer");
}

#[test]
fn init_persists_workflow_and_operator_keys() {
    let store = initialized();
    assert!(store.get(&StateKey::Workflow.render()).unwrap().is_some());
    assert_eq!(
        store.get(&StateKey::Operator(ORG_JYZB).render()).unwrap().unwrap(),
        hex::decode(JYZB_PUBLIC_KEY_HEX).unwrap()
    );
}

#[test]
fn shipped_configuration_deploys_and_rejects_test_certificates() {
    let config = ContractConfig::from_toml_str(DEPLOYMENT_CONFIG_TOML).unwrap();
    let contract = AbsContract::new(config);
    assert_eq!(contract.config().operators.len(), 2);
    let mut store = MemoryLedgerStore::new();
    contract.init(&mut store, &[]).unwrap();

    let err = contract
        .invoke(&mut store, &upload(jyzb_credential(), ORG_JYZB, &sample_biz_content()))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::IdentityMismatch);
}

fn deployed() -> (AbsContract, MemoryLedgerStore) {
    let contract = AbsContract::new(ContractConfig::from_toml_str(DEPLOYMENT_CONFIG_TOML).unwrap());
    let mut store = MemoryLedgerStore::new();
    contract.init(&mut store, &[]).unwrap();
    (contract, store)
}

#[test]
fn registered_jyzb_key_uploads_under_shipped_configuration() {
    let (contract, mut store) = deployed();
    contract
        .invoke(
            &mut store,
            &upload(deployed_jyzb_credential(), ORG_JYZB, &sample_biz_content()),
        )
        .unwrap();

    let response = query(&store, ASSET_ID_1);
    assert_eq!(response["Key"], ASSET_ID_1);
    assert_eq!(response["Value"], ASSET_DETAIL_1);
    assert_eq!(query(&store, ASSET_ID_2)["Value"], ASSET_DETAIL_2);
}

#[test]
fn registered_cloud_factory_key_cannot_upload_under_shipped_configuration() {
    let (contract, mut store) = deployed();
    let err = contract
        .invoke(
            &mut store,
            &upload(
                deployed_cloud_factory_credential(),
                ORG_CLOUD_FACTORY,
                &sample_biz_content(),
            ),
        )
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::OperatorMismatch);
    assert_eq!(asset_count(&store), 0);
}

#[test]
fn filesystem_store_runs_the_same_flow() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FilesystemLedgerStore::new(dir.path());
    contract().init(&mut store, &[]).unwrap();
    contract()
        .invoke(&mut store, &upload(jyzb_credential(), ORG_JYZB, &sample_biz_content()))
        .unwrap();

    let mut reopened = FilesystemLedgerStore::new(dir.path());
    assert_eq!(reopened.base_path(), dir.path());
    let body = contract()
        .invoke(&mut reopened, &Invocation::new("query", vec![ASSET_ID_2.to_string()]))
        .unwrap();
    let response: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(response["Value"], ASSET_DETAIL_2);
}
