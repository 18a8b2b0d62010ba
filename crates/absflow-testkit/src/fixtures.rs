//! Certificates, keys, workflows and payloads used across the test suites
//!
//! The certificates are self-signed and were generated for testing only. Each
//! `*_PUBLIC_KEY_HEX` is the DER SubjectPublicKeyInfo of the matching
//! certificate's key, i.e. exactly what the identity extractor produces.

use absflow_core::{ContractConfig, OperatorEntry, Stage, WorkflowDefinition};
use absflow_identity::SerializedIdentity;

/// Organization code of the asset originator
pub const ORG_JYZB: &str = "jyzb";
/// Organization code of the auditing platform
pub const ORG_CLOUD_FACTORY: &str = "cloudFactory";

/// Initial upload stage
pub const STAGE_ASSET_UPLOAD: &str = "ASSET_UPLOAD";
/// Audit stage following an upload
pub const STAGE_ASSET_AUDIT: &str = "ASSET_AUDIT";
/// Transfer stage following an audit
pub const STAGE_ASSET_TRANSFER: &str = "ASSET_TRANSFER";

/// Category of the upload stage
pub const CAT_ASSET_UPLOAD: &str = "CAT_ASSET_UPLOAD";
/// Category of the audit stage
pub const CAT_ASSET_AUDIT: &str = "CAT_ASSET_AUDIT";
/// Category of the transfer stage
pub const CAT_ASSET_TRANSFER: &str = "CAT_ASSET_TRANSFER";

/// P-256 certificate for `jyzb`
pub const JYZB_CERT_PEM: &str = include_str!("../fixtures/jyzb.pem");
/// P-256 certificate for `cloudFactory`
pub const CLOUD_FACTORY_CERT_PEM: &str = include_str!("../fixtures/cloud_factory.pem");
/// P-256 certificate for a party that is registered nowhere
pub const OUTSIDER_CERT_PEM: &str = include_str!("../fixtures/outsider.pem");
/// P-384 certificate
pub const P384_CERT_PEM: &str = include_str!("../fixtures/p384.pem");
/// RSA-2048 certificate
pub const RSA_CERT_PEM: &str = include_str!("../fixtures/rsa.pem");

/// DER SPKI of [`JYZB_CERT_PEM`]
pub const JYZB_PUBLIC_KEY_HEX: &str = "3059301306072a8648ce3d020106082a8648ce3d030107034200049270c8e1cf88c48a056bbc5fe29af8aeda786e8111c6a24fed8fea1ad126070d2c3240641fffbe8e973175dfc72241d5e227635f6658f7eaccd78fe85d1f8927";
/// DER SPKI of [`CLOUD_FACTORY_CERT_PEM`]
pub const CLOUD_FACTORY_PUBLIC_KEY_HEX: &str = "3059301306072a8648ce3d020106082a8648ce3d030107034200044b3874846fdd3f9bc87bc0a034082db8b85e31c77cf1d87e02f4e3832475f3e82e6eb3186feeeb3e93ef213de361a7493d19bf0e67d898f9bf0d54ef3ab5f1b7";
/// DER SPKI of [`OUTSIDER_CERT_PEM`]
pub const OUTSIDER_PUBLIC_KEY_HEX: &str = "3059301306072a8648ce3d020106082a8648ce3d030107034200046d9cdf9a60e1b6e169d87edce6fd285bed95ff321126ee84df3b929a23e5ab0a5d03b0ff43e5946951f204842ce3b6484ff7e0e6c8ec4daa1109785d04aadcf1";
/// DER SPKI of [`P384_CERT_PEM`]
pub const P384_PUBLIC_KEY_HEX: &str = "3076301006072a8648ce3d020106052b810400220362000446acaab2b5c11c7c2c19fbbae5cc56c34da8d163b67b0b764287e4e5d0aad462572da6a5dbf093d14c8fabae594a78cf12cac0c98e7c7f685631545d7bb9cdd886fa1ee7c55cb964ae18d6ef0d35d24f751cda0bea66e037719dae53b26cf153";

/// CA-issued certificate carrying the key `config/contract.toml` registers for `jyzb`
pub const JYZB_REGISTERED_CERT_PEM: &str = include_str!("../fixtures/jyzb_registered.pem");
/// CA-issued certificate carrying the key `config/contract.toml` registers for `cloudFactory`
pub const CLOUD_FACTORY_REGISTERED_CERT_PEM: &str =
    include_str!("../fixtures/cloud_factory_registered.pem");

/// Key registered for `jyzb` by the deployment configuration
pub const DEPLOYED_JYZB_PUBLIC_KEY_HEX: &str = "3059301306072a8648ce3d020106082a8648ce3d03010703420004c282028c74a018889a0223e8f81a1b91d8337ee8a9ceedcf0c8f586cee9bd5e56eeee7e553ab97639f0860a702e8bee4b534abb673631dfa09ff6d77082f3bf6";
/// Key registered for `cloudFactory` by the deployment configuration
pub const DEPLOYED_CLOUD_FACTORY_PUBLIC_KEY_HEX: &str = "3059301306072a8648ce3d020106082a8648ce3d0301070342000469bed65ebfb770313329e770b97d6d298cce48e16da3db24423cdea84d73eb4b300f564efad0137052e7bf89665b5c3397d4f448c8cf711d5b227d40b419c6fb";

/// The deployment configuration shipped with the repository
pub const DEPLOYMENT_CONFIG_TOML: &str = include_str!("../../../config/contract.toml");

/// First asset of the sample batch
pub const ASSET_ID_1: &str = "160815609421112015";
/// Detail string of the first asset
pub const ASSET_DETAIL_1: &str = "160815609421112015,***n66_m,2016-08-15 20:41:30,2017-08-15 23:59:59,12,2399,199.92,0,24,0,3,3,1,1,HT201606300001";
/// Second asset of the sample batch
pub const ASSET_ID_2: &str = "160815609421112017";
/// Detail string of the second asset
pub const ASSET_DETAIL_2: &str = "160815609421112017,***n66_m,2016-08-15 20:41:30,2017-08-15 23:59:59,12,2399,199.92,0,24,0,3,3,1,1,HT201606300001";

/// Build a serialized identity credential around a PEM certificate
pub fn credential(msp_id: &str, certificate_pem: &str) -> Vec<u8> {
    SerializedIdentity::new(msp_id, certificate_pem.as_bytes().to_vec()).to_bytes()
}

/// Credential presented by `jyzb`
pub fn jyzb_credential() -> Vec<u8> {
    credential("JyzbMSP", JYZB_CERT_PEM)
}

/// Credential presented by `cloudFactory`
pub fn cloud_factory_credential() -> Vec<u8> {
    credential("CloudFactoryMSP", CLOUD_FACTORY_CERT_PEM)
}

/// `jyzb` credential whose key matches the deployment configuration
pub fn deployed_jyzb_credential() -> Vec<u8> {
    credential("JyzbMSP", JYZB_REGISTERED_CERT_PEM)
}

/// `cloudFactory` credential whose key matches the deployment configuration
pub fn deployed_cloud_factory_credential() -> Vec<u8> {
    credential("CloudFactoryMSP", CLOUD_FACTORY_REGISTERED_CERT_PEM)
}

/// Credential presented by an unregistered party
pub fn outsider_credential() -> Vec<u8> {
    credential("OutsiderMSP", OUTSIDER_CERT_PEM)
}

fn stage(name: &str, previous: &[&str], operator: &str, category: &str) -> Stage {
    Stage {
        name: name.to_string(),
        previous_stages: previous.iter().map(|s| (*s).to_string()).collect(),
        operator: operator.to_string(),
        category: category.to_string(),
    }
}

/// Upload, audit, transfer: a three-stage flow alternating operators
pub fn fixture_workflow() -> WorkflowDefinition {
    WorkflowDefinition {
        stages: vec![
            stage(STAGE_ASSET_UPLOAD, &[], ORG_JYZB, CAT_ASSET_UPLOAD),
            stage(
                STAGE_ASSET_AUDIT,
                &[STAGE_ASSET_UPLOAD],
                ORG_CLOUD_FACTORY,
                CAT_ASSET_AUDIT,
            ),
            stage(
                STAGE_ASSET_TRANSFER,
                &[STAGE_ASSET_AUDIT],
                ORG_JYZB,
                CAT_ASSET_TRANSFER,
            ),
        ],
        categories: vec![
            CAT_ASSET_UPLOAD.to_string(),
            CAT_ASSET_AUDIT.to_string(),
            CAT_ASSET_TRANSFER.to_string(),
        ],
    }
}

/// Operator table registering the fixture certificates
pub fn fixture_operators() -> Vec<OperatorEntry> {
    vec![
        OperatorEntry {
            org_code: ORG_CLOUD_FACTORY.to_string(),
            public_key: CLOUD_FACTORY_PUBLIC_KEY_HEX.to_string(),
        },
        OperatorEntry {
            org_code: ORG_JYZB.to_string(),
            public_key: JYZB_PUBLIC_KEY_HEX.to_string(),
        },
    ]
}

/// Complete configuration built from the fixture workflow and operators
pub fn fixture_config() -> ContractConfig {
    ContractConfig {
        workflow: fixture_workflow(),
        operators: fixture_operators(),
    }
}

/// Asset batch payload in the form the dispatch layer delivers it
pub fn biz_content(assets: &[(&str, &str)]) -> String {
    let entries: Vec<String> = assets
        .iter()
        .map(|(id, detail)| format!(r#"{{"assetUid":"{id}","assetDetails":"{detail}"}}"#))
        .collect();
    format!(r#"{{"assets":[{}]}}"#, entries.join(","))
}

/// The two-asset sample batch
pub fn sample_biz_content() -> String {
    biz_content(&[(ASSET_ID_1, ASSET_DETAIL_1), (ASSET_ID_2, ASSET_DETAIL_2)])
}

/// Positional arguments for a stage invocation
pub fn stage_args(org: &str, category: &str, biz_content: &str) -> Vec<String> {
    vec![
        org.to_string(),
        ASSET_ID_1.to_string(),
        format!("{org}0001"),
        category.to_string(),
        String::new(),
        String::new(),
        biz_content.to_string(),
    ]
}
