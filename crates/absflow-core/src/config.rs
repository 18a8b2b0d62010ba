//! Deployment configuration
//!
//! The workflow and the operator table are injected at initialization time
//! from a TOML document rather than compiled into the contract, so each
//! deployment (and each test) can supply its own.

use crate::errors::{AbsError, Result};
use crate::fingerprint::Fingerprint;
use crate::types::{OperatorEntry, WorkflowDefinition};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Default location of the deployment configuration
pub const DEFAULT_CONFIG_PATH: &str = "config/contract.toml";

/// Everything `init` persists into the world state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Business flow definition
    pub workflow: WorkflowDefinition,
    /// Registered organizations
    #[serde(default)]
    pub operators: Vec<OperatorEntry>,
}

impl ContractConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ContractConfig = toml::from_str(content)
            .map_err(|e| AbsError::invalid_configuration(format!("Invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AbsError::invalid_configuration(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            stages = config.workflow.stages.len(),
            operators = config.operators.len(),
            "Loaded contract configuration"
        );
        Ok(config)
    }

    /// Validate the workflow and the operator table
    pub fn validate(&self) -> Result<()> {
        self.workflow.validate()?;

        let mut seen = HashSet::with_capacity(self.operators.len());
        for entry in &self.operators {
            if entry.org_code.trim().is_empty() {
                return Err(AbsError::invalid_configuration("Operator with empty org code"));
            }
            if !seen.insert(entry.org_code.as_str()) {
                return Err(AbsError::invalid_configuration(format!(
                    "Duplicate operator {}",
                    entry.org_code
                )));
            }
            Fingerprint::from_hex(&entry.public_key).map_err(|e| {
                AbsError::invalid_configuration(format!(
                    "Operator {}: {}",
                    entry.org_code, e.message
                ))
            })?;
        }
        Ok(())
    }

    /// Decode every operator key into raw DER bytes
    pub fn operator_keys(&self) -> Result<Vec<(String, Vec<u8>)>> {
        self.operators
            .iter()
            .map(|entry| {
                let raw = hex::decode(entry.public_key.trim()).map_err(|e| {
                    AbsError::invalid_configuration(format!(
                        "Operator {} public key is not hex: {e}",
                        entry.org_code
                    ))
                })?;
                Ok((entry.org_code.clone(), raw))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use assert_matches::assert_matches;
    use std::io::Write;

    const SAMPLE: &str = r#"
[workflow]
categories = ["CAT_ASSET_UPLOAD"]

[[workflow.stages]]
name = "ASSET_UPLOAD"
previousStages = []
operator = "jyzb"
category = "CAT_ASSET_UPLOAD"

[[operators]]
orgCode = "jyzb"
publicKey = "3059301306072A8648CE3D0201"
"#;

    #[test]
    fn parses_sample_document() {
        let config = ContractConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.workflow.stages[0].operator, "jyzb");
        let keys = config.operator_keys().unwrap();
        assert_eq!(keys[0].0, "jyzb");
        assert_eq!(keys[0].1[..2], [0x30, 0x59]);
    }

    #[test]
    fn duplicate_operator_is_rejected() {
        let doubled = format!(
            "{SAMPLE}\n[[operators]]\norgCode = \"jyzb\"\npublicKey = \"00\"\n"
        );
        let err = ContractConfig::from_toml_str(&doubled).unwrap_err();
        assert_matches!(err.kind, ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn bad_key_hex_is_rejected() {
        let broken = SAMPLE.replace("3059301306072A8648CE3D0201", "not-hex");
        let err = ContractConfig::from_toml_str(&broken).unwrap_err();
        assert!(err.message.contains("jyzb"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = ContractConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.operators.len(), 1);
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let err = ContractConfig::load_from_file(Path::new("/nonexistent/contract.toml"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidConfiguration);
    }
}
