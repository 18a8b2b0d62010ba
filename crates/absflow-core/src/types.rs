//! Workflow definition types
//!
//! These are the declarative records as loaded from configuration and as
//! persisted in the world state. Lookup structures live in
//! `absflow-authorization`.

use crate::errors::{AbsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named step of the business flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    /// Unique stage name
    pub name: String,
    /// Stages that may legally precede this one; empty for an initial stage
    #[serde(default)]
    pub previous_stages: Vec<String>,
    /// Organization code authorized to execute the stage
    pub operator: String,
    /// Category label
    pub category: String,
}

impl Stage {
    /// Whether the stage can start a flow
    pub fn is_initial(&self) -> bool {
        self.previous_stages.is_empty()
    }

    /// Whether `stage` is a legal predecessor
    pub fn allows_predecessor(&self, stage: &str) -> bool {
        self.previous_stages.iter().any(|s| s == stage)
    }
}

/// The complete business flow: every stage plus the valid categories
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// All stages
    pub stages: Vec<Stage>,
    /// All categories
    #[serde(default)]
    pub categories: Vec<String>,
}

impl WorkflowDefinition {
    /// Check the structural invariants of the definition
    ///
    /// Names must be non-empty and unique, predecessors must exist and every
    /// category must be declared. Cycles are accepted.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::with_capacity(self.stages.len());
        for stage in &self.stages {
            if stage.name.trim().is_empty() {
                return Err(AbsError::invalid_configuration("Stage with empty name"));
            }
            if !names.insert(stage.name.as_str()) {
                return Err(AbsError::invalid_configuration(format!(
                    "Duplicate stage name {}",
                    stage.name
                )));
            }
            if stage.operator.trim().is_empty() {
                return Err(AbsError::invalid_configuration(format!(
                    "Stage {} has no operator",
                    stage.name
                )));
            }
        }

        for stage in &self.stages {
            if let Some(missing) = stage
                .previous_stages
                .iter()
                .find(|prev| !names.contains(prev.as_str()))
            {
                return Err(AbsError::invalid_configuration(format!(
                    "Stage {} references unknown previous stage {missing}",
                    stage.name
                )));
            }
            if !self.categories.iter().any(|c| c == &stage.category) {
                return Err(AbsError::invalid_configuration(format!(
                    "Stage {} uses undeclared category {}",
                    stage.name, stage.category
                )));
            }
        }

        Ok(())
    }
}

/// An organization and its registered public key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorEntry {
    /// Organization code
    pub org_code: String,
    /// Hex-encoded DER SubjectPublicKeyInfo
    pub public_key: String,
}
