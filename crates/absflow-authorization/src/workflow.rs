//! Workflow model
//!
//! An immutable, validated view of the business flow with keyed stage lookup.
//! Built once from the definition; no mutation is exposed.

use absflow_core::{
    AbsError, ErrorKind, LedgerStore, Result, Stage, StateKey, WorkflowDefinition,
};
use std::collections::HashMap;

/// Validated business flow
#[derive(Debug, Clone)]
pub struct Workflow {
    definition: WorkflowDefinition,
    index: HashMap<String, usize>,
}

impl Workflow {
    /// Validate a definition and index its stages by name
    pub fn from_definition(definition: WorkflowDefinition) -> Result<Self> {
        definition.validate()?;
        let index = definition
            .stages
            .iter()
            .enumerate()
            .map(|(i, stage)| (stage.name.clone(), i))
            .collect();
        Ok(Self { definition, index })
    }

    /// Parse the persisted JSON form
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let definition: WorkflowDefinition = serde_json::from_slice(bytes).map_err(|e| {
            AbsError::invalid_configuration(format!("Workflow definition is not valid JSON: {e}"))
        })?;
        Self::from_definition(definition)
    }

    /// Serialize to the persisted JSON form
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.definition).map_err(|e| {
            AbsError::invalid_configuration(format!("Failed to serialize workflow: {e}"))
        })
    }

    /// Load the workflow persisted by `init`
    pub fn load<S: LedgerStore + ?Sized>(store: &S) -> Result<Self> {
        let key = StateKey::Workflow.render();
        let bytes = store
            .get(&key)
            .map_err(|e| AbsError::store_read(format!("Get state (business flow) failed: {e}")))?
            .ok_or_else(|| {
                AbsError::new(
                    ErrorKind::MissingWorkflowDefinition,
                    "No business flow found; was the contract initialized?",
                )
            })?;
        Self::from_json(&bytes)
    }

    /// Find a stage by name
    pub fn lookup_stage(&self, name: &str) -> Option<&Stage> {
        self.index.get(name).map(|&i| &self.definition.stages[i])
    }

    /// All stages in definition order
    pub fn stages(&self) -> &[Stage] {
        &self.definition.stages
    }

    /// All declared categories
    pub fn categories(&self) -> &[String] {
        &self.definition.categories
    }

    /// The underlying definition
    pub fn definition(&self) -> &WorkflowDefinition {
        &self.definition
    }
}
