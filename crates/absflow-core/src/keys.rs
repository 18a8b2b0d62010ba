//! World-state key layout
//!
//! Each kind of record lives under its own prefix so an asset identifier can
//! never shadow an organization's registered key.

use std::fmt;

/// Key holding the serialized workflow definition
pub const WORKFLOW_DEFINITION_KEY: &str = "workflow/definition";

/// A namespaced world-state key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKey<'a> {
    /// The workflow definition
    Workflow,
    /// An organization's registered public key
    Operator(&'a str),
    /// An asset's detail bytes
    Asset(&'a str),
    /// The stage an asset was last moved to
    Stage(&'a str),
}

impl StateKey<'_> {
    /// Render the key as stored
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StateKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateKey::Workflow => f.write_str(WORKFLOW_DEFINITION_KEY),
            StateKey::Operator(org) => write!(f, "operator/{org}"),
            StateKey::Asset(id) => write!(f, "asset/{id}"),
            StateKey::Stage(id) => write!(f, "stage/{id}"),
        }
    }
}
