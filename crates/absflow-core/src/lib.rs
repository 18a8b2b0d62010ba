//! # absflow core
//!
//! Foundation types shared by every absflow crate:
//!
//! - [`AbsError`] and [`ErrorKind`], the single error taxonomy
//! - [`Fingerprint`], the canonical form of a public key
//! - [`LedgerStore`], the world-state effect the contract runs against
//! - [`StateKey`], the namespaced key layout
//! - [`ContractConfig`], the injected workflow and operator table
//!
//! Nothing here performs authorization; see `absflow-authorization`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod effects;
pub mod errors;
pub mod fingerprint;
pub mod keys;
pub mod types;

pub use config::{ContractConfig, DEFAULT_CONFIG_PATH};
pub use effects::{LedgerStore, StoreError};
pub use errors::{AbsError, ErrorKind, Result};
pub use fingerprint::Fingerprint;
pub use keys::{StateKey, WORKFLOW_DEFINITION_KEY};
pub use types::{OperatorEntry, Stage, WorkflowDefinition};
