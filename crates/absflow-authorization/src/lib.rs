//! # absflow authorization
//!
//! The business-flow authorization core:
//!
//! - [`Workflow`]: validated stage graph with keyed lookup
//! - [`OperatorRegistry`]: organization code to registered key fingerprint
//! - [`AuthorizationEngine`]: role check, then cryptographic identity check,
//!   plus the category and predecessor rules applied per asset
//!
//! The engine owns no state and performs no writes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod decision;
pub mod engine;
pub mod registry;
pub mod workflow;

pub use decision::{AuthorizationDecision, AuthorizationOutcome, Denial, DenialReason};
pub use engine::AuthorizationEngine;
pub use registry::{
    register_operators, OperatorRegistry, StaticOperatorRegistry, StoreOperatorRegistry,
};
pub use workflow::Workflow;
