//! absflow testing infrastructure
//!
//! Fixture certificates with their registered keys, ready-made workflow and
//! operator configuration, credential builders and a store with injectable
//! faults.
//!
//! ```toml
//! [dev-dependencies]
//! absflow-testkit = { path = "../absflow-testkit" }
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod fixtures;
pub mod store;

pub use fixtures::*;
pub use store::FaultyStore;
