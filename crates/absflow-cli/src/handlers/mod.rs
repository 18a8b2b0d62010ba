//! CLI command handlers
//!
//! Each handler opens the filesystem world state, runs one contract entry
//! point and returns its output as text.

pub mod init;
pub mod invoke;
pub mod query;
