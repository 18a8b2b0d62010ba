//! Ledger store handlers
//!
//! The contract only needs `get` and `put`; these handlers provide them for
//! tests, local tooling and the CLI. A hosting ledger supplies its own
//! implementation of [`LedgerStore`](absflow_core::LedgerStore).

pub mod filesystem;
pub mod memory;

pub use filesystem::FilesystemLedgerStore;
pub use memory::MemoryLedgerStore;
