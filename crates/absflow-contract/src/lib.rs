//! # absflow contract
//!
//! The asset-flow contract as the hosting ledger sees it:
//!
//! - [`AbsContract`]: `init`, `invoke` and `query` dispatch
//! - [`AssetBatch`]: the decoded `bizContent` payload
//! - [`mutator`]: guarded writes of asset details and stage records
//! - [`storage`]: in-memory and filesystem [`LedgerStore`](absflow_core::LedgerStore) handlers
//!
//! Every stage invocation is fully authorized, including the per-asset
//! sequence checks, before the first write.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod asset;
pub mod contract;
pub mod mutator;
pub mod storage;

pub use asset::{AssetBatch, AssetRecord};
pub use contract::{AbsContract, Invocation, StageArgs, QUERY_FUNCTION, STAGE_ARG_COUNT};
pub use mutator::StageRecord;
pub use storage::{FilesystemLedgerStore, MemoryLedgerStore};
