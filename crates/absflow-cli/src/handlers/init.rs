//! Init command handler

use absflow_contract::{AbsContract, FilesystemLedgerStore};
use absflow_core::ContractConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Load the configuration and persist it into the state directory
pub fn handle_init(config_path: &Path, state_dir: &Path) -> Result<()> {
    tracing::info!(config = %config_path.display(), "Initializing contract state");

    let config = ContractConfig::load_from_file(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let mut store = FilesystemLedgerStore::new(state_dir);
    AbsContract::new(config).init(&mut store, &[])?;

    tracing::info!(state = %state_dir.display(), "Contract state initialized");
    Ok(())
}
