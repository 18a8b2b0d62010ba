//! Query command handler

use absflow_contract::{AbsContract, FilesystemLedgerStore, Invocation, QUERY_FUNCTION};
use anyhow::Result;
use std::path::Path;

/// Read one asset, returning the `{"Key","Value"}` response body
pub fn handle_query(state_dir: &Path, asset_id: &str) -> Result<String> {
    let mut store = FilesystemLedgerStore::new(state_dir);
    let invocation = Invocation::new(QUERY_FUNCTION, vec![asset_id.to_string()]);
    let body = AbsContract::default().invoke(&mut store, &invocation)?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}
