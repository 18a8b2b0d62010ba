//! Invoke command handler

use absflow_contract::{AbsContract, FilesystemLedgerStore, Invocation};
use absflow_identity::SerializedIdentity;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Parsed `invoke` arguments
#[derive(Debug, Clone)]
pub struct InvokeRequest {
    /// Stage name or `query`
    pub function: String,
    /// MSP identifier wrapped around the certificate
    pub msp_id: String,
    /// Certificate of the caller; queries need none
    pub cert: Option<PathBuf>,
    /// Transaction id override
    pub tx_id: Option<String>,
    /// Positional contract arguments
    pub args: Vec<String>,
}

/// Wrap a PEM certificate file in a serialized identity
pub fn load_credential(msp_id: &str, cert: &Path) -> Result<Vec<u8>> {
    let pem = std::fs::read(cert)
        .with_context(|| format!("Failed to read certificate {}", cert.display()))?;
    Ok(SerializedIdentity::new(msp_id, pem).to_bytes())
}

/// Run one invocation against the state directory
pub fn handle_invoke(state_dir: &Path, request: InvokeRequest) -> Result<String> {
    let creator = match &request.cert {
        Some(cert) => load_credential(&request.msp_id, cert)?,
        None => Vec::new(),
    };
    let tx_id = request
        .tx_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    tracing::debug!(function = %request.function, %tx_id, "Submitting invocation");

    let invocation = Invocation::new(request.function, request.args)
        .with_creator(creator)
        .with_tx_id(tx_id);
    let mut store = FilesystemLedgerStore::new(state_dir);
    let output = AbsContract::default().invoke(&mut store, &invocation)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}
