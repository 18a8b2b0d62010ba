//! State mutator
//!
//! Pass-through writes of asset details and stage records. Only called after
//! authorization has granted the whole invocation. Writes are last-write-wins
//! with no merge; a failure part-way through a batch leaves the earlier
//! entries written, and the hosting transaction decides whether they commit.

use crate::asset::AssetRecord;
use absflow_core::{AbsError, LedgerStore, Result, StateKey};
use serde::{Deserialize, Serialize};

/// Where an asset stands in the business flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRecord {
    /// Stage the asset was last moved to
    pub stage: String,
    /// Category of that stage
    pub category: String,
    /// Organization that executed it
    pub operator: String,
    /// Caller's trade reference
    #[serde(default)]
    pub out_trade_no: String,
    /// Transaction of the preceding stage, as declared by the caller
    #[serde(default)]
    pub previous_tx_id: String,
    /// Caller-supplied business hash
    #[serde(default)]
    pub business_hash: String,
    /// Transaction that recorded this stage
    #[serde(default)]
    pub tx_id: String,
}

/// Write one asset's detail bytes
pub fn apply_asset<S: LedgerStore + ?Sized>(store: &mut S, id: &str, detail: &[u8]) -> Result<()> {
    let key = StateKey::Asset(id).render();
    store
        .put(&key, detail.to_vec())
        .map_err(|e| AbsError::store_write(format!("Put state (asset {id}) failed: {e}")))?;
    tracing::debug!(asset = %id, bytes = detail.len(), "Asset written");
    Ok(())
}

/// Record the stage an asset has been moved to
pub fn record_stage<S: LedgerStore + ?Sized>(
    store: &mut S,
    id: &str,
    record: &StageRecord,
) -> Result<()> {
    let key = StateKey::Stage(id).render();
    let bytes = serde_json::to_vec(record)
        .map_err(|e| AbsError::store_write(format!("Failed to serialize stage record: {e}")))?;
    store.put(&key, bytes).map_err(|e| {
        AbsError::store_write(format!("Put state (current stage of {id}) failed: {e}"))
    })
}

/// Write every asset of a batch in order, each followed by its stage record
///
/// Returns the number of assets written. Stops at the first failure.
///
/// The detail goes first. If its stage record then fails, the asset is left
/// readable but with no recorded stage, so a later upload of that asset alone
/// passes the sequence check and completes it. Writing the record first would
/// instead block the retry behind `IncorrectSequence` with no detail stored.
pub fn apply_batch<S: LedgerStore + ?Sized>(
    store: &mut S,
    assets: &[AssetRecord],
    record: &StageRecord,
) -> Result<usize> {
    for (written, asset) in assets.iter().enumerate() {
        if let Err(e) = apply_asset(store, &asset.asset_uid, asset.asset_details.as_bytes())
            .and_then(|()| record_stage(store, &asset.asset_uid, record))
        {
            tracing::warn!(
                asset = %asset.asset_uid,
                written,
                error = %e,
                "Batch write stopped; earlier entries remain written"
            );
            return Err(e);
        }
    }
    Ok(assets.len())
}

/// Read an asset's detail bytes
pub fn read_asset<S: LedgerStore + ?Sized>(store: &S, id: &str) -> Result<Option<Vec<u8>>> {
    store
        .get(&StateKey::Asset(id).render())
        .map_err(|e| AbsError::store_read(format!("Failed to get state for {id}: {e}")))
}

/// Read the stage record of an asset
pub fn current_stage<S: LedgerStore + ?Sized>(store: &S, id: &str) -> Result<Option<StageRecord>> {
    let Some(bytes) = store
        .get(&StateKey::Stage(id).render())
        .map_err(|e| AbsError::store_read(format!("Get state (current stage of {id}) failed: {e}")))?
    else {
        return Ok(None);
    };
    serde_json::from_slice(&bytes).map(Some).map_err(|e| {
        AbsError::store_read(format!("Stage record of {id} is corrupt: {e}"))
    })
}
