//! Asset batch payload
//!
//! The `bizContent` argument carries a JSON batch of `{assetUid,
//! assetDetails}` pairs. It is decoded into typed records and validated as a
//! whole; any defect rejects the entire batch before anything is written.

use absflow_core::{AbsError, Result};
use serde::{Deserialize, Serialize};

/// One asset entry of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    /// Asset identifier
    pub asset_uid: String,
    /// Opaque detail string stored verbatim
    pub asset_details: String,
}

/// A decoded and validated `bizContent` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBatch {
    /// Entries in payload order
    pub assets: Vec<AssetRecord>,
}

impl AssetBatch {
    /// Decode and validate a payload
    pub fn parse(biz_content: &str) -> Result<Self> {
        let batch: AssetBatch = serde_json::from_str(biz_content)
            .map_err(|e| AbsError::invalid_payload(format!("Malformed bizContent: {e}")))?;
        batch.validate()?;
        Ok(batch)
    }

    /// Check every entry, reporting the first defect
    pub fn validate(&self) -> Result<()> {
        if self.assets.is_empty() {
            return Err(AbsError::invalid_payload("bizContent contains no assets"));
        }
        for (index, asset) in self.assets.iter().enumerate() {
            if asset.asset_uid.trim().is_empty() {
                return Err(AbsError::invalid_payload(format!(
                    "Asset {index} has an empty assetUid"
                )));
            }
            if asset.asset_details.is_empty() {
                return Err(AbsError::invalid_payload(format!(
                    "Asset {} has empty assetDetails",
                    asset.asset_uid
                )));
            }
        }
        Ok(())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the batch is empty
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
