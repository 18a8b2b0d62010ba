//! Contract dispatch
//!
//! Entry points the hosting ledger calls: `init` once at deployment, then
//! `invoke` per transaction. `invoke` with function `query` reads an asset;
//! any other function name is the stage the caller wants to move assets into.
//!
//! Stage invocations carry seven positional arguments:
//! `orgCode, assetUid, outTradeNo, category, previousTxId, businessHash,
//! bizContent`.

use crate::asset::AssetBatch;
use crate::mutator::{self, StageRecord};
use absflow_authorization::{
    register_operators, AuthorizationEngine, StoreOperatorRegistry, Workflow,
};
use absflow_core::{AbsError, ContractConfig, ErrorKind, LedgerStore, Result, StateKey};
use serde::Serialize;
use std::collections::HashMap;

/// Function name routed to [`AbsContract::query`]
pub const QUERY_FUNCTION: &str = "query";

/// Positional argument count of a stage invocation
pub const STAGE_ARG_COUNT: usize = 7;

/// One call from the dispatch layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Function or stage name
    pub function: String,
    /// Positional arguments
    pub args: Vec<String>,
    /// Serialized identity of the invoking party
    pub creator: Vec<u8>,
    /// Transaction identifier
    pub tx_id: String,
}

impl Invocation {
    /// Invocation without a creator
    pub fn new(function: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            function: function.into(),
            args,
            ..Self::default()
        }
    }

    /// Attach the caller's credential
    pub fn with_creator(mut self, creator: Vec<u8>) -> Self {
        self.creator = creator;
        self
    }

    /// Attach the transaction id
    pub fn with_tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.tx_id = tx_id.into();
        self
    }
}

/// Named view of a stage invocation's arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageArgs<'a> {
    /// Claimed organization
    pub org: &'a str,
    /// Primary asset of the request
    pub asset_uid: &'a str,
    /// Caller's trade reference
    pub out_trade_no: &'a str,
    /// Declared category
    pub category: &'a str,
    /// Transaction of the preceding stage
    pub previous_tx_id: &'a str,
    /// Caller-supplied business hash
    pub business_hash: &'a str,
    /// JSON asset batch
    pub biz_content: &'a str,
}

impl<'a> StageArgs<'a> {
    /// Split positional arguments, requiring exactly [`STAGE_ARG_COUNT`]
    pub fn parse(args: &'a [String]) -> Result<Self> {
        match args {
            [org, asset_uid, out_trade_no, category, previous_tx_id, business_hash, biz_content] => {
                Ok(Self {
                    org,
                    asset_uid,
                    out_trade_no,
                    category,
                    previous_tx_id,
                    business_hash,
                    biz_content,
                })
            }
            _ => Err(AbsError::argument_count(STAGE_ARG_COUNT, args.len())),
        }
    }
}

#[derive(Serialize)]
struct QueryResponse<'a> {
    #[serde(rename = "Key")]
    key: &'a str,
    #[serde(rename = "Value")]
    value: String,
}

/// The asset-flow contract
///
/// The configuration is only read by `init`; `invoke` works from the
/// definitions already persisted in the store.
#[derive(Debug, Clone, Default)]
pub struct AbsContract {
    config: ContractConfig,
}

impl AbsContract {
    /// Contract deploying the given workflow and operator table
    pub fn new(config: ContractConfig) -> Self {
        Self { config }
    }

    /// Deployment configuration
    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Persist the workflow definition and every operator key
    pub fn init<S: LedgerStore + ?Sized>(&self, store: &mut S, args: &[String]) -> Result<Vec<u8>> {
        if !args.is_empty() {
            return Err(AbsError::argument_count(0, args.len()));
        }

        self.config.validate()?;
        let workflow = Workflow::from_definition(self.config.workflow.clone())?;
        store
            .put(&StateKey::Workflow.render(), workflow.to_json()?)
            .map_err(|e| AbsError::store_write(format!("Put state (business flow) failed: {e}")))?;

        let operators = register_operators(store, &self.config)?;
        tracing::info!(
            stages = workflow.stages().len(),
            operators,
            "Contract initialized"
        );
        Ok(Vec::new())
    }

    /// Route an invocation
    pub fn invoke<S: LedgerStore + ?Sized>(
        &self,
        store: &mut S,
        invocation: &Invocation,
    ) -> Result<Vec<u8>> {
        if invocation.function == QUERY_FUNCTION {
            return self.query(store, &invocation.args);
        }
        self.execute_stage(store, invocation)
    }

    /// Authorize and apply a stage transition for every asset of the batch
    fn execute_stage<S: LedgerStore + ?Sized>(
        &self,
        store: &mut S,
        invocation: &Invocation,
    ) -> Result<Vec<u8>> {
        let stage_name = invocation.function.as_str();
        let args = StageArgs::parse(&invocation.args)?;
        tracing::debug!(
            stage = %stage_name,
            org = %args.org,
            asset = %args.asset_uid,
            tx_id = %invocation.tx_id,
            "Stage invocation"
        );

        let workflow = Workflow::load(&*store)?;
        let batch = AssetBatch::parse(args.biz_content)?;

        let record = {
            let registry = StoreOperatorRegistry::new(&*store);
            let engine = AuthorizationEngine::new(&workflow, &registry);
            engine
                .authorize(stage_name, args.org, &invocation.creator)?
                .into_result()?;

            let stage = workflow.lookup_stage(stage_name).ok_or_else(|| {
                AbsError::new(
                    ErrorKind::NoSuchStage,
                    format!("No stage instance found for {stage_name}"),
                )
            })?;
            engine.check_category(stage, args.category)?;

            let mut pending: HashMap<&str, &str> = HashMap::with_capacity(batch.len());
            for asset in &batch.assets {
                let id = asset.asset_uid.as_str();
                let recorded = match pending.get(id) {
                    Some(stage) => Some((*stage).to_string()),
                    None => mutator::current_stage(&*store, id)?.map(|r| r.stage),
                };
                engine.check_sequence(stage, id, recorded.as_deref())?;
                pending.insert(id, stage.name.as_str());
            }

            StageRecord {
                stage: stage.name.clone(),
                category: stage.category.clone(),
                operator: stage.operator.clone(),
                out_trade_no: args.out_trade_no.to_string(),
                previous_tx_id: args.previous_tx_id.to_string(),
                business_hash: args.business_hash.to_string(),
                tx_id: invocation.tx_id.clone(),
            }
        };

        let written = mutator::apply_batch(store, &batch.assets, &record)?;
        tracing::info!(
            stage = %stage_name,
            org = %args.org,
            assets = written,
            "Invoke chaincode succeeded"
        );
        Ok(Vec::new())
    }

    /// Read an asset: `{"Key": id, "Value": detail}`
    pub fn query<S: LedgerStore + ?Sized>(&self, store: &S, args: &[String]) -> Result<Vec<u8>> {
        let [id] = args else {
            return Err(AbsError::argument_count(1, args.len()));
        };

        let detail = mutator::read_asset(store, id)?.ok_or_else(|| {
            AbsError::new(ErrorKind::AssetNotFound, format!("Nil amount for {id}"))
        })?;

        let response = QueryResponse {
            key: id,
            value: String::from_utf8_lossy(&detail).into_owned(),
        };
        let body = serde_json::to_vec(&response).map_err(|e| {
            AbsError::store_read(format!("Failed to encode query response: {e}"))
        })?;
        tracing::debug!(asset = %id, "Query response built");
        Ok(body)
    }
}
