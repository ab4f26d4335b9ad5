//! Lifecycle service
//!
//! The seven operations exposed over a ledger gateway. Every state-changing
//! operation runs the same gate sequence (decode, hash binding, schema
//! cross-check, full document validation, current-state legality) before
//! its single terminal ledger write, so an abort at any gate leaves the
//! ledger untouched.
//!
//! The transition timestamp is an input supplied by the invocation context;
//! this service never reads the local clock, so identical inputs always
//! produce identical outputs across independently validating nodes.

use chrono::{DateTime, Utc};
use tracing::info;

use covenant_core::LedgerGateway;
use covenant_domain::{digest, validate_document, validate_signatures_complete, ImmutableContract};

use crate::asset::{check_transition, Contract, TransitionAction};
use crate::error::LifecycleError;
use crate::request::{
    decode_envelope, CreateAssetResponse, ExpireAssetReq, NewAssetReq, ReleaseAssetReq,
    TxResponse, VoidAssetReq,
};

/// Contract lifecycle engine over a ledger gateway.
pub struct LifecycleService<G> {
    gateway: G,
}

impl<G: LedgerGateway> LifecycleService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Instantiate a new contract asset from a sealed, fully consented
    /// document.
    pub fn create_asset(
        &mut self,
        envelope: &str,
        now: DateTime<Utc>,
    ) -> Result<CreateAssetResponse, LifecycleError> {
        let req: NewAssetReq = decode_envelope(envelope)?;

        verify_binding(&req.immutable_contract, &req.immutable_contract_hash)?;
        check_schema_version(&req.immutable_contract)?;
        validate_document(&req.immutable_contract)?;
        validate_signatures_complete(&req.immutable_contract)?;

        let block = &req.immutable_contract.contract;
        let asset = Contract::instantiate(
            block.contract_id,
            block.schema_version,
            req.immutable_contract_hash.clone(),
            now,
        );

        if self.asset_exists(&asset.key())? {
            return Err(LifecycleError::AlreadyExists(asset.contract_id));
        }

        self.write_asset(&asset)?;
        let tx_id = self.gateway.current_transaction_id();

        info!(
            contract_id = asset.contract_id,
            tx_id = %tx_id,
            "contract instantiated"
        );

        Ok(CreateAssetResponse {
            contract_id: asset.contract_id,
            tx_id,
        })
    }

    /// Void an active contract.
    pub fn void_asset(
        &mut self,
        envelope: &str,
        now: DateTime<Utc>,
    ) -> Result<TxResponse, LifecycleError> {
        let req: VoidAssetReq = decode_envelope(envelope)?;
        self.transition(
            &req.immutable_contract,
            &req.immutable_contract_hash,
            req.contract_id,
            req.package_id,
            &req.package_hash,
            TransitionAction::Void,
            now,
        )
    }

    /// Expire an active contract.
    pub fn expire_asset(
        &mut self,
        envelope: &str,
        now: DateTime<Utc>,
    ) -> Result<TxResponse, LifecycleError> {
        let req: ExpireAssetReq = decode_envelope(envelope)?;
        self.transition(
            &req.immutable_contract,
            &req.immutable_contract_hash,
            req.contract_id,
            req.package_id,
            &req.package_hash,
            TransitionAction::Expire,
            now,
        )
    }

    /// Release an active conditional-release contract.
    pub fn release_asset(
        &mut self,
        envelope: &str,
        now: DateTime<Utc>,
    ) -> Result<TxResponse, LifecycleError> {
        let req: ReleaseAssetReq = decode_envelope(envelope)?;
        self.transition(
            &req.immutable_contract,
            &req.immutable_contract_hash,
            req.contract_id,
            req.package_id,
            &req.package_hash,
            TransitionAction::Release,
            now,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn transition(
        &mut self,
        document: &ImmutableContract,
        claimed_hash: &str,
        contract_id: i64,
        package_id: i64,
        package_hash: &str,
        action: TransitionAction,
        now: DateTime<Utc>,
    ) -> Result<TxResponse, LifecycleError> {
        verify_binding(document, claimed_hash)?;
        check_schema_version(document)?;
        validate_document(document)?;

        let mut asset = self.read_asset(&contract_id.to_string())?;
        check_transition(asset.state, action)?;

        asset.apply(action, package_id, package_hash.to_string(), now);
        self.write_asset(&asset)?;
        let tx_id = self.gateway.current_transaction_id();

        info!(
            contract_id,
            action = %action,
            new_state = %asset.state,
            tx_id = %tx_id,
            "contract state advanced"
        );

        Ok(TxResponse { tx_id })
    }

    /// Return the asset stored under the given id.
    pub fn read_asset(&self, id: &str) -> Result<Contract, LifecycleError> {
        let bytes = self
            .gateway
            .get(id)?
            .ok_or_else(|| LifecycleError::NotFound(id.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| LifecycleError::Decode(e.to_string()))
    }

    /// Whether an asset exists under the given id.
    pub fn asset_exists(&self, id: &str) -> Result<bool, LifecycleError> {
        Ok(self.gateway.get(id)?.is_some())
    }

    /// All assets in the ledger, in key order.
    pub fn get_all_assets(&self) -> Result<Vec<Contract>, LifecycleError> {
        let mut assets = Vec::new();

        for (_, value) in self.gateway.range_scan("", "")? {
            let asset =
                serde_json::from_slice(&value).map_err(|e| LifecycleError::Decode(e.to_string()))?;
            assets.push(asset);
        }

        Ok(assets)
    }

    fn write_asset(&mut self, asset: &Contract) -> Result<(), LifecycleError> {
        let bytes =
            serde_json::to_vec(asset).map_err(|e| LifecycleError::Serialization(e.to_string()))?;
        self.gateway.put(&asset.key(), &bytes)?;
        Ok(())
    }
}

fn verify_binding(
    document: &ImmutableContract,
    claimed_hash: &str,
) -> Result<(), LifecycleError> {
    if !digest::verify(document, claimed_hash)? {
        return Err(LifecycleError::HashMismatch);
    }
    Ok(())
}

fn check_schema_version(document: &ImmutableContract) -> Result<(), LifecycleError> {
    if document.contract.schema_version != document.contract.definition.schema_version {
        return Err(LifecycleError::SchemaVersionMismatch);
    }
    Ok(())
}
