//! Request envelope codec and operation payloads
//!
//! An inbound envelope is an opaque string: raw (unpadded) standard base64
//! over the compact JSON of one of the request shapes. Responses are plain
//! serde structs; transport encoding is the adapter's concern.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use covenant_domain::ImmutableContract;

use crate::error::LifecycleError;

/// Decode a request envelope into a typed payload.
pub fn decode_envelope<T: DeserializeOwned>(data: &str) -> Result<T, LifecycleError> {
    if data.is_empty() {
        return Err(LifecycleError::Input);
    }

    let bytes = STANDARD_NO_PAD
        .decode(data)
        .map_err(|e| LifecycleError::Decode(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| LifecycleError::Decode(e.to_string()))
}

/// Encode a payload into the envelope form clients submit.
pub fn encode_envelope<T: Serialize>(value: &T) -> Result<String, LifecycleError> {
    let bytes =
        serde_json::to_vec(value).map_err(|e| LifecycleError::Serialization(e.to_string()))?;
    Ok(STANDARD_NO_PAD.encode(bytes))
}

/// Payload for instantiating a contract asset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewAssetReq {
    pub immutable_contract: ImmutableContract,
    pub immutable_contract_hash: String,
    pub notary_ou: String,
}

/// Payload for voiding an active contract.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VoidAssetReq {
    pub immutable_contract: ImmutableContract,
    pub immutable_contract_hash: String,

    pub contract_id: i64,
    #[serde(rename = "packageId")]
    pub package_id: i64,
    #[serde(rename = "packageHash")]
    pub package_hash: String,
}

/// Payload for expiring an active contract.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpireAssetReq {
    pub immutable_contract: ImmutableContract,
    pub immutable_contract_hash: String,
    pub notary_ou: String,

    pub contract_id: i64,
    #[serde(rename = "packageId")]
    pub package_id: i64,
    #[serde(rename = "packageHash")]
    pub package_hash: String,
}

/// Payload for releasing an active contract.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseAssetReq {
    pub immutable_contract: ImmutableContract,
    pub immutable_contract_hash: String,
    pub notary_ou: String,

    pub contract_id: i64,
    #[serde(rename = "packageId")]
    pub package_id: i64,
    #[serde(rename = "packageHash")]
    pub package_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAssetResponse {
    #[serde(rename = "contractId")]
    pub contract_id: i64,
    #[serde(rename = "txId")]
    pub tx_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxResponse {
    #[serde(rename = "txId")]
    pub tx_id: String,
}
