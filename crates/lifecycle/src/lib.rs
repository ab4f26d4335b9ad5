//! Contract lifecycle engine for CovenantCore
//!
//! Ties the domain rules to ledger-resident state: request envelopes are
//! decoded, hash-bound, validated, and applied to the `Contract` asset
//! through a terminal-state machine with an append-only change log.

pub mod asset;
pub mod error;
pub mod request;
pub mod service;

pub use asset::{check_transition, Change, Contract, ContractState, TransitionAction};
pub use error::LifecycleError;
pub use request::{
    decode_envelope, encode_envelope, CreateAssetResponse, ExpireAssetReq, NewAssetReq,
    ReleaseAssetReq, TxResponse, VoidAssetReq,
};
pub use service::LifecycleService;
