//! Lifecycle operation errors

use covenant_core::LedgerError;
use covenant_domain::DomainError;
use thiserror::Error;

/// Failure taxonomy for lifecycle operations.
///
/// Validation is fail-fast: the first failing gate aborts the operation
/// before the terminal ledger write, so no variant here ever coincides
/// with partial state. Ledger failures pass through unchanged; retry
/// policy is the caller's concern.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The request payload was absent.
    #[error("request payload is empty")]
    Input,

    /// A payload was not decodable base64/JSON.
    #[error("malformed payload: {0}")]
    Decode(String),

    /// The claimed hash does not match the computed digest.
    #[error("invalid immutable contract hash")]
    HashMismatch,

    /// The block and its captured definition disagree on schema version.
    #[error("contract schema version does not match with definition")]
    SchemaVersionMismatch,

    /// A document rule was violated; carries the rule description.
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("the contract {0} does not exist")]
    NotFound(String),

    #[error("the contract {0} already exists")]
    AlreadyExists(i64),

    /// An illegal transition was attempted; the message names both the
    /// attempted action and the blocking state.
    #[error("{0}")]
    StateConflict(String),

    /// Internal serialization failure while preparing a payload or write.
    #[error("serialization failure: {0}")]
    Serialization(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
