//! Ledger-resident contract asset
//!
//! The mutable counterpart of a sealed contract document: created once at
//! instantiation, keyed by the string-formatted contract id, advanced
//! through a small set of terminal states, with every transition recorded
//! in an append-only change log.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;

/// Lifecycle state of a contract asset.
///
/// `Active` is the only state with outbound transitions; the other three
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractState {
    Active,
    Voided,
    Expired,
    Released,
}

impl ContractState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Voided => "voided",
            Self::Expired => "expired",
            Self::Released => "released",
        }
    }
}

impl fmt::Display for ContractState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state-changing action applied to an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionAction {
    Void,
    Expire,
    Release,
}

impl TransitionAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Expire => "expire",
            Self::Release => "release",
        }
    }

    pub fn target_state(self) -> ContractState {
        match self {
            Self::Void => ContractState::Voided,
            Self::Expire => ContractState::Expired,
            Self::Release => ContractState::Released,
        }
    }
}

impl fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that `action` is legal from `state`.
///
/// Terminal states admit nothing; the conflict message names both the
/// blocking state and the attempted action.
pub fn check_transition(
    state: ContractState,
    action: TransitionAction,
) -> Result<(), LifecycleError> {
    use ContractState::*;
    use TransitionAction::*;

    let message = match (state, action) {
        (Active, _) => return Ok(()),

        (Voided, Void) => "contract already voided",
        (Voided, Expire) => "contract voided, cannot expire",
        (Voided, Release) => "contract voided, cannot release",

        (Expired, Void) => "contract expired, cannot void",
        (Expired, Expire) => "contract already expired",
        (Expired, Release) => "contract expired, cannot release",

        (Released, Void) => "contract released, cannot void",
        (Released, Expire) => "contract released, cannot expire",
        (Released, Release) => "contract already released",
    };

    Err(LifecycleError::StateConflict(message.to_string()))
}

/// One immutable record per applied transition. Never edited or removed
/// once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub package_id: i64,
    pub package_hash: String,
    pub package_date: DateTime<Utc>,
    pub caller_sdn: String,
    pub action: String,
    pub new_state: ContractState,
}

/// The ledger-resident contract asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub contract_id: i64,
    pub version: i64,
    #[serde(rename = "contractHash")]
    pub contract_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: ContractState,
    pub changes: Vec<Change>,
}

impl Contract {
    /// Create the initial asset for a newly instantiated contract.
    pub fn instantiate(
        contract_id: i64,
        version: i64,
        contract_hash: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            contract_id,
            version,
            contract_hash,
            created_at: now,
            updated_at: now,
            state: ContractState::Active,
            changes: Vec::new(),
        }
    }

    /// The ledger key for this asset.
    pub fn key(&self) -> String {
        self.contract_id.to_string()
    }

    /// Apply a legality-checked transition and append its change record.
    pub fn apply(
        &mut self,
        action: TransitionAction,
        package_id: i64,
        package_hash: String,
        now: DateTime<Utc>,
    ) {
        self.state = action.target_state();
        self.updated_at = now;

        self.changes.push(Change {
            package_id,
            package_hash,
            package_date: now,
            caller_sdn: String::new(),
            action: action.as_str().to_string(),
            new_state: self.state,
        });
    }
}
