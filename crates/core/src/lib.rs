//! Core infrastructure for the CovenantCore contract engine.
//!
//! This crate provides the shared types, traits, and utilities used
//! across the CovenantCore workspace: configuration, logging setup, and
//! the ledger state gateway.

pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;

pub use config::{Config, LedgerConfig, LoggingConfig, NodeConfig};
pub use error::CoreError;
pub use ledger::{LedgerError, LedgerGateway, MemoryLedger};

#[cfg(feature = "sqlite")]
pub use ledger::SqliteLedger;
