//! Integration tests for the CovenantCore workspace
//!
//! This test suite validates:
//! - Full lifecycle flows (create, void, expire, release) across crates
//! - Hash binding of submitted documents to the decoded envelope
//! - Signature completeness at instantiation
//! - Ledger gateway interchangeability (memory and SQLite adapters)


#[cfg(test)]
mod binding_tests;

#[cfg(test)]
mod lifecycle_flow_tests;

#[cfg(test)]
mod sqlite_gateway_tests;
