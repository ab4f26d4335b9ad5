//! Canonical content digest
//!
//! Digests are SHA-256 over the compact JSON representation of a value,
//! encoded as standard (padded) base64. The hash is defined over the
//! serialized byte form, not over a re-derived structural equality: two
//! documents that parse identically but serialize with a different field
//! order produce different digests, which binds the hash to the exact bytes
//! originally agreed to.
//!
//! Canonical form v1: `serde_json` compact output, struct fields in
//! declaration order, RFC 3339 UTC timestamps, absent optionals as `null`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use sha2::{Digest as _, Sha256};

use crate::error::{DomainError, Result};

/// Length of a base64-encoded SHA-256 digest, padding included.
pub const SHA256_HASH_BASE64_LEN: usize = 44;

/// Compute the canonical digest of a value.
///
/// Fails with [`DomainError::EmptyInput`] when the value serializes to the
/// JSON `null` literal (an absent value carries nothing to bind a hash to),
/// and with [`DomainError::Serialization`] when serialization itself fails.
pub fn digest<T: Serialize>(value: &T) -> Result<String> {
    let bytes =
        serde_json::to_vec(value).map_err(|e| DomainError::Serialization(e.to_string()))?;

    if bytes == b"null" {
        return Err(DomainError::EmptyInput);
    }

    let hash = Sha256::digest(&bytes);
    Ok(STANDARD.encode(hash))
}

/// Compare a value's canonical digest against a claimed hash.
///
/// A `false` result is a hash-binding failure; callers must reject the
/// value, never ignore the mismatch.
pub fn verify<T: Serialize>(value: &T, claimed_hash: &str) -> Result<bool> {
    Ok(digest(value)? == claimed_hash)
}
