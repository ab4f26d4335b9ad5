//! Signature completeness checking
//!
//! Before a contract may be instantiated, the consent phase must be fully
//! and correctly executed: every participant holding the signatory role must
//! have produced a signature package bound to the sealed contract block.

use crate::digest::SHA256_HASH_BASE64_LEN;
use crate::error::{DomainError, Result};
use crate::model::{role, ImmutableContract, SignPackageMethod};

/// Length of a base64-encoded RSA-2048 signature.
pub const SIGNATURE_RSA2048_BASE64_LEN: usize = 344;

fn completeness(message: &str) -> DomainError {
    DomainError::Validation(message.to_string())
}

fn package_err(user_id: &str, user_name: &str, detail: &str) -> DomainError {
    DomainError::Validation(format!(
        "contract signature package for user id '{user_id}' and name '{user_name}', has error: {detail}"
    ))
}

/// Verify that the consent phase is complete and internally consistent.
///
/// Fails fast at the first missing or invalid signatory; every failure
/// names the offending user.
pub fn validate_signatures_complete(contract: &ImmutableContract) -> Result<()> {
    let signatures = &contract.contract_signatures;

    if signatures.contract_hash.len() != SHA256_HASH_BASE64_LEN {
        return Err(completeness(
            "contract signatures block does not have a contract hash set, or is not of correct length",
        ));
    }

    let signed_pack_count = signatures.signatures.len();
    if signed_pack_count == 0 {
        return Err(completeness(
            "contract signatures block does not have any signature packages set",
        ));
    }

    let signatory_count = contract.contract.signatory_count();
    if signed_pack_count != signatory_count {
        return Err(completeness(
            "contract signatures block does not have the same number of signature packages as there are signatories",
        ));
    }

    let method = contract.contract.signature_method.package_method();
    let is_embedded = method == SignPackageMethod::Embedded;

    // The constructed (2) and embedded (3) package methods gate further
    // checks: finalized-content presence, and the constructed-content id
    // binding of each package. Those ship with the next rule version;
    // contracts sealed under the current rules must not be rejected
    // retroactively, so until then both stay no-ops.

    for participant in &contract.contract.participants {
        if !participant.has_role(role::SIGNATORY) {
            continue;
        }

        let signed = signatures
            .signatures
            .iter()
            .find(|s| s.contract_signature_package.user_id == participant.user_id)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "contract signatures block does not have a signature package for signatory user id '{}'",
                    participant.user_id
                ))
            })?;

        let package = &signed.contract_signature_package;
        let user_id = &package.user_id;
        let user_name = &package.user_full_name;

        if package.user_full_name.is_empty() {
            return Err(package_err(user_id, user_name, "full name not set"));
        }

        if package.date_signed.is_none() {
            return Err(package_err(user_id, user_name, "signed on date not set"));
        }

        if package.contract_hash.len() != SHA256_HASH_BASE64_LEN {
            return Err(package_err(
                user_id,
                user_name,
                "package hash not set or incorrect length",
            ));
        } else if signatures.contract_hash != package.contract_hash {
            return Err(package_err(
                user_id,
                user_name,
                "contract hash does not match contract hash in signature package",
            ));
        }

        if package.contract_id != contract.contract.contract_id {
            return Err(package_err(
                user_id,
                user_name,
                "contract id does not match contract id in signature package",
            ));
        }

        if !is_embedded {
            if signed.contract_signature_package_hash.len() != SHA256_HASH_BASE64_LEN {
                return Err(package_err(
                    user_id,
                    user_name,
                    "package hash not of correct length",
                ));
            }

            if signed.signature.is_empty() {
                return Err(package_err(user_id, user_name, "missing signature"));
            } else if signed.signature.len() != SIGNATURE_RSA2048_BASE64_LEN {
                return Err(package_err(
                    user_id,
                    user_name,
                    "signature is not of correct length",
                ));
            }
        }
    }

    Ok(())
}
