//! Contract document validation rules
//!
//! Each rule group is an independent, pure function over the relevant
//! substructure; context such as the signature method id or the
//! evidence-required flag is passed explicitly. Rules evaluate in a fixed
//! precedence and short-circuit at the first violation, returning a
//! descriptive [`DomainError::Validation`]. Nothing here touches I/O or
//! mutates its input.

use crate::error::{DomainError, Result};
use crate::model::{
    ConstructedContentItem, ContractBlock, ContractProxyInstructions, ContractSignaturePackage,
    ImmutableContract, KeyInfo, ReleaseInstructionDetail, SignPackageMethod, SignatureMethod,
};

/// Minimum length of conditional release instructions.
pub const INSTRUCTION_MIN_LEN: usize = 60;

fn rule(message: &str) -> DomainError {
    DomainError::Validation(message.to_string())
}

/// Validate the contract block against its captured definition.
pub fn validate_contract_block(block: &ContractBlock) -> Result<()> {
    let d = &block.definition;

    if block.contract_family_id != d.contract_family_id {
        return Err(rule("invalid contract family id"));
    }

    if block.contract_type_id != d.contract_type {
        return Err(rule("invalid contract type id"));
    }

    if block.contract_type_version == 0 {
        return Err(rule("invalid contract type version"));
    }

    if block.storage_years < 1 || block.storage_years > 30 {
        return Err(rule("invalid storage years"));
    }

    let opt = &block.contract_options;

    if let Some(expiry) = opt.expiry_date {
        if expiry < block.sealed_on_date {
            return Err(rule("invalid expiry date"));
        }

        if opt.days_to_sign < 1 {
            return Err(rule("invalid days to sign"));
        }

        if opt.allow_signature_extension && opt.max_days_to_sign < 1 {
            return Err(rule("invalid days to sign extension"));
        }
    }

    Ok(())
}

/// Validate the signature method triple.
pub fn validate_signature_method(method: &SignatureMethod) -> Result<()> {
    if method.signature_type.is_empty() {
        return Err(rule("invalid signature type"));
    }

    if method.signature_type != "advanced" && method.signature_type != "qualified" {
        return Err(rule("invalid signature type"));
    }

    if !(1..=3).contains(&method.package_method_id) {
        return Err(rule("invalid package method id"));
    }

    if method.signature_provider != "Subskribo" && method.signature_provider != "Connective" {
        return Err(rule("invalid signature provider"));
    }

    Ok(())
}

/// Validate conditional release instructions.
///
/// `evidence_required` comes from the contract definition options.
pub fn validate_release_instructions(
    detail: &ReleaseInstructionDetail,
    evidence_required: bool,
) -> Result<()> {
    if detail.instructions.len() < INSTRUCTION_MIN_LEN {
        return Err(rule("invalid instructions"));
    }

    if !detail.is_custom_release {
        if detail.standard_release_template_id < 1 {
            return Err(rule("invalid standard release template id"));
        }
    } else if let Some(notary_package) = &detail.notary_package {
        if detail.notary_signature.is_empty() {
            return Err(rule("invalid notary signature"));
        }

        if notary_package.approval_state != "none" {
            if detail.acceptance_package.is_none() {
                return Err(rule("invalid acceptance package"));
            }

            if detail.acceptance_signature.is_empty() {
                return Err(rule("invalid acceptance signature"));
            }
        }
    } else {
        // verifier-consensus path
        if detail.consensus_method.is_empty() {
            return Err(rule("invalid consensus method"));
        }

        if evidence_required && !detail.is_evidence_required_for_release {
            return Err(rule("invalid evidence required for release flag"));
        }
    }

    Ok(())
}

/// Validate proxy beneficiary instructions.
pub fn validate_proxy_instructions(instructions: &ContractProxyInstructions) -> Result<()> {
    if instructions.visible_to_all && instructions.instructions.is_empty() {
        return Err(rule("invalid instructions"));
    }

    if instructions.instructions_hash.is_empty() {
        return Err(rule("invalid instructions hash"));
    }

    Ok(())
}

/// Validate a constructed content item.
pub fn validate_constructed_content(item: &ConstructedContentItem) -> Result<()> {
    if item.content_id < 1 {
        return Err(rule("invalid content id"));
    }

    if item.plain_hash.is_empty() {
        return Err(rule("invalid plain hash"));
    }

    Ok(())
}

/// Validate a single signature package under the given package method.
pub fn validate_signature_package(
    package: &ContractSignaturePackage,
    signature_method_id: i64,
) -> Result<()> {
    if package.contract_id < 1 {
        return Err(rule("invalid contract id"));
    }

    if package.contract_hash.is_empty() {
        return Err(rule("invalid contract hash"));
    }

    if package.user_id.is_empty() {
        return Err(rule("invalid user id"));
    }

    if package.user_full_name.is_empty() {
        return Err(rule("invalid user full name"));
    }

    if package.date_signed.is_none() {
        return Err(rule("invalid date signed"));
    }

    if package.signature_type.is_empty() {
        return Err(rule("invalid signature type"));
    }

    if signature_method_id != SignPackageMethod::Embedded.id() {
        if package.signature_id.is_empty() {
            return Err(rule("invalid signature id"));
        }

        if package.ip_address.is_empty() {
            return Err(rule("invalid ip address"));
        }

        if package.signature_provider.is_empty() {
            return Err(rule("invalid signature provider"));
        }

        validate_key_info(&package.key_info)?;

        // The redundant hash check is part of the published rule set; rule
        // ordering is stable across versions, so it stays.
        if package.contract_hash.is_empty() {
            return Err(rule("invalid contract hash"));
        }
    }

    Ok(())
}

/// Validate key material; an x509 certificate stands in for the key triple.
pub fn validate_key_info(key_info: &KeyInfo) -> Result<()> {
    if key_info.x509_certificate.is_empty() {
        if key_info.key_id.is_empty() {
            return Err(rule("invalid key id"));
        }

        if key_info.key_type.is_empty() {
            return Err(rule("invalid key type"));
        }

        if key_info.key_source.is_empty() {
            return Err(rule("invalid key source"));
        }
    }

    Ok(())
}

/// Run the full rule tree over a sealed document, in precedence order.
///
/// Order: contract block, signature method, release instructions (when
/// present), proxy instructions (when present), finalized content (when
/// present), then every collected signature package with its nested key
/// info. The first violated rule aborts.
pub fn validate_document(contract: &ImmutableContract) -> Result<()> {
    let block = &contract.contract;

    validate_contract_block(block)?;
    validate_signature_method(&block.signature_method)?;

    if let Some(release) = &block.release_instructions {
        let evidence_required = block
            .definition
            .options
            .evidence_required_for_conditional_release;
        validate_release_instructions(release, evidence_required)?;
    }

    if let Some(proxy) = &block.proxy_instructions {
        validate_proxy_instructions(proxy)?;
    }

    if let Some(finalized) = &contract.finalized_content {
        validate_constructed_content(finalized)?;
    }

    for signed in &contract.contract_signatures.signatures {
        validate_signature_package(
            &signed.contract_signature_package,
            block.signature_method.package_method_id,
        )?;
    }

    Ok(())
}
