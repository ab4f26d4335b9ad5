//! Domain crate for the CovenantCore contract engine
//!
//! This crate contains pure domain logic with no I/O dependencies:
//! - The sealed contract document model
//! - Canonical digest computation and verification
//! - Structural and business-rule validation
//! - Signature completeness checking

pub mod digest;
pub mod error;
pub mod model;
pub mod signatures;
pub mod validate;

pub use digest::{digest, verify, SHA256_HASH_BASE64_LEN};
pub use error::{DomainError, Result};
pub use model::{
    role, ConstructedContentItem, ContentItem, ContentSignature, ContractBlock,
    ContractDefinition, ContractDefinitionOptions, ContractIdentityClaim, ContractOption,
    ContractOptions, ContractOrganization, ContractParticipant, ContractParticipantPosition,
    ContractParticipantVirtualPosition, ContractProxyInstructions, ContractSignaturePackage,
    ContractSignatures, ContractUserRoleDefinition, CreatorAcceptancePackage, ImmutableContract,
    KeyInfo, NotaryInstructPackage, ReleaseInstructionDetail, SignPackageMethod, SignatureMethod,
    SignedContractSignature,
};
pub use signatures::{validate_signatures_complete, SIGNATURE_RSA2048_BASE64_LEN};
pub use validate::{
    validate_constructed_content, validate_contract_block, validate_document, validate_key_info,
    validate_proxy_instructions, validate_release_instructions, validate_signature_method,
    validate_signature_package, INSTRUCTION_MIN_LEN,
};
