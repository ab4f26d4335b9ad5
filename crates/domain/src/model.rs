//! Immutable contract document model
//!
//! The immutable portion of a contract is the essence of the agreement. When
//! a contract moves to the consent phase it is sealed and henceforth read
//! only; its JSON representation is the authoritative record, and a digest of
//! that representation is anchored onto the ledger.
//!
//! Field declaration order is the canonical serialization order. The digest
//! protocol hashes the serialized byte form, so reordering, renaming, or
//! conditionally omitting any field here is a breaking change to every
//! anchored hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Participant role names used throughout the contract document.
pub mod role {
    pub const AGREEMENT: &str = "agreement";
    pub const APPROVER: &str = "approver";
    pub const BENEFICIARY: &str = "beneficiary";
    pub const CONTRACTUAL: &str = "contractual";
    pub const CREATOR: &str = "creator";
    pub const NOTARY: &str = "notary";
    pub const NOTIFIER: &str = "notifier";
    pub const PROXY: &str = "proxy";
    pub const SERVICE_PROVIDER: &str = "service-provider";
    pub const VERIFIER: &str = "verifier";
    pub const SIGNATORY: &str = "signatory";
}

/// Mechanism used to bind signatures to contract content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignPackageMethod {
    #[default]
    Unknown,

    /// No constructed content items; signees sign against a viewing of the
    /// contract block which contains the contract content items.
    OriginalContent,

    /// Signees view constructed content (a content item appended with the
    /// contract details) and sign against the contract block which contains
    /// the hash of that constructed content.
    Constructed,

    /// Placeholders, hashes, and contents are embedded in the document
    /// itself; once all signatures are collected the finalized document
    /// carries everything needed to validate them.
    Embedded,
}

impl SignPackageMethod {
    pub fn from_id(id: i64) -> Self {
        match id {
            1 => Self::OriginalContent,
            2 => Self::Constructed,
            3 => Self::Embedded,
            _ => Self::Unknown,
        }
    }

    pub fn id(self) -> i64 {
        match self {
            Self::Unknown => 0,
            Self::OriginalContent => 1,
            Self::Constructed => 2,
            Self::Embedded => 3,
        }
    }
}

/// The sealed, read-only container for the immutable portion of a contract.
///
/// When ready for instantiation the container is sealed; its JSON form is
/// recorded as a read-only record keyed by contract id and a hash of that
/// JSON is anchored onto the ledger. Instances are owned by the caller and
/// are never persisted by this core.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImmutableContract {
    pub contract: ContractBlock,
    pub contract_hash: String,
    pub contract_signatures: ContractSignatures,
    pub contract_signatures_hash: String,
    pub finalized_content: Option<ConstructedContentItem>,
    pub sealed_on_date: DateTime<Utc>,
}

/// Everything about a contract prior to the consent phase.
///
/// A hash of this block is chained into the signature block and bound into
/// each signature, so any change after the first signature invalidates it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractBlock {
    pub contract_id: i64,
    /// Version of this contract block schema.
    pub schema_version: i64,
    pub language: String,
    /// Must match what is in the definition.
    pub contract_family_id: i64,
    /// The contract type is unique and never changes. Must match the definition.
    pub contract_type_id: i64,
    pub contract_type_version: i64,
    pub created_with_tier_id: i64,
    /// Localized contract name for the language used.
    pub contract_name: String,

    /// Name for this contract as entered by the author.
    pub display_name: String,
    pub description: String,

    pub organizations: Vec<ContractOrganization>,
    pub virtual_positions: Vec<ContractParticipantVirtualPosition>,
    pub participants: Vec<ContractParticipant>,

    pub contract_options: ContractOptions,
    pub content_items: Vec<ContentItem>,
    pub signature_method: SignatureMethod,
    pub storage_years: i64,

    /// Only for a conditional release contract with a proxy beneficiary.
    pub proxy_instructions: Option<ContractProxyInstructions>,
    /// Absent if not a conditional release contract.
    pub release_instructions: Option<ReleaseInstructionDetail>,

    /// Charges and payments are stored outside the contract for privacy;
    /// only the hash of the sealed payment record is chained in here.
    pub contract_payment_hash: String,

    /// The definition used to validate required fields and values.
    pub definition: ContractDefinition,
    pub definition_version: i64,

    /// Date the block was sealed and became ready for consent.
    pub sealed_on_date: DateTime<Utc>,
}

impl ContractBlock {
    /// Number of participants holding the `signatory` role.
    pub fn signatory_count(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| p.has_role(role::SIGNATORY))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractOptions {
    /// Absent if the contract has no expiry date.
    pub expiry_date: Option<DateTime<Utc>>,
    /// Absent if effective immediately upon consent.
    pub effective_date: Option<DateTime<Utc>>,

    pub voidable_by_author_prior_to_instantiation: bool,

    /// Only applicable for conditional release contracts not yet released.
    pub voidable_by_author: bool,

    /// Only applicable for conditional release contracts not yet released.
    pub voidable_by_participants: bool,

    pub voidable_by_notary: bool,

    /// Number of days to sign once the contract enters the consent phase.
    pub days_to_sign: i64,
    /// Max number of days the signing window can be extended to.
    pub max_days_to_sign: i64,
    pub allow_signature_extension: bool,

    /// If true, the per-role minimum KYC levels are overridden by
    /// `min_kyc_level_for_all_roles`.
    pub is_min_kyc_level_for_all_roles: bool,
    pub min_kyc_level_for_all_roles: i64,

    /// Key/value options entered by the author; supports additional options
    /// without a schema change.
    pub options: Vec<ContractOption>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractUserRoleDefinition {
    pub role: String,
    pub min: i64,
    pub max: i64,
    pub include_role_in_count: String,
    pub min_kyc_level: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractOption {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractParticipant {
    /// User type + id, for example c102, n48.
    pub user_id: String,
    /// creator, beneficiary, notary, approver, ...
    pub roles: Vec<String>,
    pub full_name: String,
    pub can_void_contract: bool,
    pub kyc_level: i64,
    pub identity_claims: Vec<ContractIdentityClaim>,
    pub positions: Vec<ContractParticipantPosition>,
}

impl ContractParticipant {
    /// Exact-match membership query against the participant's role set.
    pub fn has_role(&self, role: &str) -> bool {
        if role.is_empty() {
            return false;
        }
        self.roles.iter().any(|r| r == role)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractIdentityClaim {
    pub identity_claim_id: i64,
    /// Required. name, mobile-phone, etc.
    pub claim: String,
    /// '...' if the value is private; notaries hold a separate record.
    pub value: String,
    /// The identity of the verifier, Subskribo, ItsMe, etc.
    pub verifier: String,
    pub kyc_level: i64,
}

/// Only included if the position is current.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractParticipantPosition {
    /// Negative for a virtual organization added by the author.
    pub org_id: i64,
    pub org_legal_name: String,
    pub org_common_name: String,
    pub position: String,
    pub ver_level: i64,
    pub is_virtual: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentItem {
    pub content_id: i64,
    /// Example: conditional_release, agreement, ...
    pub item_role: String,
    /// SHA-256 hash of the content item prior to encryption.
    pub plain_hash: String,
    /// Salt used to encrypt the content item.
    pub plain_salt: String,
    /// SHA-256 hash of the content item after encryption.
    pub encrypted_hash: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructedContentItem {
    pub content_id: i64,
    /// Primary keys of the original contract content items.
    pub orig_content_ids: Vec<i64>,
    /// constructed-agreement or finalized-agreement.
    pub item_role: String,
    pub plain_hash: String,
    pub encrypted_hash: String,
    /// Example: "signature-placeholders,terms".
    pub construct_types: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseInstructionDetail {
    pub instructions: String,
    pub is_custom_release: bool,
    pub standard_release_template_id: i64,

    /// Only applicable if a notary is used with custom release instructions.
    pub notary_package: Option<NotaryInstructPackage>,

    /// If acceptance is required for the notary response, recorded here.
    pub acceptance_package: Option<CreatorAcceptancePackage>,

    pub notary_signature: String,
    pub acceptance_signature: String,

    /// Value copied from the contract definition for convenience.
    pub is_evidence_required_for_release: bool,

    /// Only applicable when verifiers are used for release.
    pub consensus_method: String,

    /// Derived from the consensus method and the number of verifiers,
    /// finalized when the draft contract is ready for sealing.
    pub min_verifiers_for_consensus: i64,
}

/// Required to be signed by the notary when custom release instructions use one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotaryInstructPackage {
    pub contract_id: i64,
    pub request_id: String,
    pub notary_id: String,
    pub supplied_instructions: String,
    #[serde(rename = "notary_instructions")]
    pub approved_instructions: String,
    pub message_to_notary: String,
    pub message_from_notary: String,
    pub approval_pay_trans_id: i64,
    /// none, approved, rejected, acceptance-required.
    pub approval_state: String,
    pub key_info: KeyInfo,
    pub additional_fee_cents: i64,
    /// If true the fee is stored outside the package for privacy.
    pub add_fee_stored_outside: bool,
    pub submitted_date: DateTime<Utc>,
    pub sealed_on_date: DateTime<Utc>,
}

/// Required to be signed by the creator when accepting a notary response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatorAcceptancePackage {
    pub contract_id: i64,
    pub notary_signature_hash: String,
    pub key_info: KeyInfo,
    pub accepted_on_date: DateTime<Utc>,
}

/// The definition captured at sealing time that the block is validated against.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractDefinition {
    pub contract_family_id: i64,

    /// The contract type is unique and never changes; a family is a group of
    /// similar contract types.
    pub contract_type: i64,

    /// Incremented on every change to a particular contract type.
    pub contract_type_version: i64,
    /// Routes the contract to the correct validation rule set.
    pub schema_version: i64,

    pub contract_name_english: String,

    pub options: ContractDefinitionOptions,

    /// User roles with their min/max counts. A role with max 0 is unused.
    pub user_roles: Vec<ContractUserRoleDefinition>,
}

impl ContractDefinition {
    /// Role definition lookup by exact role name.
    pub fn user_role_definition(&self, role: &str) -> Option<&ContractUserRoleDefinition> {
        self.user_roles.iter().find(|ur| ur.role == role)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractDefinitionOptions {
    /// Keys that must be present in the options list with non-empty values.
    pub required_options: Vec<String>,
    /// Keys that are ignored in the options list.
    pub disallowed_options: Vec<String>,

    /// Failsafe: if true, an option key in neither list fails validation.
    pub fail_if_unspecified_options: bool,

    pub evidence_required_for_conditional_release: bool,
    pub allow_voidable_by_author: bool,
    pub allow_voidable_by_author_prior_to_instantiation: bool,
    pub allow_voidable_by_notary: bool,
    pub allow_service_provider: bool,
    pub allow_notary_as_beneficiary: bool,

    /// Requires consensus of all participants flagged with the ability; a
    /// consensual agreement includes every contractual participant.
    pub allow_voidable_by_participants: bool,

    pub allow_min_kyc_level_for_all_roles: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignedContractSignature {
    pub contract_signature_package: ContractSignaturePackage,
    pub contract_signature_package_hash: String,
    /// Signature over the package hash.
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractSignatures {
    /// Chains the contract block into this block and into each signature as
    /// part of the signing process, making the signature block immutable.
    pub contract_hash: String,

    /// Derived from the participant roles; approvers must sign first.
    pub has_approvers: bool,
    /// The date all approvers (if any) approved the contract.
    pub approver_sealed_on_date: Option<DateTime<Utc>>,

    /// The date all signatures completed and the contract became ready to
    /// be instantiated.
    pub sealed_on_date: DateTime<Utc>,

    pub signatures: Vec<SignedContractSignature>,
}

/// The signature by a user for the contract, with optional per-content signatures.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractSignaturePackage {
    pub signature_id: String,
    pub contract_id: i64,
    pub contract_hash: String,
    /// Composite user key, for example c102, n48.
    pub user_id: String,
    pub user_full_name: String,
    /// Absent until the user has signed.
    pub date_signed: Option<DateTime<Utc>>,
    pub ip_address: String,
    /// Where the signature was done, such as Subskribo, ItsMe, Connective.
    pub signature_provider: String,
    /// The type of signature, such as qualified, advanced.
    pub signature_type: String,
    pub key_info: KeyInfo,
    /// Approvers must sign before non-approvers can sign.
    pub is_approver: bool,
    pub content_signatures: Vec<ContentSignature>,
}

/// Signature bound to a content item (such as a document); may come from a
/// third-party provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSignature {
    #[serde(rename = "content__id")]
    pub content_id: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyInfo {
    pub key_id: String,
    pub key_type: String,
    /// azure or local.
    pub key_source: String,
    /// Optional, if available.
    pub key_fingerprint: String,
    /// The x509 certificate used, if supplied.
    pub x509_certificate: String,
}

/// Merged into the contract positions when sealing; trimmed beforehand of
/// positions without a corresponding organization in the contract.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractParticipantVirtualPosition {
    /// Negative for a virtual organization added by the author.
    pub org_id: i64,
    pub user_id: String,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractOrganization {
    pub org_id: i64,

    /// True if this organization was added by the author for this contract;
    /// a virtual organization has a negative org_id.
    pub is_virtual: bool,
    pub legal_name: String,
    pub common_name: String,
    pub org_type: String,
    pub signatories: String,
    pub non_signatories: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureMethod {
    pub package_method_id: i64,
    pub signature_type: String,
    pub signature_provider: String,
}

impl SignatureMethod {
    pub fn package_method(&self) -> SignPackageMethod {
        SignPackageMethod::from_id(self.package_method_id)
    }
}

/// Instructions for a proxy beneficiary on a conditional release contract.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractProxyInstructions {
    /// Only populated if visible to all; otherwise held outside the contract
    /// and visible only to the creator, notary, and proxy beneficiary.
    pub instructions: String,
    pub visible_to_all: bool,
    pub instructions_hash: String,
}
