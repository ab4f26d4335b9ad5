//! Hash-binding and envelope behavior across the decode boundary

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;

use covenant_core::MemoryLedger;
use covenant_domain::digest;
use covenant_lifecycle::{
    decode_envelope, encode_envelope, LifecycleError, LifecycleService, NewAssetReq,
};

use crate::test_utils::*;

#[test]
fn decoded_document_digest_matches_the_pre_encoding_digest() {
    let document = consented_document(&[("c101", "Ada Sigmund")]);
    let before = digest::digest(&document).unwrap();

    let envelope = create_envelope(&document);
    let decoded: NewAssetReq = decode_envelope(&envelope).unwrap();

    assert_eq!(digest::digest(&decoded.immutable_contract).unwrap(), before);
    assert_eq!(decoded.immutable_contract_hash, before);
}

#[test]
fn envelope_decoding_round_trips_the_raw_bytes() {
    let document = consented_document(&[("c101", "Ada Sigmund")]);
    let envelope = create_envelope(&document);

    let bytes = STANDARD_NO_PAD.decode(&envelope).unwrap();
    assert_eq!(STANDARD_NO_PAD.encode(&bytes), envelope);
}

#[test]
fn any_field_tamper_after_sealing_breaks_the_binding() {
    let mut service = LifecycleService::new(MemoryLedger::new());
    let document = consented_document(&[("c101", "Ada Sigmund")]);
    let claimed = digest::digest(&document).unwrap();

    let mut tampered = document.clone();
    tampered.contract.display_name = "Escrow 2024-051 (amended)".to_string();

    let envelope = encode_envelope(&NewAssetReq {
        immutable_contract: tampered,
        immutable_contract_hash: claimed,
        notary_ou: String::new(),
    })
    .unwrap();

    let result = service.create_asset(&envelope, op_time());
    assert!(matches!(result, Err(LifecycleError::HashMismatch)));
    assert!(service.gateway().is_empty());
}

#[test]
fn empty_and_padded_envelopes_are_rejected() {
    let mut service = LifecycleService::new(MemoryLedger::new());

    let result = service.create_asset("", op_time());
    assert!(matches!(result, Err(LifecycleError::Input)));

    // The envelope variant is unpadded; a padded string must not decode.
    let padded = format!("{}==", create_envelope(&consented_document(&[("c1", "A B")])));
    let result = service.create_asset(&padded, op_time());
    assert!(matches!(result, Err(LifecycleError::Decode(_))));
}

#[test]
fn document_digests_are_44_char_padded_base64() {
    let document = consented_document(&[("c101", "Ada Sigmund")]);
    let hash = digest::digest(&document).unwrap();

    assert_eq!(hash.len(), 44);
    assert!(hash.ends_with('='));

    // Stable across repeated serialization of the same sealed value.
    assert_eq!(digest::digest(&document).unwrap(), hash);
}

#[test]
fn schema_version_drift_is_rejected_before_any_write() {
    let mut service = LifecycleService::new(MemoryLedger::new());
    let mut document = consented_document(&[("c101", "Ada Sigmund")]);
    document.contract.schema_version = 4;

    let result = service.create_asset(&create_envelope(&document), op_time());
    assert!(matches!(result, Err(LifecycleError::SchemaVersionMismatch)));
    assert!(service.gateway().is_empty());
}
