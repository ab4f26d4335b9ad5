//! End-to-end lifecycle flows over the memory gateway

use covenant_core::MemoryLedger;
use covenant_lifecycle::{ContractState, LifecycleError, LifecycleService};

use crate::test_utils::*;

fn created_service() -> (LifecycleService<MemoryLedger>, covenant_domain::ImmutableContract) {
    let mut service = LifecycleService::new(MemoryLedger::new());
    let document = consented_document(&[("c101", "Ada Sigmund"), ("c102", "Bram Okafor")]);

    let response = service
        .create_asset(&create_envelope(&document), op_time())
        .expect("create should succeed");
    assert_eq!(response.contract_id, CONTRACT_ID);

    (service, document)
}

#[test]
fn created_asset_is_active_with_empty_history() {
    let (service, _) = created_service();

    let asset = service.read_asset(&CONTRACT_ID.to_string()).unwrap();
    assert_eq!(asset.state, ContractState::Active);
    assert_eq!(asset.version, 3);
    assert!(asset.changes.is_empty());
}

#[test]
fn duplicate_create_is_rejected() {
    let (mut service, document) = created_service();

    let result = service.create_asset(&create_envelope(&document), op_time());
    assert!(matches!(result, Err(LifecycleError::AlreadyExists(_))));
}

#[test]
fn void_expire_release_succeed_exactly_once_from_active() {
    for (index, action) in ["void", "expire", "release"].iter().enumerate() {
        let (mut service, document) = created_service();
        let package_id = 100 + index as i64;

        let envelope = match *action {
            "void" => void_envelope(&document, package_id),
            "expire" => expire_envelope(&document, package_id),
            _ => release_envelope(&document, package_id),
        };

        let apply = |service: &mut LifecycleService<MemoryLedger>| match *action {
            "void" => service.void_asset(&envelope, op_time()),
            "expire" => service.expire_asset(&envelope, op_time()),
            _ => service.release_asset(&envelope, op_time()),
        };

        apply(&mut service).expect("first transition should succeed");

        let asset = service.read_asset(&CONTRACT_ID.to_string()).unwrap();
        assert_eq!(asset.changes.len(), 1);
        assert_eq!(asset.changes[0].action, *action);
        assert_eq!(asset.changes[0].package_id, package_id);
        assert_eq!(asset.changes[0].new_state, asset.state);

        let second = apply(&mut service);
        match second {
            Err(LifecycleError::StateConflict(message)) => {
                assert!(message.contains("already"), "unexpected message: {message}");
            }
            other => panic!("expected state conflict, got {other:?}"),
        }
    }
}

#[test]
fn terminal_states_block_every_other_action() {
    let (mut service, document) = created_service();
    service
        .void_asset(&void_envelope(&document, 1), op_time())
        .unwrap();

    let expire = service.expire_asset(&expire_envelope(&document, 2), op_time());
    match expire {
        Err(LifecycleError::StateConflict(message)) => {
            assert_eq!(message, "contract voided, cannot expire");
        }
        other => panic!("expected state conflict, got {other:?}"),
    }

    let release = service.release_asset(&release_envelope(&document, 3), op_time());
    match release {
        Err(LifecycleError::StateConflict(message)) => {
            assert_eq!(message, "contract voided, cannot release");
        }
        other => panic!("expected state conflict, got {other:?}"),
    }

    // The failed attempts must not have grown the history.
    let asset = service.read_asset(&CONTRACT_ID.to_string()).unwrap();
    assert_eq!(asset.changes.len(), 1);
}

#[test]
fn change_records_carry_the_supplied_timestamp() {
    let (mut service, document) = created_service();
    let later = op_time() + chrono::Duration::days(2);

    service
        .void_asset(&void_envelope(&document, 7), later)
        .unwrap();

    let asset = service.read_asset(&CONTRACT_ID.to_string()).unwrap();
    assert_eq!(asset.updated_at, later);
    assert_eq!(asset.changes[0].package_date, later);
    // Creation time is untouched by later transitions.
    assert_eq!(asset.created_at, op_time());
}

#[test]
fn incomplete_consent_blocks_instantiation_and_names_the_user() {
    let mut service = LifecycleService::new(MemoryLedger::new());
    let mut document = consented_document(&[("c101", "Ada Sigmund"), ("c102", "Bram Okafor")]);

    // Repoint one package to an unknown user: the count matches but c102 no
    // longer has a package of their own.
    document.contract_signatures.signatures[1]
        .contract_signature_package
        .user_id = "c999".to_string();

    let result = service.create_asset(&create_envelope(&document), op_time());
    match result {
        Err(LifecycleError::Validation(err)) => {
            assert!(err.to_string().contains("'c102'"), "got: {err}");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(service.gateway().is_empty());
}

#[test]
fn signatory_count_must_match_package_count() {
    let mut service = LifecycleService::new(MemoryLedger::new());
    let mut document = consented_document(&[("c101", "Ada Sigmund"), ("c102", "Bram Okafor")]);
    document.contract_signatures.signatures.pop();

    let result = service.create_asset(&create_envelope(&document), op_time());
    match result {
        Err(LifecycleError::Validation(err)) => {
            assert!(err
                .to_string()
                .contains("same number of signature packages"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn get_all_assets_reflects_the_latest_written_state() {
    let (mut service, document) = created_service();
    service
        .void_asset(&void_envelope(&document, 5), op_time())
        .unwrap();

    let assets = service.get_all_assets().unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].contract_id, CONTRACT_ID);
    assert_eq!(assets[0].state, ContractState::Voided);
    assert_eq!(assets[0].changes.len(), 1);
}
