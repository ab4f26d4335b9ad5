//! Lifecycle flows over the SQLite-backed gateway

use covenant_core::{LedgerGateway, SqliteLedger};
use covenant_lifecycle::{ContractState, LifecycleService};

use crate::test_utils::*;

fn temp_db_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("covenant_it_{}.db", uuid::Uuid::new_v4()))
}

#[test]
fn full_flow_survives_a_gateway_reopen() {
    let db_path = temp_db_path();
    let document = consented_document(&[("c101", "Ada Sigmund")]);

    {
        let gateway = SqliteLedger::open(&db_path, "it-node-1").unwrap();
        let mut service = LifecycleService::new(gateway);
        service
            .create_asset(&create_envelope(&document), op_time())
            .unwrap();
    }

    {
        let gateway = SqliteLedger::open(&db_path, "it-node-1").unwrap();
        let mut service = LifecycleService::new(gateway);

        let asset = service.read_asset(&CONTRACT_ID.to_string()).unwrap();
        assert_eq!(asset.state, ContractState::Active);

        service
            .void_asset(&void_envelope(&document, 3), op_time())
            .unwrap();
    }

    let gateway = SqliteLedger::open(&db_path, "it-node-1").unwrap();
    let service = LifecycleService::new(gateway);
    let asset = service.read_asset(&CONTRACT_ID.to_string()).unwrap();
    assert_eq!(asset.state, ContractState::Voided);
    assert_eq!(asset.changes.len(), 1);

    std::fs::remove_file(db_path).ok();
}

#[test]
fn transaction_ids_carry_the_node_id() {
    let db_path = temp_db_path();
    let mut gateway = SqliteLedger::open(&db_path, "it-node-7").unwrap();

    gateway.put("1", b"x").unwrap();
    assert!(gateway.current_transaction_id().starts_with("it-node-7-tx-"));

    std::fs::remove_file(db_path).ok();
}

#[test]
fn memory_and_sqlite_gateways_store_identical_asset_bytes() {
    let db_path = temp_db_path();
    let document = consented_document(&[("c101", "Ada Sigmund")]);

    let mut memory_service = LifecycleService::new(covenant_core::MemoryLedger::new());
    memory_service
        .create_asset(&create_envelope(&document), op_time())
        .unwrap();

    let mut sqlite_service =
        LifecycleService::new(SqliteLedger::open(&db_path, "it-node-1").unwrap());
    sqlite_service
        .create_asset(&create_envelope(&document), op_time())
        .unwrap();

    let key = CONTRACT_ID.to_string();
    let from_memory = memory_service.gateway().get(&key).unwrap().unwrap();
    let from_sqlite = sqlite_service.gateway().get(&key).unwrap().unwrap();
    assert_eq!(from_memory, from_sqlite);

    std::fs::remove_file(db_path).ok();
}
