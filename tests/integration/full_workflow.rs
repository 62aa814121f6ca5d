//! Integration test: full end-to-end workflow through the router.
//!
//! Tests the complete lifecycle:
//! 1. Register identities
//! 2. Share a claim with an attester
//! 3. Request attestations
//! 4. Publish an attestation and retire the request
//! 5. Query both sets
//! 6. Remove an identity and persist across reopen

use agentic_attest::registry::load_identity;
use agentic_attest::{
    AttestError, AttesterId, Contract, ContractConfig, Credential, FileLedger, IdentityId, Ledger,
    MemoryLedger, NO_DATA_MESSAGE,
};
use serde_json::json;

#[test]
fn full_workflow_register_to_attestation() {
    let mut ledger = MemoryLedger::new();
    let contract = Contract::default();

    // ── Step 1: Register identities ─────────────────────────────────────
    contract
        .invoke(&mut ledger, "createId", &["alice", "Alice Liddell", "P-1"])
        .expect("createId alice");
    contract
        .invoke(&mut ledger, "createId", &["bob", "Bob Dylan", "P-2"])
        .expect("createId bob");

    let alice = contract
        .invoke(&mut ledger, "queryClaimsById", &["alice"])
        .unwrap();
    assert_eq!(
        alice.json().unwrap(),
        json!({"user": "alice", "claims": {"docid": "P-1", "fullname": "Alice Liddell"}})
    );

    // ── Step 2: Share a claim ───────────────────────────────────────────
    contract
        .invoke(
            &mut ledger,
            "shareinfo",
            &["alice", "registry", "fullname", "tok-a", "30"],
        )
        .expect("shareinfo");
    let record = load_identity(&ledger, &IdentityId::new("alice")).unwrap();
    assert_eq!(
        record.credential(&AttesterId::new("registry"), "fullname"),
        Some(&Credential::new("tok-a", 30))
    );

    // ── Step 3: Request attestations ────────────────────────────────────
    contract
        .invoke(
            &mut ledger,
            "requestAttestation",
            &["registry", "alice", "fullname", "https://docs/a"],
        )
        .unwrap();
    contract
        .invoke(
            &mut ledger,
            "requestAttestation",
            &["registry", "bob", "docid", "https://docs/b"],
        )
        .unwrap();

    let pending = contract
        .invoke(&mut ledger, "queryRequestAttestation", &["registry"])
        .unwrap();
    assert_eq!(
        pending.json().unwrap(),
        json!([
            {"user": "alice", "claims": {"fullname": "https://docs/a"}},
            {"user": "bob", "claims": {"docid": "https://docs/b"}}
        ])
    );

    // ── Step 4: Publish an attestation ──────────────────────────────────
    let attested = contract
        .invoke(
            &mut ledger,
            "createAttestion",
            &["registry", "alice", "fullname", "0xabc"],
        )
        .unwrap();
    let commit = attested.commit.expect("attestation commits");
    assert_eq!(
        commit.written_keys,
        vec!["attester_registry", "requestAttest_registry"]
    );

    // ── Step 5: Query both sets ─────────────────────────────────────────
    let pending = contract
        .invoke(&mut ledger, "queryRequestAttestation", &["registry"])
        .unwrap();
    assert_eq!(
        pending.json().unwrap(),
        json!([{"user": "bob", "claims": {"docid": "https://docs/b"}}])
    );

    let issued = contract
        .invoke(&mut ledger, "queryAttestation", &["registry"])
        .unwrap();
    assert_eq!(
        issued.json().unwrap(),
        json!([{"user": "alice", "claims": {"fullname": "0xabc"}}])
    );

    // ── Step 6: Remove an identity ──────────────────────────────────────
    contract
        .invoke(&mut ledger, "removeUser", &["alice"])
        .unwrap();
    let err = contract
        .invoke(&mut ledger, "queryClaimsById", &["alice"])
        .unwrap_err();
    assert!(err.is_not_found());

    // Sets mentioning alice are untouched.
    let issued = contract
        .invoke(&mut ledger, "queryAttestation", &["registry"])
        .unwrap();
    assert_eq!(
        issued.json().unwrap(),
        json!([{"user": "alice", "claims": {"fullname": "0xabc"}}])
    );
}

#[test]
fn full_workflow_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    let contract = Contract::default();

    {
        let mut ledger = FileLedger::open(&path).unwrap();
        contract
            .invoke(&mut ledger, "createId", &["u1", "Ada", "D-1"])
            .unwrap();
        contract
            .invoke(&mut ledger, "requestAttestation", &["att", "u1", "fullname", "u"])
            .unwrap();
        contract
            .invoke(&mut ledger, "createAttestion", &["att", "u1", "fullname", "h"])
            .unwrap();
    }

    let mut ledger = FileLedger::open(&path).unwrap();
    assert_eq!(
        ledger.keys().unwrap(),
        vec!["attester_att", "requestAttest_att", "u1"]
    );

    let issued = contract
        .invoke(&mut ledger, "queryAttestation", &["att"])
        .unwrap();
    assert_eq!(
        issued.json().unwrap(),
        json!([{"user": "u1", "claims": {"fullname": "h"}}])
    );

    // Emptied request set reports no data but the key stays.
    let pending = contract
        .invoke(&mut ledger, "queryRequestAttestation", &["att"])
        .unwrap();
    assert_eq!(pending.json().unwrap(), json!({"error": NO_DATA_MESSAGE}));
}

#[test]
fn failed_invocation_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    let contract = Contract::default();

    let mut ledger = FileLedger::open(&path).unwrap();
    contract
        .invoke(&mut ledger, "createId", &["u1", "n", "d"])
        .unwrap();
    let before = std::fs::read(&path).unwrap();

    let err = contract
        .invoke(&mut ledger, "shareinfo", &["u1", "att", "fullname", "t", "3 days"])
        .unwrap_err();
    assert!(matches!(err, AttestError::Parse { .. }));

    let err = contract
        .invoke(&mut ledger, "shareinfo", &["u1", "att", "fullname", "t", "-3"])
        .unwrap_err();
    assert!(matches!(err, AttestError::InvalidArgument(_)));

    let err = contract
        .invoke(&mut ledger, "createAttestion", &["att", "u1", "fullname", "h"])
        .unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn demo_seed_through_router() {
    let mut ledger = MemoryLedger::new();
    let none: [&str; 0] = [];

    let contract = Contract::new(ContractConfig { demo_seed: true });
    let response = contract.invoke(&mut ledger, "initLedger", &none).unwrap();
    assert_eq!(response.commit.unwrap().written_keys.len(), 9);

    let id5 = contract
        .invoke(&mut ledger, "queryClaimsById", &["ID5"])
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(id5["user"], "ID5");
    assert_eq!(id5["claims"]["fullname"], "name5");
    assert_eq!(id5["claims"]["docid"].as_str().unwrap().len(), 32);

    let record = load_identity(&ledger, &IdentityId::new("ID5")).unwrap();
    assert_eq!(
        record.credential(&AttesterId::new("FACEBOOK"), "fullname"),
        Some(&Credential::new("token2", 60))
    );
}
