//! Edge case tests: malformed input, reserved keys and corrupt storage.

use agentic_attest::{
    AttestError, Contract, FileLedger, Ledger, MemoryLedger, Transaction, NO_DATA_MESSAGE,
};
use serde_json::json;

fn contract() -> Contract {
    Contract::default()
}

#[test]
fn edge_every_function_rejects_wrong_arity() {
    let mut ledger = MemoryLedger::new();
    let too_many: Vec<String> = (0..6).map(|i| format!("a{i}")).collect();

    for function in agentic_attest::Function::ALL {
        let err = contract()
            .invoke(&mut ledger, function.name(), &too_many)
            .unwrap_err();
        match err {
            AttestError::ArgumentCount { expected, actual } => {
                assert_eq!(expected, function.arity());
                assert_eq!(actual, 6);
            }
            other => panic!("{function}: expected ArgumentCount, got {other:?}"),
        }
    }
    assert!(ledger.is_empty());
}

#[test]
fn edge_function_names_are_case_sensitive() {
    let mut ledger = MemoryLedger::new();
    for name in ["CreateId", "createid", "shareInfo", "createAttestation", ""] {
        let err = contract()
            .invoke(&mut ledger, name, &["x"])
            .unwrap_err();
        assert!(
            matches!(err, AttestError::UnknownFunction(_)),
            "{name:?} should be unknown"
        );
    }
}

#[test]
fn edge_unicode_and_empty_values_round_trip() {
    let mut ledger = MemoryLedger::new();
    contract()
        .invoke(&mut ledger, "createId", &["üser-1", "Zoë «Ω» 漢字", ""])
        .unwrap();
    let view = contract()
        .invoke(&mut ledger, "queryClaimsById", &["üser-1"])
        .unwrap();
    assert_eq!(
        view.json().unwrap(),
        json!({"user": "üser-1", "claims": {"fullname": "Zoë «Ω» 漢字", "docid": ""}})
    );
}

#[test]
fn edge_identity_ids_cannot_collide_with_set_keys() {
    let mut ledger = MemoryLedger::new();
    for id in ["requestAttest_bank", "attester_bank", ""] {
        let err = contract()
            .invoke(&mut ledger, "createId", &[id, "n", "d"])
            .unwrap_err();
        assert!(
            matches!(err, AttestError::InvalidArgument(_)),
            "{id:?} should be rejected"
        );
    }
    assert!(ledger.is_empty());
}

#[test]
fn edge_empty_attester_is_a_regular_attester() {
    let mut ledger = MemoryLedger::new();
    contract()
        .invoke(&mut ledger, "requestAttestation", &["", "c", "n", "u"])
        .unwrap();
    contract()
        .invoke(&mut ledger, "requestAttestation", &["x", "c", "n", "u2"])
        .unwrap();

    let pending = contract()
        .invoke(&mut ledger, "queryRequestAttestation", &[""])
        .unwrap();
    assert_eq!(
        pending.json().unwrap(),
        json!([{"user": "c", "claims": {"n": "u"}}])
    );
    assert_eq!(
        ledger.keys().unwrap(),
        vec!["requestAttest_", "requestAttest_x"]
    );
}

#[test]
fn edge_reserved_identity_ids_are_not_found_on_read() {
    let mut ledger = MemoryLedger::new();
    contract()
        .invoke(&mut ledger, "requestAttestation", &["bank", "c", "n", "u"])
        .unwrap();

    for id in ["requestAttest_bank", "attester_bank", ""] {
        for (name, args) in [
            ("queryClaimsById", vec![id]),
            ("removeUser", vec![id]),
            ("shareinfo", vec![id, "bank", "fullname", "t", "30"]),
        ] {
            let err = contract().invoke(&mut ledger, name, &args).unwrap_err();
            assert!(err.is_not_found(), "{name}({id:?}) gave {err:?}");
        }
    }
    // The request set stored at the aliasing key survives removeUser.
    assert!(ledger.get("requestAttest_bank").unwrap().is_some());
}

#[test]
fn edge_valid_day_bounds() {
    let mut ledger = MemoryLedger::new();
    contract()
        .invoke(&mut ledger, "createId", &["u1", "n", "d"])
        .unwrap();

    contract()
        .invoke(&mut ledger, "shareinfo", &["u1", "a", "fullname", "t", "0"])
        .unwrap();
    contract()
        .invoke(
            &mut ledger,
            "shareinfo",
            &["u1", "a", "fullname", "t", "4294967295"],
        )
        .unwrap();

    for bad in ["4294967296", "7d", ""] {
        let err = contract()
            .invoke(&mut ledger, "shareinfo", &["u1", "a", "fullname", "t", bad])
            .unwrap_err();
        assert!(matches!(err, AttestError::Parse { .. }), "{bad:?}");
    }

    let err = contract()
        .invoke(&mut ledger, "shareinfo", &["u1", "a", "fullname", "t", "-1"])
        .unwrap_err();
    assert!(matches!(err, AttestError::InvalidArgument(_)));
}

#[test]
fn edge_corrupt_set_is_serialization_error_on_query() {
    let mut ledger = MemoryLedger::new();
    ledger
        .put("attester_bank", b"not json at all".to_vec())
        .unwrap();
    let err = contract()
        .invoke(&mut ledger, "queryAttestation", &["bank"])
        .unwrap_err();
    assert!(matches!(err, AttestError::SerializationError(_)));
}

#[test]
fn edge_null_claim_map_reads_as_no_data() {
    let mut ledger = MemoryLedger::new();
    ledger
        .put("requestAttest_bank", br#"{"claim": null}"#.to_vec())
        .unwrap();
    let response = contract()
        .invoke(&mut ledger, "queryRequestAttestation", &["bank"])
        .unwrap();
    assert_eq!(response.json().unwrap(), json!({"error": NO_DATA_MESSAGE}));

    // The set exists, so attesting against it is allowed.
    contract()
        .invoke(&mut ledger, "createAttestion", &["bank", "c", "n", "h"])
        .unwrap();
}

#[test]
fn edge_file_ledger_rejects_unknown_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, br#"{"version": 99, "entries": {}}"#).unwrap();

    let result = FileLedger::open(&path);
    assert!(matches!(result, Err(AttestError::InvalidFileFormat(_))));
}

#[test]
fn edge_file_ledger_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, b"\x00\x01garbage").unwrap();

    assert!(FileLedger::open(&path).is_err());
}

#[test]
fn edge_dropped_transaction_writes_nothing() {
    let mut ledger = MemoryLedger::new();
    {
        let mut tx = Transaction::new(&mut ledger);
        tx.put("u1", b"{}".to_vec()).unwrap();
        tx.delete("u2").unwrap();
    }
    assert!(ledger.is_empty());
}

#[test]
fn edge_identical_invocations_produce_identical_digests() {
    let mut a = MemoryLedger::new();
    let mut b = MemoryLedger::new();
    let args = ["att", "client", "fullname", "https://x"];

    let da = contract()
        .invoke(&mut a, "requestAttestation", &args)
        .unwrap()
        .commit
        .unwrap();
    let db = contract()
        .invoke(&mut b, "requestAttestation", &args)
        .unwrap()
        .commit
        .unwrap();
    assert_eq!(da, db);
    assert_eq!(a.get("requestAttest_att").unwrap(), b.get("requestAttest_att").unwrap());
}
