use std::fs;

use tempfile::tempdir;
use walleto_core::domain::TransactionKind;
use walleto_core::storage::{JsonFileStorage, KeyValueStorage, TRANSACTIONS_KEY};
use walleto_core::store::LedgerStore;

fn storage_in(dir: &tempfile::TempDir) -> JsonFileStorage {
    JsonFileStorage::new(Some(dir.path().to_path_buf())).expect("json storage")
}

#[test]
fn ledger_roundtrips_through_file_storage() {
    let temp = tempdir().unwrap();

    let mut store = LedgerStore::open(Box::new(storage_in(&temp)));
    let income = store.add_transaction(TransactionKind::Income, 2500.0, "Salary", "March pay");
    let expense = store.add_transaction(TransactionKind::Expense, 42.5, "Food", "Dinner");
    let saved: Vec<_> = store.transactions().to_vec();
    drop(store);

    let reopened = LedgerStore::open(Box::new(storage_in(&temp)));
    assert_eq!(reopened.transactions(), &saved[..]);
    assert_eq!(reopened.transactions()[0].id, expense);
    assert_eq!(reopened.transactions()[1].id, income);
    assert_eq!(reopened.total_income(), 2500.0 + 5000.0);
    assert_eq!(reopened.total_expense(), 970.0 + 42.5);
}

#[test]
fn deleting_everything_persists_an_empty_ledger() {
    let temp = tempdir().unwrap();

    let mut store = LedgerStore::open(Box::new(storage_in(&temp)));
    let ids: Vec<_> = store.transactions().iter().map(|t| t.id.clone()).collect();
    for id in ids {
        store.delete_transaction(&id);
    }
    assert!(store.is_empty());
    drop(store);

    // An explicitly emptied ledger must stay empty, not re-seed.
    let reopened = LedgerStore::open(Box::new(storage_in(&temp)));
    assert!(reopened.is_empty());
    assert_eq!(reopened.balance(), 0.0);
    assert!(reopened.category_breakdown().is_empty());
}

#[test]
fn seeds_when_no_value_is_stored() {
    let temp = tempdir().unwrap();
    let store = LedgerStore::open(Box::new(storage_in(&temp)));
    assert_seeded(&store);
}

#[test]
fn seeds_on_sentinel_and_blank_values() {
    for stored in ["undefined", "null", "", "   \n"] {
        let temp = tempdir().unwrap();
        let storage = storage_in(&temp);
        storage.write(TRANSACTIONS_KEY, stored).unwrap();
        let store = LedgerStore::open(Box::new(storage));
        assert_seeded(&store);
    }
}

#[test]
fn seeds_on_malformed_json_and_clears_the_bad_value() {
    let temp = tempdir().unwrap();
    let storage = storage_in(&temp);
    storage.write(TRANSACTIONS_KEY, "{definitely not json").unwrap();

    let store = LedgerStore::open(Box::new(storage.clone()));
    assert_seeded(&store);
    assert_eq!(
        storage.read(TRANSACTIONS_KEY).unwrap(),
        None,
        "corrupted value should be cleared"
    );
}

#[test]
fn seeds_when_stored_value_is_not_a_list() {
    let temp = tempdir().unwrap();
    let storage = storage_in(&temp);
    storage
        .write(TRANSACTIONS_KEY, r#"{"transactions": []}"#)
        .unwrap();
    let store = LedgerStore::open(Box::new(storage));
    assert_seeded(&store);
}

#[test]
fn seeds_when_an_element_fails_the_typed_decode() {
    let temp = tempdir().unwrap();
    let storage = storage_in(&temp);
    storage
        .write(TRANSACTIONS_KEY, r#"[{"id": "1", "kind": "mystery"}]"#)
        .unwrap();
    let store = LedgerStore::open(Box::new(storage));
    assert_seeded(&store);
}

#[test]
fn lenient_fields_coerce_during_load() {
    let temp = tempdir().unwrap();
    let storage = storage_in(&temp);
    storage
        .write(
            TRANSACTIONS_KEY,
            r#"[
                {"id": "a", "kind": "expense", "amount": "19.99",
                 "category": "Food", "description": "string amount",
                 "occurredAt": "2024-03-01T12:00:00Z"},
                {"id": "b", "kind": "income", "category": "Salary",
                 "description": "missing amount and date"}
            ]"#,
        )
        .unwrap();

    let store = LedgerStore::open(Box::new(storage));
    assert_eq!(store.transaction_count(), 2);
    assert_eq!(store.transaction("a").unwrap().amount, 19.99);
    let fallback = store.transaction("b").unwrap();
    assert_eq!(fallback.amount, 0.0);
    assert_eq!(fallback.occurred_at, chrono::DateTime::UNIX_EPOCH);
}

#[test]
fn stored_file_holds_the_wire_format() {
    let temp = tempdir().unwrap();
    let storage = storage_in(&temp);
    let mut store = LedgerStore::open(Box::new(storage.clone()));
    store.add_transaction(TransactionKind::Expense, 12.0, "Food", "Lunch");

    let raw = fs::read_to_string(storage.key_path(TRANSACTIONS_KEY)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entries = value.as_array().expect("stored value is an array");
    assert_eq!(entries.len(), 5);
    let newest = &entries[0];
    assert_eq!(newest["kind"], "expense");
    assert_eq!(newest["amount"], 12.0);
    assert!(newest["occurredAt"].is_string());
}

fn assert_seeded(store: &LedgerStore) {
    assert_eq!(store.transaction_count(), 4);
    let salary = store.transaction("1").expect("seed income present");
    assert_eq!(salary.description, "Monthly Salary");
    assert_eq!(salary.amount, 5000.0);
    assert_eq!(store.total_income(), 5000.0);
    assert_eq!(store.total_expense(), 970.0);

    let categories: Vec<_> = store
        .category_breakdown()
        .iter()
        .map(|entry| (entry.category.as_str(), entry.total))
        .collect();
    assert_eq!(
        categories,
        vec![("Rent", 800.0), ("Food", 120.0), ("Transport", 50.0)]
    );
}
