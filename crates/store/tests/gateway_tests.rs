//! Integration tests for the generic row gateway

use lumbung_core::{Error, FieldValues, Value};
use lumbung_durability::{MemoryAnchorStore, MemorySnapshotStore};
use lumbung_store::{Catalog, Store};
use std::sync::Arc;

fn open_store() -> (Store, Arc<MemorySnapshotStore>) {
    let snapshots = Arc::new(MemorySnapshotStore::new());
    let store = Store::open(
        Catalog::village_office(),
        snapshots.clone(),
        Arc::new(MemoryAnchorStore::new()),
    )
    .unwrap();
    (store, snapshots)
}

fn regulation(number: &str, title: &str) -> FieldValues {
    let mut fields = FieldValues::new();
    fields.insert("number".to_string(), Value::text(number));
    fields.insert("title".to_string(), Value::text(title));
    fields.insert("subject".to_string(), Value::text("On village matters"));
    fields.insert("enacted_on".to_string(), Value::text("2024-06-01"));
    fields
}

#[test]
fn test_insert_then_select_all_round_trip() {
    let (mut store, _) = open_store();
    let fields = regulation("1/2024", "First");
    let id = store.insert("regulations", &fields).unwrap();

    let rows = store.select_all("regulations").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
    assert_eq!(rows[0].fields, fields);
}

#[test]
fn test_missing_declared_fields_read_back_as_absent() {
    let (mut store, _) = open_store();
    let id = store
        .insert("regulations", &regulation("2/2024", "Sparse"))
        .unwrap();

    let rows = store.select_all("regulations").unwrap();
    let row = rows.iter().find(|r| r.id == id).unwrap();
    assert!(row.get("notes").is_none());
    assert!(row.get("gazette_number").is_none());
}

#[test]
fn test_insert_rejects_unknown_field() {
    let (mut store, _) = open_store();
    let mut fields = regulation("3/2024", "Bad");
    fields.insert("not_a_field".to_string(), Value::text("x"));

    let err = store.insert("regulations", &fields).unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownField { table, field } if table == "regulations" && field == "not_a_field"
    ));
    assert!(store.select_all("regulations").unwrap().is_empty());
}

#[test]
fn test_insert_rejects_kind_mismatch() {
    let (mut store, _) = open_store();
    let mut fields = regulation("4/2024", "Typed");
    fields.insert("number".to_string(), Value::real(4.0));

    let err = store.insert("regulations", &fields).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { field, .. } if field == "number"));
}

#[test]
fn test_unknown_table_is_rejected() {
    let (mut store, _) = open_store();
    let err = store.insert("no_such_ledger", &FieldValues::new()).unwrap_err();
    assert!(matches!(err, Error::UnknownTable(key) if key == "no_such_ledger"));
    assert!(matches!(
        store.select_all("no_such_ledger").unwrap_err(),
        Error::UnknownTable(_)
    ));
}

#[test]
fn test_update_is_full_overwrite_not_merge() {
    let (mut store, _) = open_store();
    let mut fields = regulation("5/2024", "Original");
    fields.insert("notes".to_string(), Value::text("keep?"));
    let id = store.insert("regulations", &fields).unwrap();

    // The replacement omits `notes`; it must read back as null.
    let replacement = regulation("5/2024", "Rewritten");
    store.update("regulations", id, &replacement).unwrap();

    let rows = store.select_all("regulations").unwrap();
    let row = rows.iter().find(|r| r.id == id).unwrap();
    assert_eq!(row.get_text("title"), Some("Rewritten"));
    assert!(row.get("notes").is_none());
    assert_eq!(row.fields, replacement);
}

#[test]
fn test_update_missing_row_is_row_not_found() {
    let (mut store, _) = open_store();
    let err = store
        .update("regulations", 99, &regulation("9/2024", "Ghost"))
        .unwrap_err();
    assert!(matches!(err, Error::RowNotFound { id: 99, .. }));
}

#[test]
fn test_delete_is_idempotent() {
    let (mut store, _) = open_store();
    let id = store
        .insert("regulations", &regulation("6/2024", "Doomed"))
        .unwrap();

    store.delete("regulations", id).unwrap();
    assert!(store.select_all("regulations").unwrap().is_empty());

    // Deleting again is not an error.
    store.delete("regulations", id).unwrap();
    store.delete("regulations", 12345).unwrap();
}

#[test]
fn test_ids_are_never_reused() {
    let (mut store, _) = open_store();
    let first = store
        .insert("regulations", &regulation("7/2024", "A"))
        .unwrap();
    store.delete("regulations", first).unwrap();
    let second = store
        .insert("regulations", &regulation("8/2024", "B"))
        .unwrap();
    assert!(second > first);
}

#[test]
fn test_each_mutation_is_durable() {
    let (mut store, snapshots) = open_store();
    let id = store
        .insert("regulations", &regulation("10/2024", "Durable"))
        .unwrap();

    // A second handle over the same snapshot store sees the insert.
    let reopened = Store::open(
        Catalog::village_office(),
        snapshots.clone(),
        Arc::new(MemoryAnchorStore::new()),
    )
    .unwrap();
    assert_eq!(reopened.select_all("regulations").unwrap().len(), 1);

    store.delete("regulations", id).unwrap();
    let reopened = Store::open(
        Catalog::village_office(),
        snapshots,
        Arc::new(MemoryAnchorStore::new()),
    )
    .unwrap();
    assert!(reopened.select_all("regulations").unwrap().is_empty());
}

#[test]
fn test_profile_table_not_reachable_through_gateway() {
    let (mut store, _) = open_store();
    assert!(store
        .select_all(lumbung_store::PROFILE_TABLE_KEY)
        .unwrap()
        .is_empty());
    let err = store
        .insert(lumbung_store::PROFILE_TABLE_KEY, &FieldValues::new())
        .unwrap_err();
    assert!(matches!(err, Error::UnknownTable(_)));
}
