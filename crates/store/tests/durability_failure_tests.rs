//! Integration tests for mutation atomicity under storage failure
//!
//! Uses failure-injecting backends: when a snapshot or anchor write
//! fails, the in-memory state must roll back wholesale and the error must
//! say so.

use lumbung_core::{AnchorStore, Error, FieldValues, Result, SnapshotStore, Value};
use lumbung_durability::{MemoryAnchorStore, MemorySnapshotStore};
use lumbung_store::{
    Catalog, Store, BUDGET_LINES_TABLE, PARENT_PLAN_FIELD, PARENT_WORK_PLAN_FIELD, PLANS_TABLE,
    WORK_PLANS_TABLE,
};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Snapshot store whose writes can be made to fail on demand
#[derive(Default)]
struct FlakySnapshotStore {
    inner: MemorySnapshotStore,
    fail_writes: AtomicBool,
}

impl FlakySnapshotStore {
    fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }
}

impl SnapshotStore for FlakySnapshotStore {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        self.inner.load()
    }

    fn store(&self, blob: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Io(io::Error::new(io::ErrorKind::Other, "disk full")));
        }
        self.inner.store(blob)
    }
}

/// Anchor store whose writes always fail
struct FailingAnchorStore {
    inner: MemoryAnchorStore,
}

impl AnchorStore for FailingAnchorStore {
    fn load(&self) -> Result<Option<String>> {
        self.inner.load()
    }

    fn store(&self, _token: &str) -> Result<()> {
        Err(Error::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "anchor slot unavailable",
        )))
    }
}

fn open_flaky_store() -> (Store, Arc<FlakySnapshotStore>) {
    let snapshots = Arc::new(FlakySnapshotStore::default());
    let store = Store::open(
        Catalog::village_office(),
        snapshots.clone(),
        Arc::new(MemoryAnchorStore::new()),
    )
    .unwrap();
    (store, snapshots)
}

fn regulation(number: &str) -> FieldValues {
    let mut fields = FieldValues::new();
    fields.insert("number".to_string(), Value::text(number));
    fields.insert("title".to_string(), Value::text("Some regulation"));
    fields.insert("subject".to_string(), Value::text("Subject"));
    fields.insert("enacted_on".to_string(), Value::text("2024-06-01"));
    fields
}

fn insert_plan(store: &mut Store) -> i64 {
    let mut fields = FieldValues::new();
    fields.insert("period_start_year".to_string(), Value::real(2025.0));
    fields.insert("period_end_year".to_string(), Value::real(2030.0));
    fields.insert("regulation_number".to_string(), Value::text("1/2025"));
    fields.insert("enacted_on".to_string(), Value::text("2025-01-10"));
    fields.insert("vision".to_string(), Value::text("Prosperity"));
    fields.insert("mission".to_string(), Value::text("Serve"));
    fields.insert("status".to_string(), Value::text("Final"));
    store.insert(PLANS_TABLE, &fields).unwrap()
}

fn insert_work_plan(store: &mut Store, parent_plan: i64) -> i64 {
    let mut fields = FieldValues::new();
    fields.insert(PARENT_PLAN_FIELD.to_string(), Value::from(parent_plan));
    fields.insert("year".to_string(), Value::real(2026.0));
    fields.insert("sector".to_string(), Value::text("Infrastructure"));
    fields.insert("activity".to_string(), Value::text("Road paving"));
    fields.insert("budget".to_string(), Value::real(50_000_000.0));
    store.insert(WORK_PLANS_TABLE, &fields).unwrap()
}

fn insert_budget_line(store: &mut Store, parent_work_plan: i64) -> i64 {
    let mut fields = FieldValues::new();
    fields.insert(
        PARENT_WORK_PLAN_FIELD.to_string(),
        Value::from(parent_work_plan),
    );
    fields.insert("year".to_string(), Value::real(2026.0));
    fields.insert("side".to_string(), Value::text("Expenditure"));
    fields.insert("item".to_string(), Value::text("Gravel"));
    fields.insert("amount".to_string(), Value::real(10_000_000.0));
    store.insert(BUDGET_LINES_TABLE, &fields).unwrap()
}

#[test]
fn test_failed_insert_rolls_back_and_reports_write_failure() {
    let (mut store, snapshots) = open_flaky_store();
    store.insert("regulations", &regulation("1/2024")).unwrap();

    snapshots.set_failing(true);
    let err = store
        .insert("regulations", &regulation("2/2024"))
        .unwrap_err();
    assert!(matches!(err, Error::SnapshotWriteFailed { .. }));

    // The in-memory table is back to its prior state.
    let rows = store.select_all("regulations").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_text("number"), Some("1/2024"));

    // The id counter rolled back with the table: the next successful
    // insert takes the id the failed one briefly held.
    snapshots.set_failing(false);
    let id = store.insert("regulations", &regulation("3/2024")).unwrap();
    assert_eq!(id, 2);
}

#[test]
fn test_failed_update_rolls_back_row_contents() {
    let (mut store, snapshots) = open_flaky_store();
    let id = store.insert("regulations", &regulation("1/2024")).unwrap();

    snapshots.set_failing(true);
    let err = store
        .update("regulations", id, &regulation("9/2024"))
        .unwrap_err();
    assert!(matches!(err, Error::SnapshotWriteFailed { .. }));

    let rows = store.select_all("regulations").unwrap();
    assert_eq!(rows[0].get_text("number"), Some("1/2024"));
}

#[test]
fn test_failed_cascade_rolls_back_whole_subtree() {
    let (mut store, snapshots) = open_flaky_store();
    let plan = insert_plan(&mut store);
    let wp = insert_work_plan(&mut store, plan);
    insert_budget_line(&mut store, wp);
    insert_budget_line(&mut store, wp);

    snapshots.set_failing(true);
    let err = store.delete_plan(plan).unwrap_err();
    assert!(matches!(
        err,
        Error::CascadeIncomplete { table, id, .. } if table == PLANS_TABLE && id == plan
    ));

    // Parent and children all survive; no partially deleted subtree.
    assert_eq!(store.select_all(PLANS_TABLE).unwrap().len(), 1);
    assert_eq!(store.select_all(WORK_PLANS_TABLE).unwrap().len(), 1);
    assert_eq!(store.select_all(BUDGET_LINES_TABLE).unwrap().len(), 2);

    // Once writes recover the same cascade goes through cleanly.
    snapshots.set_failing(false);
    store.delete_plan(plan).unwrap();
    assert!(store.select_all(PLANS_TABLE).unwrap().is_empty());
    assert!(store.select_all(WORK_PLANS_TABLE).unwrap().is_empty());
    assert!(store.select_all(BUDGET_LINES_TABLE).unwrap().is_empty());
}

#[test]
fn test_failed_cascade_leaves_durable_state_untouched() {
    let (mut store, snapshots) = open_flaky_store();
    let plan = insert_plan(&mut store);
    let wp = insert_work_plan(&mut store, plan);
    insert_budget_line(&mut store, wp);
    let before = snapshots.load().unwrap().unwrap();

    snapshots.set_failing(true);
    store.delete_plan(plan).unwrap_err();
    snapshots.set_failing(false);

    assert_eq!(snapshots.load().unwrap().unwrap(), before);
}

#[test]
fn test_failed_anchor_write_surfaces_after_profile_save() {
    let snapshots = Arc::new(MemorySnapshotStore::new());
    let mut store = Store::open(
        Catalog::village_office(),
        snapshots,
        Arc::new(FailingAnchorStore {
            inner: MemoryAnchorStore::new(),
        }),
    )
    .unwrap();

    let mut profile = FieldValues::new();
    profile.insert("village_name".to_string(), Value::text("Sukamaju"));
    let err = store.save_profile(&profile).unwrap_err();
    assert!(matches!(err, Error::AnchorWriteFailed { .. }));

    // The snapshot write preceded the anchor failure, so the profile row
    // is durable; the anchor slot stayed empty.
    assert!(store.profile().unwrap().is_some());
}
