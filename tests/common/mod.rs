use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use tempfile::TempDir;

use trek_core::{
    domain::{Expense, Person, Trek},
    storage::JsonFileStore,
    store::{RecordingSink, TrekStore},
};

/// Holds TempDir guards so temporary folders live for the duration of the
/// test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated store backed by a unique directory, returning the
/// recording sink and the snapshot backend for direct inspection.
pub fn setup_store() -> (TrekStore, Arc<RecordingSink>, Arc<JsonFileStore>) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let snapshots = Arc::new(JsonFileStore::new(Some(base)).expect("create snapshot store"));
    let signals = Arc::new(RecordingSink::new());
    let store = TrekStore::open(snapshots.clone(), signals.clone());
    (store, signals, snapshots)
}

/// A trek with one contributor and one active expense, mirroring the
/// smallest useful ledger.
#[allow(dead_code)]
pub fn populated_store() -> (TrekStore, Arc<RecordingSink>, Arc<JsonFileStore>) {
    let (mut store, signals, snapshots) = setup_store();
    store.add_trek(Trek::with_slug("ABC", "abc"));
    store.add_person("abc", Person::new("A", 1000.0));
    store.add_expense("abc", Expense::new("food", 300.0, ""));
    signals.drain();
    (store, signals, snapshots)
}
