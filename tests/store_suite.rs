mod common;

use common::{populated_store, setup_store};
use trek_core::{
    domain::{Expense, Person, Trek},
    storage::SnapshotStore,
    store::{SignalKind, SNAPSHOT_KEY},
};

#[test]
fn duplicate_trek_slug_is_rejected() {
    let (mut store, signals, _snapshots) = setup_store();
    store.add_trek(Trek::with_slug("ABC", "abc"));
    assert_eq!(signals.last().map(|s| s.kind), Some(SignalKind::Success));

    store.add_trek(Trek::with_slug("Another ABC", "abc"));
    assert_eq!(store.len(), 1);
    let last = signals.last().expect("duplicate emits a signal");
    assert_eq!(last.kind, SignalKind::Error);
    assert!(last.message.contains("already exists"));
}

#[test]
fn trek_slugs_stay_unique_across_many_inserts() {
    let (mut store, _signals, _snapshots) = setup_store();
    for name in ["Alpha", "Beta", "Alpha", "Gamma", "Beta"] {
        store.add_trek(Trek::new(name));
    }
    let mut slugs: Vec<&str> = store
        .treks()
        .iter()
        .map(|trek| trek.trek_slug.as_str())
        .collect();
    slugs.sort_unstable();
    slugs.dedup();
    assert_eq!(slugs.len(), store.len());
    assert_eq!(store.len(), 3);
}

#[test]
fn mutations_against_missing_trek_are_noops() {
    let (mut store, signals, _snapshots) = setup_store();

    store.add_person("ghost", Person::new("A", 10.0));
    store.remove_person("ghost", "A");
    store.add_expense("ghost", Expense::new("food", 1.0, ""));
    store.remove_expense("ghost", "food");
    store.toggle_expense_active("ghost", "food");

    assert!(store.is_empty());
    let recorded = signals.drain();
    assert_eq!(recorded.len(), 5);
    for signal in recorded {
        assert_eq!(signal.kind, SignalKind::Error);
        assert!(signal.message.contains("not found"));
    }
}

#[test]
fn duplicate_person_name_is_rejected_within_a_trek() {
    let (mut store, signals, _snapshots) = populated_store();
    store.add_person("abc", Person::new("A", 500.0));

    let trek = store.trek("abc").expect("trek exists");
    assert_eq!(trek.trek_expense_data.persons.len(), 1);
    assert_eq!(
        trek.trek_expense_data.persons[0].contribution_amount,
        1000.0
    );
    assert_eq!(signals.last().map(|s| s.kind), Some(SignalKind::Error));
}

#[test]
fn person_names_are_case_sensitive_keys() {
    let (mut store, signals, _snapshots) = populated_store();
    store.add_person("abc", Person::new("a", 500.0));
    assert_eq!(signals.last().map(|s| s.kind), Some(SignalKind::Success));
    assert_eq!(
        store
            .trek("abc")
            .expect("trek exists")
            .trek_expense_data
            .persons
            .len(),
        2
    );
}

#[test]
fn duplicate_expense_slug_is_rejected_within_a_trek() {
    let (mut store, signals, _snapshots) = populated_store();
    // Same name slugs to the same key.
    store.add_expense("abc", Expense::new("food", 50.0, "second dinner"));

    let trek = store.trek("abc").expect("trek exists");
    assert_eq!(trek.trek_expense_data.expense.len(), 1);
    assert_eq!(trek.trek_expense_data.expense[0].amount, 300.0);
    assert_eq!(signals.last().map(|s| s.kind), Some(SignalKind::Error));
}

#[test]
fn balance_follows_contributions_and_active_spend() {
    let (store, _signals, _snapshots) = populated_store();
    let balance = store.balance("abc").expect("trek exists");
    assert_eq!(balance.contributed, 1000.0);
    assert_eq!(balance.spent, 300.0);
    assert_eq!(balance.remaining, 700.0);
}

#[test]
fn toggling_an_expense_flips_only_its_contribution() {
    let (mut store, signals, _snapshots) = populated_store();
    store.add_expense("abc", Expense::new("fuel", 120.0, ""));

    store.toggle_expense_active("abc", "food");
    assert_eq!(signals.last().map(|s| s.kind), Some(SignalKind::Success));

    let trek = store.trek("abc").expect("trek exists");
    let food = trek.expense("food").expect("food still present");
    let fuel = trek.expense("fuel").expect("fuel untouched");
    assert!(!food.is_active);
    assert!(fuel.is_active);
    assert_eq!(store.balance("abc").expect("trek exists").remaining, 880.0);

    store.toggle_expense_active("abc", "food");
    assert_eq!(store.balance("abc").expect("trek exists").remaining, 580.0);
}

#[test]
fn archived_expense_is_retained_not_deleted() {
    let (mut store, _signals, _snapshots) = populated_store();
    store.toggle_expense_active("abc", "food");
    let trek = store.trek("abc").expect("trek exists");
    assert_eq!(trek.trek_expense_data.expense.len(), 1);
    assert_eq!(store.balance("abc").expect("trek exists").remaining, 1000.0);
}

#[test]
fn second_removal_fails_with_not_found() {
    let (mut store, signals, _snapshots) = populated_store();

    store.remove_person("abc", "A");
    assert_eq!(signals.last().map(|s| s.kind), Some(SignalKind::Success));
    store.remove_person("abc", "A");
    let last = signals.last().expect("second removal emits a signal");
    assert_eq!(last.kind, SignalKind::Error);
    assert!(last.message.contains("not found"));

    store.remove_expense("abc", "food");
    assert_eq!(signals.last().map(|s| s.kind), Some(SignalKind::Success));
    store.remove_expense("abc", "food");
    assert_eq!(signals.last().map(|s| s.kind), Some(SignalKind::Error));
}

#[test]
fn removing_a_trek_discards_its_substructure() {
    let (mut store, signals, _snapshots) = populated_store();
    store.remove_trek("abc");
    assert!(store.is_empty());
    assert_eq!(signals.last().map(|s| s.kind), Some(SignalKind::Success));

    // The slug is free again and the new trek starts empty.
    store.add_trek(Trek::with_slug("ABC", "abc"));
    let trek = store.trek("abc").expect("trek exists");
    assert!(trek.trek_expense_data.persons.is_empty());
    assert!(trek.trek_expense_data.expense.is_empty());
}

#[test]
fn clear_all_empties_the_collection_and_the_snapshot() {
    let (mut store, signals, snapshots) = setup_store();
    for name in ["One", "Two", "Three"] {
        store.add_trek(Trek::new(name));
    }
    assert_eq!(store.len(), 3);

    store.clear_all();
    assert!(store.is_empty());
    assert_eq!(signals.last().map(|s| s.kind), Some(SignalKind::Success));

    store.flush();
    let bytes = snapshots
        .get(SNAPSHOT_KEY)
        .expect("read snapshot")
        .expect("snapshot written");
    assert_eq!(bytes, b"[]");
}

#[test]
fn clear_all_on_empty_ledger_is_informational() {
    let (mut store, signals, _snapshots) = setup_store();
    store.clear_all();
    let last = signals.last().expect("signal emitted");
    assert_eq!(last.kind, SignalKind::Info);
    assert!(last.message.contains("Nothing to clear"));
}
