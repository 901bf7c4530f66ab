//! The trek store: single owner of the in-memory ledger state.
//!
//! Every mutation validates its preconditions, builds a fresh collection
//! value along the modified path, swaps it in, emits a signal, and kicks
//! off a detached best-effort snapshot write. Callers never receive an
//! error from a mutation; the signal is the outcome channel.

mod signal;

pub use signal::{RecordingSink, Signal, SignalKind, SignalSink};

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::domain::{BalanceSummary, Expense, Person, Trek, TrekExpenseData};
use crate::storage::SnapshotStore;

/// Fixed key the full trek collection is persisted under.
pub const SNAPSHOT_KEY: &str = "treks";

pub struct TrekStore {
    treks: Vec<Trek>,
    snapshots: Arc<dyn SnapshotStore>,
    signals: Arc<dyn SignalSink>,
    pending: Vec<JoinHandle<()>>,
}

impl TrekStore {
    /// Opens the store, reading the persisted snapshot before returning so
    /// every subsequent mutation observes the loaded collection. An
    /// unreadable or malformed snapshot is logged and treated as an empty
    /// ledger; it is never an error for the caller.
    pub fn open(snapshots: Arc<dyn SnapshotStore>, signals: Arc<dyn SignalSink>) -> Self {
        let treks = match snapshots.get(SNAPSHOT_KEY) {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<Trek>>(&bytes) {
                Ok(treks) => treks,
                Err(err) => {
                    warn!("discarding malformed trek snapshot: {err}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("failed to load trek snapshot: {err}");
                Vec::new()
            }
        };
        Self {
            treks,
            snapshots,
            signals,
            pending: Vec::new(),
        }
    }

    pub fn treks(&self) -> &[Trek] {
        &self.treks
    }

    pub fn trek(&self, slug: &str) -> Option<&Trek> {
        self.treks.iter().find(|trek| trek.trek_slug == slug)
    }

    pub fn balance(&self, slug: &str) -> Option<BalanceSummary> {
        self.trek(slug).map(BalanceSummary::from_trek)
    }

    pub fn len(&self) -> usize {
        self.treks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.treks.is_empty()
    }

    pub fn add_trek(&mut self, trek: Trek) {
        if self.trek(&trek.trek_slug).is_some() {
            self.signals.emit(Signal::error("Trek already exists!"));
            return;
        }
        let mut next = self.treks.clone();
        next.push(trek);
        self.commit(next, Signal::success("Trek added successfully"));
    }

    pub fn remove_trek(&mut self, slug: &str) {
        if self.trek(slug).is_none() {
            self.signals
                .emit(Signal::error(format!("Trek `{slug}` not found")));
            return;
        }
        let next: Vec<Trek> = self
            .treks
            .iter()
            .filter(|trek| trek.trek_slug != slug)
            .cloned()
            .collect();
        self.commit(next, Signal::success("Trek removed successfully"));
    }

    pub fn add_person(&mut self, slug: &str, person: Person) {
        let Some(trek) = self.trek(slug) else {
            self.signals
                .emit(Signal::error(format!("Trek `{slug}` not found")));
            return;
        };
        if trek.person(&person.name).is_some() {
            self.signals.emit(Signal::error(format!(
                "`{}` is already in this trek",
                person.name
            )));
            return;
        }
        let next = self.rebuild_with(slug, |data| data.persons.push(person));
        self.commit(next, Signal::success("Person added successfully"));
    }

    pub fn remove_person(&mut self, slug: &str, name: &str) {
        let Some(trek) = self.trek(slug) else {
            self.signals
                .emit(Signal::error(format!("Trek `{slug}` not found")));
            return;
        };
        if trek.person(name).is_none() {
            self.signals.emit(Signal::error("Person not found"));
            return;
        }
        let next = self.rebuild_with(slug, |data| {
            data.persons.retain(|person| person.name != name);
        });
        self.commit(next, Signal::success("Person removed successfully"));
    }

    pub fn add_expense(&mut self, slug: &str, expense: Expense) {
        let Some(trek) = self.trek(slug) else {
            self.signals
                .emit(Signal::error(format!("Trek `{slug}` not found")));
            return;
        };
        if trek.expense(&expense.slug).is_some() {
            self.signals.emit(Signal::error(format!(
                "Expense `{}` already recorded for this trek",
                expense.name
            )));
            return;
        }
        let next = self.rebuild_with(slug, |data| data.expense.push(expense));
        self.commit(next, Signal::success("Expense added successfully"));
    }

    pub fn remove_expense(&mut self, slug: &str, expense_slug: &str) {
        let Some(trek) = self.trek(slug) else {
            self.signals
                .emit(Signal::error(format!("Trek `{slug}` not found")));
            return;
        };
        if trek.expense(expense_slug).is_none() {
            self.signals.emit(Signal::error("Expense not found"));
            return;
        }
        let next = self.rebuild_with(slug, |data| {
            data.expense.retain(|expense| expense.slug != expense_slug);
        });
        self.commit(next, Signal::success("Expense removed successfully"));
    }

    pub fn toggle_expense_active(&mut self, slug: &str, expense_slug: &str) {
        let Some(trek) = self.trek(slug) else {
            self.signals
                .emit(Signal::error(format!("Trek `{slug}` not found")));
            return;
        };
        let Some(expense) = trek.expense(expense_slug) else {
            self.signals.emit(Signal::error("Expense not found"));
            return;
        };
        let restoring = !expense.is_active;
        let next = self.rebuild_with(slug, |data| {
            if let Some(expense) = data
                .expense
                .iter_mut()
                .find(|expense| expense.slug == expense_slug)
            {
                expense.is_active = !expense.is_active;
            }
        });
        let message = if restoring {
            "Expense restored"
        } else {
            "Expense archived"
        };
        self.commit(next, Signal::success(message));
    }

    pub fn clear_all(&mut self) {
        if self.treks.is_empty() {
            self.signals.emit(Signal::info("Nothing to clear"));
            return;
        }
        self.commit(Vec::new(), Signal::success("All treks cleared"));
    }

    /// Joins any in-flight snapshot writes. Called once at shutdown so the
    /// final write is not lost to process exit; mutations never wait.
    pub fn flush(&mut self) {
        for handle in self.pending.drain(..) {
            let _ = handle.join();
        }
    }

    /// Clones the collection and applies `update` to the targeted trek's
    /// copy, leaving the previous value untouched for anyone still
    /// holding it.
    fn rebuild_with(&self, slug: &str, update: impl FnOnce(&mut TrekExpenseData)) -> Vec<Trek> {
        let mut next = self.treks.clone();
        if let Some(trek) = next.iter_mut().find(|trek| trek.trek_slug == slug) {
            update(&mut trek.trek_expense_data);
        }
        next
    }

    fn commit(&mut self, next: Vec<Trek>, signal: Signal) {
        self.treks = next;
        self.signals.emit(signal);
        self.persist();
    }

    /// Fire-and-forget write-back of the full snapshot. Failures are
    /// logged and never surfaced; the in-memory state stays authoritative
    /// for the session.
    fn persist(&mut self) {
        let bytes = match serde_json::to_vec(&self.treks) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("failed to serialize trek snapshot: {err}");
                return;
            }
        };
        self.pending.retain(|handle| !handle.is_finished());
        let snapshots = Arc::clone(&self.snapshots);
        let handle = thread::spawn(move || {
            if let Err(err) = snapshots.set(SNAPSHOT_KEY, &bytes) {
                warn!("failed to persist trek snapshot: {err}");
            } else {
                debug!("trek snapshot persisted");
            }
        });
        self.pending.push(handle);
    }
}

impl Drop for TrekStore {
    fn drop(&mut self) {
        self.flush();
    }
}
