//! Reconciliation of discovered identifiers against the registry.
//!
//! # Responsibility
//! - Compute newly discovered identifiers and the per-run universe.
//! - Persist new identifiers once, after every report has been scanned.
//!
//! # Invariants
//! - `new = discovered - known`; `universe = sorted(known ∪ discovered)`.
//! - Appends happen in sorted order, at most once per reconciliation.
//! - A failed append never drops identifiers from the universe.

use crate::model::cr_id::CrId;
use crate::registry::{Registry, RegistryError, RegistryStore};
use log::{info, warn};
use std::collections::BTreeSet;

/// Pure reconciliation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Discovered identifiers missing from the registry, sorted.
    pub new: Vec<CrId>,
    /// Sorted union of known and discovered identifiers.
    pub universe: Vec<CrId>,
}

/// Outcome of persisting a reconciliation.
#[derive(Debug)]
pub enum PersistOutcome {
    /// Nothing new was discovered.
    NothingToAppend,
    /// New identifiers were appended to the store.
    Appended(usize),
    /// The store rejected the append; the run continues without it.
    Failed(RegistryError),
}

impl PersistOutcome {
    /// Returns whether registry state on disk matches this run's discoveries.
    pub fn is_persisted(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Computes new identifiers and the sorted universe.
pub fn reconcile(known: &BTreeSet<CrId>, discovered: &BTreeSet<CrId>) -> Reconciliation {
    Reconciliation {
        new: discovered.difference(known).cloned().collect(),
        universe: known.union(discovered).cloned().collect(),
    }
}

/// Reconciles against `registry`, persisting new identifiers through `store`.
///
/// On a successful append the in-memory registry learns the new identifiers.
/// A store failure is logged and returned as [`PersistOutcome::Failed`].
pub fn reconcile_and_persist<S: RegistryStore>(
    registry: &mut Registry,
    discovered: &BTreeSet<CrId>,
    store: &mut S,
) -> (Reconciliation, PersistOutcome) {
    let result = reconcile(registry.known(), discovered);
    if result.new.is_empty() {
        info!(
            "event=reconcile module=reconcile status=ok new=0 universe={}",
            result.universe.len()
        );
        return (result, PersistOutcome::NothingToAppend);
    }

    info!(
        "event=reconcile module=reconcile status=ok new={} universe={}",
        result.new.len(),
        result.universe.len()
    );

    let outcome = match store.append(&result.new) {
        Ok(()) => {
            registry.extend_known(result.new.iter().cloned());
            PersistOutcome::Appended(result.new.len())
        }
        Err(err) => {
            warn!(
                "event=reconcile_persist module=reconcile status=error new={} error={}",
                result.new.len(),
                err
            );
            PersistOutcome::Failed(err)
        }
    };
    (result, outcome)
}
