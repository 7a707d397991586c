//! Duplicate-rejecting merge of complete records into a store.

use tracing::{debug, info};

use crate::{
    persist::{RecordStore, StoreError, StoreResult},
    record::Record,
    validate::is_complete,
};

/// Outcome of one reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// The candidate is now stored.
    Inserted,
    /// A record with the same id was already stored; the candidate was dropped.
    Duplicate,
}

impl Reconciled {
    /// True for [`Reconciled::Inserted`].
    pub fn inserted(self) -> bool {
        matches!(self, Self::Inserted)
    }
}

/// Running counts across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileTally {
    /// Candidates stored.
    pub inserted: usize,
    /// Candidates dropped as duplicates.
    pub duplicate: usize,
}

/// Merges one complete candidate: one existence check, then at most one
/// insert. Store failures propagate unchanged.
pub fn reconcile<S: RecordStore + ?Sized>(candidate: Record, store: &mut S) -> StoreResult<Reconciled> {
    if !is_complete(&candidate) {
        return Err(StoreError::Incomplete(candidate.id));
    }
    if store.exists(&candidate.id)? {
        debug!(id = %candidate.id, "duplicate key, not inserted");
        return Ok(Reconciled::Duplicate);
    }
    let id = candidate.id.clone();
    store.insert(candidate)?;
    info!(%id, "record inserted");
    Ok(Reconciled::Inserted)
}

/// [`reconcile`] plus a tally for batch reporting.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationGate {
    tally: ReconcileTally,
}

impl ReconciliationGate {
    /// Gate with zeroed counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles `candidate` and counts the outcome. Errors are not counted.
    pub fn reconcile<S: RecordStore + ?Sized>(
        &mut self,
        candidate: Record,
        store: &mut S,
    ) -> StoreResult<Reconciled> {
        let outcome = reconcile(candidate, store)?;
        match outcome {
            Reconciled::Inserted => self.tally.inserted += 1,
            Reconciled::Duplicate => self.tally.duplicate += 1,
        }
        Ok(outcome)
    }

    /// Counts so far.
    pub fn tally(&self) -> ReconcileTally {
        self.tally
    }
}
