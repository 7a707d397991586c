pub mod sqlite;

use thiserror::Error;

use crate::{
    record::Record,
    types::{Classification, DietType, RecordId},
};

/// Failures reported by a [`RecordStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this id is already stored.
    #[error("record `{0}` already exists")]
    AlreadyExists(RecordId),
    /// No record with this id is stored.
    #[error("record `{0}` not found")]
    Missing(RecordId),
    /// Partial records are never persisted.
    #[error("record `{0}` is incomplete")]
    Incomplete(RecordId),
    /// Underlying SQLite failure.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored row no longer maps onto a [`Record`].
    #[error("stored row for `{id}` is corrupt: {detail}")]
    Corrupt {
        /// Row key.
        id: RecordId,
        /// What failed to decode.
        detail: String,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Query criteria. The first set criterion wins, in field order; an empty
/// filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Exact id match.
    pub id: Option<RecordId>,
    /// Classification match.
    pub classification: Option<Classification>,
    /// Exact family match.
    pub family: Option<String>,
    /// Diet type match.
    pub diet_type: Option<DietType>,
}

impl RecordFilter {
    /// True when `rec` satisfies the winning criterion.
    pub fn matches(&self, rec: &Record) -> bool {
        if let Some(id) = &self.id {
            return &rec.id == id;
        }
        if let Some(c) = self.classification {
            return rec.classification == Some(c);
        }
        if let Some(family) = &self.family {
            return &rec.family == family;
        }
        if let Some(d) = self.diet_type {
            return rec.diet_type == Some(d);
        }
        true
    }
}

/// Keyed record storage consumed by the ingestion pipeline and the codecs.
///
/// Each call is one atomic operation; callers never overlap calls.
pub trait RecordStore {
    /// True when a record with `id` is stored.
    fn exists(&self, id: &str) -> StoreResult<bool>;
    /// Stores a new complete record.
    fn insert(&mut self, record: Record) -> StoreResult<()>;
    /// Replaces the stored record with the same id.
    fn update(&mut self, record: Record) -> StoreResult<()>;
    /// Removes the record with `id`.
    fn delete(&mut self, id: &str) -> StoreResult<()>;
    /// Fetches one record.
    fn get(&self, id: &str) -> StoreResult<Option<Record>>;
    /// Every record, ordered by id ascending.
    fn list_all(&self) -> StoreResult<Vec<Record>>;

    /// Records matching `filter`, ordered by id ascending.
    fn find(&self, filter: &RecordFilter) -> StoreResult<Vec<Record>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|rec| filter.matches(rec))
            .collect())
    }

    /// Number of stored records.
    fn len(&self) -> StoreResult<usize> {
        Ok(self.list_all()?.len())
    }

    /// True when nothing is stored.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}
