use hashbrown::HashMap;
use tracing::trace;

use crate::{
    persist::{RecordFilter, RecordStore, StoreError, StoreResult},
    record::Record,
    types::{Classification, RecordId},
    validate::is_complete,
};

use super::indices::{VecIndex, index_insert, index_remove};

/// In-memory record store keyed by id.
///
/// `order` is kept sorted so listing never re-sorts; the classification and
/// family indices serve [`RecordStore::find`] without a full scan.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<RecordId, Record>,
    order: Vec<RecordId>,
    by_classification: VecIndex<Classification>,
    by_family: VecIndex<String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from `records`, rejecting duplicate ids and partial
    /// records.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> StoreResult<Self> {
        let mut store = Self::new();
        for rec in records {
            store.insert(rec)?;
        }
        Ok(store)
    }

    /// Ids in ascending order.
    pub fn ordered_ids(&self) -> &[RecordId] {
        &self.order
    }

    /// Borrowing lookup.
    pub fn get_ref(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    fn insert_indices(&mut self, rec: &Record) {
        if let Some(c) = rec.classification {
            index_insert(&mut self.by_classification, c, &rec.id);
        }
        index_insert(&mut self.by_family, rec.family.clone(), &rec.id);
    }

    fn remove_indices(&mut self, rec: &Record) {
        if let Some(c) = rec.classification {
            index_remove(&mut self.by_classification, &c, &rec.id);
        }
        index_remove(&mut self.by_family, &rec.family, &rec.id);
    }

    fn collect_sorted(&self, ids: Option<&Vec<RecordId>>) -> Vec<Record> {
        let mut out: Vec<Record> = ids
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|id| self.records.get(id).cloned())
            .collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }
}

impl RecordStore for MemoryStore {
    fn exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.records.contains_key(id))
    }

    fn insert(&mut self, record: Record) -> StoreResult<()> {
        if !is_complete(&record) {
            return Err(StoreError::Incomplete(record.id));
        }
        let pos = match self.order.binary_search(&record.id) {
            Ok(_) => return Err(StoreError::AlreadyExists(record.id)),
            Err(pos) => pos,
        };

        trace!(id = %record.id, "memory insert");
        self.insert_indices(&record);
        self.order.insert(pos, record.id.clone());
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    fn update(&mut self, record: Record) -> StoreResult<()> {
        if !is_complete(&record) {
            return Err(StoreError::Incomplete(record.id));
        }
        let Some(old) = self.records.get(&record.id).cloned() else {
            return Err(StoreError::Missing(record.id));
        };

        self.remove_indices(&old);
        self.insert_indices(&record);
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> StoreResult<()> {
        let Some(old) = self.records.remove(id) else {
            return Err(StoreError::Missing(id.to_string()));
        };
        self.remove_indices(&old);
        if let Ok(pos) = self.order.binary_search_by(|x| x.as_str().cmp(id)) {
            self.order.remove(pos);
        }
        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<Option<Record>> {
        Ok(self.records.get(id).cloned())
    }

    fn list_all(&self) -> StoreResult<Vec<Record>> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect())
    }

    fn find(&self, filter: &RecordFilter) -> StoreResult<Vec<Record>> {
        if let Some(id) = &filter.id {
            return Ok(self.records.get(id).cloned().into_iter().collect());
        }
        if let Some(c) = filter.classification {
            return Ok(self.collect_sorted(self.by_classification.get(&c)));
        }
        if let Some(family) = &filter.family {
            return Ok(self.collect_sorted(self.by_family.get(family)));
        }
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|rec| filter.matches(rec))
            .collect())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.records.len())
    }
}
