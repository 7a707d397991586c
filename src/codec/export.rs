//! Export document: the ordered record list without diet types.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{persist::RecordStore, record::Record, types::Classification};

use super::{CodecError, CodecResult};

/// One exported record. Carries no diet field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    /// Record id.
    pub id: String,
    /// Nickname.
    pub nickname: String,
    /// Classification, when set.
    pub classification: Option<Classification>,
    /// Family.
    pub family: String,
    /// Genus.
    pub genus: String,
    /// Species.
    pub species: String,
    /// Age in years.
    pub age: i32,
    /// Weight in kilograms.
    pub weight: f64,
    /// Notes.
    pub notes: String,
}

impl From<&Record> for ExportRow {
    fn from(rec: &Record) -> Self {
        Self {
            id: rec.id.clone(),
            nickname: rec.nickname.clone(),
            classification: rec.classification,
            family: rec.family.clone(),
            genus: rec.genus.clone(),
            species: rec.species.clone(),
            age: rec.age,
            weight: rec.weight,
            notes: rec.notes.clone().unwrap_or_default(),
        }
    }
}

impl From<ExportRow> for Record {
    fn from(row: ExportRow) -> Self {
        Self {
            id: row.id,
            nickname: row.nickname,
            classification: row.classification,
            family: row.family,
            genus: row.genus,
            species: row.species,
            diet_type: None,
            age: row.age,
            weight: row.weight,
            notes: Some(row.notes),
        }
    }
}

/// Export bytes for `records`: a bare JSON array of rows in the given order,
/// with no version or checksum. An empty list is refused.
pub fn encode_export(records: &[Record]) -> CodecResult<Vec<u8>> {
    if records.is_empty() {
        return Err(CodecError::NothingToExport);
    }
    let rows: Vec<ExportRow> = records.iter().map(ExportRow::from).collect();
    Ok(serde_json::to_vec(&rows)?)
}

/// Records read back from export bytes; every diet type is `None`.
pub fn decode_export(bytes: &[u8]) -> CodecResult<Vec<Record>> {
    let rows: Vec<ExportRow> = serde_json::from_slice(bytes)?;
    Ok(rows.into_iter().map(Record::from).collect())
}

/// Exports every record of `store`, id ascending, to `path`. Returns the
/// number of records written.
pub fn save_export<S: RecordStore + ?Sized>(path: impl AsRef<Path>, store: &S) -> CodecResult<usize> {
    let path = path.as_ref();
    let records = store.list_all()?;
    let bytes = encode_export(&records)?;
    fs::write(path, bytes)?;
    info!(path = %path.display(), records = records.len(), "export written");
    Ok(records.len())
}
