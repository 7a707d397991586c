//! SQLite-backed record store.

use std::path::Path;

use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, ToSql, params};
use tracing::debug;

use crate::{
    record::Record,
    types::{Classification, DietType},
    validate::is_complete,
};

use super::{RecordFilter, RecordStore, StoreError, StoreResult};

const SELECT_COLUMNS: &str = "SELECT id, nickname, classification, family, genus, species, diet_type, age, weight, notes FROM records";

/// SQLite implementation of [`crate::persist::RecordStore`].
///
/// The connection is supplied by the caller and owned by the store until
/// [`SqliteStore::into_connection`] hands it back.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Wraps an existing connection and applies the schema.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn new(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }

    /// Opens or creates a database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::new(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Releases the connection back to the caller.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    fn query(&self, sql: &str, args: &[&dyn ToSql]) -> StoreResult<Vec<Record>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, RawRow::from_row)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?.into_record()?);
        }
        Ok(out)
    }
}

impl RecordStore for SqliteStore {
    fn exists(&self, id: &str) -> StoreResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM records WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    fn insert(&mut self, record: Record) -> StoreResult<()> {
        if !is_complete(&record) {
            return Err(StoreError::Incomplete(record.id));
        }
        let result = self.conn.execute(
            "INSERT INTO records(id, nickname, classification, family, genus, species, diet_type, age, weight, notes) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                record.id,
                record.nickname,
                record.classification.map(Classification::as_str),
                record.family,
                record.genus,
                record.species,
                record.diet_type.map(DietType::as_str),
                record.age,
                record.weight,
                record.notes.as_deref().unwrap_or(""),
            ],
        );
        match result {
            Ok(_) => {
                debug!(id = %record.id, "sqlite insert");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::AlreadyExists(record.id))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update(&mut self, record: Record) -> StoreResult<()> {
        if !is_complete(&record) {
            return Err(StoreError::Incomplete(record.id));
        }
        let changed = self.conn.execute(
            "UPDATE records SET nickname = ?2, classification = ?3, family = ?4, genus = ?5, \
             species = ?6, diet_type = ?7, age = ?8, weight = ?9, notes = ?10 WHERE id = ?1",
            params![
                record.id,
                record.nickname,
                record.classification.map(Classification::as_str),
                record.family,
                record.genus,
                record.species,
                record.diet_type.map(DietType::as_str),
                record.age,
                record.weight,
                record.notes.as_deref().unwrap_or(""),
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::Missing(record.id));
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM records WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::Missing(id.to_string()));
        }
        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<Option<Record>> {
        let raw = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                RawRow::from_row,
            )
            .optional()?;
        raw.map(RawRow::into_record).transpose()
    }

    fn list_all(&self) -> StoreResult<Vec<Record>> {
        self.query(&format!("{SELECT_COLUMNS} ORDER BY id ASC"), params![])
    }

    fn find(&self, filter: &RecordFilter) -> StoreResult<Vec<Record>> {
        if let Some(id) = &filter.id {
            return Ok(self.get(id)?.into_iter().collect());
        }
        if let Some(c) = filter.classification {
            return self.query(
                &format!("{SELECT_COLUMNS} WHERE classification = ?1 ORDER BY id ASC"),
                params![c.as_str()],
            );
        }
        if let Some(family) = &filter.family {
            return self.query(
                &format!("{SELECT_COLUMNS} WHERE family = ?1 ORDER BY id ASC"),
                params![family],
            );
        }
        if let Some(d) = filter.diet_type {
            return self.query(
                &format!("{SELECT_COLUMNS} WHERE diet_type = ?1 ORDER BY id ASC"),
                params![d.as_str()],
            );
        }
        self.list_all()
    }

    fn len(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

/// Column values before enum decoding.
struct RawRow {
    id: String,
    nickname: String,
    classification: String,
    family: String,
    genus: String,
    species: String,
    diet_type: String,
    age: i32,
    weight: f64,
    notes: String,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            nickname: row.get(1)?,
            classification: row.get(2)?,
            family: row.get(3)?,
            genus: row.get(4)?,
            species: row.get(5)?,
            diet_type: row.get(6)?,
            age: row.get(7)?,
            weight: row.get(8)?,
            notes: row.get(9)?,
        })
    }

    fn into_record(self) -> StoreResult<Record> {
        let classification = Classification::from_token(&self.classification).ok_or_else(|| {
            StoreError::Corrupt {
                id: self.id.clone(),
                detail: format!("unknown classification `{}`", self.classification),
            }
        })?;
        let diet_type = DietType::from_token(&self.diet_type).ok_or_else(|| StoreError::Corrupt {
            id: self.id.clone(),
            detail: format!("unknown diet type `{}`", self.diet_type),
        })?;

        Ok(Record {
            id: self.id,
            nickname: self.nickname,
            classification: Some(classification),
            family: self.family,
            genus: self.genus,
            species: self.species,
            diet_type: Some(diet_type),
            age: self.age,
            weight: self.weight,
            notes: Some(self.notes),
        })
    }
}
