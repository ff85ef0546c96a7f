//! Generic typed repository over SQLite tables.
//!
//! # Responsibility
//! - Define the `TableRecord` capability trait binding an entity type to its
//!   table, columns and row mapping.
//! - Provide one generic CRUD implementation reused by every entity type.
//!
//! # Invariants
//! - Each operation acquires its own session scope and releases it on exit.
//! - `replace` is a full-record overwrite, never a partial patch.
//! - `upsert` is a single atomic statement; no read-then-write races.

use crate::db::SessionFactory;
use crate::repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::fmt::Display;
use std::marker::PhantomData;

/// Capability trait binding a domain record to its storage table.
///
/// `values`/`from_row` form the mapping collaborator between the in-memory
/// record and the row representation; the generic repository treats both as
/// black boxes.
pub trait TableRecord: Clone {
    /// Comparable identifier type, rendered to text for storage.
    type Id: Clone + PartialEq + Display;

    const TABLE: &'static str;
    /// Data columns excluding `id`; order must match `values`.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> Self::Id;
    /// Column values in `COLUMNS` order.
    fn values(&self) -> Vec<Value>;
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

/// Generic CRUD contract over an entity type keyed by a comparable id.
pub trait Repository<T: TableRecord> {
    /// Returns the record if present; absence is `Ok(None)`.
    fn get_by_id(&self, id: &T::Id) -> RepoResult<Option<T>>;
    /// Inserts a record that must not yet exist and returns it as persisted.
    fn create(&self, record: &T) -> RepoResult<T>;
    /// Overwrites every column of an existing record; `NotFound` otherwise.
    fn replace(&self, record: &T) -> RepoResult<()>;
    /// Creates when absent, replaces when present, atomically.
    fn upsert(&self, record: &T) -> RepoResult<()>;
    /// Removes the record; deleting an absent row is not an error.
    fn delete(&self, record: &T) -> RepoResult<()>;
}

/// The generic SQLite implementation, instantiated once per entity type.
///
/// Holds no mutable state beyond the session factory handle.
pub struct SqliteRepository<T: TableRecord> {
    sessions: SessionFactory,
    _record: PhantomData<fn() -> T>,
}

impl<T: TableRecord> SqliteRepository<T> {
    pub fn new(sessions: SessionFactory) -> Self {
        Self {
            sessions,
            _record: PhantomData,
        }
    }
}

impl<T: TableRecord> Repository<T> for SqliteRepository<T> {
    fn get_by_id(&self, id: &T::Id) -> RepoResult<Option<T>> {
        let session = self.sessions.scope()?;
        get_record::<T>(&session, id)
    }

    fn create(&self, record: &T) -> RepoResult<T> {
        let session = self.sessions.scope()?;
        session.execute(&insert_sql::<T>(), params_from_iter(bind_record(record)))?;

        // Return the persisted row, not the caller's copy, so generated
        // fields and mapping normalization are visible to the caller.
        let id = record.id();
        get_record::<T>(&session, &id)?.ok_or_else(|| RepoError::InvalidData(format!(
            "{} row {} missing immediately after insert",
            T::TABLE,
            id
        )))
    }

    fn replace(&self, record: &T) -> RepoResult<()> {
        let session = self.sessions.scope()?;
        let changed = session.execute(&update_sql::<T>(), params_from_iter(bind_record(record)))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: T::TABLE,
                id: record.id().to_string(),
            });
        }

        Ok(())
    }

    fn upsert(&self, record: &T) -> RepoResult<()> {
        let session = self.sessions.scope()?;
        session.execute(&upsert_sql::<T>(), params_from_iter(bind_record(record)))?;
        Ok(())
    }

    fn delete(&self, record: &T) -> RepoResult<()> {
        let session = self.sessions.scope()?;
        session.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", T::TABLE),
            [record.id().to_string()],
        )?;
        Ok(())
    }
}

fn get_record<T: TableRecord>(conn: &Connection, id: &T::Id) -> RepoResult<Option<T>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, {} FROM {} WHERE id = ?1;",
        T::COLUMNS.join(", "),
        T::TABLE
    ))?;

    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(T::from_row(row)?));
    }

    Ok(None)
}

fn bind_record<T: TableRecord>(record: &T) -> Vec<Value> {
    let mut values = Vec::with_capacity(T::COLUMNS.len() + 1);
    values.push(Value::Text(record.id().to_string()));
    values.extend(record.values());
    values
}

fn insert_sql<T: TableRecord>() -> String {
    let placeholders = (0..T::COLUMNS.len())
        .map(|index| format!("?{}", index + 2))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} (id, {}) VALUES (?1, {});",
        T::TABLE,
        T::COLUMNS.join(", "),
        placeholders
    )
}

fn update_sql<T: TableRecord>() -> String {
    let assignments = T::COLUMNS
        .iter()
        .enumerate()
        .map(|(index, column)| format!("{column} = ?{}", index + 2))
        .collect::<Vec<_>>()
        .join(", ");
    format!("UPDATE {} SET {} WHERE id = ?1;", T::TABLE, assignments)
}

fn upsert_sql<T: TableRecord>() -> String {
    let assignments = T::COLUMNS
        .iter()
        .map(|column| format!("{column} = excluded.{column}"))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (0..T::COLUMNS.len())
        .map(|index| format!("?{}", index + 2))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} (id, {}) VALUES (?1, {}) ON CONFLICT(id) DO UPDATE SET {};",
        T::TABLE,
        T::COLUMNS.join(", "),
        placeholders,
        assignments
    )
}
