//! Append-only audit event repository.
//!
//! # Responsibility
//! - Record audit facts and read them back; nothing else.
//!
//! # Invariants
//! - No replace/delete surface exists here: the audit log is append-only by
//!   construction, not by convention.

use crate::db::SessionFactory;
use crate::model::event::{Event, EventId};
use crate::model::org::OrganizationId;
use crate::repo::table::{Repository, SqliteRepository, TableRecord};
use crate::repo::RepoResult;
use rusqlite::params_from_iter;
use rusqlite::types::Value;

/// SQLite-backed audit event store.
pub struct EventRepository {
    base: SqliteRepository<Event>,
    sessions: SessionFactory,
}

impl EventRepository {
    pub fn new(sessions: SessionFactory) -> Self {
        Self {
            base: SqliteRepository::new(sessions.clone()),
            sessions,
        }
    }

    /// Records one audit fact and returns it as persisted.
    pub fn append(&self, event: &Event) -> RepoResult<Event> {
        self.base.create(event)
    }

    pub fn get_by_id(&self, id: &EventId) -> RepoResult<Option<Event>> {
        self.base.get_by_id(id)
    }

    /// Lists an organization's events newest first, optionally capped.
    pub fn list_by_organization(
        &self,
        organization_id: OrganizationId,
        limit: Option<u32>,
    ) -> RepoResult<Vec<Event>> {
        let mut sql = format!(
            "SELECT id, {} FROM events
             WHERE organization_id = ?
             ORDER BY occurred_at DESC, id DESC",
            Event::COLUMNS.join(", ")
        );
        let mut bind_values: Vec<Value> = vec![Value::Text(organization_id.to_string())];

        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let session = self.sessions.scope()?;
        let mut stmt = session.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(Event::from_row(row)?);
        }

        Ok(events)
    }
}
