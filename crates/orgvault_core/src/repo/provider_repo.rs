//! Provider repository: generic CRUD plus provider-specific reads.
//!
//! # Responsibility
//! - Bind the generic repository to the provider table.
//! - Provide principal-scoped search and the bulk ability projection.
//!
//! # Invariants
//! - Both search branches share the same ordering/pagination suffix:
//!   results order by `created_at DESC` before `LIMIT`/`OFFSET` applies.
//! - The name filter is a case-sensitive substring match; a blank pattern
//!   matches every provider.

use crate::db::SessionFactory;
use crate::model::provider::{Provider, ProviderAbility};
use crate::repo::records::{read_bool, read_uuid};
use crate::repo::table::{Repository, SqliteRepository, TableRecord};
use crate::repo::RepoResult;
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use uuid::Uuid;

const PROVIDER_SELECT_SQL: &str =
    "SELECT p.id, p.name, p.enabled, p.use_events, p.created_at FROM providers p";

// Shared by both search branches so their ordering contracts cannot drift.
const SEARCH_SUFFIX_SQL: &str = " ORDER BY p.created_at DESC LIMIT ? OFFSET ?";

/// SQLite-backed provider repository.
pub struct ProviderRepository {
    base: SqliteRepository<Provider>,
    sessions: SessionFactory,
}

impl ProviderRepository {
    pub fn new(sessions: SessionFactory) -> Self {
        Self {
            base: SqliteRepository::new(sessions.clone()),
            sessions,
        }
    }

    /// Searches providers by name substring, optionally restricted to those
    /// a principal (matched by exact email) is a member of.
    ///
    /// Ordering is newest-first by creation time; `skip`/`take` paginate the
    /// ordered result.
    pub fn search(
        &self,
        name_pattern: &str,
        principal_email: &str,
        skip: u32,
        take: u32,
    ) -> RepoResult<Vec<Provider>> {
        let name_pattern = name_pattern.trim();
        let principal_email = principal_email.trim();

        let mut sql = String::from(PROVIDER_SELECT_SQL);
        let mut bind_values: Vec<Value> = Vec::new();

        if principal_email.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(name_filter(name_pattern, &mut bind_values));
        } else {
            sql.push_str(
                " INNER JOIN provider_members pm ON pm.provider_id = p.id
                  INNER JOIN users u ON u.id = pm.user_id
                  WHERE ",
            );
            sql.push_str(name_filter(name_pattern, &mut bind_values));
            sql.push_str(" AND u.email = ?");
            bind_values.push(Value::Text(principal_email.to_string()));
        }

        sql.push_str(SEARCH_SUFFIX_SQL);
        bind_values.push(Value::Integer(i64::from(take)));
        bind_values.push(Value::Integer(i64::from(skip)));

        let session = self.sessions.scope()?;
        let mut stmt = session.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut providers = Vec::new();
        while let Some(row) = rows.next()? {
            providers.push(Provider::from_row(row)?);
        }

        Ok(providers)
    }

    /// Returns the capability projection for every provider, unfiltered.
    pub fn get_many_abilities(&self) -> RepoResult<Vec<ProviderAbility>> {
        let session = self.sessions.scope()?;
        let mut stmt = session.prepare("SELECT id, enabled, use_events FROM providers;")?;
        let mut rows = stmt.query([])?;
        let mut abilities = Vec::new();
        while let Some(row) = rows.next()? {
            abilities.push(ProviderAbility {
                id: read_uuid(row, "providers", "id")?,
                enabled: read_bool(row, "providers", "enabled")?,
                use_events: read_bool(row, "providers", "use_events")?,
            });
        }

        Ok(abilities)
    }
}

impl Repository<Provider> for ProviderRepository {
    fn get_by_id(&self, id: &Uuid) -> RepoResult<Option<Provider>> {
        self.base.get_by_id(id)
    }

    fn create(&self, record: &Provider) -> RepoResult<Provider> {
        self.base.create(record)
    }

    fn replace(&self, record: &Provider) -> RepoResult<()> {
        self.base.replace(record)
    }

    fn upsert(&self, record: &Provider) -> RepoResult<()> {
        self.base.upsert(record)
    }

    fn delete(&self, record: &Provider) -> RepoResult<()> {
        self.base.delete(record)
    }
}

fn name_filter(name_pattern: &str, bind_values: &mut Vec<Value>) -> &'static str {
    if name_pattern.is_empty() {
        "1 = 1"
    } else {
        // instr is byte-wise and therefore case-sensitive, unlike LIKE.
        bind_values.push(Value::Text(name_pattern.to_string()));
        "instr(p.name, ?) > 0"
    }
}
